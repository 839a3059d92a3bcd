pub(crate) mod clock;
pub(crate) mod pointer;
pub(crate) mod scheduler;
