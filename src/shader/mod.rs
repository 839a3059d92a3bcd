pub(crate) mod kernel;
pub(crate) mod layout;
pub(crate) mod program;
pub(crate) mod source;
pub(crate) mod uniforms;
