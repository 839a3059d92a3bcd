//! Drawing contexts: the narrow slice of a GPU API the ray effect needs.

use crate::foundation::error::RaysResult;
use crate::shader::layout::UniformType;
use crate::shader::source::ProgramSource;
use crate::shader::uniforms::UniformValue;

pub(crate) mod cpu;
#[cfg(feature = "gpu")]
pub(crate) mod gpu;
pub(crate) mod programs;

/// Read-back pixels of the drawing buffer.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Width in physical pixels.
    pub width: u32,
    /// Height in physical pixels.
    pub height: u32,
    /// Tightly packed RGBA8 rows, top row first.
    pub data: Vec<u8>,
    /// Whether color channels are premultiplied by alpha.
    pub premultiplied: bool,
}

/// Handle to a program compiled by one [`DrawingContext`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProgramId(pub(crate) u32);

/// Resolved location of one uniform: a typed byte offset in the program's uniform block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UniformLocation {
    pub(crate) program: ProgramId,
    pub(crate) offset: u32,
    pub(crate) ty: UniformType,
}

impl UniformLocation {
    /// Declared type of the uniform.
    pub fn ty(&self) -> UniformType {
        self.ty
    }
}

/// A drawing context bound to one surface.
///
/// Implementations own every resource they hand out; `release` frees all of them and must be
/// safe to call on a lost context and more than once.
pub trait DrawingContext {
    /// Short backend name for diagnostics.
    fn backend_name(&self) -> &'static str;

    /// Compile and link a vertex/fragment program.
    fn compile_program(&mut self, source: &ProgramSource) -> RaysResult<ProgramId>;

    /// Location of the named uniform, or `None` when the program does not declare it.
    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation>;

    /// Stage a value for the next draw. Fails when the value's type does not match.
    fn set_uniform(&mut self, location: UniformLocation, value: UniformValue) -> RaysResult<()>;

    /// Resize the drawing buffer (and viewport) in physical pixels.
    fn resize(&mut self, width: u32, height: u32) -> RaysResult<()>;

    /// Current drawing-buffer size.
    fn buffer_size(&self) -> (u32, u32);

    /// Largest buffer side the backend supports.
    fn max_dimension(&self) -> u32;

    /// Draw one full-surface pass with `program`.
    fn draw(&mut self, program: ProgramId) -> RaysResult<()>;

    /// Copy the drawing buffer back to memory.
    fn read_pixels(&mut self) -> RaysResult<FrameRGBA>;

    /// Whether the underlying device has gone away.
    fn is_context_lost(&self) -> bool;

    /// Free one program. Unknown ids are ignored.
    fn delete_program(&mut self, program: ProgramId);

    /// Free everything this context owns.
    fn release(&mut self);
}

/// Source of drawing contexts for newly mounted surfaces.
pub trait ContextProvider {
    /// Try to obtain a context with a `width` x `height` buffer.
    ///
    /// `Ok(None)` means the environment has no context to give (the host returned null);
    /// `Err` means creation itself failed. Both leave the surface inert.
    fn acquire(&mut self, width: u32, height: u32) -> RaysResult<Option<Box<dyn DrawingContext>>>;
}

/// Built-in drawing backends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
    /// Software rasterizer on a `vello_cpu` pixmap.
    Cpu,
    /// `wgpu` offscreen target.
    #[cfg(feature = "gpu")]
    Gpu,
}

/// Settings shared by the built-in backends.
#[derive(Clone, Debug, Default)]
pub struct RenderSettings {
    /// Color the buffer is cleared to before each draw (straight RGBA8).
    pub clear_rgba: Option<[u8; 4]>,
}

/// Create a context of the given kind.
///
/// Returns `Ok(None)` when the backend has no device to offer.
#[tracing::instrument(skip(settings))]
pub fn create_context(
    kind: BackendKind,
    width: u32,
    height: u32,
    settings: &RenderSettings,
) -> RaysResult<Option<Box<dyn DrawingContext>>> {
    match kind {
        BackendKind::Cpu => Ok(Some(Box::new(cpu::CpuContext::new(
            width,
            height,
            settings.clone(),
        )?))),
        #[cfg(feature = "gpu")]
        BackendKind::Gpu => Ok(gpu::WgpuContext::new(width, height, settings.clone())?
            .map(|ctx| Box::new(ctx) as Box<dyn DrawingContext>)),
    }
}

/// [`ContextProvider`] backed by one of the built-in backends.
#[derive(Clone, Debug)]
pub struct BackendProvider {
    kind: BackendKind,
    settings: RenderSettings,
}

impl BackendProvider {
    /// Provider for `kind` with default settings.
    pub fn new(kind: BackendKind) -> Self {
        Self {
            kind,
            settings: RenderSettings::default(),
        }
    }

    /// Override the backend settings.
    pub fn with_settings(mut self, settings: RenderSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Backend this provider creates.
    pub fn kind(&self) -> BackendKind {
        self.kind
    }
}

impl ContextProvider for BackendProvider {
    fn acquire(&mut self, width: u32, height: u32) -> RaysResult<Option<Box<dyn DrawingContext>>> {
        create_context(self.kind, width, height, &self.settings)
    }
}

pub(crate) fn premul_rgba8(r: u8, g: u8, b: u8, a: u8) -> [u8; 4] {
    let mul = |c: u8| ((u16::from(c) * u16::from(a) + 127) / 255) as u8;
    [mul(r), mul(g), mul(b), a]
}

#[cfg(test)]
#[path = "../tests/unit/render/backend.rs"]
mod tests;
