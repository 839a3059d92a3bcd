use crate::foundation::core::HostContainer;
use crate::foundation::error::{RaysError, RaysResult};
use crate::render::{ContextProvider, DrawingContext, FrameRGBA};
use crate::shader::program::ShaderProgram;
use crate::shader::source::ShaderVariant;
use crate::shader::uniforms::FrameUniforms;
use crate::surface::{SurfaceElement, SurfaceOpts, SurfaceState, buffer_dims};

/// What a draw request did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DrawStatus {
    Drawn,
    /// The context reported loss before drawing; the surface is now `Lost`.
    Lost,
}

/// Owns the element, the drawing context, and the program compiled on it.
///
/// Teardown order is fixed: program first, then context.
pub(crate) struct SurfaceManager {
    opts: SurfaceOpts,
    state: SurfaceState,
    container: HostContainer,
    element: Option<SurfaceElement>,
    context: Option<Box<dyn DrawingContext>>,
    program: Option<ShaderProgram>,
}

impl SurfaceManager {
    pub(crate) fn new(opts: SurfaceOpts) -> Self {
        Self {
            opts,
            state: SurfaceState::Unattached,
            container: HostContainer::new(0.0, 0.0),
            element: None,
            context: None,
            program: None,
        }
    }

    pub(crate) fn state(&self) -> SurfaceState {
        self.state
    }

    pub(crate) fn container(&self) -> &HostContainer {
        &self.container
    }

    pub(crate) fn element(&self) -> Option<&SurfaceElement> {
        self.element.as_ref()
    }

    pub(crate) fn holds_context(&self) -> bool {
        self.context.is_some()
    }

    pub(crate) fn program_variant(&self) -> Option<ShaderVariant> {
        self.program.as_ref().map(ShaderProgram::variant)
    }

    /// Drawing-buffer size; the element's when no context is held.
    pub(crate) fn buffer_size(&self) -> (u32, u32) {
        match (&self.context, &self.element) {
            (Some(ctx), _) => ctx.buffer_size(),
            (None, Some(el)) => (el.buffer_width, el.buffer_height),
            (None, None) => (0, 0),
        }
    }

    fn backend_cap(&self) -> u32 {
        self.context
            .as_ref()
            .map_or(u32::MAX, |ctx| ctx.max_dimension())
    }

    fn sync_element(&mut self) {
        let (w, h) = buffer_dims(&self.container, &self.opts, self.backend_cap());
        if let Some(el) = self.element.as_mut() {
            el.css_size = self.container.size;
            el.buffer_width = w;
            el.buffer_height = h;
        }
    }

    /// Create the element for `container`; the surface then waits for a context.
    pub(crate) fn attach(&mut self, container: HostContainer, class_name: &str) {
        self.container = container;
        self.element = Some(SurfaceElement {
            class_name: class_name.to_owned(),
            css_size: container.size,
            buffer_width: 0,
            buffer_height: 0,
        });
        self.sync_element();
        self.state = SurfaceState::Acquiring;
    }

    pub(crate) fn set_class_name(&mut self, class_name: &str) {
        if let Some(el) = self.element.as_mut() {
            el.class_name = class_name.to_owned();
        }
    }

    /// Obtain a context and compile the program. Any failure leaves the surface `Inert`
    /// with nothing held.
    #[tracing::instrument(skip(self, provider))]
    pub(crate) fn acquire(
        &mut self,
        provider: &mut dyn ContextProvider,
        variant: ShaderVariant,
    ) -> RaysResult<()> {
        if self.state != SurfaceState::Acquiring {
            return Err(RaysError::context(format!(
                "cannot acquire a context while {:?}",
                self.state
            )));
        }
        let (w, h) = buffer_dims(&self.container, &self.opts, u32::MAX);
        let mut ctx = match provider.acquire(w, h) {
            Ok(Some(ctx)) => ctx,
            Ok(None) => {
                self.state = SurfaceState::Inert;
                return Err(RaysError::context("no drawing context available"));
            }
            Err(e) => {
                self.state = SurfaceState::Inert;
                return Err(e);
            }
        };

        let (cw, ch) = buffer_dims(&self.container, &self.opts, ctx.max_dimension());
        let built = ctx
            .resize(cw, ch)
            .and_then(|()| ShaderProgram::build(ctx.as_mut(), variant));
        match built {
            Ok(program) => {
                tracing::debug!(
                    backend = ctx.backend_name(),
                    width = cw,
                    height = ch,
                    "context acquired"
                );
                self.context = Some(ctx);
                self.program = Some(program);
                self.sync_element();
                self.state = SurfaceState::Active;
                Ok(())
            }
            Err(e) => {
                ctx.release();
                self.state = SurfaceState::Inert;
                Err(e)
            }
        }
    }

    /// Cheap path: new buffer size, same context and program.
    pub(crate) fn resize(&mut self, container: HostContainer) -> RaysResult<()> {
        self.container = container;
        self.sync_element();
        if let Some(ctx) = self.context.as_mut() {
            let (w, h) = buffer_dims(&self.container, &self.opts, ctx.max_dimension());
            if ctx.buffer_size() != (w, h) {
                ctx.resize(w, h)?;
            }
        }
        Ok(())
    }

    /// Replace the program with one compiled for `variant`.
    pub(crate) fn rebuild_program(&mut self, variant: ShaderVariant) -> RaysResult<()> {
        let ctx = self
            .context
            .as_mut()
            .ok_or_else(|| RaysError::context("no context to rebuild the program on"))?;
        if let Some(old) = self.program.take() {
            old.release(ctx.as_mut());
        }
        match ShaderProgram::build(ctx.as_mut(), variant) {
            Ok(program) => {
                self.program = Some(program);
                Ok(())
            }
            Err(e) => {
                self.release_resources();
                self.state = SurfaceState::Inert;
                Err(e)
            }
        }
    }

    pub(crate) fn is_context_lost(&self) -> bool {
        self.context
            .as_ref()
            .is_some_and(|ctx| ctx.is_context_lost())
    }

    /// Upload `uniforms` and draw one frame.
    pub(crate) fn draw(&mut self, uniforms: &FrameUniforms) -> RaysResult<DrawStatus> {
        if self.is_context_lost() {
            self.lose();
            return Ok(DrawStatus::Lost);
        }
        let (Some(ctx), Some(program)) = (self.context.as_mut(), self.program.as_ref()) else {
            return Err(RaysError::render(format!(
                "draw requested while {:?}",
                self.state
            )));
        };
        program.upload(ctx.as_mut(), uniforms)?;
        program.draw(ctx.as_mut())?;
        Ok(DrawStatus::Drawn)
    }

    pub(crate) fn read_pixels(&mut self) -> RaysResult<FrameRGBA> {
        match self.context.as_mut() {
            Some(ctx) if self.state == SurfaceState::Active => ctx.read_pixels(),
            _ => Err(RaysError::render(format!(
                "no pixels to read while {:?}",
                self.state
            ))),
        }
    }

    fn release_resources(&mut self) {
        let program = self.program.take();
        if let Some(mut ctx) = self.context.take() {
            if let Some(program) = program {
                program.release(ctx.as_mut());
            }
            ctx.release();
        }
    }

    /// The context went away: drop every handle and wait for a restore.
    pub(crate) fn lose(&mut self) {
        if matches!(self.state, SurfaceState::Active | SurfaceState::Acquiring) {
            self.release_resources();
            self.state = SurfaceState::Lost;
        }
    }

    /// Leave `Lost` and wait for a fresh context.
    pub(crate) fn begin_restore(&mut self) -> bool {
        if self.state == SurfaceState::Lost {
            self.state = SurfaceState::Acquiring;
            true
        } else {
            false
        }
    }

    /// Stop using the current context after a failed frame.
    pub(crate) fn fail(&mut self) {
        self.release_resources();
        if self.state != SurfaceState::TornDown {
            self.state = SurfaceState::Inert;
        }
    }

    /// Release the program, then the context, then remove the element.
    pub(crate) fn teardown(&mut self) {
        self.release_resources();
        self.element = None;
        if self.state != SurfaceState::Unattached {
            self.state = SurfaceState::TornDown;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/manager.rs"]
mod tests;
