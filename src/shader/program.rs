use crate::foundation::error::RaysResult;
use crate::render::{DrawingContext, ProgramId, UniformLocation};
use crate::shader::source::{ProgramSource, ShaderVariant};
use crate::shader::uniforms::{FrameUniforms, UniformSlot};

/// The ray program compiled on one context, with its uniform locations resolved.
///
/// Locations are looked up once at build time. Slots the program does not declare are left
/// out and never uploaded.
#[derive(Debug)]
pub(crate) struct ShaderProgram {
    id: ProgramId,
    variant: ShaderVariant,
    locations: Vec<(UniformSlot, UniformLocation)>,
}

impl ShaderProgram {
    #[tracing::instrument(skip(ctx), fields(backend = ctx.backend_name()))]
    pub(crate) fn build(ctx: &mut dyn DrawingContext, variant: ShaderVariant) -> RaysResult<Self> {
        Self::build_from(ctx, &ProgramSource::rays(variant), variant)
    }

    pub(crate) fn build_from(
        ctx: &mut dyn DrawingContext,
        source: &ProgramSource,
        variant: ShaderVariant,
    ) -> RaysResult<Self> {
        let id = ctx.compile_program(source)?;
        let mut locations = Vec::with_capacity(UniformSlot::ALL.len());
        for slot in UniformSlot::ALL {
            match ctx.uniform_location(id, slot.name()) {
                Some(loc) => locations.push((slot, loc)),
                None => tracing::debug!(uniform = slot.name(), "uniform not declared, skipping"),
            }
        }
        Ok(Self {
            id,
            variant,
            locations,
        })
    }

    pub(crate) fn variant(&self) -> ShaderVariant {
        self.variant
    }

    /// Stage every resolved uniform from `uniforms`.
    pub(crate) fn upload(
        &self,
        ctx: &mut dyn DrawingContext,
        uniforms: &FrameUniforms,
    ) -> RaysResult<()> {
        for &(slot, loc) in &self.locations {
            ctx.set_uniform(loc, uniforms.get(slot))?;
        }
        Ok(())
    }

    pub(crate) fn draw(&self, ctx: &mut dyn DrawingContext) -> RaysResult<()> {
        ctx.draw(self.id)
    }

    pub(crate) fn release(self, ctx: &mut dyn DrawingContext) {
        ctx.delete_program(self.id);
    }

    #[cfg(test)]
    pub(crate) fn resolved(&self) -> usize {
        self.locations.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shader/program.rs"]
mod tests;
