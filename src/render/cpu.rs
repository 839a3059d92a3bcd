use crate::foundation::error::{RaysError, RaysResult};
use crate::render::programs::{ProgramTable, check_source};
use crate::render::{
    DrawingContext, FrameRGBA, ProgramId, RenderSettings, UniformLocation, premul_rgba8,
};
use crate::shader::kernel::render_premul_rgba8;
use crate::shader::layout::UniformLayout;
use crate::shader::source::ProgramSource;
use crate::shader::uniforms::{FrameUniforms, UniformSlot, UniformValue};

/// Software drawing context: runs the ray program per pixel into a `vello_cpu` pixmap.
pub struct CpuContext {
    settings: RenderSettings,
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
    programs: ProgramTable<()>,
    released: bool,
}

fn dims_u16(width: u32, height: u32) -> RaysResult<(u16, u16)> {
    let w: u16 = width
        .try_into()
        .map_err(|_| RaysError::context("buffer width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| RaysError::context("buffer height exceeds u16"))?;
    Ok((w, h))
}

impl CpuContext {
    /// Create a context with a `width` x `height` buffer.
    pub fn new(width: u32, height: u32, settings: RenderSettings) -> RaysResult<Self> {
        let (w, h) = dims_u16(width, height)?;
        Ok(Self {
            settings,
            width: w,
            height: h,
            pixmap: vello_cpu::Pixmap::new(w, h),
            programs: ProgramTable::default(),
            released: false,
        })
    }

    fn ensure_live(&self) -> RaysResult<()> {
        if self.released {
            return Err(RaysError::context("cpu context was released"));
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn program_count(&self) -> usize {
        self.programs.len()
    }
}

/// Rebuild the uniform snapshot from a staged uniform block. Members the block lacks stay zero.
fn decode_uniforms(layout: &UniformLayout, bytes: &[u8]) -> FrameUniforms {
    let mut out = FrameUniforms::default();
    for slot in UniformSlot::ALL {
        let Some(field) = layout.field(slot.name()) else {
            continue;
        };
        let Some(value) = bytes
            .get(field.offset as usize..)
            .and_then(|b| UniformValue::read_le(field.ty, b))
        else {
            continue;
        };
        // Type mismatches are impossible here: `set_uniform` checked them on the way in.
        let _ = out.set(slot, value);
    }
    out
}

fn composite_over(data: &mut [u8], bg: [u8; 4]) {
    for px in data.chunks_exact_mut(4) {
        let inv = 255 - u16::from(px[3]);
        for (c, b) in px.iter_mut().zip(bg) {
            *c = (u16::from(*c) + (u16::from(b) * inv + 127) / 255).min(255) as u8;
        }
    }
}

impl DrawingContext for CpuContext {
    fn backend_name(&self) -> &'static str {
        "cpu"
    }

    fn compile_program(&mut self, source: &ProgramSource) -> RaysResult<ProgramId> {
        self.ensure_live()?;
        let checked = check_source(source)?;
        Ok(self.programs.insert(checked, ()))
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        self.programs.location(program, name)
    }

    fn set_uniform(&mut self, location: UniformLocation, value: UniformValue) -> RaysResult<()> {
        self.ensure_live()?;
        self.programs.set(location, value)
    }

    fn resize(&mut self, width: u32, height: u32) -> RaysResult<()> {
        self.ensure_live()?;
        let (w, h) = dims_u16(width, height)?;
        if (w, h) != (self.width, self.height) {
            self.width = w;
            self.height = h;
            self.pixmap = vello_cpu::Pixmap::new(w, h);
        }
        Ok(())
    }

    fn buffer_size(&self) -> (u32, u32) {
        (u32::from(self.width), u32::from(self.height))
    }

    fn max_dimension(&self) -> u32 {
        u32::from(u16::MAX)
    }

    fn draw(&mut self, program: ProgramId) -> RaysResult<()> {
        self.ensure_live()?;
        let staged = self.programs.get(program)?;
        let uniforms = decode_uniforms(&staged.layout, &staged.staging);
        let (w, h) = self.buffer_size();
        let data = self.pixmap.data_as_u8_slice_mut();
        render_premul_rgba8(&uniforms, staged.variant, w, h, data)?;
        if let Some([r, g, b, a]) = self.settings.clear_rgba {
            composite_over(data, premul_rgba8(r, g, b, a));
        }
        Ok(())
    }

    fn read_pixels(&mut self) -> RaysResult<FrameRGBA> {
        self.ensure_live()?;
        Ok(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn is_context_lost(&self) -> bool {
        self.released
    }

    fn delete_program(&mut self, program: ProgramId) {
        self.programs.remove(program);
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.programs.drain().for_each(drop);
        self.pixmap = vello_cpu::Pixmap::new(0, 0);
        self.released = true;
        tracing::debug!("cpu context released");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
