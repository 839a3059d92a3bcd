use std::collections::HashMap;

use crate::foundation::error::{RaysError, RaysResult};
use crate::render::{ProgramId, UniformLocation};
use crate::shader::layout::UniformLayout;
use crate::shader::source::{
    DISTORTION_FLAG, NOISE_FLAG, ProgramSource, ShaderVariant, bool_const, entry_point,
};
use crate::shader::uniforms::UniformValue;

/// Front-end checks every backend runs before building a program.
pub(crate) struct CheckedSource {
    pub(crate) layout: UniformLayout,
    pub(crate) variant: ShaderVariant,
}

pub(crate) fn check_source(source: &ProgramSource) -> RaysResult<CheckedSource> {
    for (stage, expected) in [
        ("@vertex", source.vertex_entry),
        ("@fragment", source.fragment_entry),
    ] {
        match entry_point(&source.wgsl, stage) {
            Some(found) if found == expected => {}
            Some(found) => {
                return Err(RaysError::shader(format!(
                    "{}: {stage} entry point is \"{found}\", expected \"{expected}\"",
                    source.label
                )));
            }
            None => {
                return Err(RaysError::shader(format!(
                    "{}: missing {stage} entry point \"{expected}\"",
                    source.label
                )));
            }
        }
    }
    let layout = UniformLayout::parse_wgsl(&source.wgsl)?;
    let variant = ShaderVariant {
        noise: bool_const(&source.wgsl, NOISE_FLAG).unwrap_or(false),
        distortion: bool_const(&source.wgsl, DISTORTION_FLAG).unwrap_or(false),
    };
    Ok(CheckedSource { layout, variant })
}

pub(crate) struct StagedProgram<P> {
    pub(crate) layout: UniformLayout,
    pub(crate) variant: ShaderVariant,
    /// Uniform block bytes as they will be uploaded on the next draw.
    pub(crate) staging: Vec<u8>,
    #[cfg_attr(not(feature = "gpu"), allow(dead_code))]
    pub(crate) payload: P,
}

/// Programs owned by one context, keyed by id, each with its own uniform staging block.
pub(crate) struct ProgramTable<P> {
    next_id: u32,
    programs: HashMap<ProgramId, StagedProgram<P>>,
}

impl<P> Default for ProgramTable<P> {
    fn default() -> Self {
        Self {
            next_id: 1,
            programs: HashMap::new(),
        }
    }
}

impl<P> ProgramTable<P> {
    pub(crate) fn insert(&mut self, checked: CheckedSource, payload: P) -> ProgramId {
        let id = ProgramId(self.next_id);
        self.next_id += 1;
        let staging = vec![0u8; checked.layout.size() as usize];
        self.programs.insert(
            id,
            StagedProgram {
                layout: checked.layout,
                variant: checked.variant,
                staging,
                payload,
            },
        );
        id
    }

    pub(crate) fn get(&self, id: ProgramId) -> RaysResult<&StagedProgram<P>> {
        self.programs
            .get(&id)
            .ok_or_else(|| RaysError::render(format!("program {} does not exist", id.0)))
    }

    pub(crate) fn location(&self, id: ProgramId, name: &str) -> Option<UniformLocation> {
        let field = self.programs.get(&id)?.layout.field(name)?;
        Some(UniformLocation {
            program: id,
            offset: field.offset,
            ty: field.ty,
        })
    }

    pub(crate) fn set(&mut self, loc: UniformLocation, value: UniformValue) -> RaysResult<()> {
        if value.ty() != loc.ty {
            return Err(RaysError::shader(format!(
                "uniform at offset {} is {:?}, got {:?}",
                loc.offset,
                loc.ty,
                value.ty()
            )));
        }
        let program = self
            .programs
            .get_mut(&loc.program)
            .ok_or_else(|| {
                RaysError::render(format!("program {} does not exist", loc.program.0))
            })?;
        let start = loc.offset as usize;
        let end = start + loc.ty.size() as usize;
        let dst = program
            .staging
            .get_mut(start..end)
            .ok_or_else(|| {
                RaysError::shader(format!("uniform range {start}..{end} out of block"))
            })?;
        value.write_le(dst);
        Ok(())
    }

    pub(crate) fn remove(&mut self, id: ProgramId) -> Option<StagedProgram<P>> {
        self.programs.remove(&id)
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = StagedProgram<P>> + '_ {
        self.programs.drain().map(|(_, p)| p)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.programs.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/programs.rs"]
mod tests;
