use crate::foundation::error::{RaysError, RaysResult};
use crate::foundation::math::align_to;

/// Scalar and vector types allowed in the uniform block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UniformType {
    /// `f32`
    F32,
    /// `vec2<f32>`
    Vec2,
    /// `vec3<f32>`
    Vec3,
    /// `vec4<f32>`
    Vec4,
}

impl UniformType {
    /// Size in bytes.
    pub fn size(self) -> u32 {
        match self {
            UniformType::F32 => 4,
            UniformType::Vec2 => 8,
            UniformType::Vec3 => 12,
            UniformType::Vec4 => 16,
        }
    }

    /// Alignment in the uniform address space.
    pub fn align(self) -> u32 {
        match self {
            UniformType::F32 => 4,
            UniformType::Vec2 => 8,
            UniformType::Vec3 | UniformType::Vec4 => 16,
        }
    }

    fn from_wgsl(ty: &str) -> Option<Self> {
        match ty {
            "f32" => Some(UniformType::F32),
            "vec2<f32>" | "vec2f" => Some(UniformType::Vec2),
            "vec3<f32>" | "vec3f" => Some(UniformType::Vec3),
            "vec4<f32>" | "vec4f" => Some(UniformType::Vec4),
            _ => None,
        }
    }
}

/// One member of the uniform block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UniformField {
    /// Member name.
    pub name: String,
    /// Member type.
    pub ty: UniformType,
    /// Byte offset inside the block.
    pub offset: u32,
}

/// Byte layout of a program's uniform block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UniformLayout {
    fields: Vec<UniformField>,
    size: u32,
}

impl UniformLayout {
    /// Lay out `members` in order using uniform address-space rules.
    pub fn from_members<'a>(
        members: impl IntoIterator<Item = (&'a str, UniformType)>,
    ) -> RaysResult<Self> {
        let mut fields = Vec::<UniformField>::new();
        let mut cursor = 0u32;
        let mut struct_align = 16u32;
        for (name, ty) in members {
            if fields.iter().any(|f| f.name == name) {
                return Err(RaysError::shader(format!("uniform \"{name}\" declared twice")));
            }
            let offset = align_to(cursor, ty.align());
            cursor = offset + ty.size();
            struct_align = struct_align.max(ty.align());
            fields.push(UniformField {
                name: name.to_owned(),
                ty,
                offset,
            });
        }
        if fields.is_empty() {
            return Err(RaysError::shader("uniform block has no members"));
        }
        Ok(Self {
            fields,
            size: align_to(cursor, struct_align),
        })
    }

    /// Extract the layout of the struct bound with `var<uniform>` in a WGSL module.
    pub fn parse_wgsl(wgsl: &str) -> RaysResult<Self> {
        let mut bindings = wgsl
            .lines()
            .map(|l| l.split("//").next().unwrap_or_default())
            .filter(|l| l.contains("var<uniform>"));
        let decl = bindings
            .next()
            .ok_or_else(|| RaysError::shader("program declares no uniform block"))?;
        if bindings.next().is_some() {
            return Err(RaysError::shader("program declares more than one uniform block"));
        }
        let struct_name = decl
            .split(':')
            .nth(1)
            .map(|t| t.trim().trim_end_matches(';').trim())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| RaysError::shader(format!("malformed uniform binding: {decl}")))?;

        let header = format!("struct {struct_name}");
        let start = wgsl
            .find(&header)
            .ok_or_else(|| RaysError::shader(format!("uniform struct {struct_name} not found")))?;
        let body_start = wgsl[start..]
            .find('{')
            .map(|i| start + i + 1)
            .ok_or_else(|| RaysError::shader(format!("struct {struct_name} has no body")))?;
        let body_end = wgsl[body_start..]
            .find('}')
            .map(|i| body_start + i)
            .ok_or_else(|| RaysError::shader(format!("struct {struct_name} is not closed")))?;

        let mut members = Vec::new();
        for raw in wgsl[body_start..body_end].split(',') {
            let member = raw.trim();
            if member.is_empty() {
                continue;
            }
            if member.starts_with('@') {
                return Err(RaysError::shader(format!(
                    "member attributes are not supported in uniform blocks: {member}"
                )));
            }
            let (name, ty) = member
                .split_once(':')
                .ok_or_else(|| RaysError::shader(format!("malformed struct member: {member}")))?;
            let ty_name = ty.trim();
            let ty = UniformType::from_wgsl(ty_name).ok_or_else(|| {
                RaysError::shader(format!("unsupported uniform type \"{ty_name}\""))
            })?;
            members.push((name.trim(), ty));
        }
        Self::from_members(members)
    }

    /// All members in declaration order.
    pub fn fields(&self) -> &[UniformField] {
        &self.fields
    }

    /// Look up a member by name.
    pub fn field(&self, name: &str) -> Option<&UniformField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Total block size in bytes, padded to the struct alignment.
    pub fn size(&self) -> u32 {
        self.size
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shader/layout.rs"]
mod tests;
