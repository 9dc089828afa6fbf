use crate::wld::bytes::Cursor;
use crate::wld::fragment::{BitmapInfoReference, DecodeContext, DecodeFragment};
use crate::wld::{FragmentRef, Result};

const MATERIAL_HAS_PAIR: u32 = 1 << 1;
const RENDER_METHOD_USER_DEFINED: u32 = 0x8000_0000;

/// Shading class derived from a material's render method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShaderKind {
	/// Not drawn; used for zone boundaries.
	#[default]
	Boundary,
	/// Opaque diffuse.
	Diffuse,
	/// Half-transparent.
	Transparent50,
	/// Masked and passable.
	TransparentMaskedPassable,
	/// Additive without lighting.
	TransparentAdditiveUnlit,
	/// Additive without lighting, drawn as sky.
	TransparentAdditiveUnlitSkydome,
	/// Alpha-masked.
	TransparentMasked,
	/// Additive.
	TransparentAdditive,
	/// Not drawn.
	Invisible,
	/// Render method this decoder does not classify.
	Unknown(u32),
}

impl ShaderKind {
	/// Classify a raw render method value.
	pub fn from_render_method(render_method: u32) -> Self {
		match render_method & !RENDER_METHOD_USER_DEFINED {
			0x00 => Self::Boundary,
			0x01 | 0x14 | 0x15 | 0x53 | 0x543 | 0x553 => Self::Diffuse,
			0x05 => Self::Transparent50,
			0x07 => Self::TransparentMaskedPassable,
			0x09 => Self::TransparentAdditiveUnlit,
			0x0B => Self::TransparentAdditiveUnlitSkydome,
			0x13 => Self::TransparentMasked,
			0x17 => Self::TransparentAdditive,
			0x10 | 0x4B => Self::Invisible,
			other => Self::Unknown(other),
		}
	}
}

/// Surface material (0x30).
#[derive(Debug, Clone, Default)]
pub struct Material {
	/// Raw flags word.
	pub flags: u32,
	/// Raw render method.
	pub render_method: u32,
	/// Shading class derived from `render_method`.
	pub shader: ShaderKind,
	/// Packed BGRA color.
	pub color: u32,
	/// Brightness multiplier.
	pub brightness: f32,
	/// Ambient scale.
	pub scaled_ambient: f32,
	/// Resolved [`BitmapInfoReference`].
	pub bitmap_info_reference: Option<FragmentRef>,
	/// Unknown pair, present when flag bit 1 is set.
	pub pair: Option<(u32, f32)>,
}

impl DecodeFragment for Material {
	fn decode(&mut self, cursor: &mut Cursor<'_>, ctx: &DecodeContext<'_>) -> Result<()> {
		self.flags = cursor.read_u32_le()?;
		self.render_method = cursor.read_u32_le()?;
		self.shader = ShaderKind::from_render_method(self.render_method);
		self.color = cursor.read_u32_le()?;
		self.brightness = cursor.read_f32_le()?;
		self.scaled_ambient = cursor.read_f32_le()?;
		self.bitmap_info_reference = ctx.resolve_as::<BitmapInfoReference>(cursor.read_i32_le()?);
		if self.flags & MATERIAL_HAS_PAIR != 0 {
			self.pair = Some((cursor.read_u32_le()?, cursor.read_f32_le()?));
		}
		Ok(())
	}
}

/// Ordered list of materials used by a mesh (0x31).
#[derive(Debug, Clone, Default)]
pub struct MaterialList {
	/// Raw flags word.
	pub flags: u32,
	/// Material slots; a slot is `None` when its reference did not resolve.
	pub materials: Vec<Option<FragmentRef>>,
}

impl DecodeFragment for MaterialList {
	fn decode(&mut self, cursor: &mut Cursor<'_>, ctx: &DecodeContext<'_>) -> Result<()> {
		self.flags = cursor.read_u32_le()?;
		let count = cursor.read_count("material")?;
		for _ in 0..count {
			self.materials.push(ctx.resolve_as::<Material>(cursor.read_i32_le()?));
		}
		Ok(())
	}
}
