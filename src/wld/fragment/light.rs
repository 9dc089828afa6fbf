use glam::Vec3;

use crate::wld::bytes::Cursor;
use crate::wld::fragment::{Color, DecodeContext, DecodeFragment};
use crate::wld::{FragmentRef, Result};

const LIGHT_HAS_CURRENT_FRAME: u32 = 1 << 0;
const LIGHT_HAS_SLEEP: u32 = 1 << 1;
const LIGHT_HAS_LEVELS: u32 = 1 << 2;
const LIGHT_HAS_COLORS: u32 = 1 << 4;

/// Light definition (0x1B).
#[derive(Debug, Clone, Default)]
pub struct LightSource {
	/// Raw flags word.
	pub flags: u32,
	/// Declared frame count.
	pub frame_count: usize,
	/// Current frame, when present.
	pub current_frame: Option<u32>,
	/// Delay between frames in milliseconds, when present.
	pub sleep_ms: Option<u32>,
	/// Per-frame intensity, when present.
	pub levels: Vec<f32>,
	/// Per-frame RGB color, when present.
	pub colors: Vec<Vec3>,
}

impl DecodeFragment for LightSource {
	fn decode(&mut self, cursor: &mut Cursor<'_>, _ctx: &DecodeContext<'_>) -> Result<()> {
		self.flags = cursor.read_u32_le()?;
		self.frame_count = cursor.read_count("light frame")?;
		if self.flags & LIGHT_HAS_CURRENT_FRAME != 0 {
			self.current_frame = Some(cursor.read_u32_le()?);
		}
		if self.flags & LIGHT_HAS_SLEEP != 0 {
			self.sleep_ms = Some(cursor.read_u32_le()?);
		}
		if self.flags & LIGHT_HAS_LEVELS != 0 {
			for _ in 0..self.frame_count {
				self.levels.push(cursor.read_f32_le()?);
			}
		}
		if self.flags & LIGHT_HAS_COLORS != 0 {
			for _ in 0..self.frame_count {
				self.colors.push(cursor.read_vec3()?);
			}
		}
		Ok(())
	}
}

/// Reference to a [`LightSource`] (0x1C).
#[derive(Debug, Clone, Default)]
pub struct LightSourceReference {
	/// Resolved light definition.
	pub light_source: Option<FragmentRef>,
	/// Raw flags word.
	pub flags: u32,
}

impl DecodeFragment for LightSourceReference {
	fn decode(&mut self, cursor: &mut Cursor<'_>, ctx: &DecodeContext<'_>) -> Result<()> {
		self.light_source = ctx.resolve_as::<LightSource>(cursor.read_i32_le()?);
		self.flags = cursor.read_u32_le()?;
		Ok(())
	}
}

/// Light placed in the world (0x28).
#[derive(Debug, Clone, Default)]
pub struct LightInstance {
	/// Resolved [`LightSourceReference`].
	pub light_reference: Option<FragmentRef>,
	/// Raw flags word.
	pub flags: u32,
	/// World position.
	pub position: Vec3,
	/// Falloff radius.
	pub radius: f32,
}

impl DecodeFragment for LightInstance {
	fn decode(&mut self, cursor: &mut Cursor<'_>, ctx: &DecodeContext<'_>) -> Result<()> {
		self.light_reference = ctx.resolve_as::<LightSourceReference>(cursor.read_i32_le()?);
		self.flags = cursor.read_u32_le()?;
		self.position = cursor.read_vec3()?;
		self.radius = cursor.read_f32_le()?;
		Ok(())
	}
}

/// Light applied to a set of BSP regions (0x2A).
#[derive(Debug, Clone, Default)]
pub struct AmbientLight {
	/// Resolved [`LightSourceReference`].
	pub light_reference: Option<FragmentRef>,
	/// Raw flags word.
	pub flags: u32,
	/// Zero-based BSP region indices.
	pub regions: Vec<u32>,
}

impl DecodeFragment for AmbientLight {
	fn decode(&mut self, cursor: &mut Cursor<'_>, ctx: &DecodeContext<'_>) -> Result<()> {
		self.light_reference = ctx.resolve_as::<LightSourceReference>(cursor.read_i32_le()?);
		self.flags = cursor.read_u32_le()?;
		let count = cursor.read_count("ambient light region")?;
		for _ in 0..count {
			self.regions.push(cursor.read_u32_le()?);
		}
		Ok(())
	}
}

/// Zone-wide ambient color (0x35).
#[derive(Debug, Clone, Default)]
pub struct GlobalAmbientLight {
	/// Ambient color.
	pub color: Color,
}

impl DecodeFragment for GlobalAmbientLight {
	fn decode(&mut self, cursor: &mut Cursor<'_>, _ctx: &DecodeContext<'_>) -> Result<()> {
		self.color = Color::from_bgra(cursor.read_u32_le()?);
		Ok(())
	}
}
