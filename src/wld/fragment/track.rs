use glam::{Quat, Vec3};

use crate::wld::bytes::Cursor;
use crate::wld::fragment::{DecodeContext, DecodeFragment};
use crate::wld::{FragmentRef, Result};

const TRACK_DEF_COMPACT_FRAMES: u32 = 1 << 3;

const TRACK_HAS_SLEEP: u32 = 1 << 0;
const TRACK_REVERSE: u32 = 1 << 1;
const TRACK_INTERPOLATE: u32 = 1 << 3;

/// One frame of bone motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoneTransform {
	/// Translation relative to the parent bone.
	pub translation: Vec3,
	/// Rotation relative to the parent bone.
	pub rotation: Quat,
	/// Uniform scale.
	pub scale: f32,
}

impl Default for BoneTransform {
	fn default() -> Self {
		Self {
			translation: Vec3::ZERO,
			rotation: Quat::IDENTITY,
			scale: 1.0,
		}
	}
}

impl BoneTransform {
	fn read_compact(cursor: &mut Cursor<'_>) -> Result<Self> {
		let rot_w = cursor.read_i16_le()?;
		let rot_x = cursor.read_i16_le()?;
		let rot_y = cursor.read_i16_le()?;
		let rot_z = cursor.read_i16_le()?;
		let shift_x = cursor.read_i16_le()?;
		let shift_y = cursor.read_i16_le()?;
		let shift_z = cursor.read_i16_le()?;
		let shift_denominator = cursor.read_i16_le()?;

		let translation = if shift_denominator != 0 {
			Vec3::new(f32::from(shift_x), f32::from(shift_y), f32::from(shift_z)) / f32::from(shift_denominator)
		} else {
			Vec3::ZERO
		};

		Ok(Self {
			translation,
			rotation: normalized(Quat::from_xyzw(f32::from(rot_x), f32::from(rot_y), f32::from(rot_z), f32::from(rot_w))),
			scale: f32::from(shift_denominator) / 256.0,
		})
	}

	fn read_float(cursor: &mut Cursor<'_>) -> Result<Self> {
		let rot_w = cursor.read_f32_le()?;
		let rot_x = cursor.read_f32_le()?;
		let rot_y = cursor.read_f32_le()?;
		let rot_z = cursor.read_f32_le()?;
		let translation = cursor.read_vec3()?;
		let scale = cursor.read_f32_le()?;

		Ok(Self {
			translation,
			rotation: normalized(Quat::from_xyzw(rot_x, rot_y, rot_z, rot_w)),
			scale,
		})
	}
}

fn normalized(rotation: Quat) -> Quat {
	if rotation.length_squared() > f32::EPSILON {
		rotation.normalize()
	} else {
		Quat::IDENTITY
	}
}

/// Per-frame transform data for one bone (0x12).
#[derive(Debug, Clone, Default)]
pub struct TrackDefFragment {
	/// Raw flags word.
	pub flags: u32,
	/// Decoded frames.
	pub frames: Vec<BoneTransform>,
}

impl DecodeFragment for TrackDefFragment {
	fn decode(&mut self, cursor: &mut Cursor<'_>, _ctx: &DecodeContext<'_>) -> Result<()> {
		self.flags = cursor.read_u32_le()?;
		let count = cursor.read_count("frame")?;
		let compact = self.flags & TRACK_DEF_COMPACT_FRAMES != 0;
		for _ in 0..count {
			let frame = if compact {
				BoneTransform::read_compact(cursor)?
			} else {
				BoneTransform::read_float(cursor)?
			};
			self.frames.push(frame);
		}
		Ok(())
	}
}

/// Binding of a [`TrackDefFragment`] to a bone and animation by name (0x13).
#[derive(Debug, Clone, Default)]
pub struct TrackFragment {
	/// Resolved frame data.
	pub track_def: Option<FragmentRef>,
	/// Raw flags word.
	pub flags: u32,
	/// Delay between frames in milliseconds; zero when absent.
	pub frame_ms: u32,
}

impl TrackFragment {
	/// Whether playback runs backwards.
	pub fn is_reversed(&self) -> bool {
		self.flags & TRACK_REVERSE != 0
	}

	/// Whether frames are interpolated.
	pub fn interpolates(&self) -> bool {
		self.flags & TRACK_INTERPOLATE != 0
	}
}

impl DecodeFragment for TrackFragment {
	fn decode(&mut self, cursor: &mut Cursor<'_>, ctx: &DecodeContext<'_>) -> Result<()> {
		self.track_def = ctx.resolve_as::<TrackDefFragment>(cursor.read_i32_le()?);
		self.flags = cursor.read_u32_le()?;
		if self.flags & TRACK_HAS_SLEEP != 0 {
			self.frame_ms = cursor.read_u32_le()?;
		}
		Ok(())
	}
}
