use crate::wld::bytes::Cursor;
use crate::wld::fragment::{DecodeContext, DecodeFragment};
use crate::wld::{FragmentRef, Result, cipher};

const BITMAP_HAS_CURRENT_FRAME: u32 = 1 << 2;
const BITMAP_HAS_SLEEP: u32 = 1 << 3;

/// Bitmap file names (0x03).
#[derive(Debug, Clone, Default)]
pub struct BitmapName {
	/// Decoded file names, in declaration order.
	pub filenames: Vec<String>,
}

impl DecodeFragment for BitmapName {
	fn decode(&mut self, cursor: &mut Cursor<'_>, _ctx: &DecodeContext<'_>) -> Result<()> {
		// A stored count of zero still carries one name.
		let count = cursor.read_count("bitmap filename")?.max(1);
		for _ in 0..count {
			let len = usize::from(cursor.read_u16_le()?);
			let raw = cursor.read_exact(len)?;
			self.filenames.push(cipher::decode_string(raw));
		}
		Ok(())
	}
}

/// Bitmap set, animated when more than one frame and a sleep is present (0x04).
#[derive(Debug, Clone, Default)]
pub struct BitmapInfo {
	/// Raw flags word.
	pub flags: u32,
	/// Current frame, when present.
	pub current_frame: Option<i32>,
	/// Delay between frames in milliseconds, when present.
	pub sleep_ms: Option<u32>,
	/// Resolved [`BitmapName`] references, in frame order.
	pub bitmaps: Vec<FragmentRef>,
}

impl BitmapInfo {
	/// Whether the set cycles through frames.
	pub fn is_animated(&self) -> bool {
		self.sleep_ms.is_some() && self.bitmaps.len() > 1
	}
}

impl DecodeFragment for BitmapInfo {
	fn decode(&mut self, cursor: &mut Cursor<'_>, ctx: &DecodeContext<'_>) -> Result<()> {
		self.flags = cursor.read_u32_le()?;
		let count = cursor.read_count("bitmap")?;
		if self.flags & BITMAP_HAS_CURRENT_FRAME != 0 {
			self.current_frame = Some(cursor.read_i32_le()?);
		}
		if self.flags & BITMAP_HAS_SLEEP != 0 {
			self.sleep_ms = Some(cursor.read_u32_le()?);
		}
		for _ in 0..count {
			let raw = cursor.read_i32_le()?;
			if let Some(item) = ctx.resolve_as::<BitmapName>(raw) {
				self.bitmaps.push(item);
			}
		}
		Ok(())
	}
}

/// Reference to a [`BitmapInfo`] (0x05).
#[derive(Debug, Clone, Default)]
pub struct BitmapInfoReference {
	/// Resolved bitmap set.
	pub bitmap_info: Option<FragmentRef>,
	/// Raw flags word.
	pub flags: u32,
}

impl DecodeFragment for BitmapInfoReference {
	fn decode(&mut self, cursor: &mut Cursor<'_>, ctx: &DecodeContext<'_>) -> Result<()> {
		self.bitmap_info = ctx.resolve_as::<BitmapInfo>(cursor.read_i32_le()?);
		self.flags = cursor.read_u32_le()?;
		Ok(())
	}
}
