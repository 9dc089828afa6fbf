use glam::{Vec2, Vec3};

use crate::wld::{Result, WldError};

/// Simple bounded little-endian cursor over an immutable byte slice.
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(WldError::UnexpectedEof {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Read every remaining byte.
	pub fn read_rest(&mut self) -> &'a [u8] {
		let start = self.pos.min(self.bytes.len());
		self.pos = self.bytes.len();
		&self.bytes[start..]
	}

	/// Read a fixed-size byte array.
	pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let raw = self.read_exact(N)?;
		let mut out = [0_u8; N];
		out.copy_from_slice(raw);
		Ok(out)
	}

	/// Read a `u8`.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_array::<1>()?[0])
	}

	/// Read an `i8`.
	pub fn read_i8(&mut self) -> Result<i8> {
		Ok(i8::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `u16`.
	pub fn read_u16_le(&mut self) -> Result<u16> {
		Ok(u16::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `i16`.
	pub fn read_i16_le(&mut self) -> Result<i16> {
		Ok(i16::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `u32`.
	pub fn read_u32_le(&mut self) -> Result<u32> {
		Ok(u32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `i32`.
	pub fn read_i32_le(&mut self) -> Result<i32> {
		Ok(i32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `f32`.
	pub fn read_f32_le(&mut self) -> Result<f32> {
		Ok(f32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `i32` that must be a non-negative count.
	pub fn read_count(&mut self, field: &'static str) -> Result<usize> {
		let count = self.read_i32_le()?;
		usize::try_from(count).map_err(|_| WldError::NegativeCount {
			field,
			count: i64::from(count),
		})
	}

	/// Read `N` little-endian `i32` values.
	pub fn read_i32_array<const N: usize>(&mut self) -> Result<[i32; N]> {
		let mut out = [0_i32; N];
		for item in &mut out {
			*item = self.read_i32_le()?;
		}
		Ok(out)
	}

	/// Read three little-endian `f32` values.
	pub fn read_vec3(&mut self) -> Result<Vec3> {
		Ok(Vec3::new(self.read_f32_le()?, self.read_f32_le()?, self.read_f32_le()?))
	}

	/// Read two little-endian `f32` values.
	pub fn read_vec2(&mut self) -> Result<Vec2> {
		Ok(Vec2::new(self.read_f32_le()?, self.read_f32_le()?))
	}
}

#[cfg(test)]
mod tests;
