use crate::wld::bytes::Cursor;
use crate::wld::{Result, WldError};

/// Dialect selected by the header version constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WldVersion {
	/// Original layout.
	Old,
	/// Later layout; widens texture coordinates.
	New,
}

impl WldVersion {
	/// Version constant of the older dialect.
	pub const OLD_ID: u32 = 0x0001_5500;
	/// Version constant of the newer dialect.
	pub const NEW_ID: u32 = 0x1000_C800;

	/// Map a raw version constant to a dialect.
	pub fn from_raw(raw: u32) -> Option<Self> {
		match raw {
			Self::OLD_ID => Some(Self::Old),
			Self::NEW_ID => Some(Self::New),
			_ => None,
		}
	}

	/// Stable label for text output.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Old => "old",
			Self::New => "new",
		}
	}
}

/// Parsed fixed-size file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WldHeader {
	/// Format dialect.
	pub version: WldVersion,
	/// Number of fragments in the table.
	pub fragment_count: u32,
	/// Number of BSP regions; bounds decoded visibility indices.
	pub bsp_region_count: u32,
	/// Reserved, preserved as read.
	pub unknown1: i32,
	/// Encoded string-table length in bytes.
	pub string_table_size: u32,
	/// Reserved, preserved as read.
	pub unknown2: i32,
}

impl WldHeader {
	/// File identifier expected in the first four bytes.
	pub const MAGIC: u32 = 0x5450_3D02;
	/// Header size in bytes, excluding the string table.
	pub const SIZE: usize = 28;

	/// Parse the header from the start of `bytes`.
	pub fn parse(bytes: &[u8]) -> Result<Self> {
		let mut cursor = Cursor::new(bytes);
		Self::read(&mut cursor).map_err(|err| match err {
			WldError::UnexpectedEof { .. } => WldError::TruncatedHeader {
				need: Self::SIZE,
				have: bytes.len(),
			},
			other => other,
		})
	}

	pub(crate) fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
		let magic = cursor.read_u32_le()?;
		if magic != Self::MAGIC {
			return Err(WldError::InvalidContainer { magic });
		}

		let raw_version = cursor.read_u32_le()?;
		let version = WldVersion::from_raw(raw_version).ok_or(WldError::UnrecognizedFormat { version: raw_version })?;

		Ok(Self {
			version,
			fragment_count: cursor.read_u32_le()?,
			bsp_region_count: cursor.read_u32_le()?,
			unknown1: cursor.read_i32_le()?,
			string_table_size: cursor.read_u32_le()?,
			unknown2: cursor.read_i32_le()?,
		})
	}

	/// Whether the newer dialect is in use.
	pub fn is_new_format(&self) -> bool {
		self.version == WldVersion::New
	}
}

#[cfg(test)]
mod tests;
