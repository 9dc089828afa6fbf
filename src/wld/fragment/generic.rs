use crate::wld::bytes::Cursor;

/// Opaque capture of a fragment kind this decoder does not interpret.
#[derive(Debug, Clone, Default)]
pub struct Generic {
	/// Payload bytes following the name reference.
	pub bytes: Vec<u8>,
}

impl Generic {
	/// Capture every remaining payload byte.
	pub fn capture(cursor: &mut Cursor<'_>) -> Self {
		Self {
			bytes: cursor.read_rest().to_vec(),
		}
	}
}
