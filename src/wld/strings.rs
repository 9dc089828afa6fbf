use std::collections::HashMap;
use std::sync::Arc;

use crate::wld::cipher;

/// Decoded string table addressed by byte offset.
///
/// Fragment fields address the table with a non-positive value `n`, meaning
/// the string that starts at offset `-n`. Positive values and zero carry no
/// name.
#[derive(Debug, Clone, Default)]
pub struct StringTable {
	by_offset: HashMap<usize, Arc<str>>,
	offsets: Vec<usize>,
	byte_len: usize,
}

impl StringTable {
	/// Decode a cipher-encoded blob and index its NUL-delimited strings.
	pub fn decode(encoded: &[u8]) -> Self {
		Self::from_plain(&cipher::decode(encoded))
	}

	/// Index an already-decoded blob.
	pub fn from_plain(plain: &[u8]) -> Self {
		let mut by_offset = HashMap::new();
		let mut offsets = Vec::new();
		let mut offset = 0_usize;
		for piece in plain.split(|byte| *byte == 0) {
			if offset >= plain.len() {
				break;
			}
			by_offset.insert(offset, Arc::<str>::from(String::from_utf8_lossy(piece).as_ref()));
			offsets.push(offset);
			offset += piece.len() + 1;
		}

		Self {
			by_offset,
			offsets,
			byte_len: plain.len(),
		}
	}

	/// Look up the string starting at `offset`.
	pub fn get(&self, offset: usize) -> Option<&Arc<str>> {
		self.by_offset.get(&offset)
	}

	/// Resolve a fragment-field string reference.
	pub fn lookup(&self, reference: i32) -> Option<&Arc<str>> {
		if reference >= 0 {
			return None;
		}
		let offset = usize::try_from(-i64::from(reference)).ok()?;
		self.get(offset)
	}

	/// Resolve a reference to a shared name, empty when absent.
	pub fn name(&self, reference: i32) -> Arc<str> {
		self.lookup(reference).cloned().unwrap_or_else(|| Arc::<str>::from(""))
	}

	/// Iterate `(offset, string)` pairs in table order.
	pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
		self.offsets
			.iter()
			.filter_map(|offset| self.by_offset.get(offset).map(|value| (*offset, value.as_ref())))
	}

	/// Number of indexed strings.
	pub fn len(&self) -> usize {
		self.offsets.len()
	}

	/// Whether no strings were indexed.
	pub fn is_empty(&self) -> bool {
		self.offsets.is_empty()
	}

	/// Size of the decoded blob in bytes.
	pub fn byte_len(&self) -> usize {
		self.byte_len
	}
}

#[cfg(test)]
mod tests;
