use std::fmt;

/// Zero-based handle into a document's fragment list.
///
/// Payloads store one-based references; [`FragmentRef::resolve`] is the only
/// place that turns a raw payload value into a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FragmentRef(u32);

impl FragmentRef {
	/// Wrap a zero-based fragment index.
	pub fn from_index(index: usize) -> Self {
		Self(index as u32)
	}

	/// Zero-based index into the fragment list.
	pub fn index(self) -> usize {
		self.0 as usize
	}

	/// One-based value as it appears in payloads.
	pub fn raw(self) -> u32 {
		self.0 + 1
	}

	/// Resolve a one-based payload reference against `decoded` prior fragments.
	///
	/// Zero, negative, forward-pointing and out-of-range values are all absent.
	pub fn resolve(raw: i32, decoded: usize) -> Option<Self> {
		if raw <= 0 {
			return None;
		}
		let index = (raw - 1) as usize;
		(index < decoded).then_some(Self(index as u32))
	}
}

impl fmt::Display for FragmentRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.raw())
	}
}

#[cfg(test)]
mod tests;
