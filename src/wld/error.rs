use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, WldError>;

/// Errors produced while reading and decoding `.wld` data.
#[derive(Debug, Error)]
pub enum WldError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Leading file identifier did not match.
	#[error("not a wld file (magic=0x{magic:08x})")]
	InvalidContainer {
		/// First four bytes read as little-endian.
		magic: u32,
	},
	/// Version constant is neither known dialect.
	#[error("unrecognized wld version 0x{version:08x}")]
	UnrecognizedFormat {
		/// Parsed version value.
		version: u32,
	},
	/// File ended before the header and string table were complete.
	#[error("truncated header: need {need} bytes, have {have}")]
	TruncatedHeader {
		/// Bytes required for the header and string table.
		need: usize,
		/// Bytes available.
		have: usize,
	},
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// A count field held a negative value.
	#[error("negative {field} count {count}")]
	NegativeCount {
		/// Field being read.
		field: &'static str,
		/// Parsed signed count.
		count: i64,
	},
	/// Fragment layout uses a section this decoder cannot size.
	#[error("unsupported layout: {what}")]
	UnsupportedLayout {
		/// Description of the unsupported section.
		what: &'static str,
	},
	/// No fragment carries the requested name.
	#[error("fragment not found: {name}")]
	FragmentNotFound {
		/// Requested fragment name.
		name: String,
	},
	/// Fragment kind label did not match any known kind.
	#[error("unknown fragment kind: {label}")]
	UnknownKind {
		/// User-provided kind label.
		label: String,
	},
}
