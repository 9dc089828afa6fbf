use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::{debug, warn};

use crate::wld::bytes::Cursor;
use crate::wld::fragment::{DecodeOutcome, decode_fragment};
use crate::wld::partition::{self, LinkSummary};
use crate::wld::{Fragment, FragmentBody, FragmentKind, FragmentRef, Result, StringTable, WldError, WldHeader, skeleton};

/// Options for the post-decode passes run by [`WldDocument::prepare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassOptions {
	/// Build skeleton trees and bind their tracks.
	pub build_skeletons: bool,
	/// Remove the model base from cleaned bone names.
	pub strip_model_base: bool,
	/// Link BSP leaves to regions and regions to region types.
	pub link_bsp: bool,
}

impl Default for PassOptions {
	fn default() -> Self {
		Self {
			build_skeletons: true,
			strip_model_base: false,
			link_bsp: true,
		}
	}
}

/// Results of [`WldDocument::prepare`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
	/// Skeletons built by this call.
	pub skeletons_built: usize,
	/// BSP linking counts.
	pub bsp: LinkSummary,
}

/// What went wrong with one fragment.
#[derive(Debug)]
pub enum IssueKind {
	/// Type id has no decoder; the payload was captured opaquely.
	UnknownFragmentType,
	/// The payload ended early or held an invalid value.
	Payload(WldError),
	/// The fragment table ended before the declared fragment count.
	TruncatedTable {
		/// Fragments declared in the header.
		declared: u32,
		/// Fragments read.
		read: usize,
	},
}

/// Recoverable condition recorded while decoding.
#[derive(Debug)]
pub struct DecodeIssue {
	/// Affected fragment, when one was produced.
	pub fragment: Option<FragmentRef>,
	/// Raw type id of the affected fragment.
	pub type_id: Option<u32>,
	/// Condition.
	pub kind: IssueKind,
}

impl fmt::Display for DecodeIssue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if let Some(fragment) = self.fragment {
			write!(f, "fragment {fragment}")?;
		} else {
			write!(f, "table")?;
		}
		if let Some(type_id) = self.type_id {
			write!(f, " (0x{type_id:02x})")?;
		}
		match &self.kind {
			IssueKind::UnknownFragmentType => write!(f, ": unknown fragment type"),
			IssueKind::Payload(err) => write!(f, ": {err}"),
			IssueKind::TruncatedTable { declared, read } => write!(f, ": table truncated after {read} of {declared} fragments"),
		}
	}
}

/// Decoded `.wld` file: header, string table and the ordered fragment list.
pub struct WldDocument {
	/// Parsed file header.
	pub header: WldHeader,
	strings: StringTable,
	fragments: Vec<Fragment>,
	by_kind: BTreeMap<FragmentKind, Vec<FragmentRef>>,
	by_name: HashMap<Arc<str>, FragmentRef>,
	issues: Vec<DecodeIssue>,
}

impl WldDocument {
	/// Read and decode a file from disk.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let bytes = fs::read(path)?;
		Self::decode(&bytes)
	}

	/// Decode a whole file held in memory.
	///
	/// Only header-level problems fail; per-fragment problems are recorded
	/// in [`WldDocument::issues`].
	pub fn decode(bytes: &[u8]) -> Result<Self> {
		let header = WldHeader::parse(bytes)?;
		let table_end = WldHeader::SIZE + header.string_table_size as usize;
		let Some(encoded) = bytes.get(WldHeader::SIZE..table_end) else {
			return Err(WldError::TruncatedHeader {
				need: table_end,
				have: bytes.len(),
			});
		};

		let mut doc = Self {
			header,
			strings: StringTable::decode(encoded),
			fragments: Vec::new(),
			by_kind: BTreeMap::new(),
			by_name: HashMap::new(),
			issues: Vec::new(),
		};

		let mut cursor = Cursor::new(&bytes[table_end..]);
		for index in 0..header.fragment_count as usize {
			let (size, type_id) = match read_fragment_header(&mut cursor) {
				Ok(pair) => pair,
				Err(_) => {
					doc.truncated(index);
					break;
				}
			};

			let short = size > cursor.remaining();
			let payload = if short { cursor.read_rest() } else { cursor.read_exact(size)? };

			let (fragment, outcome) = decode_fragment(index, type_id, payload, &doc.fragments, &doc.strings, &header);
			doc.record(&fragment, outcome);
			doc.push(fragment);

			if short {
				doc.truncated(index + 1);
				break;
			}
		}

		debug!(
			"decoded {} fragments, {} strings, {} issues",
			doc.fragments.len(),
			doc.strings.len(),
			doc.issues.len()
		);
		Ok(doc)
	}

	fn record(&mut self, fragment: &Fragment, outcome: DecodeOutcome) {
		let kind = match outcome {
			DecodeOutcome::Complete => return,
			DecodeOutcome::Opaque { known: true } => {
				debug!("fragment {} (0x{:02x}) kept opaque", fragment.index, fragment.type_id);
				return;
			}
			DecodeOutcome::Opaque { known: false } => IssueKind::UnknownFragmentType,
			DecodeOutcome::Failed(err) => IssueKind::Payload(err),
		};
		let issue = DecodeIssue {
			fragment: Some(fragment.index),
			type_id: Some(fragment.type_id),
			kind,
		};
		warn!("{issue}");
		self.issues.push(issue);
	}

	fn truncated(&mut self, read: usize) {
		let issue = DecodeIssue {
			fragment: None,
			type_id: None,
			kind: IssueKind::TruncatedTable {
				declared: self.header.fragment_count,
				read,
			},
		};
		warn!("{issue}");
		self.issues.push(issue);
	}

	fn push(&mut self, fragment: Fragment) {
		self.by_kind.entry(fragment.kind()).or_default().push(fragment.index);
		if !fragment.name.is_empty() {
			self.by_name.entry(fragment.name.clone()).or_insert(fragment.index);
		}
		self.fragments.push(fragment);
	}

	/// Every fragment in file order.
	pub fn fragments(&self) -> &[Fragment] {
		&self.fragments
	}

	/// Borrow one fragment.
	pub fn get(&self, item: FragmentRef) -> Option<&Fragment> {
		self.fragments.get(item.index())
	}

	/// Borrow one fragment's body as `T`.
	pub fn get_as<T: FragmentBody>(&self, item: FragmentRef) -> Option<&T> {
		T::from_data(&self.get(item)?.data)
	}

	/// Mutably borrow one fragment's body as `T`.
	pub fn get_as_mut<T: FragmentBody>(&mut self, item: FragmentRef) -> Option<&mut T> {
		T::from_data_mut(&mut self.fragments.get_mut(item.index())?.data)
	}

	/// Fragments of one kind, in file order.
	pub fn refs_of_kind(&self, kind: FragmentKind) -> &[FragmentRef] {
		self.by_kind.get(&kind).map(Vec::as_slice).unwrap_or_default()
	}

	/// Iterate every `T` body with its fragment, in file order.
	pub fn iter_kind<'a, T: FragmentBody + 'a>(&'a self) -> impl Iterator<Item = (&'a Fragment, &'a T)> + 'a {
		self.refs_of_kind(T::KIND).iter().filter_map(move |item| {
			let fragment = &self.fragments[item.index()];
			T::from_data(&fragment.data).map(|body| (fragment, body))
		})
	}

	/// First fragment carrying `name`.
	pub fn by_name(&self, name: &str) -> Option<&Fragment> {
		self.by_name.get(name).and_then(|item| self.get(*item))
	}

	/// First fragment carrying `name`, or [`WldError::FragmentNotFound`].
	pub fn find(&self, name: &str) -> Result<&Fragment> {
		self.by_name(name).ok_or_else(|| WldError::FragmentNotFound { name: name.to_owned() })
	}

	/// Decoded string table.
	pub fn strings(&self) -> &StringTable {
		&self.strings
	}

	/// Recoverable conditions recorded during decode.
	pub fn issues(&self) -> &[DecodeIssue] {
		&self.issues
	}

	/// Whether the newer dialect is in use.
	pub fn is_new_format(&self) -> bool {
		self.header.is_new_format()
	}

	/// Build every skeleton tree and bind local tracks. Returns the number of
	/// skeletons built by this call.
	pub fn build_skeletons(&mut self, strip_model_base: bool) -> usize {
		skeleton::build_all(self, strip_model_base)
	}

	/// Link every BSP tree to its regions and every region type to its
	/// regions.
	pub fn link_bsp(&mut self) -> LinkSummary {
		partition::link_document(self)
	}

	/// Run the post-decode passes selected by `options`.
	pub fn prepare(&mut self, options: &PassOptions) -> PassSummary {
		let mut summary = PassSummary::default();
		if options.build_skeletons {
			summary.skeletons_built = self.build_skeletons(options.strip_model_base);
		}
		if options.link_bsp {
			summary.bsp = self.link_bsp();
		}
		summary
	}
}

fn read_fragment_header(cursor: &mut Cursor<'_>) -> Result<(usize, u32)> {
	let size = cursor.read_u32_le()? as usize;
	let type_id = cursor.read_u32_le()?;
	Ok((size, type_id))
}

#[cfg(test)]
mod tests;
