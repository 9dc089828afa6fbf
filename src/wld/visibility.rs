//! Potentially-visible-set decoding for BSP regions.
//!
//! Byte-encoded sets are a run-length stream over region indices:
//!
//! | code          | meaning                                        |
//! |---------------|------------------------------------------------|
//! | `0x00..=0x3E` | skip `code` regions                            |
//! | `0x3F`        | skip the following `u16` regions               |
//! | `0x40..=0x7F` | skip bits 3..6, then include bits 0..3         |
//! | `0x80..=0xBF` | include bits 3..6, then skip bits 0..3         |
//! | `0xC0..=0xFE` | include `code - 0xC0` regions                  |
//! | `0xFF`        | include the following `u16` regions            |
//!
//! Word-encoded sets list one-based region ids as `u16` values.
//!
//! Indices at or past the document's region count are dropped, and run
//! decoding stops once the running index reaches it.

use crate::wld::bytes::Cursor;

/// Decode one set into sorted zero-based region indices below
/// `region_count`.
///
/// A run cut short by the end of the entry ends decoding.
pub fn decode(entry: &[u8], words: bool, region_count: usize) -> Vec<usize> {
	let mut out = if words {
		decode_words(entry, region_count)
	} else {
		decode_runs(entry, region_count)
	};
	out.sort_unstable();
	out.dedup();
	out
}

fn decode_words(entry: &[u8], region_count: usize) -> Vec<usize> {
	let mut cursor = Cursor::new(entry);
	let mut out = Vec::new();
	while let Ok(id) = cursor.read_u16_le() {
		if let Some(index) = usize::from(id).checked_sub(1).filter(|index| *index < region_count) {
			out.push(index);
		}
	}
	out
}

fn decode_runs(entry: &[u8], region_count: usize) -> Vec<usize> {
	let mut cursor = Cursor::new(entry);
	let mut out = Vec::new();
	let mut region = 0_usize;

	while region < region_count {
		let Ok(code) = cursor.read_u8() else {
			break;
		};
		match code {
			0x00..=0x3E => region = region.saturating_add(usize::from(code)),
			0x3F => match cursor.read_u16_le() {
				Ok(count) => region = region.saturating_add(usize::from(count)),
				Err(_) => break,
			},
			0x40..=0x7F => {
				region += usize::from((code >> 3) & 0x07);
				include(&mut region, usize::from(code & 0x07), region_count, &mut out);
			}
			0x80..=0xBF => {
				include(&mut region, usize::from((code >> 3) & 0x07), region_count, &mut out);
				region += usize::from(code & 0x07);
			}
			0xC0..=0xFE => include(&mut region, usize::from(code - 0xC0), region_count, &mut out),
			0xFF => match cursor.read_u16_le() {
				Ok(count) => include(&mut region, usize::from(count), region_count, &mut out),
				Err(_) => break,
			},
		}
	}
	out
}

fn include(region: &mut usize, count: usize, limit: usize, out: &mut Vec<usize>) {
	let end = region.saturating_add(count);
	out.extend(*region..end.min(limit));
	*region = end;
}

#[cfg(test)]
mod tests;
