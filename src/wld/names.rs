//! Fragment name conventions.
//!
//! Names carry a kind suffix in upper case (`HUM_HS_DEF`, `C01HUMPE_TRACK`).
//! Lookups across fragments compare the lower-cased name with that suffix
//! removed.

/// Suffix of skeleton hierarchy names.
pub const SKELETON_SUFFIX: &str = "_hs_def";
/// Suffix of bone names.
pub const BONE_SUFFIX: &str = "_dag";
/// Suffix of track names.
pub const TRACK_SUFFIX: &str = "_track";

const KIND_SUFFIXES: &[&str] = &[
	SKELETON_SUFFIX,
	"_trackdef",
	TRACK_SUFFIX,
	"_dmspritedef",
	"_mdf",
	"_mp",
	"_actordef",
	"_sprite",
	BONE_SUFFIX,
];

fn strip_suffix_lower(name: &str, suffix: &str) -> String {
	let lower = name.to_ascii_lowercase();
	match lower.strip_suffix(suffix) {
		Some(stripped) => stripped.to_owned(),
		None => lower,
	}
}

/// Lower-case `name` and remove the first matching kind suffix.
pub fn clean_name(name: &str) -> String {
	let lower = name.to_ascii_lowercase();
	for suffix in KIND_SUFFIXES {
		if let Some(stripped) = lower.strip_suffix(suffix) {
			return stripped.to_owned();
		}
	}
	lower
}

/// Model base of a skeleton: lower-cased name without `_HS_DEF`.
pub fn model_base(skeleton_name: &str) -> String {
	strip_suffix_lower(skeleton_name, SKELETON_SUFFIX)
}

/// Lower-cased bone name without `_DAG`.
pub fn clean_bone_name(name: &str) -> String {
	strip_suffix_lower(name, BONE_SUFFIX)
}

/// Lower-cased track name without `_TRACK`.
pub fn clean_track_name(name: &str) -> String {
	strip_suffix_lower(name, TRACK_SUFFIX)
}

/// Remove `model_base` from the front of `cleaned`, falling back to `"root"`.
pub fn piece_name(cleaned: &str, model_base: &str) -> String {
	let piece = if model_base.is_empty() {
		cleaned
	} else {
		cleaned.strip_prefix(model_base).unwrap_or(cleaned)
	};
	or_root(piece)
}

/// `"root"` when `name` is empty, otherwise `name`.
pub fn or_root(name: &str) -> String {
	if name.is_empty() { "root".to_owned() } else { name.to_owned() }
}

#[cfg(test)]
mod tests;
