use wldoc::wld::{FragmentKind, FragmentRef, Result, WldError};

/// Print a payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) {
	match serde_json::to_string_pretty(payload) {
		Ok(text) => println!("{text}"),
		Err(err) => eprintln!("error: json encode failed: {err}"),
	}
}

/// Parse a fragment kind label such as `mesh` or `bsp_region`.
pub(crate) fn parse_kind(label: &str) -> Result<FragmentKind> {
	FragmentKind::from_label(label).ok_or_else(|| WldError::UnknownKind { label: label.to_owned() })
}

/// Render an optional reference for text output.
pub(crate) fn ref_label(item: Option<FragmentRef>) -> String {
	match item {
		Some(item) => item.to_string(),
		None => "-".to_owned(),
	}
}

/// Render an optional reference as its one-based raw value.
pub(crate) fn ref_json(item: Option<FragmentRef>) -> Option<u32> {
	item.map(FragmentRef::raw)
}

/// Render a name for text output, `-` when empty.
pub(crate) fn name_label(name: &str) -> &str {
	if name.is_empty() { "-" } else { name }
}
