use std::path::PathBuf;

use wldoc::wld::{Fragment, Result, WldDocument};

use crate::cmd::util::{emit_json, name_label, parse_kind};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Only list fragments of this kind label.
	#[arg(long)]
	pub kind: Option<String>,
	/// Only list fragments whose name contains this text, case-insensitively.
	#[arg(long)]
	pub name: Option<String>,
	#[arg(long)]
	pub limit: Option<usize>,
	#[arg(long)]
	pub json: bool,
}

/// List fragment table rows.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		kind,
		name,
		limit,
		json,
	} = args;

	let kind = kind.as_deref().map(parse_kind).transpose()?;
	let needle = name.map(|name| name.to_ascii_lowercase());

	let doc = WldDocument::open(&path)?;
	let mut rows: Vec<&Fragment> = doc
		.fragments()
		.iter()
		.filter(|fragment| kind.is_none_or(|kind| fragment.kind() == kind))
		.filter(|fragment| {
			needle
				.as_deref()
				.is_none_or(|needle| fragment.name().to_ascii_lowercase().contains(needle))
		})
		.collect();

	if let Some(max) = limit {
		rows.truncate(max);
	}

	if json {
		let payload = FragmentsJson {
			path: path.display().to_string(),
			count: rows.len(),
			fragments: rows
				.iter()
				.map(|fragment| FragmentJson {
					index: fragment.index.raw(),
					type_id: fragment.type_id(),
					kind: fragment.kind().as_str(),
					name: fragment.name().to_owned(),
					size: fragment.size,
				})
				.collect(),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("fragments: {}", rows.len());
	println!("index\ttype\tkind\tsize\tname");
	for fragment in rows {
		println!(
			"{}\t0x{:02x}\t{}\t{}\t{}",
			fragment.index,
			fragment.type_id(),
			fragment.kind().as_str(),
			fragment.size,
			name_label(fragment.name())
		);
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct FragmentJson {
	index: u32,
	type_id: u32,
	kind: &'static str,
	name: String,
	size: usize,
}

#[derive(serde::Serialize)]
struct FragmentsJson {
	path: String,
	count: usize,
	fragments: Vec<FragmentJson>,
}
