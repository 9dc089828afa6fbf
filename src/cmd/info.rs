use std::path::PathBuf;

use wldoc::wld::{FragmentKind, Result, WldDocument};

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Print header fields, per-kind fragment counts and decode issues.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;

	let doc = WldDocument::open(&path)?;
	let kinds: Vec<(FragmentKind, usize)> = FragmentKind::ALL
		.iter()
		.map(|kind| (*kind, doc.refs_of_kind(*kind).len()))
		.filter(|(_, count)| *count > 0)
		.collect();

	if json {
		let payload = InfoJson {
			path: path.display().to_string(),
			version: doc.header.version.as_str(),
			declared_fragments: doc.header.fragment_count,
			decoded_fragments: doc.fragments().len(),
			bsp_regions: doc.header.bsp_region_count,
			string_table_size: doc.header.string_table_size,
			strings: doc.strings().len(),
			kinds: kinds
				.iter()
				.map(|(kind, count)| KindCountJson {
					kind: kind.as_str(),
					count: *count,
				})
				.collect(),
			issues: doc.issues().iter().map(ToString::to_string).collect(),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("version: {}", doc.header.version.as_str());
	println!("declared_fragments: {}", doc.header.fragment_count);
	println!("decoded_fragments: {}", doc.fragments().len());
	println!("bsp_regions: {}", doc.header.bsp_region_count);
	println!("string_table_size: {}", doc.header.string_table_size);
	println!("strings: {}", doc.strings().len());

	println!("kinds:");
	for (kind, count) in &kinds {
		println!("  {}: {count}", kind.as_str());
	}

	println!("issues: {}", doc.issues().len());
	for issue in doc.issues() {
		println!("  {issue}");
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct KindCountJson {
	kind: &'static str,
	count: usize,
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	version: &'static str,
	declared_fragments: u32,
	decoded_fragments: usize,
	bsp_regions: u32,
	string_table_size: u32,
	strings: usize,
	kinds: Vec<KindCountJson>,
	issues: Vec<String>,
}
