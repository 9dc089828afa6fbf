use std::path::PathBuf;

use wldoc::wld::{Result, WldDocument};

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Print every string table entry with its offset.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;

	let doc = WldDocument::open(&path)?;
	let strings = doc.strings();

	if json {
		let payload = StringsJson {
			path: path.display().to_string(),
			byte_len: strings.byte_len(),
			strings: strings
				.iter()
				.map(|(offset, value)| StringJson {
					offset,
					value: value.to_owned(),
				})
				.collect(),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("byte_len: {}", strings.byte_len());
	println!("strings: {}", strings.len());
	for (offset, value) in strings.iter() {
		println!("{offset}\t{value}");
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct StringJson {
	offset: usize,
	value: String,
}

#[derive(serde::Serialize)]
struct StringsJson {
	path: String,
	byte_len: usize,
	strings: Vec<StringJson>,
}
