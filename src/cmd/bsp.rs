use std::path::PathBuf;

use wldoc::wld::region::{RegionClassification, Zoneline};
use wldoc::wld::{BspRegion, BspTree, Fragment, Result, WldDocument};

use crate::cmd::util::{emit_json, name_label, ref_json, ref_label};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Also list regions without a region type.
	#[arg(long)]
	pub all: bool,
	#[arg(long)]
	pub json: bool,
}

/// Link BSP trees and region types, then print the result.
pub fn run(args: Args) -> Result<()> {
	let Args { path, all, json } = args;

	let mut doc = WldDocument::open(&path)?;
	let summary = doc.link_bsp();

	let trees: Vec<(&Fragment, &BspTree)> = doc.iter_kind::<BspTree>().collect();
	let regions: Vec<(usize, &Fragment, &BspRegion)> = doc
		.iter_kind::<BspRegion>()
		.enumerate()
		.filter(|(_, (_, region))| all || region.region_type.is_some())
		.map(|(position, (fragment, region))| (position, fragment, region))
		.collect();

	if json {
		let payload = BspJson {
			path: path.display().to_string(),
			trees: trees
				.iter()
				.map(|(fragment, tree)| TreeJson {
					index: fragment.index.raw(),
					nodes: tree.nodes.len(),
					leaves: tree.nodes.iter().filter(|node| node.is_leaf()).count(),
					linked: tree.nodes.iter().filter(|node| node.region.is_some()).count(),
				})
				.collect(),
			linked_nodes: summary.linked_nodes,
			typed_regions: summary.typed_regions,
			regions: regions
				.iter()
				.map(|(position, fragment, region)| RegionJson {
					position: *position,
					index: fragment.index.raw(),
					name: fragment.name().to_owned(),
					region_type: ref_json(region.region_type),
					classes: classes(region.classification.as_ref()),
					zoneline: region.classification.as_ref().and_then(|item| item.zoneline).map(zoneline_json),
					visible_regions: region.visible_regions.len(),
				})
				.collect(),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("trees: {}", trees.len());
	for (fragment, tree) in &trees {
		let leaves = tree.nodes.iter().filter(|node| node.is_leaf()).count();
		let linked = tree.nodes.iter().filter(|node| node.region.is_some()).count();
		println!("  {}\tnodes={}\tleaves={leaves}\tlinked={linked}", fragment.index, tree.nodes.len());
	}
	println!("typed_regions: {}", summary.typed_regions);

	println!("regions: {}", regions.len());
	println!("position\tindex\ttype\tclasses\tzoneline\tname");
	for (position, fragment, region) in regions {
		println!(
			"{position}\t{}\t{}\t{}\t{}\t{}",
			fragment.index,
			ref_label(region.region_type),
			classes(region.classification.as_ref()).join(","),
			zoneline_label(region.classification.as_ref().and_then(|item| item.zoneline)),
			name_label(fragment.name())
		);
	}

	Ok(())
}

fn classes(classification: Option<&RegionClassification>) -> Vec<&'static str> {
	classification
		.map(|item| item.classes.iter().map(|class| class.as_str()).collect())
		.unwrap_or_default()
}

fn zoneline_label(zoneline: Option<Zoneline>) -> String {
	match zoneline {
		Some(Zoneline::Reference { index }) => format!("ref:{index}"),
		Some(Zoneline::Absolute {
			zone_id,
			position,
			heading,
		}) => format!("zone:{zone_id}@{},{},{}/{heading}", position.x, position.y, position.z),
		None => "-".to_owned(),
	}
}

fn zoneline_json(zoneline: Zoneline) -> ZonelineJson {
	match zoneline {
		Zoneline::Reference { index } => ZonelineJson {
			kind: "reference",
			index: Some(index),
			zone_id: None,
			position: None,
			heading: None,
		},
		Zoneline::Absolute {
			zone_id,
			position,
			heading,
		} => ZonelineJson {
			kind: "absolute",
			index: None,
			zone_id: Some(zone_id),
			position: Some(position.to_array()),
			heading: Some(heading),
		},
	}
}

#[derive(serde::Serialize)]
struct TreeJson {
	index: u32,
	nodes: usize,
	leaves: usize,
	linked: usize,
}

#[derive(serde::Serialize)]
struct ZonelineJson {
	kind: &'static str,
	index: Option<u32>,
	zone_id: Option<u32>,
	position: Option<[f32; 3]>,
	heading: Option<f32>,
}

#[derive(serde::Serialize)]
struct RegionJson {
	position: usize,
	index: u32,
	name: String,
	region_type: Option<u32>,
	classes: Vec<&'static str>,
	zoneline: Option<ZonelineJson>,
	visible_regions: usize,
}

#[derive(serde::Serialize)]
struct BspJson {
	path: String,
	trees: Vec<TreeJson>,
	linked_nodes: usize,
	typed_regions: usize,
	regions: Vec<RegionJson>,
}
