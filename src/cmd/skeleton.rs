use std::path::PathBuf;

use wldoc::wld::merge::import_shared_animations;
use wldoc::wld::{Animation, Bone, Fragment, Result, SkeletonHierarchy, TrackSource, WldDocument};

use crate::cmd::util::{emit_json, ref_json, ref_label};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Only show the skeleton with this exact fragment name.
	#[arg(long)]
	pub name: Option<String>,
	/// Remove the model base from cleaned bone names.
	#[arg(long)]
	pub strip_model_base: bool,
	/// Shared animation file to import missing animations from.
	#[arg(long, requires = "shared_model")]
	pub shared: Option<PathBuf>,
	/// Three-letter model code whose tracks are imported from `--shared`.
	#[arg(long)]
	pub shared_model: Option<String>,
	#[arg(long)]
	pub json: bool,
}

/// Build skeleton trees and print bones and bound animations.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		name,
		strip_model_base,
		shared,
		shared_model,
		json,
	} = args;

	let mut doc = WldDocument::open(&path)?;
	doc.build_skeletons(strip_model_base);

	let donor = shared.as_ref().map(WldDocument::open).transpose()?;
	let mut shared_bound = 0;
	if let (Some(donor), Some(model)) = (&donor, &shared_model) {
		shared_bound = import_shared_animations(&mut doc, donor, model);
	}

	let skeletons: Vec<(&Fragment, &SkeletonHierarchy)> = doc
		.iter_kind::<SkeletonHierarchy>()
		.filter(|(fragment, _)| name.as_deref().is_none_or(|name| fragment.name() == name))
		.collect();

	if json {
		let payload = SkeletonsJson {
			path: path.display().to_string(),
			shared_tracks_bound: shared_bound,
			skeletons: skeletons.iter().map(|(fragment, skeleton)| skeleton_json(fragment, skeleton)).collect(),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("skeletons: {}", skeletons.len());
	if donor.is_some() {
		println!("shared_tracks_bound: {shared_bound}");
	}

	for (fragment, skeleton) in skeletons {
		println!();
		println!("skeleton {} {}", fragment.index, fragment.name());
		println!("model_base: {}", skeleton.model_base);
		println!("bones: {}", skeleton.bones.len());
		for bone in &skeleton.bones {
			println!(
				"  {}\t{}\tpiece={}\ttrack={}\t{}",
				bone.index,
				bone.index_path,
				bone.piece,
				ref_label(bone.track),
				bone.cleaned_full_path
			);
		}

		println!("animations: {}", skeleton.animations.len());
		for animation in skeleton.animations.values() {
			println!(
				"  {}\tmodel={}\tframes={}\ttotal_ms={}\ttracks={}\tshared={}",
				animation.name,
				animation.model_base,
				animation.frame_count,
				animation.total_time_ms,
				animation.tracks_by_piece.len(),
				shared_tracks(animation)
			);
		}
	}

	Ok(())
}

fn shared_tracks(animation: &Animation) -> usize {
	animation
		.tracks_by_piece
		.values()
		.filter(|binding| binding.source == TrackSource::Shared)
		.count()
}

fn skeleton_json(fragment: &Fragment, skeleton: &SkeletonHierarchy) -> SkeletonJson {
	SkeletonJson {
		index: fragment.index.raw(),
		name: fragment.name().to_owned(),
		model_base: skeleton.model_base.clone(),
		bones: skeleton.bones.iter().map(bone_json).collect(),
		animations: skeleton
			.animations
			.values()
			.map(|animation| AnimationJson {
				name: animation.name.clone(),
				model_base: animation.model_base.clone(),
				frame_count: animation.frame_count,
				total_time_ms: animation.total_time_ms,
				tracks: animation.tracks_by_piece.len(),
				shared_tracks: shared_tracks(animation),
			})
			.collect(),
	}
}

fn bone_json(bone: &Bone) -> BoneJson {
	BoneJson {
		index: bone.index,
		name: bone.name.to_string(),
		parent: bone.parent,
		children: bone.children.clone(),
		piece: bone.piece.clone(),
		full_path: bone.full_path.clone(),
		cleaned_full_path: bone.cleaned_full_path.clone(),
		index_path: bone.index_path.clone(),
		track: ref_json(bone.track),
	}
}

#[derive(serde::Serialize)]
struct BoneJson {
	index: usize,
	name: String,
	parent: Option<usize>,
	children: Vec<usize>,
	piece: String,
	full_path: String,
	cleaned_full_path: String,
	index_path: String,
	track: Option<u32>,
}

#[derive(serde::Serialize)]
struct AnimationJson {
	name: String,
	model_base: String,
	frame_count: usize,
	total_time_ms: u64,
	tracks: usize,
	shared_tracks: usize,
}

#[derive(serde::Serialize)]
struct SkeletonJson {
	index: u32,
	name: String,
	model_base: String,
	bones: Vec<BoneJson>,
	animations: Vec<AnimationJson>,
}

#[derive(serde::Serialize)]
struct SkeletonsJson {
	path: String,
	shared_tracks_bound: usize,
	skeletons: Vec<SkeletonJson>,
}
