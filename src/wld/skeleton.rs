//! Skeleton tree pass and animation track binding.
//!
//! A decoded [`SkeletonHierarchy`] only holds its raw bone list. The tree pass
//! walks the bones depth-first from bone 0 to fill names and paths, then the
//! document binds [`TrackFragment`]s into named [`Animation`]s keyed by bone
//! piece.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use log::{debug, info, warn};

use crate::wld::{BoneTransform, FragmentKind, FragmentRef, SkeletonHierarchy, TrackDefFragment, TrackFragment, WldDocument, names};

/// Name of the base-pose animation.
pub const POSE_ANIMATION: &str = "pos";

/// Document a bound track's frame data lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackSource {
	/// Same document as the skeleton.
	Local,
	/// Companion document passed to lookups as `shared`.
	Shared,
}

impl TrackSource {
	/// Stable label for text/JSON output.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Local => "local",
			Self::Shared => "shared",
		}
	}
}

/// A track bound to one bone piece of one animation.
#[derive(Debug, Clone)]
pub struct TrackBinding {
	/// Bound [`TrackFragment`].
	pub track: FragmentRef,
	/// Frame data referenced by the track.
	pub track_def: Option<FragmentRef>,
	/// Raw track name.
	pub raw_name: Arc<str>,
	/// Document holding `track` and `track_def`.
	pub source: TrackSource,
	/// Frames in `track_def`.
	pub frame_count: usize,
	/// Delay between frames in milliseconds.
	pub frame_ms: u32,
}

impl TrackBinding {
	/// Look up one frame, reading from `shared` for shared tracks.
	pub fn frame(&self, doc: &WldDocument, shared: Option<&WldDocument>, frame: usize) -> Option<BoneTransform> {
		let source = match self.source {
			TrackSource::Local => doc,
			TrackSource::Shared => shared?,
		};
		let def = source.get_as::<TrackDefFragment>(self.track_def?)?;
		def.frames.get(frame).copied()
	}
}

/// Parsed track name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackName {
	/// Lower-cased name without `_TRACK`.
	pub cleaned: String,
	/// Animation code.
	pub animation: String,
	/// Model code.
	pub model: String,
	/// Bone piece key.
	pub piece: String,
}

impl TrackName {
	/// Parse an animation track name: three-character animation code,
	/// three-character model code, then the bone piece.
	///
	/// Names too short for both codes yield `None`.
	pub fn parse(raw: &str) -> Option<Self> {
		let cleaned = names::clean_track_name(raw);
		let animation = cleaned.get(0..3)?.to_owned();
		let model = cleaned.get(3..6)?.to_owned();
		let piece = names::or_root(cleaned.get(6..)?);
		Some(Self {
			cleaned,
			animation,
			model,
			piece,
		})
	}

	/// Name a pose track referenced directly by a bone.
	pub fn pose(raw: &str, model_base: &str) -> Self {
		let cleaned = names::clean_track_name(raw);
		let piece = names::piece_name(&cleaned, model_base);
		Self {
			cleaned,
			animation: POSE_ANIMATION.to_owned(),
			model: model_base.to_owned(),
			piece,
		}
	}
}

/// Tracks bound under one animation name.
#[derive(Debug, Clone, Default)]
pub struct Animation {
	/// Animation code.
	pub name: String,
	/// Model whose tracks first populated this animation.
	pub model_base: String,
	/// Largest frame count over bound tracks.
	pub frame_count: usize,
	/// Largest `frame_count * frame_ms` over bound tracks.
	pub total_time_ms: u64,
	/// Bindings keyed by raw track name.
	pub tracks_by_raw_name: BTreeMap<String, TrackBinding>,
	/// Bindings keyed by cleaned track name.
	pub tracks_by_cleaned_name: BTreeMap<String, TrackBinding>,
	/// Bindings keyed by bone piece.
	pub tracks_by_piece: BTreeMap<String, TrackBinding>,
}

impl Animation {
	/// Start an empty animation.
	pub fn new(name: &str, model_base: &str) -> Self {
		Self {
			name: name.to_owned(),
			model_base: model_base.to_owned(),
			..Self::default()
		}
	}

	/// Bind `binding` to `name.piece`. The first binding per piece wins.
	pub fn bind(&mut self, binding: TrackBinding, name: &TrackName) -> bool {
		if self.tracks_by_piece.contains_key(&name.piece) {
			return false;
		}

		self.frame_count = self.frame_count.max(binding.frame_count);
		let total = binding.frame_count as u64 * u64::from(binding.frame_ms);
		self.total_time_ms = self.total_time_ms.max(total);

		self.tracks_by_raw_name.entry(binding.raw_name.to_string()).or_insert_with(|| binding.clone());
		self.tracks_by_cleaned_name.entry(name.cleaned.clone()).or_insert_with(|| binding.clone());
		self.tracks_by_piece.insert(name.piece.clone(), binding);
		true
	}

	/// Binding for a bone piece.
	pub fn track(&self, piece: &str) -> Option<&TrackBinding> {
		self.tracks_by_piece.get(piece)
	}
}

impl SkeletonHierarchy {
	/// Walk the bones from the root and fill names, paths and parents.
	///
	/// Returns `false` without touching anything when the tree is already
	/// built.
	pub fn build_tree(&mut self, strip_model_base: bool) -> bool {
		if self.built {
			return false;
		}

		self.strip_model_base = strip_model_base;
		let mut visited = vec![false; self.bones.len()];
		if !self.bones.is_empty() {
			self.walk(&mut visited);
		}

		let unreachable = visited.iter().filter(|seen| !**seen).count();
		if unreachable > 0 {
			warn!("skeleton {:?}: {unreachable} bones unreachable from the root", self.model_base);
		}

		self.built = true;
		true
	}

	fn cleaned_bone_name(&self, raw: &str) -> String {
		let cleaned = names::clean_bone_name(raw);
		if self.strip_model_base && !self.model_base.is_empty() {
			if let Some(stripped) = cleaned.strip_prefix(self.model_base.as_str()) {
				return names::or_root(stripped);
			}
		}
		names::or_root(&cleaned)
	}

	/// Depth-first from the root bone. Children are pushed in reverse so they
	/// are popped in declaration order.
	fn walk(&mut self, visited: &mut [bool]) {
		let mut stack: Vec<(usize, Option<usize>)> = vec![(0, None)];
		while let Some((index, parent)) = stack.pop() {
			if visited[index] {
				warn!("skeleton {:?}: bone {index} reached twice, skipping", self.model_base);
				continue;
			}
			visited[index] = true;

			let (raw_prefix, cleaned_prefix, index_prefix) = parent
				.map(|parent| {
					let bone = &self.bones[parent];
					(format!("{}/", bone.full_path), format!("{}/", bone.cleaned_full_path), bone.index_path.clone())
				})
				.unwrap_or_default();
			let cleaned = self.cleaned_bone_name(&self.bones[index].name);
			let piece = names::piece_name(&names::clean_bone_name(&self.bones[index].name), &self.model_base);

			let bone = &mut self.bones[index];
			bone.parent = parent;
			bone.full_path = format!("{raw_prefix}{}", bone.name);
			bone.cleaned_full_path = format!("{cleaned_prefix}{cleaned}");
			bone.index_path = format!("{index_prefix}{index}/");
			bone.cleaned_name = cleaned;
			bone.piece = piece;

			stack.extend(bone.children.iter().rev().map(|&child| (child, Some(index))));
		}
	}

	/// Bind a track under `name.animation`.
	///
	/// A track of this skeleton's own model replaces an animation first
	/// populated by another model. Rebinding a piece is a no-op.
	pub fn bind_track(&mut self, binding: TrackBinding, name: &TrackName) -> bool {
		let animation = self
			.animations
			.entry(name.animation.clone())
			.or_insert_with(|| Animation::new(&name.animation, &name.model));
		if animation.model_base != name.model && name.model == self.model_base {
			*animation = Animation::new(&name.animation, &name.model);
		}
		animation.bind(binding, name)
	}

	/// Index of the bone with piece key `piece`.
	pub fn bone_by_piece(&self, piece: &str) -> Option<usize> {
		self.bones.iter().position(|bone| bone.piece == piece)
	}

	/// Transform of `bone` at `frame` of `animation`.
	///
	/// Falls back to the first frame of the bone's pose track. Bones with
	/// neither are skipped with a warning.
	pub fn bone_transform(
		&self,
		doc: &WldDocument,
		shared: Option<&WldDocument>,
		animation: &str,
		bone: usize,
		frame: usize,
	) -> Option<BoneTransform> {
		let piece = &self.bones.get(bone)?.piece;
		let direct = self
			.animations
			.get(animation)
			.and_then(|anim| anim.track(piece))
			.and_then(|binding| binding.frame(doc, shared, frame));
		if direct.is_some() {
			return direct;
		}

		let pose = self
			.animations
			.get(POSE_ANIMATION)
			.and_then(|anim| anim.track(piece))
			.and_then(|binding| binding.frame(doc, shared, 0));
		if pose.is_none() {
			warn!("skeleton {:?}: no {animation:?} or pose frame for bone {piece:?}", self.model_base);
		}
		pose
	}
}

/// Track fields needed for binding, copied out of a document.
#[derive(Debug, Clone)]
pub struct TrackSummary {
	/// Track fragment.
	pub track: FragmentRef,
	/// Raw track name.
	pub name: Arc<str>,
	/// Referenced frame data.
	pub track_def: Option<FragmentRef>,
	/// Frames in `track_def`.
	pub frame_count: usize,
	/// Delay between frames in milliseconds.
	pub frame_ms: u32,
}

impl TrackSummary {
	/// Summarize every track of `doc` in document order.
	pub fn collect(doc: &WldDocument) -> Vec<Self> {
		doc.iter_kind::<TrackFragment>()
			.map(|(fragment, track)| {
				let frame_count = track
					.track_def
					.and_then(|def| doc.get_as::<TrackDefFragment>(def))
					.map_or(0, |def| def.frames.len());
				Self {
					track: fragment.index,
					name: fragment.name.clone(),
					track_def: track.track_def,
					frame_count,
					frame_ms: track.frame_ms,
				}
			})
			.collect()
	}

	/// Binding for this track from `source`.
	pub fn binding(&self, source: TrackSource) -> TrackBinding {
		TrackBinding {
			track: self.track,
			track_def: self.track_def,
			raw_name: self.name.clone(),
			source,
			frame_count: self.frame_count,
			frame_ms: self.frame_ms,
		}
	}
}

/// Tracks referenced directly by any bone of `doc`.
pub(crate) fn pose_tracks(doc: &WldDocument) -> HashSet<FragmentRef> {
	doc.iter_kind::<SkeletonHierarchy>()
		.flat_map(|(_, skeleton)| skeleton.bones.iter().filter_map(|bone| bone.track))
		.collect()
}

/// Build every skeleton of `doc` and bind its local tracks.
pub(crate) fn build_all(doc: &mut WldDocument, strip_model_base: bool) -> usize {
	let tracks = TrackSummary::collect(doc);
	let by_ref: HashMap<FragmentRef, &TrackSummary> = tracks.iter().map(|summary| (summary.track, summary)).collect();
	let pose = pose_tracks(doc);
	let skeletons = doc.refs_of_kind(FragmentKind::SkeletonHierarchy).to_vec();

	let mut built = 0;
	for item in skeletons {
		let Some(skeleton) = doc.get_as_mut::<SkeletonHierarchy>(item) else {
			continue;
		};
		if !skeleton.build_tree(strip_model_base) {
			debug!("skeleton {item} already built");
			continue;
		}
		built += 1;

		let model_base = skeleton.model_base.clone();
		let bone_tracks: Vec<FragmentRef> = skeleton.bones.iter().filter_map(|bone| bone.track).collect();
		for track in bone_tracks {
			if let Some(summary) = by_ref.get(&track) {
				skeleton.bind_track(summary.binding(TrackSource::Local), &TrackName::pose(&summary.name, &model_base));
			}
		}

		for summary in &tracks {
			if pose.contains(&summary.track) {
				continue;
			}
			let Some(name) = TrackName::parse(&summary.name) else {
				continue;
			};
			if name.model == model_base {
				skeleton.bind_track(summary.binding(TrackSource::Local), &name);
			}
		}

		info!(
			"skeleton {item} ({model_base}): {} bones, {} animations",
			skeleton.bones.len(),
			skeleton.animations.len()
		);
	}
	built
}
