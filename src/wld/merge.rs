//! Read-only passes from a donor document into a primary document.
//!
//! Both documents must be fully decoded, and the primary's skeletons built,
//! before these run. The donor is never mutated.

use std::collections::HashSet;

use log::{debug, info, warn};

use crate::wld::skeleton::{self, TrackName, TrackSource, TrackSummary};
use crate::wld::{
	Actor, Color, FragmentKind, FragmentRef, Mesh, MeshReference, ObjectInstance, SkeletonHierarchy, VertexColors, VertexColorsReference,
	WldDocument,
};

/// Bind animations from a shared animation file into every built skeleton of
/// `primary`.
///
/// Only tracks of `donor_model` are considered, and only for animation names
/// a skeleton does not already have. Returns the number of tracks bound.
pub fn import_shared_animations(primary: &mut WldDocument, donor: &WldDocument, donor_model: &str) -> usize {
	let model = donor_model.to_ascii_lowercase();
	let donor_pose = skeleton::pose_tracks(donor);
	let shared: Vec<(TrackSummary, TrackName)> = TrackSummary::collect(donor)
		.into_iter()
		.filter(|summary| !donor_pose.contains(&summary.track))
		.filter_map(|summary| {
			let name = TrackName::parse(&summary.name)?;
			(name.model == model).then_some((summary, name))
		})
		.collect();

	let mut bound = 0;
	for item in primary.refs_of_kind(FragmentKind::SkeletonHierarchy).to_vec() {
		let Some(skeleton) = primary.get_as_mut::<SkeletonHierarchy>(item) else {
			continue;
		};
		if !skeleton.is_built() {
			warn!("skeleton {item} not built, skipping shared animations");
			continue;
		}

		let local: HashSet<String> = skeleton.animations.keys().cloned().collect();
		for (summary, name) in &shared {
			if local.contains(&name.animation) {
				continue;
			}
			if skeleton.bind_track(summary.binding(TrackSource::Shared), name) {
				bound += 1;
			}
		}
	}

	info!("shared animations: {bound} tracks bound from model {model:?}");
	bound
}

/// Vertex colors to copy onto one primary mesh.
#[derive(Debug, Clone)]
pub struct VertexColorPatch {
	/// Target mesh in the primary document.
	pub mesh: FragmentRef,
	/// Donor object instance the colors came from.
	pub instance: FragmentRef,
	/// Colors in vertex order.
	pub colors: Vec<Color>,
}

fn actor_mesh(doc: &WldDocument, actor_name: &str) -> Option<FragmentRef> {
	let actor = doc.by_name(actor_name)?.body::<Actor>()?;
	let mesh = doc.get_as::<MeshReference>(actor.mesh_reference()?)?.mesh?;
	doc.get_as::<Mesh>(mesh).map(|_| mesh)
}

fn instance_colors<'a>(doc: &'a WldDocument, instance: &ObjectInstance) -> Option<&'a VertexColors> {
	let reference = doc.get_as::<VertexColorsReference>(instance.vertex_colors?)?;
	doc.get_as::<VertexColors>(reference.vertex_colors?)
}

/// Plan vertex-color patches from donor object instances onto primary meshes.
///
/// An instance is matched through its actor name to a primary actor, then to
/// that actor's mesh. The first matching instance per mesh wins; count
/// mismatches are skipped with a warning.
pub fn plan_vertex_colors(primary: &WldDocument, donor: &WldDocument) -> Vec<VertexColorPatch> {
	let mut patched = HashSet::new();
	let mut patches = Vec::new();

	for (fragment, instance) in donor.iter_kind::<ObjectInstance>() {
		let Some(colors) = instance_colors(donor, instance) else {
			continue;
		};
		let Some(actor_name) = instance.actor_name.as_deref() else {
			continue;
		};
		let Some(mesh_ref) = actor_mesh(primary, actor_name) else {
			debug!("instance {} names {actor_name:?}, which has no mesh in the primary", fragment.index);
			continue;
		};
		if patched.contains(&mesh_ref) {
			continue;
		}
		let Some(mesh) = primary.get_as::<Mesh>(mesh_ref) else {
			continue;
		};
		if mesh.vertex_count() != colors.colors.len() {
			warn!(
				"instance {}: {} colors for {} vertices of mesh {mesh_ref}",
				fragment.index,
				colors.colors.len(),
				mesh.vertex_count()
			);
			continue;
		}

		patched.insert(mesh_ref);
		patches.push(VertexColorPatch {
			mesh: mesh_ref,
			instance: fragment.index,
			colors: colors.colors.clone(),
		});
	}
	patches
}

/// Write planned patches into `primary`. Returns the number applied.
pub fn apply_vertex_colors(primary: &mut WldDocument, patches: Vec<VertexColorPatch>) -> usize {
	let mut applied = 0;
	for patch in patches {
		let Some(mesh) = primary.get_as_mut::<Mesh>(patch.mesh) else {
			continue;
		};
		if mesh.vertex_count() != patch.colors.len() {
			continue;
		}
		mesh.colors = patch.colors;
		applied += 1;
	}
	info!("vertex colors: {applied} meshes patched");
	applied
}

#[cfg(test)]
mod tests;
