use wldoc_testkit::fixtures;

use super::{apply_vertex_colors, import_shared_animations, plan_vertex_colors};
use crate::wld::skeleton::TrackSource;
use crate::wld::{Color, FragmentKind, Mesh, SkeletonHierarchy, WldDocument};

fn decode(builder: wldoc_testkit::WldBuilder) -> WldDocument {
	WldDocument::decode(&builder.build()).expect("fixture decodes")
}

fn skeleton(doc: &WldDocument) -> &SkeletonHierarchy {
	let item = doc.refs_of_kind(FragmentKind::SkeletonHierarchy)[0];
	doc.get_as::<SkeletonHierarchy>(item).expect("skeleton body")
}

#[test]
fn shared_import_only_adds_missing_animations() {
	let mut primary = decode(fixtures::humanoid());
	let donor = decode(fixtures::shared_animations());
	primary.build_skeletons(false);

	let bound = import_shared_animations(&mut primary, &donor, "ELF");
	assert_eq!(bound, 1);

	let skeleton = skeleton(&primary);
	let local = &skeleton.animations["c01"];
	assert_eq!(local.model_base, "hum");
	assert_eq!(local.track("pe").map(|binding| binding.source), Some(TrackSource::Local));

	let shared = &skeleton.animations["l02"];
	assert_eq!(shared.frame_count, 6);
	assert_eq!(shared.total_time_ms, 240);
	assert_eq!(shared.track("pe").map(|binding| binding.source), Some(TrackSource::Shared));
}

#[test]
fn shared_import_skips_unbuilt_skeletons() {
	let mut primary = decode(fixtures::humanoid());
	let donor = decode(fixtures::shared_animations());

	assert_eq!(import_shared_animations(&mut primary, &donor, "elf"), 0);
	assert!(skeleton(&primary).animations.is_empty());
}

#[test]
fn shared_frames_are_read_from_the_donor() {
	let mut primary = decode(fixtures::humanoid());
	let donor = decode(fixtures::shared_animations());
	primary.build_skeletons(false);
	import_shared_animations(&mut primary, &donor, "elf");

	let skeleton = skeleton(&primary);
	let bone = skeleton.bone_by_piece("pe").expect("pe bone");
	let transform = skeleton.bone_transform(&primary, Some(&donor), "l02", bone, 4).expect("shared frame");
	assert_eq!(transform.translation.x, 4.0);
	assert!(skeleton.bone_transform(&primary, None, "l02", bone, 4).is_some_and(|pose| pose.translation.x == 0.0));
}

#[test]
fn vertex_colors_patch_only_matching_counts() {
	let mut primary = decode(fixtures::barrel_objects());
	let donor = decode(fixtures::barrel_placements());

	let patches = plan_vertex_colors(&primary, &donor);
	assert_eq!(patches.len(), 1);
	assert_eq!(patches[0].colors.len(), 3);

	assert_eq!(apply_vertex_colors(&mut primary, patches), 1);
	let item = primary.refs_of_kind(FragmentKind::Mesh)[0];
	let mesh = primary.get_as::<Mesh>(item).expect("mesh body");
	assert_eq!(mesh.colors[0], Color::from_bgra(0xFF00_00FF));
	assert_eq!(mesh.colors[0].r, 0x00);
	assert_eq!(mesh.colors[0].b, 0xFF);

	let donor_mesh_count = donor.refs_of_kind(FragmentKind::Mesh).len();
	assert_eq!(donor_mesh_count, 0);
}
