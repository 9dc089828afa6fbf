use wldoc_testkit::Payload;

use super::{DecodeOutcome, FragmentData, decode_fragment, synthetic, type_id};
use crate::wld::cipher::encode;
use crate::wld::region::RegionClass;
use crate::wld::{
	Actor, ActorKind, BitmapInfo, BitmapName, BspRegion, BspRegionType, CameraReference, FragmentKind, FragmentRef, Generic, MeshReference,
	SkeletonHierarchy, SkeletonHierarchyReference, StringTable, TrackDefFragment, WldError, WldHeader, WldVersion,
};

fn strings() -> StringTable {
	StringTable::from_plain(b"\0NAME\0WTN_POOL\0")
}

fn header() -> WldHeader {
	WldHeader {
		version: WldVersion::Old,
		fragment_count: 0,
		bsp_region_count: 8,
		unknown1: 0,
		string_table_size: 0,
		unknown2: 0,
	}
}

fn decode(type_id: u32, payload: Payload, prior: &[super::Fragment]) -> (super::Fragment, DecodeOutcome) {
	let bytes = Payload::new().i32(-1).bytes(&payload.into_bytes()).into_bytes();
	decode_fragment(prior.len(), type_id, &bytes, prior, &strings(), &header())
}

fn prior(count: usize) -> Vec<super::Fragment> {
	(0..count)
		.map(|index| synthetic(index, FragmentData::Generic(Generic::default()), ""))
		.collect()
}

#[test]
fn reference_to_a_later_fragment_is_absent() {
	// Fragment 5 names raw reference 7; only five fragments precede it.
	let (fragment, outcome) = decode(type_id::CAMERA_REFERENCE, Payload::new().i32(7).u32(0), &prior(5));

	assert!(matches!(outcome, DecodeOutcome::Complete));
	let reference = fragment.body::<CameraReference>().expect("camera reference body");
	assert_eq!(reference.camera, None);
	assert_eq!(fragment.index, FragmentRef::from_index(5));
	assert_eq!(fragment.name(), "NAME");
}

#[test]
fn optional_fields_follow_flag_bits() {
	let before = vec![synthetic(0, FragmentData::BitmapName(BitmapName::default()), "")];

	let (fragment, _) = decode(type_id::BITMAP_INFO, Payload::new().u32(1 << 3).i32(1).u32(250).i32(1), &before);
	let info = fragment.body::<BitmapInfo>().expect("bitmap info body");
	assert_eq!(info.current_frame, None);
	assert_eq!(info.sleep_ms, Some(250));
	assert_eq!(info.bitmaps, [FragmentRef::from_index(0)]);
	assert!(!info.is_animated());

	let (fragment, _) = decode(
		type_id::BITMAP_INFO,
		Payload::new().u32((1 << 2) | (1 << 3)).i32(2).i32(1).u32(100).i32(1).i32(1),
		&before,
	);
	let info = fragment.body::<BitmapInfo>().expect("bitmap info body");
	assert_eq!(info.current_frame, Some(1));
	assert!(info.is_animated());
}

#[test]
fn bitmap_names_are_cipher_decoded() {
	let encoded = encode(b"GRASS.BMP\0");
	let payload = Payload::new().i32(1).u16(encoded.len() as u16).bytes(&encoded);
	let (fragment, outcome) = decode(type_id::BITMAP_NAME, payload, &[]);

	assert!(matches!(outcome, DecodeOutcome::Complete));
	assert_eq!(fragment.body::<BitmapName>().expect("bitmap name body").filenames, ["GRASS.BMP"]);
}

#[test]
fn compact_frames_divide_by_the_shift_denominator() {
	let payload = Payload::new()
		.u32(1 << 3)
		.i32(1)
		.i16(16384)
		.i16(0)
		.i16(0)
		.i16(0)
		.i16(512)
		.i16(-256)
		.i16(0)
		.i16(256);
	let (fragment, outcome) = decode(type_id::TRACK_DEF, payload, &[]);

	assert!(matches!(outcome, DecodeOutcome::Complete));
	let frame = fragment.body::<TrackDefFragment>().expect("track def body").frames[0];
	assert_eq!(frame.translation.to_array(), [2.0, -1.0, 0.0]);
	assert_eq!(frame.scale, 1.0);
	assert_eq!(frame.rotation, glam::Quat::IDENTITY);
}

#[test]
fn actor_prefers_skeleton_over_mesh() {
	let before = vec![
		synthetic(0, FragmentData::MeshReference(MeshReference::default()), ""),
		synthetic(1, FragmentData::SkeletonHierarchyReference(SkeletonHierarchyReference::default()), ""),
	];
	let payload = Payload::new().u32(0).i32(0).i32(0).i32(2).i32(0).i32(1).i32(2).i32(0);
	let (fragment, outcome) = decode(type_id::ACTOR, payload, &before);

	assert!(matches!(outcome, DecodeOutcome::Complete));
	let actor = fragment.body::<Actor>().expect("actor body");
	assert_eq!(actor.kind, ActorKind::Skeleton);
	assert_eq!(actor.skeleton_reference(), Some(FragmentRef::from_index(1)));
	assert_eq!(actor.mesh_reference(), None);
}

#[test]
fn actor_sprite_comes_from_the_generic_sprite_type() {
	let mut sprite = synthetic(0, FragmentData::Generic(Generic::default()), "");
	sprite.type_id = type_id::SPRITE_2D;
	let payload = Payload::new().u32(0).i32(0).i32(0).i32(1).i32(0).i32(1).i32(0);
	let (fragment, _) = decode(type_id::ACTOR, payload, &[sprite]);

	assert_eq!(fragment.body::<Actor>().expect("actor body").kind, ActorKind::Sprite);
}

#[test]
fn invalid_bone_children_are_dropped() {
	let payload = Payload::new()
		.u32(0)
		.i32(2)
		.i32(0)
		.i32(-1)
		.u32(0)
		.i32(0)
		.i32(0)
		.i32(3)
		.i32(1)
		.i32(9)
		.i32(-4)
		.i32(-1)
		.u32(0)
		.i32(0)
		.i32(0)
		.i32(0);
	let (fragment, outcome) = decode(type_id::SKELETON_HIERARCHY, payload, &[]);

	assert!(matches!(outcome, DecodeOutcome::Complete));
	let skeleton = fragment.body::<SkeletonHierarchy>().expect("skeleton body");
	assert_eq!(skeleton.bones.len(), 2);
	assert_eq!(skeleton.bones[0].children, [1]);
	assert_eq!(skeleton.model_base, "name");
	assert!(!skeleton.is_built());
}

#[test]
fn region_data4_is_a_recoverable_error() {
	let payload = Payload::new().u32(0).i32(0).i32(0).i32(0).i32(0).i32(0).i32(1).i32(0).i32(0).i32(0);
	let (fragment, outcome) = decode(type_id::BSP_REGION, payload, &[]);

	assert!(matches!(outcome, DecodeOutcome::Failed(WldError::UnsupportedLayout { .. })));
	assert!(fragment.body::<BspRegion>().is_some());
}

#[test]
fn region_sections_decode_in_order() {
	let payload = Payload::new()
		.u32(1 | (1 << 7))
		.i32(0)
		.i32(1)
		.i32(0)
		.i32(0)
		.i32(1)
		.i32(0)
		.i32(0)
		.i32(0)
		.i32(1)
		.bytes(&[0; 12])
		.i32(5)
		.i32(2)
		.i32(10)
		.i32(11)
		.u16(2)
		.bytes(&[0x01, 0xC2])
		.f32(1.0)
		.f32(2.0)
		.f32(3.0)
		.f32(4.0)
		.i32(2)
		.bytes(&[7, 8]);
	let (fragment, outcome) = decode(type_id::BSP_REGION, payload, &[]);

	assert!(matches!(outcome, DecodeOutcome::Complete));
	let region = fragment.body::<BspRegion>().expect("region body");
	assert_eq!(region.data1.len(), 1);
	assert_eq!(region.data3[0].values, [10, 11]);
	assert_eq!(region.visible_regions, [1, 2]);
	assert_eq!(region.sphere.map(|sphere| sphere.radius), Some(4.0));
	assert_eq!(region.user_data, [7, 8]);
	assert_eq!(region.mesh, None);
}

#[test]
fn region_reverb_fields_precede_user_data() {
	let mut payload = Payload::new().u32((1 << 1) | (1 << 2) | (1 << 8));
	for _ in 0..9 {
		payload = payload.i32(0);
	}
	let payload = payload.f32(0.5).i32(3).i32(0).i32(1);
	let (fragment, outcome) = decode(type_id::BSP_REGION, payload, &prior(1));

	assert!(matches!(outcome, DecodeOutcome::Complete));
	let region = fragment.body::<BspRegion>().expect("region body");
	assert_eq!(region.reverb_volume, Some(0.5));
	assert_eq!(region.reverb_offset, Some(3));
	assert_eq!(region.sphere, None);
	assert!(region.user_data.is_empty());
	assert_eq!(region.mesh, Some(FragmentRef::from_index(0)));
}

#[test]
fn region_type_falls_back_to_its_name() {
	let bytes = Payload::new().i32(-6).u32(0).i32(1).u32(0).i32(0).into_bytes();
	let (fragment, outcome) = decode_fragment(0, type_id::BSP_REGION_TYPE, &bytes, &[], &strings(), &header());

	assert!(matches!(outcome, DecodeOutcome::Complete));
	let region_type = fragment.body::<BspRegionType>().expect("region type body");
	assert_eq!(region_type.region_string, "wtn_pool");
	assert!(region_type.classification.has(RegionClass::Water));
	assert_eq!(region_type.region_indices, [0]);
}

#[test]
fn kind_labels_round_trip() {
	for kind in FragmentKind::ALL {
		assert_eq!(FragmentKind::from_label(kind.as_str()), Some(*kind));
	}
	assert_eq!(FragmentKind::from_label("nope"), None);
}

#[test]
fn unreadable_name_fails_the_fragment() {
	let (fragment, outcome) = decode_fragment(0, type_id::BSP_TREE, &[1, 2], &[], &strings(), &header());
	assert!(matches!(outcome, DecodeOutcome::Failed(WldError::UnexpectedEof { .. })));
	assert_eq!(fragment.name(), "");
}
