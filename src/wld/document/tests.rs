use glam::Vec2;
use wldoc_testkit::{MAGIC, Payload, VERSION_OLD, WldBuilder};

use crate::wld::fragment::type_id;
use crate::wld::{
	BitmapInfo, BitmapInfoReference, FragmentKind, FragmentRef, Generic, IssueKind, Material, Mesh, ShaderKind, WldDocument, WldError,
};

fn material_payload(bitmap_ref: i32) -> Payload {
	Payload::new().u32(0).u32(0x8000_0001).u32(0xFF10_2030).f32(0.5).f32(0.75).i32(bitmap_ref)
}

fn mesh_payload(uv: Payload) -> Payload {
	let mut payload = Payload::new().u32(0).i32(0).i32(0).i32(0).i32(0);
	payload = payload.f32(1.0).f32(2.0).f32(3.0).i32(0).i32(0).i32(0).f32(10.0);
	payload = payload.f32(-1.0).f32(-1.0).f32(-1.0).f32(1.0).f32(1.0).f32(1.0);
	// vertices, uvs, then seven empty sections and a shift of 1
	payload = payload.i16(1).i16(1).i16(0).i16(0).i16(0).i16(0).i16(0).i16(0).i16(0).i16(1);
	payload.i16(2).i16(4).i16(-6).bytes(&uv.into_bytes())
}

#[test]
fn bad_magic_is_invalid_container() {
	let mut bytes = WldBuilder::new().build();
	bytes[0] ^= 0xFF;
	assert!(matches!(WldDocument::decode(&bytes), Err(WldError::InvalidContainer { .. })));
}

#[test]
fn unknown_version_is_unrecognized_format() {
	let bytes = WldBuilder::new().version(0x1234).build();
	assert!(matches!(
		WldDocument::decode(&bytes),
		Err(WldError::UnrecognizedFormat { version: 0x1234 })
	));
}

#[test]
fn short_header_and_short_string_table_are_fatal() {
	let mut bytes = MAGIC.to_le_bytes().to_vec();
	bytes.extend_from_slice(&VERSION_OLD.to_le_bytes());
	assert!(matches!(WldDocument::decode(&bytes), Err(WldError::TruncatedHeader { have: 8, .. })));

	let mut builder = WldBuilder::new();
	builder.string("SOME_NAME");
	let bytes = builder.build();
	let cut = &bytes[..bytes.len() - 3];
	assert!(matches!(WldDocument::decode(cut), Err(WldError::TruncatedHeader { .. })));
}

#[test]
fn fragments_are_indexed_by_kind_and_first_name() {
	let mut builder = WldBuilder::new();
	builder.push_named(type_id::MATERIAL, "DUP_MDF", material_payload(0));
	builder.push_named(type_id::MATERIAL, "DUP_MDF", material_payload(0));
	builder.push_named(type_id::GLOBAL_AMBIENT_LIGHT, "AMBIENT", Payload::new().u32(0x8040_2010));

	let doc = WldDocument::decode(&builder.build()).expect("document decodes");
	assert_eq!(doc.fragments().len(), 3);
	assert!(doc.issues().is_empty());
	assert_eq!(doc.refs_of_kind(FragmentKind::Material).len(), 2);
	assert_eq!(doc.by_name("DUP_MDF").map(|fragment| fragment.index), Some(FragmentRef::from_index(0)));
	assert!(doc.by_name("MISSING").is_none());
	assert!(matches!(doc.find("MISSING"), Err(WldError::FragmentNotFound { .. })));

	let material = doc.get_as::<Material>(FragmentRef::from_index(1)).expect("material body");
	assert_eq!(material.shader, ShaderKind::Diffuse);
	assert_eq!(material.brightness, 0.5);
}

#[test]
fn iter_kind_yields_typed_bodies_in_document_order() {
	let mut builder = WldBuilder::new();
	builder.push_named(type_id::MATERIAL, "FIRST_MDF", material_payload(0));
	builder.push_named(type_id::GLOBAL_AMBIENT_LIGHT, "AMBIENT", Payload::new().u32(0x8040_2010));
	builder.push_named(type_id::MATERIAL, "SECOND_MDF", material_payload(0));

	let doc = WldDocument::decode(&builder.build()).expect("document decodes");
	let names: Vec<&str> = doc.iter_kind::<Material>().map(|(fragment, _)| fragment.name()).collect();
	assert_eq!(names, ["FIRST_MDF", "SECOND_MDF"]);
	assert!(doc.iter_kind::<Material>().all(|(_, material)| material.shader == ShaderKind::Diffuse));
	assert_eq!(doc.iter_kind::<Mesh>().count(), 0);
}

#[test]
fn references_only_point_backward() {
	let mut builder = WldBuilder::new();
	// Fragment 1 names fragment 2, which exists but is decoded later.
	let forward = builder.next_ref() + 1;
	builder.push_named(type_id::BITMAP_INFO_REFERENCE, "EARLY", Payload::new().i32(forward).u32(0));
	let info = builder.push_named(type_id::BITMAP_INFO, "INFO", Payload::new().u32(0).i32(0));
	builder.push_named(type_id::BITMAP_INFO_REFERENCE, "LATE", Payload::new().i32(info).u32(0));

	let doc = WldDocument::decode(&builder.build()).expect("document decodes");
	let early = doc.get_as::<BitmapInfoReference>(FragmentRef::from_index(0)).expect("reference body");
	let late = doc.get_as::<BitmapInfoReference>(FragmentRef::from_index(2)).expect("reference body");
	assert_eq!(early.bitmap_info, None);
	assert_eq!(late.bitmap_info, Some(FragmentRef::from_index(1)));
	assert!(doc.get_as::<BitmapInfo>(FragmentRef::from_index(1)).is_some());
}

#[test]
fn typed_resolution_rejects_the_wrong_kind() {
	let mut builder = WldBuilder::new();
	let light = builder.push_named(type_id::GLOBAL_AMBIENT_LIGHT, "AMBIENT", Payload::new().u32(0));
	builder.push_named(type_id::BITMAP_INFO_REFERENCE, "REF", Payload::new().i32(light).u32(0));

	let doc = WldDocument::decode(&builder.build()).expect("document decodes");
	let reference = doc.get_as::<BitmapInfoReference>(FragmentRef::from_index(1)).expect("reference body");
	assert_eq!(reference.bitmap_info, None);
}

#[test]
fn short_payload_keeps_fields_read_before_the_failure() {
	let mut builder = WldBuilder::new();
	builder.push_named(type_id::MATERIAL, "CUT_MDF", Payload::new().u32(0).u32(0x13).u32(0xFFFF_FFFF));
	builder.push_named(type_id::GLOBAL_AMBIENT_LIGHT, "AFTER", Payload::new().u32(0));

	let doc = WldDocument::decode(&builder.build()).expect("document decodes");
	assert_eq!(doc.fragments().len(), 2);

	let material = doc.get_as::<Material>(FragmentRef::from_index(0)).expect("material body");
	assert_eq!(material.render_method, 0x13);
	assert_eq!(material.shader, ShaderKind::TransparentMasked);
	assert_eq!(material.color, 0xFFFF_FFFF);
	assert_eq!(material.brightness, 0.0);

	assert_eq!(doc.issues().len(), 1);
	let issue = &doc.issues()[0];
	assert_eq!(issue.fragment, Some(FragmentRef::from_index(0)));
	assert!(matches!(issue.kind, IssueKind::Payload(WldError::UnexpectedEof { .. })));
}

#[test]
fn unknown_type_is_captured_and_reported() {
	let mut builder = WldBuilder::new();
	builder.push(0x7E, Payload::new().i32(0).bytes(&[1, 2, 3]));
	builder.push(type_id::ZONE_UNKNOWN, Payload::new().i32(0).bytes(&[9]));

	let doc = WldDocument::decode(&builder.build()).expect("document decodes");
	let generic = doc.get_as::<Generic>(FragmentRef::from_index(0)).expect("generic body");
	assert_eq!(generic.bytes, [1, 2, 3]);
	assert_eq!(doc.refs_of_kind(FragmentKind::Generic).len(), 2);

	assert_eq!(doc.issues().len(), 1);
	assert_eq!(doc.issues()[0].type_id, Some(0x7E));
	assert!(matches!(doc.issues()[0].kind, IssueKind::UnknownFragmentType));
}

#[test]
fn truncated_table_keeps_decoded_fragments() {
	let mut builder = WldBuilder::new().declared_count(3);
	builder.push_named(type_id::GLOBAL_AMBIENT_LIGHT, "ONLY", Payload::new().u32(0));

	let doc = WldDocument::decode(&builder.build()).expect("document decodes");
	assert_eq!(doc.fragments().len(), 1);
	assert!(matches!(
		doc.issues()[0].kind,
		IssueKind::TruncatedTable { declared: 3, read: 1 }
	));
}

#[test]
fn texture_coordinates_follow_the_dialect() {
	let mut old = WldBuilder::new();
	old.push_named(type_id::MESH, "OLD_DMSPRITEDEF", mesh_payload(Payload::new().i16(128).i16(512)));
	let doc = WldDocument::decode(&old.build()).expect("document decodes");
	let mesh = doc.get_as::<Mesh>(FragmentRef::from_index(0)).expect("mesh body");
	assert!(doc.issues().is_empty());
	assert_eq!(mesh.uvs, [Vec2::new(0.5, 2.0)]);
	assert_eq!(mesh.vertices[0].to_array(), [1.0, 2.0, -3.0]);

	let mut new = WldBuilder::new().new_format();
	new.push_named(type_id::MESH, "NEW_DMSPRITEDEF", mesh_payload(Payload::new().i32(128).i32(512)));
	let doc = WldDocument::decode(&new.build()).expect("document decodes");
	let mesh = doc.get_as::<Mesh>(FragmentRef::from_index(0)).expect("mesh body");
	assert!(doc.is_new_format());
	assert!(doc.issues().is_empty());
	assert_eq!(mesh.uvs, [Vec2::new(0.5, 2.0)]);
}
