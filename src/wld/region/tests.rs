use glam::Vec3;

use super::{RegionClass, Zoneline, classify, parse_zoneline};

#[test]
fn water_prefix_classifies_as_water() {
	let class = classify("wtn_foo");
	assert_eq!(class.classes, vec![RegionClass::Water]);
	assert!(class.zoneline.is_none());
}

#[test]
fn zone_marker_decodes_reference_zero_regardless_of_tail() {
	let class = classify("drntp_zone");
	assert_eq!(class.classes, vec![RegionClass::Zoneline]);
	assert_eq!(class.zoneline, Some(Zoneline::Reference { index: 0 }));

	let class = classify("drntp_zone_with_trailing_noise");
	assert_eq!(class.zoneline, Some(Zoneline::Reference { index: 0 }));
}

#[test]
fn zone_id_255_decodes_zone_point_reference() {
	let name = format!("drntp{:05}{:06}", 255, 7);
	assert_eq!(parse_zoneline(&name), Some(Zoneline::Reference { index: 7 }));
}

#[test]
fn absolute_zoneline_reads_fixed_offsets() {
	let name = format!("wtntp{:05}{:06}{:06}{:06}{:03}", 24, 100, -200, 300, 128);
	let class = classify(&name);
	assert!(class.has(RegionClass::Water));
	assert!(class.has(RegionClass::Zoneline));
	assert_eq!(
		class.zoneline,
		Some(Zoneline::Absolute {
			zone_id: 24,
			position: Vec3::new(100.0, -200.0, 300.0),
			heading: 128.0,
		})
	);
}

#[test]
fn short_zoneline_string_has_no_payload() {
	let class = classify("drntp00024");
	assert_eq!(class.classes, vec![RegionClass::Zoneline]);
	assert!(class.zoneline.is_none());
	assert!(classify("drntp").zoneline.is_none());
}

#[test]
fn prefix_table_covers_remaining_classes() {
	assert_eq!(classify("la_pool").classes, vec![RegionClass::Lava]);
	assert_eq!(classify("lantp_zone").classes, vec![RegionClass::Lava, RegionClass::Zoneline]);
	assert_eq!(classify("drp_arena").classes, vec![RegionClass::Pvp]);
	assert_eq!(classify("drn__s_ice").classes, vec![RegionClass::Slippery]);
	assert_eq!(classify("drn_other").classes, vec![RegionClass::Unknown]);
	assert_eq!(classify("sln_murk").classes, vec![RegionClass::WaterBlockingLos]);
	assert_eq!(classify("vwn_ice").classes, vec![RegionClass::FreezingWater]);
	assert_eq!(classify("zone_floor").classes, vec![RegionClass::Normal]);
}
