#![allow(missing_docs)]

use wldoc::wld::region::{RegionClass, Zoneline};
use wldoc::wld::{BspRegion, BspTree, FragmentKind, FragmentRef, WldDocument};
use wldoc_testkit::fixtures;

fn zone() -> WldDocument {
	WldDocument::decode(&fixtures::zone().build()).expect("zone decodes")
}

fn tree(doc: &WldDocument) -> &BspTree {
	let item = doc.refs_of_kind(FragmentKind::BspTree)[0];
	doc.get_as::<BspTree>(item).expect("tree body")
}

#[test]
fn leaves_index_regions_in_document_order() {
	let mut doc = zone();
	let summary = doc.link_bsp();
	assert_eq!(summary.trees, 1);
	assert_eq!(summary.linked_nodes, 2);

	let nodes = &tree(&doc).nodes;
	assert!(!nodes[0].is_leaf());
	assert_eq!(nodes[0].left, Some(1));
	assert_eq!(nodes[0].right, Some(2));
	assert_eq!(nodes[0].region, None);
	assert_eq!(nodes[1].region, Some(FragmentRef::from_index(5)));
	assert_eq!(nodes[2].region, Some(FragmentRef::from_index(1)));
}

#[test]
fn later_region_types_override_earlier_ones() {
	let mut doc = zone();
	let summary = doc.link_bsp();
	assert_eq!(summary.typed_regions, 3);

	let first = doc.get_as::<BspRegion>(FragmentRef::from_index(1)).expect("region body");
	let first_class = first.classification.as_ref().expect("first region typed");
	assert!(first_class.has(RegionClass::Water));
	assert_eq!(first.region_type, Some(FragmentRef::from_index(7)));

	let second = doc.get_as::<BspRegion>(FragmentRef::from_index(3)).expect("region body");
	let second_class = second.classification.as_ref().expect("second region typed");
	assert_eq!(second.region_type, Some(FragmentRef::from_index(8)));
	assert_eq!(second_class.classes, [RegionClass::Zoneline]);
	assert_eq!(second_class.zoneline, Some(Zoneline::Reference { index: 0 }));

	let third = doc.get_as::<BspRegion>(FragmentRef::from_index(5)).expect("region body");
	assert!(third.classification.is_none());
}

#[test]
fn relinking_gives_the_same_result() {
	let mut doc = zone();
	let first = doc.link_bsp();
	let second = doc.link_bsp();
	assert_eq!(first, second);
	assert_eq!(tree(&doc).nodes[1].region, Some(FragmentRef::from_index(5)));
}
