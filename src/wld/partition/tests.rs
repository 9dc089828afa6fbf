use crate::wld::region::{RegionClass, classify};
use crate::wld::{BspNode, BspRegionType, BspTree, FragmentRef};

use super::{link_region_type, link_regions};

fn leaf(region_id: u32) -> BspNode {
	BspNode {
		region_id,
		..BspNode::default()
	}
}

#[test]
fn region_id_indexes_the_ordered_region_list() {
	// Regions sit at fragment indices 10, 20, 30: region_id 3 must land on 30.
	let ordered = [FragmentRef::from_index(10), FragmentRef::from_index(20), FragmentRef::from_index(30)];
	let mut tree = BspTree {
		nodes: vec![BspNode::default(), leaf(3), leaf(1)],
	};

	assert_eq!(link_regions(&mut tree, &ordered), 2);
	assert_eq!(tree.nodes[0].region, None);
	assert_eq!(tree.nodes[1].region, Some(FragmentRef::from_index(30)));
	assert_eq!(tree.nodes[2].region, Some(FragmentRef::from_index(10)));
}

#[test]
fn out_of_range_region_id_stays_unlinked() {
	let ordered = [FragmentRef::from_index(4)];
	let mut tree = BspTree { nodes: vec![leaf(2)] };

	assert_eq!(link_regions(&mut tree, &ordered), 0);
	assert_eq!(tree.nodes[0].region, None);
}

#[test]
fn relinking_is_stable() {
	let ordered = [FragmentRef::from_index(1), FragmentRef::from_index(2)];
	let mut tree = BspTree { nodes: vec![leaf(2)] };

	link_regions(&mut tree, &ordered);
	link_regions(&mut tree, &ordered);
	assert_eq!(tree.nodes[0].region, Some(FragmentRef::from_index(2)));
}

#[test]
fn region_type_targets_zero_based_region_indices() {
	let ordered = [FragmentRef::from_index(5), FragmentRef::from_index(6), FragmentRef::from_index(7)];
	let region_type = BspRegionType {
		region_indices: vec![0, 2, 9],
		region_string: "wtn_pool".to_owned(),
		classification: classify("wtn_pool"),
		..BspRegionType::default()
	};

	let links = link_region_type(FragmentRef::from_index(8), &region_type, &ordered);
	let targets: Vec<_> = links.iter().map(|link| link.region).collect();
	assert_eq!(targets, [FragmentRef::from_index(5), FragmentRef::from_index(7)]);
	assert!(links.iter().all(|link| link.classification.has(RegionClass::Water)));
	assert!(links.iter().all(|link| link.region_type == FragmentRef::from_index(8)));
}
