//! BSP linking: tree leaves to regions, regions to region types.
//!
//! Leaf nodes carry a one-based `region_id` that indexes the document's
//! BSP regions in document order, not the fragment table. Region types list
//! zero-based indices into that same ordered list.

use log::{debug, info};

use crate::wld::region::RegionClassification;
use crate::wld::{BspRegion, BspRegionType, BspTree, FragmentKind, FragmentRef, WldDocument};

/// Attach regions to the leaf nodes of `tree`.
///
/// Out-of-range region ids leave the node unlinked. Returns the number of
/// linked nodes.
pub fn link_regions(tree: &mut BspTree, ordered_regions: &[FragmentRef]) -> usize {
	let mut linked = 0;
	for node in &mut tree.nodes {
		if !node.is_leaf() {
			continue;
		}
		node.region = usize::try_from(node.region_id - 1)
			.ok()
			.and_then(|index| ordered_regions.get(index))
			.copied();
		if node.region.is_some() {
			linked += 1;
		}
	}
	linked
}

/// One region-type assignment produced by [`link_region_type`].
#[derive(Debug, Clone)]
pub struct RegionLink {
	/// Target region.
	pub region: FragmentRef,
	/// Region type applied.
	pub region_type: FragmentRef,
	/// Classification copied onto the region.
	pub classification: RegionClassification,
}

/// Plan the assignments a region type makes onto the ordered regions.
pub fn link_region_type(type_ref: FragmentRef, region_type: &BspRegionType, ordered_regions: &[FragmentRef]) -> Vec<RegionLink> {
	region_type
		.region_indices
		.iter()
		.filter_map(|&index| ordered_regions.get(usize::try_from(index).ok()?))
		.map(|&region| RegionLink {
			region,
			region_type: type_ref,
			classification: region_type.classification.clone(),
		})
		.collect()
}

/// Counts reported by [`WldDocument::link_bsp`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkSummary {
	/// BSP trees visited.
	pub trees: usize,
	/// Leaf nodes linked to a region.
	pub linked_nodes: usize,
	/// Region-type assignments applied.
	pub typed_regions: usize,
}

pub(crate) fn link_document(doc: &mut WldDocument) -> LinkSummary {
	let ordered = doc.refs_of_kind(FragmentKind::BspRegion).to_vec();
	let trees = doc.refs_of_kind(FragmentKind::BspTree).to_vec();
	let types = doc.refs_of_kind(FragmentKind::BspRegionType).to_vec();
	let mut summary = LinkSummary::default();

	for item in trees {
		if let Some(tree) = doc.get_as_mut::<BspTree>(item) {
			summary.trees += 1;
			summary.linked_nodes += link_regions(tree, &ordered);
		}
	}

	let mut links = Vec::new();
	for item in types {
		if let Some(region_type) = doc.get_as::<BspRegionType>(item) {
			links.extend(link_region_type(item, region_type, &ordered));
		}
	}

	for link in links {
		if let Some(region) = doc.get_as_mut::<BspRegion>(link.region) {
			if region.region_type.is_some_and(|previous| previous != link.region_type) {
				debug!("region {} retyped by {}", link.region, link.region_type);
			}
			region.region_type = Some(link.region_type);
			region.classification = Some(link.classification);
			summary.typed_regions += 1;
		}
	}

	info!(
		"bsp: {} trees, {} leaves linked, {} region assignments over {} regions",
		summary.trees,
		summary.linked_nodes,
		summary.typed_regions,
		ordered.len()
	);
	summary
}

#[cfg(test)]
mod tests;
