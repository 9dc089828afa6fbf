use glam::Vec3;

use crate::wld::bytes::Cursor;
use crate::wld::fragment::{DecodeContext, DecodeFragment};
use crate::wld::region::{RegionClassification, classify};
use crate::wld::{FragmentRef, Result, WldError, cipher, visibility};

const REGION_HAS_SPHERE: u32 = 1 << 0;
const REGION_HAS_REVERB_VOLUME: u32 = 1 << 1;
const REGION_HAS_REVERB_OFFSET: u32 = 1 << 2;
const REGION_PVS_WORDS: u32 = 1 << 5;
const REGION_PVS_BYTES: u32 = 1 << 7;
const REGION_HAS_MESH: u32 = 1 << 8;

/// One node of a [`BspTree`].
#[derive(Debug, Clone, Default)]
pub struct BspNode {
	/// Splitting plane normal.
	pub normal: Vec3,
	/// Splitting plane distance.
	pub split_distance: f32,
	/// One-based index into the ordered region list; zero on splitting nodes.
	pub region_id: u32,
	/// Zero-based left child node.
	pub left: Option<usize>,
	/// Zero-based right child node.
	pub right: Option<usize>,
	/// Region attached by the linking pass.
	pub region: Option<FragmentRef>,
}

impl BspNode {
	/// Whether this node is a leaf carrying a region.
	pub fn is_leaf(&self) -> bool {
		self.region_id != 0
	}
}

fn child_index(raw: i32) -> Option<usize> {
	usize::try_from(raw).ok().and_then(|raw| raw.checked_sub(1))
}

/// Binary space-partition tree (0x21).
#[derive(Debug, Clone, Default)]
pub struct BspTree {
	/// Nodes in declaration order; node 0 is the root.
	pub nodes: Vec<BspNode>,
}

impl DecodeFragment for BspTree {
	fn decode(&mut self, cursor: &mut Cursor<'_>, _ctx: &DecodeContext<'_>) -> Result<()> {
		let count = cursor.read_count("bsp node")?;
		for _ in 0..count {
			let normal = cursor.read_vec3()?;
			let split_distance = cursor.read_f32_le()?;
			let region_id = cursor.read_u32_le()?;
			let left = child_index(cursor.read_i32_le()?);
			let right = child_index(cursor.read_i32_le()?);
			self.nodes.push(BspNode {
				normal,
				split_distance,
				region_id,
				left,
				right,
				region: None,
			});
		}
		Ok(())
	}
}

/// Bounding sphere of a [`BspRegion`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RegionSphere {
	/// Sphere center.
	pub center: Vec3,
	/// Sphere radius.
	pub radius: f32,
}

/// Opaque third data section entry of a [`BspRegion`].
#[derive(Debug, Clone, Default)]
pub struct RegionData3 {
	/// Raw flags word.
	pub flags: i32,
	/// Raw values.
	pub values: Vec<i32>,
}

/// Leaf region of a [`BspTree`] (0x22).
#[derive(Debug, Clone, Default)]
pub struct BspRegion {
	/// Raw flags word.
	pub flags: u32,
	/// Unknown-purpose words interleaved with the section counts.
	pub params: [i32; 3],
	/// Opaque first data section.
	pub data1: Vec<[u8; 12]>,
	/// Opaque second data section.
	pub data2: Vec<[u8; 12]>,
	/// Opaque third data section.
	pub data3: Vec<RegionData3>,
	/// Opaque fifth data section.
	pub data5: Vec<[i32; 7]>,
	/// Raw potentially-visible-set entries.
	pub pvs: Vec<Vec<u8>>,
	/// Zero-based indices of regions visible from this one, sorted.
	pub visible_regions: Vec<usize>,
	/// Bounding sphere, present when flag bit 0 is set.
	pub sphere: Option<RegionSphere>,
	/// Reverb volume, present when flag bit 1 is set.
	pub reverb_volume: Option<f32>,
	/// Reverb offset, present when flag bit 2 is set.
	pub reverb_offset: Option<i32>,
	/// Trailing user data.
	pub user_data: Vec<u8>,
	/// Resolved region mesh, present when flag bit 8 is set.
	pub mesh: Option<FragmentRef>,
	/// Region type attached by the linking pass.
	pub region_type: Option<FragmentRef>,
	/// Classification copied from `region_type` by the linking pass.
	pub classification: Option<RegionClassification>,
}

impl BspRegion {
	fn pvs_words(&self) -> bool {
		self.flags & REGION_PVS_WORDS != 0 && self.flags & REGION_PVS_BYTES == 0
	}
}

impl DecodeFragment for BspRegion {
	fn decode(&mut self, cursor: &mut Cursor<'_>, ctx: &DecodeContext<'_>) -> Result<()> {
		self.flags = cursor.read_u32_le()?;
		self.params[0] = cursor.read_i32_le()?;
		let data1_count = cursor.read_count("region data1")?;
		let data2_count = cursor.read_count("region data2")?;
		self.params[1] = cursor.read_i32_le()?;
		let data3_count = cursor.read_count("region data3")?;
		let data4_count = cursor.read_count("region data4")?;
		self.params[2] = cursor.read_i32_le()?;
		let data5_count = cursor.read_count("region data5")?;
		let pvs_count = cursor.read_count("region pvs")?;

		for _ in 0..data1_count {
			self.data1.push(cursor.read_array()?);
		}
		for _ in 0..data2_count {
			self.data2.push(cursor.read_array()?);
		}
		for _ in 0..data3_count {
			let flags = cursor.read_i32_le()?;
			let count = cursor.read_count("region data3 value")?;
			let mut entry = RegionData3 { flags, values: Vec::with_capacity(count.min(cursor.remaining() / 4)) };
			for _ in 0..count {
				entry.values.push(cursor.read_i32_le()?);
			}
			self.data3.push(entry);
		}
		if data4_count > 0 {
			return Err(WldError::UnsupportedLayout { what: "bsp region data4 section" });
		}
		for _ in 0..data5_count {
			self.data5.push(cursor.read_i32_array()?);
		}

		let words = self.pvs_words();
		for _ in 0..pvs_count {
			let len = usize::from(cursor.read_u16_le()?);
			let entry = cursor.read_exact(len)?;
			self.visible_regions.extend(visibility::decode(entry, words, ctx.region_count()));
			self.pvs.push(entry.to_vec());
		}
		self.visible_regions.sort_unstable();
		self.visible_regions.dedup();

		if self.flags & REGION_HAS_SPHERE != 0 {
			self.sphere = Some(RegionSphere {
				center: cursor.read_vec3()?,
				radius: cursor.read_f32_le()?,
			});
		}
		if self.flags & REGION_HAS_REVERB_VOLUME != 0 {
			self.reverb_volume = Some(cursor.read_f32_le()?);
		}
		if self.flags & REGION_HAS_REVERB_OFFSET != 0 {
			self.reverb_offset = Some(cursor.read_i32_le()?);
		}

		let user_len = cursor.read_count("region user data")?;
		self.user_data = cursor.read_exact(user_len)?.to_vec();

		if self.flags & REGION_HAS_MESH != 0 {
			self.mesh = ctx.resolve(cursor.read_i32_le()?);
		}
		Ok(())
	}
}

/// Classification applied to a set of BSP regions (0x29).
#[derive(Debug, Clone, Default)]
pub struct BspRegionType {
	/// Raw flags word.
	pub flags: u32,
	/// Zero-based indices into the ordered region list.
	pub region_indices: Vec<u32>,
	/// Lower-cased classification string.
	pub region_string: String,
	/// Parsed classification.
	pub classification: RegionClassification,
}

impl DecodeFragment for BspRegionType {
	fn decode(&mut self, cursor: &mut Cursor<'_>, ctx: &DecodeContext<'_>) -> Result<()> {
		// Without an encoded string the fragment name carries the classification.
		self.region_string = ctx.name().to_ascii_lowercase();
		self.classification = classify(&self.region_string);

		self.flags = cursor.read_u32_le()?;
		let count = cursor.read_count("region type region")?;
		for _ in 0..count {
			self.region_indices.push(cursor.read_u32_le()?);
		}

		let len = cursor.read_count("region type string")?;
		let encoded = cursor.read_exact(len)?;
		let decoded = cipher::decode_string(encoded);
		if !decoded.is_empty() {
			self.region_string = decoded.to_ascii_lowercase();
			self.classification = classify(&self.region_string);
		}
		Ok(())
	}
}
