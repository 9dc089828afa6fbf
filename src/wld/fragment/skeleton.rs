use std::collections::BTreeMap;
use std::sync::Arc;

use log::warn;

use crate::wld::bytes::Cursor;
use crate::wld::fragment::{DecodeContext, DecodeFragment, MeshReference, TrackFragment};
use crate::wld::skeleton::Animation;
use crate::wld::{FragmentRef, Result, names};

const SKELETON_HAS_PARAMS: u32 = 1 << 0;
const SKELETON_HAS_BOUNDING_RADIUS: u32 = 1 << 1;
const SKELETON_HAS_MESHES: u32 = 1 << 9;

/// One node of a [`SkeletonHierarchy`].
///
/// Path fields stay empty until the tree pass runs.
#[derive(Debug, Clone, Default)]
pub struct Bone {
	/// Position in the skeleton's bone list.
	pub index: usize,
	/// Raw name from the string table.
	pub name: Arc<str>,
	/// Raw flags word.
	pub flags: u32,
	/// Resolved pose [`TrackFragment`].
	pub track: Option<FragmentRef>,
	/// Resolved attached mesh or sprite.
	pub mesh: Option<FragmentRef>,
	/// Child bone indices.
	pub children: Vec<usize>,
	/// Parent bone index; `None` for the root and for unreachable bones.
	pub parent: Option<usize>,
	/// Lower-cased name without `_DAG`, `"root"` when empty.
	pub cleaned_name: String,
	/// Track piece key: the cleaned name with the model base removed.
	pub piece: String,
	/// Raw names from the root joined with `/`.
	pub full_path: String,
	/// Cleaned names from the root joined with `/`.
	pub cleaned_full_path: String,
	/// Bone indices from the root, each followed by `/`.
	pub index_path: String,
}

/// Bone hierarchy and bound animations for one skinned model (0x10).
#[derive(Debug, Clone, Default)]
pub struct SkeletonHierarchy {
	/// Raw flags word.
	pub flags: u32,
	/// Raw polygon-animation reference.
	pub polygon_animation: Option<FragmentRef>,
	/// Unknown-purpose words, present when flag bit 0 is set.
	pub params: Option<[i32; 3]>,
	/// Bounding radius, present when flag bit 1 is set.
	pub bounding_radius: Option<f32>,
	/// Bones in declaration order; bone 0 is the root.
	pub bones: Vec<Bone>,
	/// Resolved [`MeshReference`] list, present when flag bit 9 is set.
	pub meshes: Vec<FragmentRef>,
	/// Unknown-purpose words paired with `meshes`.
	pub mesh_params: Vec<i32>,
	/// Lower-cased name without `_HS_DEF`.
	pub model_base: String,
	/// Animations keyed by name, filled by the tree pass.
	pub animations: BTreeMap<String, Animation>,
	/// Whether cleaned bone names had the model base removed.
	pub strip_model_base: bool,
	pub(crate) built: bool,
}

impl SkeletonHierarchy {
	/// Whether the tree pass has run.
	pub fn is_built(&self) -> bool {
		self.built
	}

	fn read_bone(&mut self, index: usize, bone_count: usize, cursor: &mut Cursor<'_>, ctx: &DecodeContext<'_>) -> Result<()> {
		let mut bone = Bone {
			index,
			name: ctx.strings().name(cursor.read_i32_le()?),
			..Bone::default()
		};
		bone.flags = cursor.read_u32_le()?;
		bone.track = ctx.resolve_as::<TrackFragment>(cursor.read_i32_le()?);
		bone.mesh = ctx.resolve(cursor.read_i32_le()?);

		let child_count = cursor.read_count("bone child")?;
		for _ in 0..child_count {
			let raw = cursor.read_i32_le()?;
			match usize::try_from(raw) {
				Ok(child) if child < bone_count && child != index => bone.children.push(child),
				_ => warn!("skeleton {:?}: bone {index} names invalid child {raw}", ctx.name()),
			}
		}
		self.bones.push(bone);
		Ok(())
	}
}

impl DecodeFragment for SkeletonHierarchy {
	fn decode(&mut self, cursor: &mut Cursor<'_>, ctx: &DecodeContext<'_>) -> Result<()> {
		self.model_base = names::model_base(ctx.name());
		self.flags = cursor.read_u32_le()?;
		let bone_count = cursor.read_count("bone")?;
		self.polygon_animation = ctx.resolve(cursor.read_i32_le()?);
		if self.flags & SKELETON_HAS_PARAMS != 0 {
			self.params = Some(cursor.read_i32_array()?);
		}
		if self.flags & SKELETON_HAS_BOUNDING_RADIUS != 0 {
			self.bounding_radius = Some(cursor.read_f32_le()?);
		}

		for index in 0..bone_count {
			self.read_bone(index, bone_count, cursor, ctx)?;
		}

		if self.flags & SKELETON_HAS_MESHES != 0 {
			let mesh_count = cursor.read_count("skeleton mesh")?;
			for _ in 0..mesh_count {
				if let Some(mesh) = ctx.resolve_as::<MeshReference>(cursor.read_i32_le()?) {
					self.meshes.push(mesh);
				}
			}
			for _ in 0..mesh_count {
				self.mesh_params.push(cursor.read_i32_le()?);
			}
		}
		Ok(())
	}
}

/// Reference to a [`SkeletonHierarchy`] (0x11).
#[derive(Debug, Clone, Default)]
pub struct SkeletonHierarchyReference {
	/// Resolved skeleton.
	pub skeleton: Option<FragmentRef>,
	/// Raw flags word.
	pub flags: u32,
}

impl DecodeFragment for SkeletonHierarchyReference {
	fn decode(&mut self, cursor: &mut Cursor<'_>, ctx: &DecodeContext<'_>) -> Result<()> {
		self.skeleton = ctx.resolve_as::<SkeletonHierarchy>(cursor.read_i32_le()?);
		self.flags = cursor.read_u32_le()?;
		Ok(())
	}
}
