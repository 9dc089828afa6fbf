use std::sync::Arc;

use glam::Vec3;

use crate::wld::bytes::Cursor;
use crate::wld::fragment::{DecodeContext, DecodeFragment, FragmentData, VertexColorsReference, type_id};
use crate::wld::{FragmentRef, Result};

const ACTOR_HAS_CURRENT_ACTION: u32 = 1 << 0;
const ACTOR_HAS_LOCATION: u32 = 1 << 1;

/// Stored rotation units per full turn.
const ROTATION_UNITS: f32 = 512.0;

/// Camera definition (0x08). Parameters are kept as raw words.
#[derive(Debug, Clone, Default)]
pub struct Camera {
	/// Every payload word after the name.
	pub parameters: Vec<i32>,
}

impl DecodeFragment for Camera {
	fn decode(&mut self, cursor: &mut Cursor<'_>, _ctx: &DecodeContext<'_>) -> Result<()> {
		while cursor.remaining() >= 4 {
			self.parameters.push(cursor.read_i32_le()?);
		}
		Ok(())
	}
}

/// Reference to a [`Camera`] (0x09).
#[derive(Debug, Clone, Default)]
pub struct CameraReference {
	/// Resolved camera.
	pub camera: Option<FragmentRef>,
	/// Raw flags word.
	pub flags: u32,
}

impl DecodeFragment for CameraReference {
	fn decode(&mut self, cursor: &mut Cursor<'_>, ctx: &DecodeContext<'_>) -> Result<()> {
		self.camera = ctx.resolve_as::<Camera>(cursor.read_i32_le()?);
		self.flags = cursor.read_u32_le()?;
		Ok(())
	}
}

/// What an [`Actor`] renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActorKind {
	/// Skinned model through a [`crate::wld::SkeletonHierarchyReference`].
	Skeleton,
	/// Static model through a [`crate::wld::MeshReference`].
	Mesh,
	/// Camera through a [`crate::wld::CameraReference`].
	Camera,
	/// Two-dimensional sprite.
	Sprite,
	/// No recognized component.
	#[default]
	Unknown,
}

impl ActorKind {
	/// Stable label for text/JSON output.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Skeleton => "skeleton",
			Self::Mesh => "mesh",
			Self::Camera => "camera",
			Self::Sprite => "sprite",
			Self::Unknown => "unknown",
		}
	}

	fn priority(self) -> u8 {
		match self {
			Self::Skeleton => 0,
			Self::Mesh => 1,
			Self::Camera => 2,
			Self::Sprite => 3,
			Self::Unknown => u8::MAX,
		}
	}
}

/// Level-of-detail list for one actor action.
#[derive(Debug, Clone, Default)]
pub struct ActorAction {
	/// `(unknown, distance)` pairs.
	pub lods: Vec<(i32, f32)>,
}

/// Spawnable entity definition (0x14).
#[derive(Debug, Clone, Default)]
pub struct Actor {
	/// Raw flags word.
	pub flags: u32,
	/// Callback name, when the reference resolves.
	pub callback_name: Option<Arc<str>>,
	/// Raw bounds reference.
	pub bounds_ref: i32,
	/// Current action, when present.
	pub current_action: Option<i32>,
	/// Opaque location words, when present.
	pub location: Option<[i32; 7]>,
	/// Action level-of-detail lists.
	pub actions: Vec<ActorAction>,
	/// Resolved component references, in declaration order.
	pub components: Vec<FragmentRef>,
	/// Highest-priority component kind.
	pub kind: ActorKind,
	/// Component selected by `kind`.
	pub target: Option<FragmentRef>,
	/// Trailing user data.
	pub user_data: Vec<u8>,
}

impl Actor {
	fn select_target(&mut self, ctx: &DecodeContext<'_>) {
		for &component in &self.components {
			let fragment = &ctx.prior()[component.index()];
			let kind = match &fragment.data {
				FragmentData::SkeletonHierarchyReference(_) => ActorKind::Skeleton,
				FragmentData::MeshReference(_) => ActorKind::Mesh,
				FragmentData::CameraReference(_) => ActorKind::Camera,
				FragmentData::Generic(_) if fragment.type_id == type_id::SPRITE_2D => ActorKind::Sprite,
				_ => continue,
			};
			if kind.priority() < self.kind.priority() {
				self.kind = kind;
				self.target = Some(component);
			}
		}
	}

	/// Resolved skeleton reference, when the actor is skinned.
	pub fn skeleton_reference(&self) -> Option<FragmentRef> {
		self.target.filter(|_| self.kind == ActorKind::Skeleton)
	}

	/// Resolved mesh reference, when the actor is a static model.
	pub fn mesh_reference(&self) -> Option<FragmentRef> {
		self.target.filter(|_| self.kind == ActorKind::Mesh)
	}
}

impl DecodeFragment for Actor {
	fn decode(&mut self, cursor: &mut Cursor<'_>, ctx: &DecodeContext<'_>) -> Result<()> {
		self.flags = cursor.read_u32_le()?;
		self.callback_name = ctx.string(cursor.read_i32_le()?);
		let action_count = cursor.read_count("actor action")?;
		let component_count = cursor.read_count("actor component")?;
		self.bounds_ref = cursor.read_i32_le()?;
		if self.flags & ACTOR_HAS_CURRENT_ACTION != 0 {
			self.current_action = Some(cursor.read_i32_le()?);
		}
		if self.flags & ACTOR_HAS_LOCATION != 0 {
			self.location = Some(cursor.read_i32_array()?);
		}

		for _ in 0..action_count {
			let lod_count = cursor.read_count("actor lod")?;
			let mut action = ActorAction::default();
			for _ in 0..lod_count {
				action.lods.push((cursor.read_i32_le()?, cursor.read_f32_le()?));
			}
			self.actions.push(action);
		}

		for _ in 0..component_count {
			if let Some(component) = ctx.resolve(cursor.read_i32_le()?) {
				self.components.push(component);
			}
		}
		self.select_target(ctx);

		let user_len = cursor.read_count("actor user data")?;
		self.user_data = cursor.read_exact(user_len)?.to_vec();
		Ok(())
	}
}

/// Actor placed in the world (0x15).
#[derive(Debug, Clone, Default)]
pub struct ObjectInstance {
	/// Name of the placed [`Actor`], when the reference resolves.
	pub actor_name: Option<Arc<str>>,
	/// Raw flags word.
	pub flags: u32,
	/// Raw zone-unknown reference.
	pub zone_unknown_ref: i32,
	/// World position.
	pub position: Vec3,
	/// Rotation in degrees.
	pub rotation: Vec3,
	/// Per-axis scale.
	pub scale: Vec3,
	/// Resolved [`VertexColorsReference`].
	pub vertex_colors: Option<FragmentRef>,
	/// Trailing parameter word.
	pub params: i32,
}

impl DecodeFragment for ObjectInstance {
	fn decode(&mut self, cursor: &mut Cursor<'_>, ctx: &DecodeContext<'_>) -> Result<()> {
		self.actor_name = ctx.string(cursor.read_i32_le()?);
		self.flags = cursor.read_u32_le()?;
		self.zone_unknown_ref = cursor.read_i32_le()?;
		self.position = cursor.read_vec3()?;
		self.rotation = cursor.read_vec3()? * (360.0 / ROTATION_UNITS);
		self.scale = cursor.read_vec3()?;
		self.vertex_colors = ctx.resolve_as::<VertexColorsReference>(cursor.read_i32_le()?);
		self.params = cursor.read_i32_le()?;
		Ok(())
	}
}
