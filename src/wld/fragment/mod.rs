use std::sync::Arc;

use log::debug;

use crate::wld::bytes::Cursor;
use crate::wld::{FragmentRef, Result, StringTable, WldError, WldHeader, WldVersion};

mod actor;
mod bitmap;
mod bsp;
mod generic;
mod light;
mod material;
mod mesh;
mod skeleton;
mod track;

pub use actor::{Actor, ActorAction, ActorKind, Camera, CameraReference, ObjectInstance};
pub use bitmap::{BitmapInfo, BitmapInfoReference, BitmapName};
pub use bsp::{BspNode, BspRegion, BspRegionType, BspTree, RegionData3, RegionSphere};
pub use generic::Generic;
pub use light::{AmbientLight, GlobalAmbientLight, LightInstance, LightSource, LightSourceReference};
pub use material::{Material, MaterialList, ShaderKind};
pub use mesh::{Color, Mesh, MeshOp, MeshReference, Polygon, RenderGroup, VertexColors, VertexColorsReference, VertexPiece};
pub use skeleton::{Bone, SkeletonHierarchy, SkeletonHierarchyReference};
pub use track::{BoneTransform, TrackDefFragment, TrackFragment};

/// Numeric fragment type identifiers.
pub mod type_id {
	/// Encoded bitmap file names.
	pub const BITMAP_NAME: u32 = 0x03;
	/// Bitmap set, optionally animated.
	pub const BITMAP_INFO: u32 = 0x04;
	/// Reference to a bitmap set.
	pub const BITMAP_INFO_REFERENCE: u32 = 0x05;
	/// Two-dimensional sprite definition.
	pub const SPRITE_2D_DEF: u32 = 0x06;
	/// Reference to a two-dimensional sprite.
	pub const SPRITE_2D: u32 = 0x07;
	/// Camera definition.
	pub const CAMERA: u32 = 0x08;
	/// Reference to a camera.
	pub const CAMERA_REFERENCE: u32 = 0x09;
	/// Bone hierarchy for a skinned actor.
	pub const SKELETON_HIERARCHY: u32 = 0x10;
	/// Reference to a bone hierarchy.
	pub const SKELETON_HIERARCHY_REFERENCE: u32 = 0x11;
	/// Per-frame transform data.
	pub const TRACK_DEF: u32 = 0x12;
	/// Binding of transform data to a bone and animation.
	pub const TRACK: u32 = 0x13;
	/// Spawnable actor definition.
	pub const ACTOR: u32 = 0x14;
	/// Placed actor instance.
	pub const OBJECT_INSTANCE: u32 = 0x15;
	/// Zone-level unknown.
	pub const ZONE_UNKNOWN: u32 = 0x16;
	/// Polygon animation.
	pub const POLYGON_ANIMATION: u32 = 0x17;
	/// Reference to a polygon animation.
	pub const POLYGON_ANIMATION_REFERENCE: u32 = 0x18;
	/// Light definition.
	pub const LIGHT_SOURCE: u32 = 0x1B;
	/// Reference to a light definition.
	pub const LIGHT_SOURCE_REFERENCE: u32 = 0x1C;
	/// Spatial-partition tree.
	pub const BSP_TREE: u32 = 0x21;
	/// Spatial-partition leaf region.
	pub const BSP_REGION: u32 = 0x22;
	/// Particle sprite definition.
	pub const PARTICLE_SPRITE_DEF: u32 = 0x26;
	/// Reference to a particle sprite.
	pub const PARTICLE_SPRITE: u32 = 0x27;
	/// Placed light.
	pub const LIGHT_INSTANCE: u32 = 0x28;
	/// Region classification.
	pub const BSP_REGION_TYPE: u32 = 0x29;
	/// Region ambient light.
	pub const AMBIENT_LIGHT: u32 = 0x2A;
	/// Older mesh layout.
	pub const LEGACY_MESH: u32 = 0x2C;
	/// Reference to a mesh.
	pub const MESH_REFERENCE: u32 = 0x2D;
	/// Reference to animated vertices.
	pub const MESH_ANIMATED_VERTICES_REFERENCE: u32 = 0x2F;
	/// Surface material.
	pub const MATERIAL: u32 = 0x30;
	/// Ordered material list.
	pub const MATERIAL_LIST: u32 = 0x31;
	/// Per-vertex colors.
	pub const VERTEX_COLORS: u32 = 0x32;
	/// Reference to per-vertex colors.
	pub const VERTEX_COLORS_REFERENCE: u32 = 0x33;
	/// Particle cloud definition.
	pub const PARTICLE_CLOUD: u32 = 0x34;
	/// Zone-wide ambient color.
	pub const GLOBAL_AMBIENT_LIGHT: u32 = 0x35;
	/// Mesh.
	pub const MESH: u32 = 0x36;
	/// Animated vertex frames.
	pub const MESH_ANIMATED_VERTICES: u32 = 0x37;

	/// Type ids that are recognized but kept as opaque captures.
	pub const KNOWN_OPAQUE: &[u32] = &[
		SPRITE_2D_DEF,
		SPRITE_2D,
		ZONE_UNKNOWN,
		POLYGON_ANIMATION,
		POLYGON_ANIMATION_REFERENCE,
		PARTICLE_SPRITE_DEF,
		PARTICLE_SPRITE,
		LEGACY_MESH,
		MESH_ANIMATED_VERTICES_REFERENCE,
		PARTICLE_CLOUD,
		MESH_ANIMATED_VERTICES,
	];
}

/// Typed access to one [`FragmentData`] variant.
pub trait FragmentBody: Sized {
	/// Tag of the variant holding this body.
	const KIND: FragmentKind;

	/// Borrow the body when `data` holds this variant.
	fn from_data(data: &FragmentData) -> Option<&Self>;

	/// Mutably borrow the body when `data` holds this variant.
	fn from_data_mut(data: &mut FragmentData) -> Option<&mut Self>;

	/// Wrap the body in its variant.
	fn into_data(self) -> FragmentData;
}

macro_rules! fragment_kinds {
	($($(#[$doc:meta])* $variant:ident($body:ty) => $label:literal,)*) => {
		/// Decoded payload of one fragment.
		#[derive(Debug, Clone)]
		pub enum FragmentData {
			$($(#[$doc])* $variant($body),)*
		}

		/// Data-less tag of [`FragmentData`].
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
		pub enum FragmentKind {
			$($(#[$doc])* $variant,)*
		}

		impl FragmentData {
			/// Tag of this payload.
			pub fn kind(&self) -> FragmentKind {
				match self {
					$(Self::$variant(_) => FragmentKind::$variant,)*
				}
			}
		}

		impl FragmentKind {
			/// Every kind, in declaration order.
			pub const ALL: &'static [FragmentKind] = &[$(FragmentKind::$variant,)*];

			/// Stable machine label for text/JSON output.
			pub fn as_str(self) -> &'static str {
				match self {
					$(Self::$variant => $label,)*
				}
			}

			/// Parse a label produced by [`FragmentKind::as_str`].
			pub fn from_label(label: &str) -> Option<Self> {
				Self::ALL.iter().copied().find(|kind| kind.as_str() == label)
			}
		}

		$(
			impl FragmentBody for $body {
				const KIND: FragmentKind = FragmentKind::$variant;

				fn from_data(data: &FragmentData) -> Option<&Self> {
					match data {
						FragmentData::$variant(body) => Some(body),
						_ => None,
					}
				}

				fn from_data_mut(data: &mut FragmentData) -> Option<&mut Self> {
					match data {
						FragmentData::$variant(body) => Some(body),
						_ => None,
					}
				}

				fn into_data(self) -> FragmentData {
					FragmentData::$variant(self)
				}
			}
		)*
	};
}

fragment_kinds! {
	/// Encoded bitmap file names.
	BitmapName(BitmapName) => "bitmap_name",
	/// Bitmap set, optionally animated.
	BitmapInfo(BitmapInfo) => "bitmap_info",
	/// Reference to a bitmap set.
	BitmapInfoReference(BitmapInfoReference) => "bitmap_info_ref",
	/// Camera definition.
	Camera(Camera) => "camera",
	/// Reference to a camera.
	CameraReference(CameraReference) => "camera_ref",
	/// Bone hierarchy.
	SkeletonHierarchy(SkeletonHierarchy) => "skeleton",
	/// Reference to a bone hierarchy.
	SkeletonHierarchyReference(SkeletonHierarchyReference) => "skeleton_ref",
	/// Per-frame transform data.
	TrackDef(TrackDefFragment) => "track_def",
	/// Track binding.
	Track(TrackFragment) => "track",
	/// Actor definition.
	Actor(Actor) => "actor",
	/// Placed actor instance.
	ObjectInstance(ObjectInstance) => "object_instance",
	/// Light definition.
	LightSource(LightSource) => "light_source",
	/// Reference to a light definition.
	LightSourceReference(LightSourceReference) => "light_source_ref",
	/// Spatial-partition tree.
	BspTree(BspTree) => "bsp_tree",
	/// Spatial-partition region.
	BspRegion(BspRegion) => "bsp_region",
	/// Placed light.
	LightInstance(LightInstance) => "light_instance",
	/// Region classification.
	BspRegionType(BspRegionType) => "bsp_region_type",
	/// Region ambient light.
	AmbientLight(AmbientLight) => "ambient_light",
	/// Reference to a mesh.
	MeshReference(MeshReference) => "mesh_ref",
	/// Surface material.
	Material(Material) => "material",
	/// Ordered material list.
	MaterialList(MaterialList) => "material_list",
	/// Per-vertex colors.
	VertexColors(VertexColors) => "vertex_colors",
	/// Reference to per-vertex colors.
	VertexColorsReference(VertexColorsReference) => "vertex_colors_ref",
	/// Zone-wide ambient color.
	GlobalAmbientLight(GlobalAmbientLight) => "global_ambient_light",
	/// Mesh.
	Mesh(Mesh) => "mesh",
	/// Opaque capture of an undecoded kind.
	Generic(Generic) => "generic",
}

/// One decoded fragment and its table metadata.
#[derive(Debug, Clone)]
pub struct Fragment {
	/// Position in the document's fragment list.
	pub index: FragmentRef,
	/// Raw type identifier from the fragment header.
	pub type_id: u32,
	/// Declared payload size in bytes.
	pub size: usize,
	/// Decoded name; empty when the fragment has none.
	pub name: Arc<str>,
	/// Decoded payload.
	pub data: FragmentData,
}

impl Fragment {
	/// Tag of the decoded payload.
	pub fn kind(&self) -> FragmentKind {
		self.data.kind()
	}

	/// Raw type identifier.
	pub fn type_id(&self) -> u32 {
		self.type_id
	}

	/// Decoded name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Borrow the payload as a specific body type.
	pub fn body<T: FragmentBody>(&self) -> Option<&T> {
		T::from_data(&self.data)
	}
}

/// Read-only view handed to each fragment decoder.
///
/// `prior` holds exactly the fragments decoded before the current one, so
/// every reference resolved through this context points backward.
#[derive(Clone, Copy)]
pub struct DecodeContext<'a> {
	prior: &'a [Fragment],
	strings: &'a StringTable,
	version: WldVersion,
	region_count: usize,
	name: &'a str,
}

impl<'a> DecodeContext<'a> {
	/// Build a context over already-decoded fragments of a document with
	/// `header`.
	pub fn new(prior: &'a [Fragment], strings: &'a StringTable, header: &WldHeader, name: &'a str) -> Self {
		Self {
			prior,
			strings,
			version: header.version,
			region_count: header.bsp_region_count as usize,
			name,
		}
	}

	/// Fragments decoded before the current one.
	pub fn prior(&self) -> &'a [Fragment] {
		self.prior
	}

	/// Document string table.
	pub fn strings(&self) -> &'a StringTable {
		self.strings
	}

	/// Whether the newer dialect is in use.
	pub fn is_new_format(&self) -> bool {
		self.version == WldVersion::New
	}

	/// BSP region count declared in the header.
	pub fn region_count(&self) -> usize {
		self.region_count
	}

	/// Name of the fragment being decoded.
	pub fn name(&self) -> &'a str {
		self.name
	}

	/// Resolve a one-based payload reference.
	pub fn resolve(&self, raw: i32) -> Option<FragmentRef> {
		FragmentRef::resolve(raw, self.prior.len())
	}

	/// Resolve a one-based payload reference that must land on a `T`.
	pub fn resolve_as<T: FragmentBody>(&self, raw: i32) -> Option<FragmentRef> {
		let item = self.resolve(raw)?;
		T::from_data(&self.prior[item.index()].data).map(|_| item)
	}

	/// Borrow the `T` a payload reference lands on.
	pub fn fetch<T: FragmentBody>(&self, raw: i32) -> Option<&'a T> {
		let item = self.resolve(raw)?;
		T::from_data(&self.prior[item.index()].data)
	}

	/// Resolve a string-table reference.
	pub fn string(&self, raw: i32) -> Option<Arc<str>> {
		self.strings.lookup(raw).cloned()
	}
}

/// Per-kind decoder: fill a default body field by field.
///
/// A failed read leaves the fields read so far in place.
pub(crate) trait DecodeFragment: Default + FragmentBody {
	fn decode(&mut self, cursor: &mut Cursor<'_>, ctx: &DecodeContext<'_>) -> Result<()>;
}

/// How a single fragment's decode finished.
#[derive(Debug)]
pub(crate) enum DecodeOutcome {
	Complete,
	Opaque { known: bool },
	Failed(WldError),
}

/// Decode one fragment payload against the fragments decoded before it.
pub(crate) fn decode_fragment(
	index: usize,
	type_id: u32,
	payload: &[u8],
	prior: &[Fragment],
	strings: &StringTable,
	header: &WldHeader,
) -> (Fragment, DecodeOutcome) {
	let mut cursor = Cursor::new(payload);
	let (name, name_err) = match cursor.read_i32_le() {
		Ok(raw) => (strings.name(raw), None),
		Err(err) => (Arc::<str>::from(""), Some(err)),
	};

	let ctx = DecodeContext::new(prior, strings, header, &name);
	let (data, outcome) = decode_body(type_id, &mut cursor, &ctx);
	let outcome = match (name_err, outcome) {
		(Some(err), DecodeOutcome::Complete) => DecodeOutcome::Failed(err),
		(_, outcome) => outcome,
	};

	if matches!(outcome, DecodeOutcome::Complete) && cursor.remaining() > 0 {
		debug!("fragment {} (0x{type_id:02x}) left {} trailing bytes", index + 1, cursor.remaining());
	}

	let fragment = Fragment {
		index: FragmentRef::from_index(index),
		type_id,
		size: payload.len(),
		name,
		data,
	};
	(fragment, outcome)
}

fn decode_body(type_id: u32, cursor: &mut Cursor<'_>, ctx: &DecodeContext<'_>) -> (FragmentData, DecodeOutcome) {
	match type_id {
		type_id::BITMAP_NAME => run::<BitmapName>(cursor, ctx),
		type_id::BITMAP_INFO => run::<BitmapInfo>(cursor, ctx),
		type_id::BITMAP_INFO_REFERENCE => run::<BitmapInfoReference>(cursor, ctx),
		type_id::CAMERA => run::<Camera>(cursor, ctx),
		type_id::CAMERA_REFERENCE => run::<CameraReference>(cursor, ctx),
		type_id::SKELETON_HIERARCHY => run::<SkeletonHierarchy>(cursor, ctx),
		type_id::SKELETON_HIERARCHY_REFERENCE => run::<SkeletonHierarchyReference>(cursor, ctx),
		type_id::TRACK_DEF => run::<TrackDefFragment>(cursor, ctx),
		type_id::TRACK => run::<TrackFragment>(cursor, ctx),
		type_id::ACTOR => run::<Actor>(cursor, ctx),
		type_id::OBJECT_INSTANCE => run::<ObjectInstance>(cursor, ctx),
		type_id::LIGHT_SOURCE => run::<LightSource>(cursor, ctx),
		type_id::LIGHT_SOURCE_REFERENCE => run::<LightSourceReference>(cursor, ctx),
		type_id::BSP_TREE => run::<BspTree>(cursor, ctx),
		type_id::BSP_REGION => run::<BspRegion>(cursor, ctx),
		type_id::LIGHT_INSTANCE => run::<LightInstance>(cursor, ctx),
		type_id::BSP_REGION_TYPE => run::<BspRegionType>(cursor, ctx),
		type_id::AMBIENT_LIGHT => run::<AmbientLight>(cursor, ctx),
		type_id::MESH_REFERENCE => run::<MeshReference>(cursor, ctx),
		type_id::MATERIAL => run::<Material>(cursor, ctx),
		type_id::MATERIAL_LIST => run::<MaterialList>(cursor, ctx),
		type_id::VERTEX_COLORS => run::<VertexColors>(cursor, ctx),
		type_id::VERTEX_COLORS_REFERENCE => run::<VertexColorsReference>(cursor, ctx),
		type_id::GLOBAL_AMBIENT_LIGHT => run::<GlobalAmbientLight>(cursor, ctx),
		type_id::MESH => run::<Mesh>(cursor, ctx),
		other => {
			let known = type_id::KNOWN_OPAQUE.contains(&other);
			(Generic::capture(cursor).into_data(), DecodeOutcome::Opaque { known })
		}
	}
}

fn run<T: DecodeFragment>(cursor: &mut Cursor<'_>, ctx: &DecodeContext<'_>) -> (FragmentData, DecodeOutcome) {
	let mut body = T::default();
	let outcome = match body.decode(cursor, ctx) {
		Ok(()) => DecodeOutcome::Complete,
		Err(err) => DecodeOutcome::Failed(err),
	};
	(body.into_data(), outcome)
}

/// Test-only constructor for fragments outside a document decode.
#[cfg(test)]
pub(crate) fn synthetic(index: usize, data: FragmentData, name: &str) -> Fragment {
	Fragment {
		index: FragmentRef::from_index(index),
		type_id: 0,
		size: 0,
		name: Arc::<str>::from(name),
		data,
	}
}

#[cfg(test)]
mod tests;
