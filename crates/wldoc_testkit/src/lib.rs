//! Shared test helpers for building synthetic `.wld` buffers.
//!
//! The builder is the encoding side of the format: it writes the header,
//! encodes the string table and lays out length-prefixed fragments. Payload
//! contents are written with [`Payload`].

/// File identifier expected in the first four bytes.
pub const MAGIC: u32 = 0x5450_3D02;
/// Version constant of the older dialect.
pub const VERSION_OLD: u32 = 0x0001_5500;
/// Version constant of the newer dialect.
pub const VERSION_NEW: u32 = 0x1000_C800;

const KEY: [u8; 8] = [0x95, 0x3A, 0xC5, 0x2A, 0x95, 0x7A, 0x95, 0x6A];

/// XOR-encode bytes with the string key.
pub fn encode(bytes: &[u8]) -> Vec<u8> {
	bytes.iter().enumerate().map(|(idx, byte)| byte ^ KEY[idx % KEY.len()]).collect()
}

/// Incremental builder for a whole `.wld` buffer.
#[derive(Debug, Clone)]
pub struct WldBuilder {
	version: u32,
	strings: Vec<u8>,
	fragments: Vec<(u32, Vec<u8>)>,
	declared_count: Option<u32>,
}

impl Default for WldBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl WldBuilder {
	/// Start an old-dialect file with an empty leading string.
	pub fn new() -> Self {
		Self {
			version: VERSION_OLD,
			strings: vec![0],
			fragments: Vec::new(),
			declared_count: None,
		}
	}

	/// Switch to the newer dialect version constant.
	pub fn new_format(mut self) -> Self {
		self.version = VERSION_NEW;
		self
	}

	/// Override the version constant written to the header.
	pub fn version(mut self, version: u32) -> Self {
		self.version = version;
		self
	}

	/// Override the fragment count written to the header.
	pub fn declared_count(mut self, count: u32) -> Self {
		self.declared_count = Some(count);
		self
	}

	/// Append a string and return its negative string-table reference.
	pub fn string(&mut self, value: &str) -> i32 {
		let offset = self.strings.len();
		self.strings.extend_from_slice(value.as_bytes());
		self.strings.push(0);
		-(offset as i32)
	}

	/// Append a fragment and return its one-based reference.
	pub fn push(&mut self, type_id: u32, payload: Payload) -> i32 {
		self.fragments.push((type_id, payload.into_bytes()));
		self.fragments.len() as i32
	}

	/// Append a fragment whose payload starts with a freshly interned name.
	pub fn push_named(&mut self, type_id: u32, name: &str, payload: Payload) -> i32 {
		let name_ref = self.string(name);
		let mut bytes = Payload::new().i32(name_ref).into_bytes();
		bytes.extend(payload.into_bytes());
		self.fragments.push((type_id, bytes));
		self.fragments.len() as i32
	}

	/// Return the one-based reference the next pushed fragment will receive.
	pub fn next_ref(&self) -> i32 {
		self.fragments.len() as i32 + 1
	}

	/// Serialize the buffer.
	pub fn build(&self) -> Vec<u8> {
		let mut out = Vec::new();
		out.extend_from_slice(&MAGIC.to_le_bytes());
		out.extend_from_slice(&self.version.to_le_bytes());
		let count = self.declared_count.unwrap_or(self.fragments.len() as u32);
		out.extend_from_slice(&count.to_le_bytes());
		let regions = self.fragments.iter().filter(|(type_id, _)| *type_id == fragments::BSP_REGION).count() as u32;
		out.extend_from_slice(&regions.to_le_bytes());
		out.extend_from_slice(&0_i32.to_le_bytes());
		out.extend_from_slice(&(self.strings.len() as u32).to_le_bytes());
		out.extend_from_slice(&0_i32.to_le_bytes());
		out.extend(encode(&self.strings));

		for (type_id, payload) in &self.fragments {
			out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
			out.extend_from_slice(&type_id.to_le_bytes());
			out.extend_from_slice(payload);
		}
		out
	}
}

/// Little-endian payload writer.
#[derive(Debug, Clone, Default)]
pub struct Payload {
	bytes: Vec<u8>,
}

impl Payload {
	/// Start an empty payload.
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a `u8`.
	pub fn u8(mut self, value: u8) -> Self {
		self.bytes.push(value);
		self
	}

	/// Append an `i8`.
	pub fn i8(self, value: i8) -> Self {
		self.u8(value as u8)
	}

	/// Append a little-endian `u16`.
	pub fn u16(mut self, value: u16) -> Self {
		self.bytes.extend_from_slice(&value.to_le_bytes());
		self
	}

	/// Append a little-endian `i16`.
	pub fn i16(mut self, value: i16) -> Self {
		self.bytes.extend_from_slice(&value.to_le_bytes());
		self
	}

	/// Append a little-endian `u32`.
	pub fn u32(mut self, value: u32) -> Self {
		self.bytes.extend_from_slice(&value.to_le_bytes());
		self
	}

	/// Append a little-endian `i32`.
	pub fn i32(mut self, value: i32) -> Self {
		self.bytes.extend_from_slice(&value.to_le_bytes());
		self
	}

	/// Append a little-endian `f32`.
	pub fn f32(mut self, value: f32) -> Self {
		self.bytes.extend_from_slice(&value.to_le_bytes());
		self
	}

	/// Append raw bytes.
	pub fn bytes(mut self, value: &[u8]) -> Self {
		self.bytes.extend_from_slice(value);
		self
	}

	/// Append a length-prefixed (`i32`) cipher-encoded string.
	pub fn encoded_string(self, value: &str) -> Self {
		let encoded = encode(value.as_bytes());
		self.i32(encoded.len() as i32).bytes(&encoded)
	}

	/// Return the written bytes.
	pub fn into_bytes(self) -> Vec<u8> {
		self.bytes
	}
}

/// Payload helpers for the fragment kinds tests build most often.
///
/// Each helper writes the payload after the name reference; pair it with
/// [`WldBuilder::push_named`].
pub mod fragments {
	use super::{Payload, WldBuilder};

	/// Type id of per-frame transform data.
	pub const TRACK_DEF: u32 = 0x12;
	/// Type id of a track binding.
	pub const TRACK: u32 = 0x13;
	/// Type id of a bone hierarchy.
	pub const SKELETON: u32 = 0x10;
	/// Type id of a bone hierarchy reference.
	pub const SKELETON_REFERENCE: u32 = 0x11;
	/// Type id of an actor definition.
	pub const ACTOR: u32 = 0x14;
	/// Type id of a placed actor.
	pub const OBJECT_INSTANCE: u32 = 0x15;
	/// Type id of a mesh reference.
	pub const MESH_REFERENCE: u32 = 0x2D;
	/// Type id of vertex colors.
	pub const VERTEX_COLORS: u32 = 0x32;
	/// Type id of a vertex colors reference.
	pub const VERTEX_COLORS_REFERENCE: u32 = 0x33;
	/// Type id of a mesh.
	pub const MESH: u32 = 0x36;
	/// Type id of a BSP tree.
	pub const BSP_TREE: u32 = 0x21;
	/// Type id of a BSP region.
	pub const BSP_REGION: u32 = 0x22;
	/// Type id of a region type.
	pub const BSP_REGION_TYPE: u32 = 0x29;

	/// Float-layout frames; frame `i` translates by `(i, 0, 0)`.
	pub fn track_def(frames: usize) -> Payload {
		let mut payload = Payload::new().u32(0).i32(frames as i32);
		for frame in 0..frames {
			payload = payload.f32(1.0).f32(0.0).f32(0.0).f32(0.0);
			payload = payload.f32(frame as f32).f32(0.0).f32(0.0).f32(1.0);
		}
		payload
	}

	/// Track with a frame delay.
	pub fn track(track_def: i32, frame_ms: u32) -> Payload {
		Payload::new().i32(track_def).u32(1).u32(frame_ms)
	}

	/// Bone description for [`skeleton`].
	#[derive(Debug, Clone, Copy)]
	pub struct BoneSpec<'a> {
		/// Raw bone name.
		pub name: &'a str,
		/// One-based track reference, 0 for none.
		pub track: i32,
		/// Child bone indices.
		pub children: &'a [i32],
	}

	/// Skeleton without optional sections.
	pub fn skeleton(builder: &mut WldBuilder, bones: &[BoneSpec<'_>]) -> Payload {
		let mut payload = Payload::new().u32(0).i32(bones.len() as i32).i32(0);
		for bone in bones {
			let name = builder.string(bone.name);
			payload = payload.i32(name).u32(0).i32(bone.track).i32(0).i32(bone.children.len() as i32);
			for child in bone.children {
				payload = payload.i32(*child);
			}
		}
		payload
	}

	/// Reference payload: target then a zero flags word.
	pub fn reference(target: i32) -> Payload {
		Payload::new().i32(target).u32(0)
	}

	/// Actor with one component and no optional sections.
	pub fn actor(component: i32) -> Payload {
		Payload::new().u32(0).i32(0).i32(0).i32(1).i32(0).i32(component).i32(0)
	}

	/// Mesh with `vertices` vertices and no other sections.
	pub fn mesh(vertices: usize) -> Payload {
		let mut payload = Payload::new().u32(0).i32(0).i32(0).i32(0).i32(0);
		payload = payload.f32(0.0).f32(0.0).f32(0.0).i32(0).i32(0).i32(0).f32(0.0);
		payload = payload.f32(0.0).f32(0.0).f32(0.0).f32(0.0).f32(0.0).f32(0.0);
		payload = payload.i16(vertices as i16);
		for _ in 0..8 {
			payload = payload.i16(0);
		}
		payload = payload.i16(0);
		for vertex in 0..vertices {
			payload = payload.i16(vertex as i16).i16(0).i16(0);
		}
		payload
	}

	/// Vertex colors in BGRA words.
	pub fn vertex_colors(colors: &[u32]) -> Payload {
		let mut payload = Payload::new().i32(1).i32(colors.len() as i32).i32(1).i32(200).i32(0);
		for color in colors {
			payload = payload.u32(*color);
		}
		payload
	}

	/// Object instance placing the actor named by string reference `actor_name`.
	pub fn object_instance(actor_name: i32, vertex_colors: i32) -> Payload {
		let mut payload = Payload::new().i32(actor_name).u32(0).i32(0);
		for _ in 0..9 {
			payload = payload.f32(1.0);
		}
		payload.i32(vertex_colors).i32(0)
	}
}

/// Small complete documents shared by unit and integration tests.
pub mod fixtures {
	use super::fragments::{self, BoneSpec};
	use super::{Payload, WldBuilder};

	/// Character file with skeleton `HUM_HS_DEF`.
	///
	/// Bones: `HUM_DAG` (root) with child `HUMPE_DAG`, each with a one-frame
	/// pose track. Animation `c01` binds `C01HUMPE_TRACK` (10 frames, 100 ms)
	/// and `C01HUM_TRACK` (14 frames, 50 ms). A skinned actor `HUM_ACTORDEF`
	/// follows the skeleton reference.
	pub fn humanoid() -> WldBuilder {
		let mut builder = WldBuilder::new();
		let root_def = builder.push_named(fragments::TRACK_DEF, "HUM_TRACKDEF", fragments::track_def(1));
		let root_pose = builder.push_named(fragments::TRACK, "HUM_TRACK", fragments::track(root_def, 0));
		let pe_def = builder.push_named(fragments::TRACK_DEF, "HUMPE_TRACKDEF", fragments::track_def(1));
		let pe_pose = builder.push_named(fragments::TRACK, "HUMPE_TRACK", fragments::track(pe_def, 0));

		let walk_pe_def = builder.push_named(fragments::TRACK_DEF, "C01HUMPE_TRACKDEF", fragments::track_def(10));
		builder.push_named(fragments::TRACK, "C01HUMPE_TRACK", fragments::track(walk_pe_def, 100));
		let walk_root_def = builder.push_named(fragments::TRACK_DEF, "C01HUM_TRACKDEF", fragments::track_def(14));
		builder.push_named(fragments::TRACK, "C01HUM_TRACK", fragments::track(walk_root_def, 50));

		let bones = [
			BoneSpec {
				name: "HUM_DAG",
				track: root_pose,
				children: &[1],
			},
			BoneSpec {
				name: "HUMPE_DAG",
				track: pe_pose,
				children: &[],
			},
		];
		let payload = fragments::skeleton(&mut builder, &bones);
		let skeleton = builder.push_named(fragments::SKELETON, "HUM_HS_DEF", payload);
		let reference = builder.push_named(fragments::SKELETON_REFERENCE, "HUM_HS_DEF_REF", fragments::reference(skeleton));
		builder.push_named(fragments::ACTOR, "HUM_ACTORDEF", fragments::actor(reference));
		builder
	}

	/// Shared animation file for model `elf`.
	///
	/// Carries `C01ELFPE_TRACK` (3 frames) and `L02ELFPE_TRACK` (6 frames,
	/// 40 ms), plus `L02DWFPE_TRACK` from another model.
	pub fn shared_animations() -> WldBuilder {
		let mut builder = WldBuilder::new();
		for (name, frames, frame_ms) in [("C01ELFPE", 3, 0), ("L02ELFPE", 6, 40), ("L02DWFPE", 2, 0)] {
			let def = builder.push_named(fragments::TRACK_DEF, &format!("{name}_TRACKDEF"), fragments::track_def(frames));
			builder.push_named(fragments::TRACK, &format!("{name}_TRACK"), fragments::track(def, frame_ms));
		}
		builder
	}

	/// Object file with a three-vertex mesh behind actor `BARREL_ACTORDEF`.
	pub fn barrel_objects() -> WldBuilder {
		let mut builder = WldBuilder::new();
		let mesh = builder.push_named(fragments::MESH, "BARREL_DMSPRITEDEF", fragments::mesh(3));
		let reference = builder.push_named(fragments::MESH_REFERENCE, "BARREL_MDF", fragments::reference(mesh));
		builder.push_named(fragments::ACTOR, "BARREL_ACTORDEF", fragments::actor(reference));
		builder
	}

	/// Placement file coloring two `BARREL_ACTORDEF` instances.
	///
	/// The first instance carries three colors, the second four.
	pub fn barrel_placements() -> WldBuilder {
		let mut builder = WldBuilder::new();
		let first = builder.push_named(fragments::VERTEX_COLORS, "COLORS_A", fragments::vertex_colors(&[0xFF00_00FF, 0xFF00_FF00, 0xFFFF_0000]));
		let first_ref = builder.push_named(fragments::VERTEX_COLORS_REFERENCE, "COLORS_A_REF", fragments::reference(first));
		let actor = builder.string("BARREL_ACTORDEF");
		builder.push(fragments::OBJECT_INSTANCE, Payload::new().i32(0).bytes(&fragments::object_instance(actor, first_ref).into_bytes()));

		let second = builder.push_named(fragments::VERTEX_COLORS, "COLORS_B", fragments::vertex_colors(&[1, 2, 3, 4]));
		let second_ref = builder.push_named(fragments::VERTEX_COLORS_REFERENCE, "COLORS_B_REF", fragments::reference(second));
		builder.push(fragments::OBJECT_INSTANCE, Payload::new().i32(0).bytes(&fragments::object_instance(actor, second_ref).into_bytes()));
		builder
	}

	/// Zone with one BSP tree, three regions and two region types.
	///
	/// Region fragments are interleaved with other fragments so their raw
	/// fragment indices differ from their position among regions. Leaf node
	/// 1 names region 3 and leaf node 2 names region 1. `WTN_WATER` types
	/// regions 0 and 1; `DRNTP_ZONE` types region 1 afterwards.
	pub fn zone() -> WldBuilder {
		let mut builder = WldBuilder::new();
		for index in 0..3 {
			builder.push_named(0x35, &format!("FILLER{index}"), Payload::new().u32(0));
			builder.push_named(fragments::BSP_REGION, &format!("R{index}"), region());
		}
		let nodes = Payload::new().i32(3);
		let nodes = node(nodes, 0, 2, 3);
		let nodes = node(nodes, 3, 0, 0);
		let nodes = node(nodes, 1, 0, 0);
		builder.push_named(fragments::BSP_TREE, "TREE", nodes);
		builder.push_named(fragments::BSP_REGION_TYPE, "WTN_WATER", region_type(&[0, 1], ""));
		builder.push_named(fragments::BSP_REGION_TYPE, "", region_type(&[1], "drntp_zone"));
		builder
	}

	fn region() -> Payload {
		let mut payload = Payload::new().u32(0);
		for _ in 0..9 {
			payload = payload.i32(0);
		}
		payload.i32(0)
	}

	fn node(payload: Payload, region_id: u32, left: i32, right: i32) -> Payload {
		payload.f32(0.0).f32(0.0).f32(1.0).f32(0.0).u32(region_id).i32(left).i32(right)
	}

	fn region_type(regions: &[u32], encoded: &str) -> Payload {
		let mut payload = Payload::new().u32(0).i32(regions.len() as i32);
		for region in regions {
			payload = payload.u32(*region);
		}
		payload.encoded_string(encoded)
	}
}
