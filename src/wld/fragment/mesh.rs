use glam::{Vec2, Vec3};

use crate::wld::bytes::Cursor;
use crate::wld::fragment::{DecodeContext, DecodeFragment, MaterialList};
use crate::wld::{FragmentRef, Result, WldError};

const POLYGON_PASSABLE: u16 = 0x10;

/// 8-bit RGBA color unpacked from a BGRA word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
	/// Red.
	pub r: u8,
	/// Green.
	pub g: u8,
	/// Blue.
	pub b: u8,
	/// Alpha.
	pub a: u8,
}

impl Color {
	/// Unpack a little-endian BGRA word.
	pub fn from_bgra(value: u32) -> Self {
		let [b, g, r, a] = value.to_le_bytes();
		Self { r, g, b, a }
	}

	/// Pack back into a BGRA word.
	pub fn to_bgra(self) -> u32 {
		u32::from_le_bytes([self.b, self.g, self.r, self.a])
	}
}

/// Triangle with its flags word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Polygon {
	/// Raw flags.
	pub flags: u16,
	/// Vertex indices.
	pub vertices: [u16; 3],
}

impl Polygon {
	/// Whether actors can walk through this polygon.
	pub fn is_passable(&self) -> bool {
		self.flags & POLYGON_PASSABLE != 0
	}
}

/// Run of consecutive vertices skinned to one bone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VertexPiece {
	/// First vertex in the run.
	pub start: usize,
	/// Vertices in the run.
	pub count: usize,
	/// Bone index within the owning skeleton.
	pub bone: u16,
}

/// Run of consecutive polygons or vertices sharing one material slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderGroup {
	/// Items in the run.
	pub count: u16,
	/// Slot in the mesh's [`MaterialList`].
	pub material: u16,
}

/// Opaque eight-byte mesh operation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeshOp(pub [u8; 8]);

/// Mesh geometry (0x36).
#[derive(Debug, Clone, Default)]
pub struct Mesh {
	/// Raw flags word.
	pub flags: u32,
	/// Resolved [`MaterialList`].
	pub material_list: Option<FragmentRef>,
	/// Resolved animated-vertex reference.
	pub animated_vertices: Option<FragmentRef>,
	/// Unknown-purpose words after the references.
	pub params1: [i32; 2],
	/// Local origin.
	pub center: Vec3,
	/// Unknown-purpose words after the center.
	pub params2: [i32; 3],
	/// Bounding radius.
	pub max_distance: f32,
	/// Bounding box minimum.
	pub min: Vec3,
	/// Bounding box maximum.
	pub max: Vec3,
	/// Vertex fixed-point shift.
	pub scale_shift: i16,
	/// Vertex positions relative to `center`.
	pub vertices: Vec<Vec3>,
	/// Texture coordinates.
	pub uvs: Vec<Vec2>,
	/// Vertex normals.
	pub normals: Vec<Vec3>,
	/// Per-vertex colors.
	pub colors: Vec<Color>,
	/// Triangles.
	pub polygons: Vec<Polygon>,
	/// Bone skinning runs.
	pub vertex_pieces: Vec<VertexPiece>,
	/// Polygon material runs.
	pub render_groups: Vec<RenderGroup>,
	/// Vertex material runs.
	pub vertex_materials: Vec<RenderGroup>,
	/// Opaque mesh operations.
	pub mesh_ops: Vec<MeshOp>,
}

struct MeshCounts {
	vertices: usize,
	uvs: usize,
	normals: usize,
	colors: usize,
	polygons: usize,
	vertex_pieces: usize,
	render_groups: usize,
	vertex_materials: usize,
	mesh_ops: usize,
}

impl MeshCounts {
	fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(Self {
			vertices: read_count16(cursor, "mesh vertex")?,
			uvs: read_count16(cursor, "mesh uv")?,
			normals: read_count16(cursor, "mesh normal")?,
			colors: read_count16(cursor, "mesh color")?,
			polygons: read_count16(cursor, "mesh polygon")?,
			vertex_pieces: read_count16(cursor, "mesh vertex piece")?,
			render_groups: read_count16(cursor, "mesh render group")?,
			vertex_materials: read_count16(cursor, "mesh vertex material")?,
			mesh_ops: read_count16(cursor, "mesh op")?,
		})
	}
}

fn read_count16(cursor: &mut Cursor<'_>, field: &'static str) -> Result<usize> {
	let count = cursor.read_i16_le()?;
	usize::try_from(count).map_err(|_| WldError::NegativeCount {
		field,
		count: i64::from(count),
	})
}

impl Mesh {
	/// Number of decoded vertices.
	pub fn vertex_count(&self) -> usize {
		self.vertices.len()
	}
}

impl DecodeFragment for Mesh {
	fn decode(&mut self, cursor: &mut Cursor<'_>, ctx: &DecodeContext<'_>) -> Result<()> {
		self.flags = cursor.read_u32_le()?;
		self.material_list = ctx.resolve_as::<MaterialList>(cursor.read_i32_le()?);
		self.animated_vertices = ctx.resolve(cursor.read_i32_le()?);
		self.params1 = cursor.read_i32_array()?;
		self.center = cursor.read_vec3()?;
		self.params2 = cursor.read_i32_array()?;
		self.max_distance = cursor.read_f32_le()?;
		self.min = cursor.read_vec3()?;
		self.max = cursor.read_vec3()?;

		let counts = MeshCounts::read(cursor)?;
		self.scale_shift = cursor.read_i16_le()?;
		let scale = 2_f32.powi(-i32::from(self.scale_shift));

		for _ in 0..counts.vertices {
			let x = cursor.read_i16_le()?;
			let y = cursor.read_i16_le()?;
			let z = cursor.read_i16_le()?;
			self.vertices.push(Vec3::new(f32::from(x), f32::from(y), f32::from(z)) * scale);
		}

		for _ in 0..counts.uvs {
			let uv = if ctx.is_new_format() {
				Vec2::new(cursor.read_i32_le()? as f32, cursor.read_i32_le()? as f32)
			} else {
				Vec2::new(f32::from(cursor.read_i16_le()?), f32::from(cursor.read_i16_le()?))
			};
			self.uvs.push(uv / 256.0);
		}

		for _ in 0..counts.normals {
			let x = cursor.read_i8()?;
			let y = cursor.read_i8()?;
			let z = cursor.read_i8()?;
			self.normals.push(Vec3::new(f32::from(x), f32::from(y), f32::from(z)) / 128.0);
		}

		for _ in 0..counts.colors {
			self.colors.push(Color::from_bgra(cursor.read_u32_le()?));
		}

		for _ in 0..counts.polygons {
			let flags = cursor.read_u16_le()?;
			let vertices = [cursor.read_u16_le()?, cursor.read_u16_le()?, cursor.read_u16_le()?];
			self.polygons.push(Polygon { flags, vertices });
		}

		let mut start = 0_usize;
		for _ in 0..counts.vertex_pieces {
			let count = usize::from(cursor.read_u16_le()?);
			let bone = cursor.read_u16_le()?;
			self.vertex_pieces.push(VertexPiece { start, count, bone });
			start += count;
		}

		for _ in 0..counts.render_groups {
			self.render_groups.push(read_render_group(cursor)?);
		}

		for _ in 0..counts.vertex_materials {
			self.vertex_materials.push(read_render_group(cursor)?);
		}

		for _ in 0..counts.mesh_ops {
			self.mesh_ops.push(MeshOp(cursor.read_array()?));
		}

		Ok(())
	}
}

fn read_render_group(cursor: &mut Cursor<'_>) -> Result<RenderGroup> {
	Ok(RenderGroup {
		count: cursor.read_u16_le()?,
		material: cursor.read_u16_le()?,
	})
}

/// Reference to a mesh (0x2D).
///
/// The target is usually a [`Mesh`] but older files point at legacy meshes,
/// which stay opaque, so the reference is resolved without a kind check.
#[derive(Debug, Clone, Default)]
pub struct MeshReference {
	/// Resolved mesh.
	pub mesh: Option<FragmentRef>,
	/// Raw flags word.
	pub flags: u32,
}

impl DecodeFragment for MeshReference {
	fn decode(&mut self, cursor: &mut Cursor<'_>, ctx: &DecodeContext<'_>) -> Result<()> {
		self.mesh = ctx.resolve(cursor.read_i32_le()?);
		self.flags = cursor.read_u32_le()?;
		Ok(())
	}
}

/// Per-vertex colors for a placed object (0x32).
#[derive(Debug, Clone, Default)]
pub struct VertexColors {
	/// Unknown-purpose word before the count.
	pub unknown1: i32,
	/// Unknown-purpose words after the count.
	pub params: [i32; 3],
	/// Colors in vertex order.
	pub colors: Vec<Color>,
}

impl DecodeFragment for VertexColors {
	fn decode(&mut self, cursor: &mut Cursor<'_>, _ctx: &DecodeContext<'_>) -> Result<()> {
		self.unknown1 = cursor.read_i32_le()?;
		let count = cursor.read_count("vertex color")?;
		self.params = cursor.read_i32_array()?;
		for _ in 0..count {
			self.colors.push(Color::from_bgra(cursor.read_u32_le()?));
		}
		Ok(())
	}
}

/// Reference to [`VertexColors`] (0x33).
#[derive(Debug, Clone, Default)]
pub struct VertexColorsReference {
	/// Resolved colors.
	pub vertex_colors: Option<FragmentRef>,
	/// Raw flags word.
	pub flags: u32,
}

impl DecodeFragment for VertexColorsReference {
	fn decode(&mut self, cursor: &mut Cursor<'_>, ctx: &DecodeContext<'_>) -> Result<()> {
		self.vertex_colors = ctx.resolve_as::<VertexColors>(cursor.read_i32_le()?);
		self.flags = cursor.read_u32_le()?;
		Ok(())
	}
}
