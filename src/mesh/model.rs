use std::io::Cursor;

use binrw::{binrw, BinReaderExt, BinWriterExt};
use serde::{Deserialize, Serialize};

use crate::codec::{Bool8, PascalString};
use crate::error::FormatError;
use crate::math::{Sphere, Xfm};
use crate::mesh::vertex::{Face, Vertex};

/// The single mesh format revision this codec understands.
pub const MESH_VERSION: i32 = 38;

/// Named bone: a transform attached to the mesh by name. The mesh owns its
/// bone list; bones carry no back-reference.
#[binrw]
#[brw(big)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bone {
    pub name: PascalString,
    pub xfm: Xfm,
}

/// The mesh entity as stored inside a Milo container chunk.
///
/// Field order is the on-disk order. The version word and every element
/// count are derived, not stored: decode asserts the version and allocates
/// exactly `count` elements, encode emits the constant and the actual array
/// lengths, so a count can never disagree with its array.
#[binrw]
#[brw(big)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    #[br(temp, assert(version == MESH_VERSION, FormatError::VersionMismatch { found: version }))]
    #[bw(calc = MESH_VERSION)]
    version: i32,

    pub obj_ver: i32,
    pub milotype: PascalString,
    pub has_typeprops: Bool8,
    pub note: PascalString,

    pub trans_ver: i32,
    pub local: Xfm,
    pub world: Xfm,
    // Attachment to the scene hierarchy is by name, not by pointer.
    pub constraint: i32,
    pub target: PascalString,
    pub preserve_scale: Bool8,
    pub parent: PascalString,

    pub draw_ver: i32,
    pub showing: Bool8,
    pub bound: Sphere,
    pub z_order: f32,
    pub material: PascalString,
    pub geom_owner: PascalString,
    pub mutable: i32,
    pub volume: i32,
    pub is_bsp: Bool8,

    #[br(temp, assert(vert_ct >= 0, "negative vertex count {}", vert_ct))]
    #[bw(try_calc = i32::try_from(verts.len()))]
    vert_ct: i32,

    pub is_ng: Bool8,
    pub vert_size: i32,
    pub reserved: i32,

    #[br(count = vert_ct)]
    pub verts: Vec<Vertex>,

    #[br(temp, assert(face_ct >= 0, "negative face count {}", face_ct))]
    #[bw(try_calc = i32::try_from(faces.len()))]
    face_ct: i32,

    #[br(count = face_ct)]
    pub faces: Vec<Face>,

    #[br(temp, assert(group_size_ct >= 0, "negative group-size count {}", group_size_ct))]
    #[bw(try_calc = i32::try_from(group_sizes.len()))]
    group_size_ct: i32,

    // A zero count leaves the array empty and consumes no payload bytes.
    #[br(count = group_size_ct)]
    pub group_sizes: Vec<u8>,

    #[br(temp, assert(bone_ct >= 0, "negative bone count {}", bone_ct))]
    #[bw(try_calc = i32::try_from(bones.len()))]
    bone_ct: i32,

    #[br(count = bone_ct)]
    pub bones: Vec<Bone>,

    pub keep_data: Bool8,
    pub does_ao: Bool8,
}

impl Mesh {
    /// Decode a whole mesh chunk. The payload must be consumed exactly:
    /// leftover bytes mean the chunk is not a mesh of the supported revision
    /// and the entity is rejected rather than returned half-trusted.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FormatError> {
        let mut reader = Cursor::new(bytes);
        let mesh = match reader.read_be::<Mesh>() {
            Ok(mesh) => mesh,
            Err(err) => {
                let offset = reader.position();
                return Err(FormatError::from_binrw(err, offset));
            }
        };

        let consumed = reader.position();
        let total = bytes.len() as u64;
        if consumed < total {
            return Err(FormatError::TrailingData {
                offset: consumed,
                remaining: total - consumed,
            });
        }
        Ok(mesh)
    }

    /// Encode the mesh back into chunk payload bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, FormatError> {
        let mut writer = Cursor::new(Vec::new());
        if let Err(err) = writer.write_be(self) {
            let offset = writer.position();
            return Err(FormatError::from_binrw(err, offset));
        }
        Ok(writer.into_inner())
    }

    /// Replace the geometry arrays wholesale, as the importer does. Counts
    /// are derived at encode time; only the stored record size needs a
    /// refresh here.
    pub fn set_geometry(&mut self, verts: Vec<Vertex>, faces: Vec<Face>) {
        self.verts = verts;
        self.faces = faces;
        self.vert_size = Vertex::ENCODED_SIZE as i32;
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Mesh {
            obj_ver: 0,
            milotype: PascalString::default(),
            has_typeprops: Bool8(false),
            note: PascalString::default(),
            trans_ver: 0,
            local: Xfm::identity(),
            world: Xfm::identity(),
            constraint: 0,
            target: PascalString::default(),
            preserve_scale: Bool8(false),
            parent: PascalString::default(),
            draw_ver: 0,
            showing: Bool8(true),
            bound: Sphere::default(),
            z_order: 0.0,
            material: PascalString::default(),
            geom_owner: PascalString::default(),
            mutable: 0,
            volume: 0,
            is_bsp: Bool8(false),
            is_ng: Bool8(false),
            vert_size: Vertex::ENCODED_SIZE as i32,
            reserved: 0,
            verts: Vec::new(),
            faces: Vec::new(),
            group_sizes: Vec::new(),
            bones: Vec::new(),
            keep_data: Bool8(false),
            does_ao: Bool8(false),
        }
    }
}
