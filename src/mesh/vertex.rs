use binrw::binrw;
use serde::{Deserialize, Serialize};

use crate::codec::{f32_to_half_bits, half_bits_to_f32};
use crate::math::MiloVector3;

/// Weight byte meaning "slot unused / full bind".
pub const WEIGHT_UNUSED: u8 = 255;

/// Bone-index slots written for every vertex. This codec does not re-skin:
/// real weights and indices from a source file are surfaced read-only and
/// replaced with these placeholders on the next encode.
pub const BONE_PLACEHOLDER: [u16; 4] = [0, 1, 2, 3];

/// One mesh vertex, 36 bytes on disk: position, UV as binary16, a packed
/// qtangent (normal+tangent) block this codec does not reconstruct, then
/// blend weights and bone indices.
#[binrw]
#[brw(big)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub pos: MiloVector3,

    #[br(map = half_bits_to_f32)]
    #[bw(map = |&u: &f32| f32_to_half_bits(u))]
    pub u: f32,

    #[br(map = half_bits_to_f32)]
    #[bw(map = |&v: &f32| f32_to_half_bits(v))]
    pub v: f32,

    // Discarded on read, zeroed on write; regenerated by the engine.
    #[br(temp)]
    #[bw(calc = [0i16; 4])]
    qtangent: [i16; 4],

    #[bw(map = |_: &[u8; 4]| [WEIGHT_UNUSED; 4])]
    pub weights: [u8; 4],

    #[bw(map = |_: &[u16; 4]| BONE_PLACEHOLDER)]
    pub bones: [u16; 4],
}

impl Vertex {
    /// Canonical encoded size of one vertex record.
    pub const ENCODED_SIZE: usize = 36;

    /// Vertex at `pos` with every non-positional field defaulted, as the
    /// geometry importer produces them.
    pub fn from_position(pos: MiloVector3) -> Self {
        Vertex {
            pos,
            u: 0.0,
            v: 0.0,
            weights: [WEIGHT_UNUSED; 4],
            bones: BONE_PLACEHOLDER,
        }
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Vertex::from_position(MiloVector3::default())
    }
}

/// One triangle as three 0-based vertex indices, 6 bytes on disk.
#[binrw]
#[brw(big)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face {
    pub i0: u16,
    pub i1: u16,
    pub i2: u16,
}

impl Face {
    pub fn new(i0: u16, i1: u16, i2: u16) -> Self {
        Face { i0, i1, i2 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use binrw::{BinReaderExt, BinWriterExt};
    use std::io::Cursor;

    #[test]
    fn vertex_encodes_to_canonical_size() {
        let mut writer = Cursor::new(Vec::new());
        writer.write_be(&Vertex::default()).unwrap();
        assert_eq!(writer.get_ref().len(), Vertex::ENCODED_SIZE);
    }

    #[test]
    fn vertex_roundtrip_keeps_position_and_uv_only() {
        let vertex = Vertex {
            pos: MiloVector3::new(1.0, 2.0, -3.0),
            u: 0.5,
            v: 0.25,
            // Real skinning data that must NOT survive an encode.
            weights: [10, 20, 30, 40],
            bones: [7, 8, 9, 10],
        };

        let mut writer = Cursor::new(Vec::new());
        writer.write_be(&vertex).unwrap();
        let mut reader = Cursor::new(writer.into_inner());
        let decoded: Vertex = reader.read_be().unwrap();

        assert_eq!(decoded.pos, vertex.pos);
        assert_eq!(decoded.u, 0.5);
        assert_eq!(decoded.v, 0.25);
        // Placeholders, by contract.
        assert_eq!(decoded.weights, [WEIGHT_UNUSED; 4]);
        assert_eq!(decoded.bones, BONE_PLACEHOLDER);
    }

    #[test]
    fn vertex_write_zeroes_qtangent_block() {
        let mut writer = Cursor::new(Vec::new());
        writer.write_be(&Vertex::default()).unwrap();
        let bytes = writer.into_inner();
        // Bytes 16..24 hold the four i16 qtangent components.
        assert_eq!(&bytes[16..24], &[0u8; 8]);
    }

    #[test]
    fn face_roundtrip_is_lossless() {
        let face = Face::new(0, 1, 2);
        let mut writer = Cursor::new(Vec::new());
        writer.write_be(&face).unwrap();
        assert_eq!(writer.get_ref().len(), 6);

        let mut reader = Cursor::new(writer.into_inner());
        let decoded: Face = reader.read_be().unwrap();
        assert_eq!(decoded, face);
    }
}
