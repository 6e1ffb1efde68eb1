use binrw::binrw;
use cgmath::{Matrix3, SquareMatrix, Vector3};
use serde::{Deserialize, Serialize};

#[binrw]
#[brw(big)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MiloVector3(
    #[br(map = |raw: [f32; 3]| Vector3::new(raw[0], raw[1], raw[2]))]
    #[bw(map = |v: &Vector3<f32>| [v.x, v.y, v.z])]
    pub Vector3<f32>,
);

impl MiloVector3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        MiloVector3(Vector3::new(x, y, z))
    }

    pub fn to_slice(&self) -> [f32; 3] {
        let v = &self.0;
        [v.x, v.y, v.z]
    }
}

impl Default for MiloVector3 {
    fn default() -> Self {
        MiloVector3(Vector3::new(0.0, 0.0, 0.0))
    }
}

/// 3x3 matrix stored as 9 consecutive floats. Components are written back in
/// the exact order they were read, so round-trips are byte-faithful.
#[binrw]
#[brw(big)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MiloMatrix33(
    #[br(map = |raw: [f32; 9]| Matrix3::new(
        raw[0], raw[1], raw[2],
        raw[3], raw[4], raw[5],
        raw[6], raw[7], raw[8],
    ))]
    #[bw(map = |m: &Matrix3<f32>| [
        m.x.x, m.x.y, m.x.z,
        m.y.x, m.y.y, m.y.z,
        m.z.x, m.z.y, m.z.z,
    ])]
    pub Matrix3<f32>,
);

impl MiloMatrix33 {
    pub fn identity() -> Self {
        MiloMatrix33(Matrix3::identity())
    }
}

impl Default for MiloMatrix33 {
    fn default() -> Self {
        Self::identity()
    }
}

/// Rigid transform: 3x3 matrix plus a position vector, 48 bytes on disk.
#[binrw]
#[brw(big)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Xfm {
    pub mtx: MiloMatrix33,
    pub pos: MiloVector3,
}

impl Xfm {
    /// The identity transform, also the default for freshly constructed
    /// scene entities.
    pub fn identity() -> Self {
        Xfm {
            mtx: MiloMatrix33::identity(),
            pos: MiloVector3::default(),
        }
    }
}

/// Bounding sphere: center then radius, 16 bytes on disk.
#[binrw]
#[brw(big)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub c: MiloVector3,
    pub r: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use binrw::{BinReaderExt, BinWriterExt};
    use std::io::Cursor;

    #[test]
    fn default_xfm_is_identity() {
        assert_eq!(Xfm::default(), Xfm::identity());
        assert_eq!(Xfm::identity().mtx.0, Matrix3::identity());
    }

    #[test]
    fn xfm_is_48_bytes_and_lossless() {
        let xfm = Xfm {
            mtx: MiloMatrix33(Matrix3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0)),
            pos: MiloVector3::new(-1.5, 0.25, 9000.0),
        };
        let mut writer = Cursor::new(Vec::new());
        writer.write_be(&xfm).unwrap();
        assert_eq!(writer.get_ref().len(), 48);

        let mut reader = Cursor::new(writer.into_inner());
        let decoded: Xfm = reader.read_be().unwrap();
        assert_eq!(decoded, xfm);
    }

    #[test]
    fn sphere_is_16_bytes_and_lossless() {
        let sphere = Sphere {
            c: MiloVector3::new(1.0, -2.0, 3.5),
            r: 42.0,
        };
        let mut writer = Cursor::new(Vec::new());
        writer.write_be(&sphere).unwrap();
        assert_eq!(writer.get_ref().len(), 16);

        let mut reader = Cursor::new(writer.into_inner());
        let decoded: Sphere = reader.read_be().unwrap();
        assert_eq!(decoded, sphere);
    }

    #[test]
    fn vector_components_are_big_endian() {
        let v = MiloVector3::new(1.0, 0.0, 0.0);
        let mut writer = Cursor::new(Vec::new());
        writer.write_be(&v).unwrap();
        assert_eq!(&writer.get_ref()[..4], &1.0f32.to_be_bytes());
    }

    #[test]
    fn matrix_roundtrip_preserves_component_order() {
        let m = MiloMatrix33(Matrix3::new(0.0, 0.1, 0.2, 1.0, 1.1, 1.2, 2.0, 2.1, 2.2));
        let mut writer = Cursor::new(Vec::new());
        writer.write_be(&m).unwrap();
        let mut reader = Cursor::new(writer.into_inner());
        let decoded: MiloMatrix33 = reader.read_be().unwrap();
        assert_eq!(decoded, m);
    }
}
