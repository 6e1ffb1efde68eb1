// Shared fixture builders. There are no checked-in binary fixtures: meshes
// and containers are synthesized through the codec so the suite is
// self-contained.
use milo_tools::codec::{Bool8, PascalString};
use milo_tools::container::DELIMITER;
use milo_tools::math::{MiloVector3, Sphere, Xfm};
use milo_tools::mesh::model::{Bone, Mesh};
use milo_tools::mesh::vertex::{Face, Vertex};

/// A mesh with every section populated: 2 vertices, 1 degenerate face,
/// group sizes, a bone, and non-default strings and flags.
pub fn sample_mesh() -> Mesh {
    let mut mesh = Mesh {
        obj_ver: 25,
        milotype: PascalString::new("Mesh"),
        has_typeprops: Bool8(false),
        note: PascalString::new("authored in-engine"),
        trans_ver: 9,
        constraint: 0,
        target: PascalString::new(""),
        parent: PascalString::new("spot_drums.milo"),
        draw_ver: 3,
        showing: Bool8(true),
        bound: Sphere {
            c: MiloVector3::new(0.0, 0.5, 0.0),
            r: 2.25,
        },
        z_order: 0.0,
        material: PascalString::new("drum01.mat"),
        geom_owner: PascalString::new("drum01.mesh"),
        mutable: 0,
        volume: 1,
        group_sizes: vec![2, 3, 1],
        bones: vec![Bone {
            name: PascalString::new("bone_drum01.mesh"),
            xfm: Xfm::identity(),
        }],
        keep_data: Bool8(true),
        ..Mesh::default()
    };
    mesh.set_geometry(
        vec![
            Vertex {
                pos: MiloVector3::new(1.0, 2.0, 3.0),
                u: 0.5,
                v: 0.75,
                ..Vertex::default()
            },
            Vertex::from_position(MiloVector3::new(-1.0, 0.0, 4.5)),
        ],
        vec![Face::new(0, 1, 0)],
    );
    mesh
}

/// Assemble container bytes from raw segments, delimiter between each pair.
pub fn container_bytes(segments: &[&[u8]]) -> Vec<u8> {
    let mut bytes = Vec::new();
    for (index, segment) in segments.iter().enumerate() {
        if index > 0 {
            bytes.extend_from_slice(&DELIMITER);
        }
        bytes.extend_from_slice(segment);
    }
    bytes
}
