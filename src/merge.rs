use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::Context;
use log::debug;

use crate::container::Container;
use crate::error::FormatError;
use crate::mesh::model::Mesh;
use crate::mesh::vertex::{Face, Vertex};
use crate::obj::ObjGeometry;

/// Overwrite a mesh's geometry with imported vertices and triangles.
///
/// This boundary owns the index convention change: the text format counts
/// vertices from 1, the mesh codec from 0. An index of 0, an index past the
/// imported vertex list, or an index too large for a 16-bit face slot is
/// rejected here so the encoder never sees an unreferencable face.
pub fn apply_geometry(mesh: &mut Mesh, geometry: &ObjGeometry) -> Result<(), FormatError> {
    let verts: Vec<Vertex> = geometry
        .positions
        .iter()
        .map(|pos| Vertex::from_position(*pos))
        .collect();

    let mut faces = Vec::with_capacity(geometry.triangles.len());
    for triangle in &geometry.triangles {
        let mut rebased = [0u16; 3];
        for (slot, &raw) in rebased.iter_mut().zip(triangle) {
            if raw == 0 || raw as usize > verts.len() {
                return Err(FormatError::FaceIndex {
                    index: raw,
                    vert_ct: verts.len(),
                });
            }
            *slot = u16::try_from(raw - 1).map_err(|_| FormatError::FaceIndex {
                index: raw,
                vert_ct: verts.len(),
            })?;
        }
        faces.push(Face::new(rebased[0], rebased[1], rebased[2]));
    }

    debug!(
        "overwriting geometry: {} verts, {} faces",
        verts.len(),
        faces.len()
    );
    mesh.set_geometry(verts, faces);
    Ok(())
}

/// The whole pipeline over in-memory bytes: split the container, decode the
/// chosen segment as a mesh, overwrite its geometry from the text stream,
/// re-encode, and rejoin. Every segment other than `mesh_segment` appears in
/// the output byte-identical to the input.
pub fn merge_obj_into_container(
    container_bytes: &[u8],
    mesh_segment: usize,
    obj: impl BufRead,
) -> Result<Vec<u8>, FormatError> {
    let mut container = Container::split(container_bytes);
    let mut mesh = Mesh::from_bytes(container.segment(mesh_segment)?)?;

    let geometry = ObjGeometry::parse(obj)?;
    apply_geometry(&mut mesh, &geometry)?;

    container.replace(mesh_segment, mesh.to_bytes()?)?;
    container.join()
}

/// Path-level wrapper for the CLI: reads both inputs and returns the merged
/// container bytes. Writing (and staging for atomic replacement) is the
/// caller's concern.
pub fn merge_paths(
    container_path: &Path,
    obj_path: &Path,
    mesh_segment: usize,
) -> anyhow::Result<Vec<u8>> {
    let container_bytes = fs::read(container_path)
        .with_context(|| format!("failed to read container '{}'", container_path.display()))?;
    let obj_file = fs::File::open(obj_path)
        .with_context(|| format!("failed to open geometry '{}'", obj_path.display()))?;

    let merged = merge_obj_into_container(&container_bytes, mesh_segment, BufReader::new(obj_file))
        .with_context(|| {
            format!(
                "failed to merge '{}' into segment {} of '{}'",
                obj_path.display(),
                mesh_segment,
                container_path.display()
            )
        })?;
    Ok(merged)
}
