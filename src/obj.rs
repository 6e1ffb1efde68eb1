use std::io::BufRead;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::error::FormatError;
use crate::math::MiloVector3;

// Three space-separated decimal numbers, sign and fractional part optional.
static VERTEX_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v ([-+]?\d+(?:\.\d+)?) ([-+]?\d+(?:\.\d+)?) ([-+]?\d+(?:\.\d+)?)\s*$")
        .expect("vertex line pattern")
});

// Three groups, each one decimal integer with anything up to the next
// separator, so `index/texcoord/normal` triples are tolerated while only the
// leading index of each group is used.
static FACE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^f (\d+)\S* (\d+)\S* (\d+)\S*\s*$").expect("face line pattern"));

/// Geometry parsed out of the text exchange format: vertex positions plus
/// triangles as raw 1-based indices, exactly as written in the source.
/// Rebasing to the codec's 0-based indices is the merge boundary's job.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjGeometry {
    pub positions: Vec<MiloVector3>,
    pub triangles: Vec<[u32; 3]>,
}

impl ObjGeometry {
    /// Scan the text stream line by line. `v`-and-space lines and `f` lines
    /// must match their grammar exactly; lines led by anything else are
    /// skipped. End of input terminates the scan and is not an error.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self, FormatError> {
        let mut geometry = ObjGeometry::default();

        for (index, line) in reader.lines().enumerate() {
            let number = index + 1;
            let line = line.map_err(|err| FormatError::Corrupt {
                offset: number as u64,
                message: format!("geometry text unreadable: {err}"),
            })?;

            if line.starts_with("v ") {
                let captures =
                    VERTEX_LINE
                        .captures(&line)
                        .ok_or_else(|| FormatError::MalformedGeometryLine {
                            line: number,
                            text: line.clone(),
                        })?;
                let mut coords = [0.0f32; 3];
                for (slot, capture) in coords.iter_mut().zip(1usize..=3) {
                    *slot = captures[capture].parse().map_err(|_| {
                        FormatError::MalformedGeometryLine {
                            line: number,
                            text: line.clone(),
                        }
                    })?;
                }
                geometry
                    .positions
                    .push(MiloVector3::new(coords[0], coords[1], coords[2]));
            } else if line.starts_with('f') {
                let captures =
                    FACE_LINE
                        .captures(&line)
                        .ok_or_else(|| FormatError::MalformedGeometryLine {
                            line: number,
                            text: line.clone(),
                        })?;
                let mut indices = [0u32; 3];
                for (slot, capture) in indices.iter_mut().zip(1usize..=3) {
                    *slot = captures[capture].parse().map_err(|_| {
                        FormatError::MalformedGeometryLine {
                            line: number,
                            text: line.clone(),
                        }
                    })?;
                }
                geometry.triangles.push(indices);
            }
        }

        debug!(
            "imported {} vertices, {} triangles",
            geometry.positions.len(),
            geometry.triangles.len()
        );
        Ok(geometry)
    }
}
