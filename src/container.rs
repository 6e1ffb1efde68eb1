use log::debug;

use crate::error::FormatError;

/// The 4-byte marker separating chunks in a Milo scene file. It appears only
/// between segments; payload bytes are never escaped or scanned for it
/// beyond the exact-split below.
pub const DELIMITER: [u8; 4] = [0xAD, 0xDE, 0xAD, 0xDE];

/// An asset file split into ordered, opaque byte segments.
///
/// Segment identity is positional: the caller knows which index holds the
/// mesh payload for a given asset. Segments that are never replaced are
/// reproduced byte-identically by [`Container::join`].
#[derive(Debug, Clone)]
pub struct Container {
    segments: Vec<Vec<u8>>,
    split_ct: usize,
}

impl Container {
    /// Split a whole file on the delimiter, left to right, non-overlapping.
    /// Produces one more segment than there are delimiter occurrences; a
    /// file without any delimiter is a single segment.
    pub fn split(bytes: &[u8]) -> Self {
        let mut segments = Vec::new();
        let mut start = 0;
        let mut cursor = 0;
        while cursor + DELIMITER.len() <= bytes.len() {
            if bytes[cursor..cursor + DELIMITER.len()] == DELIMITER {
                segments.push(bytes[start..cursor].to_vec());
                cursor += DELIMITER.len();
                start = cursor;
            } else {
                cursor += 1;
            }
        }
        segments.push(bytes[start..].to_vec());

        debug!(
            "split {} bytes into {} segments",
            bytes.len(),
            segments.len()
        );
        Container {
            split_ct: segments.len(),
            segments,
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segment(&self, index: usize) -> Result<&[u8], FormatError> {
        self.segments
            .get(index)
            .map(Vec::as_slice)
            .ok_or(FormatError::SegmentIndex {
                index,
                count: self.segments.len(),
            })
    }

    /// Swap out one segment's bytes. Every other segment is left untouched.
    pub fn replace(&mut self, index: usize, bytes: Vec<u8>) -> Result<(), FormatError> {
        let count = self.segments.len();
        let slot = self
            .segments
            .get_mut(index)
            .ok_or(FormatError::SegmentIndex { index, count })?;
        debug!(
            "replacing segment {index}: {} bytes -> {} bytes",
            slot.len(),
            bytes.len()
        );
        *slot = bytes;
        Ok(())
    }

    /// Append a new trailing segment. Joining afterwards fails unless the
    /// container is re-split, since the delimiter count no longer matches
    /// the original file.
    pub fn push(&mut self, segment: Vec<u8>) {
        self.segments.push(segment);
    }

    /// Reassemble the file: segments concatenated with the delimiter between
    /// every adjacent pair. `join(split(bytes))` reproduces `bytes` exactly.
    pub fn join(self) -> Result<Vec<u8>, FormatError> {
        if self.segments.len() != self.split_ct {
            return Err(FormatError::DelimiterCountMismatch {
                split: self.split_ct,
                joined: self.segments.len(),
            });
        }

        let payload: usize = self.segments.iter().map(Vec::len).sum();
        let mut out = Vec::with_capacity(payload + DELIMITER.len() * self.segments.len());
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                out.extend_from_slice(&DELIMITER);
            }
            out.extend_from_slice(segment);
        }
        Ok(out)
    }
}
