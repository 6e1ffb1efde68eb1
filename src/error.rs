use thiserror::Error;

/// Failure modes of the container/mesh codecs and the geometry importer.
///
/// None of these are retried anywhere: a decode either fully succeeds or the
/// caller discards the whole entity.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FormatError {
    #[error("unexpected end of stream at byte {offset:#x}")]
    TruncatedStream { offset: u64 },

    #[error("mesh version {found} is not supported (expected 38)")]
    VersionMismatch { found: i32 },

    #[error("{remaining} bytes left unconsumed after mesh payload ending at byte {offset:#x}")]
    TrailingData { offset: u64, remaining: u64 },

    #[error("geometry line {line} is malformed: {text:?}")]
    MalformedGeometryLine { line: usize, text: String },

    #[error("cannot encode non-ASCII text in {field}: {text:?}")]
    Encoding { field: &'static str, text: String },

    #[error("container split into {split} segments but asked to join {joined}")]
    DelimiterCountMismatch { split: usize, joined: usize },

    #[error("segment index {index} out of range for container with {count} segments")]
    SegmentIndex { index: usize, count: usize },

    #[error("face references vertex {index} but the import produced {vert_ct} vertices")]
    FaceIndex { index: u32, vert_ct: usize },

    /// Catch-all for undecodable fields (negative lengths, bad text bytes,
    /// and anything else the record codecs reject mid-stream).
    #[error("malformed field at byte {offset:#x}: {message}")]
    Corrupt { offset: u64, message: String },
}

impl FormatError {
    /// Classify a `binrw` failure into the taxonomy above.
    ///
    /// Codec-internal errors carry their own stream position where binrw
    /// records one; `fallback_offset` is the reader position observed at the
    /// boundary, used when it does not (plain I/O errors).
    pub(crate) fn from_binrw(err: binrw::Error, fallback_offset: u64) -> Self {
        let mut inner = &err;
        while let binrw::Error::Backtrace(bt) = inner {
            inner = &*bt.error;
        }

        if let Some(fmt_err) = inner.custom_err::<FormatError>() {
            return fmt_err.clone();
        }

        match inner {
            binrw::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::UnexpectedEof => {
                FormatError::TruncatedStream {
                    offset: fallback_offset,
                }
            }
            binrw::Error::AssertFail { pos, message } => FormatError::Corrupt {
                offset: *pos,
                message: message.clone(),
            },
            binrw::Error::Custom { pos, err } => FormatError::Corrupt {
                offset: *pos,
                message: err.to_string(),
            },
            other => FormatError::Corrupt {
                offset: fallback_offset,
                message: other.to_string(),
            },
        }
    }
}
