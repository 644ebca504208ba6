//! Database extraction from a host executable.
//!
//! The quiz database is embedded in the executable as a zlib stream starting
//! at a fixed, build-specific offset and running to end-of-file. Extraction
//! reads the whole file, slices off everything before the offset, and
//! decompresses the remainder eagerly. There is no streaming path; the
//! payloads are small and are processed exactly once per run.

use crate::error::{Error, Result};
use crate::layout::Layout;
use flate2::read::ZlibDecoder;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// The fully decompressed content blob extracted from one executable.
///
/// Owns its bytes exclusively and is never mutated after creation. Decoded
/// entities copy their content out of this buffer, so it can be dropped as
/// soon as decoding completes.
#[derive(Debug, Clone)]
pub struct Database {
    /// Name of the database, taken from the source file name
    pub name: String,
    /// The decompressed content bytes
    pub data: Vec<u8>,
}

impl Database {
    /// Extracts and decompresses the database embedded in an executable.
    ///
    /// Fails with [`Error::InputTooShort`] if the file ends before the
    /// layout's database offset, and with [`Error::Decompression`] if the
    /// trailing bytes are not a valid zlib stream (corrupt input, wrong
    /// executable, or wrong build — not distinguished at this layer).
    pub fn from_exe_file(path: impl AsRef<Path>, layout: &Layout) -> Result<Self> {
        let path = path.as_ref();
        let exe = std::fs::read(path).map_err(|e| Error::file_read(path, e))?;
        debug!("read {} bytes from {}", exe.len(), path.display());

        if exe.len() < layout.database_offset {
            return Err(Error::InputTooShort {
                len: exe.len(),
                offset: layout.database_offset,
            });
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::decompress(name, &exe[layout.database_offset..], layout.database_offset)
    }

    /// Decompresses a database from a raw zlib stream, skipping the
    /// executable-offset step.
    pub fn from_compressed(name: impl Into<String>, compressed: &[u8]) -> Result<Self> {
        Self::decompress(name.into(), compressed, 0)
    }

    /// Wraps an already-decompressed buffer.
    pub fn from_raw(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    fn decompress(name: String, compressed: &[u8], offset: usize) -> Result<Self> {
        let mut data = Vec::new();
        ZlibDecoder::new(compressed)
            .read_to_end(&mut data)
            .map_err(|e| Error::Decompression { offset, source: e })?;
        debug!("decompressed '{}': {} -> {} bytes", name, compressed.len(), data.len());
        Ok(Self { name, data })
    }

    /// Returns the decompressed content bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn deflate(data: &[u8]) -> Vec<u8> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_from_compressed_roundtrip() {
        let payload = b"quiz content bytes".to_vec();
        let db = Database::from_compressed("quiz.exe", &deflate(&payload)).unwrap();
        assert_eq!(db.name, "quiz.exe");
        assert_eq!(db.as_bytes(), payload.as_slice());
    }

    #[test]
    fn test_from_compressed_rejects_garbage() {
        let err = Database::from_compressed("quiz.exe", b"not a zlib stream").unwrap_err();
        assert!(matches!(err, Error::Decompression { offset: 0, .. }));
    }

    #[test]
    fn test_from_exe_file_strips_leading_bytes() {
        // A small offset profile keeps the fixture tiny; only the slicing
        // logic differs from the observed build.
        let layout = Layout {
            database_offset: 16,
            ..Layout::default()
        };

        let mut exe = vec![0x4D, 0x5A]; // MZ
        exe.resize(16, 0);
        exe.extend_from_slice(&deflate(b"embedded database"));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz.exe");
        std::fs::write(&path, &exe).unwrap();

        let db = Database::from_exe_file(&path, &layout).unwrap();
        assert_eq!(db.name, "quiz.exe");
        assert_eq!(db.as_bytes(), b"embedded database");
    }

    #[test]
    fn test_from_exe_file_too_short() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stub.exe");
        std::fs::write(&path, b"MZ").unwrap();

        let err = Database::from_exe_file(&path, &Layout::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::InputTooShort {
                len: 2,
                offset: 0x70C10
            }
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = Database::from_exe_file("/no/such/quiz.exe", &Layout::default()).unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }
}
