//! Thin wrappers around `std::fs` that translate failures into [`IOError`],
//! used for the `.bytes`/`.lua` output artifacts and their round-trip tests.

use std::path::Path;

use crate::error::IOError;

pub fn write_file(path: &Path, bytes: &[u8]) -> Result<(), IOError> {
    std::fs::write(path, bytes).map_err(|source| IOError::Write {
        path: path.display().to_string(),
        source,
    })
}

pub fn read_file(path: &Path) -> Result<Vec<u8>, IOError> {
    std::fs::read(path).map_err(|source| IOError::Read {
        path: path.display().to_string(),
        source,
    })
}
