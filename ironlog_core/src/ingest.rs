//! Fixture file loading and decoding.
//!
//! Files are read whole and decoded all-or-nothing: a single bad element
//! fails the entire file.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Read a data file fully into memory
pub fn load_file(path: &Path) -> Result<Vec<u8>> {
    let bytes = std::fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Read {} bytes from {:?}", bytes.len(), path);
    Ok(bytes)
}

/// Decode a JSON array into entities, preserving array order
///
/// `path` only labels the error.
pub fn decode<T: DeserializeOwned>(path: &Path, bytes: &[u8]) -> Result<Vec<T>> {
    serde_json::from_slice(bytes).map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and decode a data file
pub fn load_entities<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let bytes = load_file(path)?;
    let entities: Vec<T> = decode(path, &bytes)?;
    tracing::info!("Decoded {} entities from {:?}", entities.len(), path);
    Ok(entities)
}
