//! Entry store persistence as a flat JSON record keyed by word id.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::debug;

use super::EntryStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("cannot access entry store {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("malformed entry store: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Writes the store pretty-printed with four-space indentation.
pub fn write_store<W: Write>(store: &EntryStore, writer: W) -> Result<(), StoreError> {
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
    store.serialize(&mut ser)?;
    Ok(())
}

pub fn read_store<R: Read>(reader: R) -> Result<EntryStore, StoreError> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn save(store: &EntryStore, path: &Path) -> Result<(), StoreError> {
    let file = File::create(path).map_err(|e| StoreError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_store(store, &mut writer)?;
    writer.flush().map_err(|e| StoreError::io(path, e))?;
    debug!(path = %path.display(), entries = store.len(), "entry store saved");
    Ok(())
}

pub fn load(path: &Path) -> Result<EntryStore, StoreError> {
    let file = File::open(path).map_err(|e| StoreError::io(path, e))?;
    let store = read_store(BufReader::new(file))?;
    debug!(path = %path.display(), entries = store.len(), "entry store loaded");
    Ok(store)
}
