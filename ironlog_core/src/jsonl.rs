//! Local document store backed by JSON Lines files.
//!
//! Each collection lives at `<root>/<database>/<collection>.jsonl`, one
//! relaxed Extended JSON document per line. Appends take an exclusive
//! file lock, reads a shared one.

use crate::store::{StoreConnection, StoreConnector};
use crate::{Error, Result};
use fs2::FileExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Opens connections rooted at a directory
#[derive(Clone, Debug)]
pub struct JsonlConnector {
    root: PathBuf,
}

impl JsonlConnector {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// File holding a collection's documents
    pub fn collection_path(&self, database: &str, collection: &str) -> PathBuf {
        collection_path(&self.root, database, collection)
    }
}

impl StoreConnector for JsonlConnector {
    type Connection = JsonlConnection;

    fn connect(&self) -> Result<JsonlConnection> {
        std::fs::create_dir_all(&self.root)?;
        Ok(JsonlConnection {
            root: self.root.clone(),
        })
    }
}

/// Connection to a JSON Lines store
pub struct JsonlConnection {
    root: PathBuf,
}

impl StoreConnection for JsonlConnection {
    fn insert_many(
        &mut self,
        database: &str,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<Vec<Bson>> {
        let path = collection_path(&self.root, database, collection);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Assign ids and render every line before touching the file
        let mut ids = Vec::with_capacity(documents.len());
        let mut lines = Vec::with_capacity(documents.len());
        for mut document in documents {
            let id = match document.get("_id") {
                Some(id) => id.clone(),
                None => {
                    let id = Bson::ObjectId(ObjectId::new());
                    document.insert("_id", id.clone());
                    id
                }
            };
            let line = serde_json::to_string(&Bson::Document(document).into_relaxed_extjson())?;
            lines.push(line);
            ids.push(id);
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;

        // Acquire exclusive lock
        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        for line in &lines {
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        drop(writer);

        file.unlock()?;

        tracing::debug!("Appended {} documents to {:?}", ids.len(), path);
        Ok(ids)
    }

    fn find_one(&mut self, database: &str, collection: &str) -> Result<Option<Document>> {
        let path = collection_path(&self.root, database, collection);
        Ok(read_documents(&path)?.into_iter().next())
    }
}

fn collection_path(root: &Path, database: &str, collection: &str) -> PathBuf {
    root.join(database).join(format!("{}.jsonl", collection))
}

/// Read all documents from a collection file
///
/// A missing file is an empty collection. Unlike fixture decoding, a
/// malformed line is an error: the store only ever holds what it wrote.
pub fn read_documents(path: &Path) -> Result<Vec<Document>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    // Acquire shared lock for reading
    file.lock_shared()?;

    let parsed = parse_documents(&file, path);
    file.unlock()?;

    let documents = parsed?;
    tracing::debug!("Read {} documents from {:?}", documents.len(), path);
    Ok(documents)
}

fn parse_documents(file: &File, path: &Path) -> Result<Vec<Document>> {
    let reader = BufReader::new(file);
    let mut documents = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        let value: serde_json::Value = serde_json::from_str(&line)?;
        match Bson::try_from(value) {
            Ok(Bson::Document(document)) => documents.push(document),
            Ok(other) => {
                return Err(Error::Store(format!(
                    "{:?} line {}: expected a document, found {:?}",
                    path,
                    line_num + 1,
                    other.element_type()
                )));
            }
            Err(e) => {
                return Err(Error::Store(format!(
                    "{:?} line {}: {}",
                    path,
                    line_num + 1,
                    e
                )));
            }
        }
    }

    Ok(documents)
}
