//! MongoDB backend using the driver's blocking client.

use crate::store::{StoreConnection, StoreConnector};
use crate::{Error, Result};
use mongodb::bson::{doc, Bson, Document};
use mongodb::sync::Client;
use std::collections::HashMap;

/// Connects to MongoDB at a fixed URI
#[derive(Clone, Debug)]
pub struct MongoConnector {
    uri: String,
}

impl MongoConnector {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

impl StoreConnector for MongoConnector {
    type Connection = MongoConnection;

    fn connect(&self) -> Result<MongoConnection> {
        let client = Client::with_uri_str(&self.uri)?;

        // The driver connects lazily; ping so an unreachable server fails here
        client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)?;

        tracing::debug!("Connected to MongoDB");
        Ok(MongoConnection { client })
    }
}

/// An open MongoDB client, released on drop
pub struct MongoConnection {
    client: Client,
}

impl StoreConnection for MongoConnection {
    fn insert_many(
        &mut self,
        database: &str,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<Vec<Bson>> {
        let expected = documents.len();
        let coll = self
            .client
            .database(database)
            .collection::<Document>(collection);

        let result = coll.insert_many(documents, None)?;
        ordered_ids(result.inserted_ids, expected).map_err(|e| {
            Error::Store(format!("{}.{}: {}", database, collection, e))
        })
    }

    fn find_one(&mut self, database: &str, collection: &str) -> Result<Option<Document>> {
        let coll = self
            .client
            .database(database)
            .collection::<Document>(collection);
        Ok(coll.find_one(None, None)?)
    }
}

/// Flatten the driver's index-keyed ids into input order
///
/// Every index in `0..expected` must be present exactly once.
fn ordered_ids(
    inserted: HashMap<usize, Bson>,
    expected: usize,
) -> std::result::Result<Vec<Bson>, String> {
    if inserted.len() != expected {
        return Err(format!(
            "MongoDB acknowledged {} of {} documents",
            inserted.len(),
            expected
        ));
    }

    let mut ids: Vec<(usize, Bson)> = inserted.into_iter().collect();
    ids.sort_by_key(|(index, _)| *index);

    if let Some((position, (index, _))) = ids
        .iter()
        .enumerate()
        .find(|(position, (index, _))| position != index)
    {
        return Err(format!(
            "MongoDB returned an id for index {} where {} was expected",
            index, position
        ));
    }

    Ok(ids.into_iter().map(|(_, id)| id).collect())
}

impl Drop for MongoConnection {
    fn drop(&mut self) {
        tracing::debug!("Released MongoDB connection");
    }
}
