//! Bulk document insertion.

use crate::store::{StoreConnection, StoreConnector};
use crate::Result;
use mongodb::bson::{self, Bson, Document};
use serde::Serialize;

/// Persist every entity as its own document in a single bulk request.
///
/// Returns the assigned identifiers in the same order as `entities`. An
/// empty slice is a no-op and never opens a connection. Nothing is
/// deduplicated: inserting the same entities twice stores them twice.
pub fn insert_documents<C, T>(
    connector: &C,
    database: &str,
    collection: &str,
    entities: &[T],
) -> Result<Vec<Bson>>
where
    C: StoreConnector,
    T: Serialize,
{
    if entities.is_empty() {
        tracing::debug!("Nothing to insert into {}.{}", database, collection);
        return Ok(Vec::new());
    }

    // Serialize everything up front so a bad entity never reaches the store
    let documents = entities
        .iter()
        .map(bson::to_document)
        .collect::<std::result::Result<Vec<Document>, _>>()?;

    let mut connection = connector.connect()?;
    let ids = connection.insert_many(database, collection, documents)?;
    drop(connection);

    for id in &ids {
        tracing::debug!("Inserted into {}.{} with _id {}", database, collection, id);
    }
    tracing::info!(
        "Inserted {} documents into {}.{}",
        ids.len(),
        database,
        collection
    );

    Ok(ids)
}
