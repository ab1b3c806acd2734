//! Document store abstraction.
//!
//! A connector hands out one connection per call; the connection is
//! released when it is dropped.

use crate::Result;
use mongodb::bson::{Bson, Document};

/// Produces fresh connections to a document store
pub trait StoreConnector {
    type Connection: StoreConnection;

    fn connect(&self) -> Result<Self::Connection>;
}

/// A live connection to a document store
pub trait StoreConnection {
    /// Insert all documents in one request.
    ///
    /// Returns the assigned `_id` values in input order.
    fn insert_many(
        &mut self,
        database: &str,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<Vec<Bson>>;

    /// Fetch an arbitrary document from a collection
    fn find_one(&mut self, database: &str, collection: &str) -> Result<Option<Document>>;
}
