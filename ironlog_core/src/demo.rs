//! The demo ingestion run and the single-document peek.
//!
//! Users, weigh-ins and workouts are ingested one collection after another.
//! Each collection is loaded, decoded, printed and inserted before the next
//! file is touched, so a failure leaves earlier collections committed.

use crate::ingest::load_entities;
use crate::inserter::insert_documents;
use crate::store::{StoreConnection, StoreConnector};
use crate::{Result, User, WeighIn, Workout};
use mongodb::bson::{Bson, Document};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::io::Write;
use std::path::Path;

pub const USERS_FILE: &str = "users.json";
pub const WEIGH_INS_FILE: &str = "weighins.json";
pub const WORKOUTS_FILE: &str = "workouts.json";

pub const USERS_COLLECTION: &str = "users";
pub const WEIGH_INS_COLLECTION: &str = "weigh_ins";
pub const WORKOUTS_COLLECTION: &str = "workouts";

/// Identifiers assigned during a demo run, per collection
#[derive(Clone, Debug, Default)]
pub struct DemoSummary {
    pub users: Vec<Bson>,
    pub weigh_ins: Vec<Bson>,
    pub workouts: Vec<Bson>,
}

impl DemoSummary {
    pub fn total(&self) -> usize {
        self.users.len() + self.weigh_ins.len() + self.workouts.len()
    }
}

/// One collection's worth of ingestion
struct Dataset {
    file: &'static str,
    collection: &'static str,
    /// Singular label used in progress output
    label: &'static str,
    /// Plural label used in progress output
    plural: &'static str,
}

const USERS: Dataset = Dataset {
    file: USERS_FILE,
    collection: USERS_COLLECTION,
    label: "user",
    plural: "users",
};

const WEIGH_INS: Dataset = Dataset {
    file: WEIGH_INS_FILE,
    collection: WEIGH_INS_COLLECTION,
    label: "weigh-in",
    plural: "weigh-ins",
};

const WORKOUTS: Dataset = Dataset {
    file: WORKOUTS_FILE,
    collection: WORKOUTS_COLLECTION,
    label: "workout",
    plural: "workouts",
};

/// Load the three fixture files from `data_dir` and insert them into `database`
pub fn run_demo<C, W>(
    connector: &C,
    data_dir: &Path,
    database: &str,
    out: &mut W,
) -> Result<DemoSummary>
where
    C: StoreConnector,
    W: Write,
{
    tracing::info!("Starting demo ingestion from {:?} into {}", data_dir, database);
    writeln!(out, "Inserting all documents into DB {}", database)?;

    let summary = DemoSummary {
        users: ingest_dataset::<User, _, _>(connector, data_dir, database, &USERS, out)?,
        weigh_ins: ingest_dataset::<WeighIn, _, _>(connector, data_dir, database, &WEIGH_INS, out)?,
        workouts: ingest_dataset::<Workout, _, _>(connector, data_dir, database, &WORKOUTS, out)?,
    };

    tracing::info!("Demo ingestion finished: {} documents", summary.total());
    Ok(summary)
}

fn ingest_dataset<T, C, W>(
    connector: &C,
    data_dir: &Path,
    database: &str,
    dataset: &Dataset,
    out: &mut W,
) -> Result<Vec<Bson>>
where
    T: DeserializeOwned + Serialize + Debug,
    C: StoreConnector,
    W: Write,
{
    let path = data_dir.join(dataset.file);
    let entities: Vec<T> = load_entities(&path)?;

    writeln!(out, "{} {} found.", entities.len(), dataset.plural)?;
    for entity in &entities {
        writeln!(out, "\t{:?}", entity)?;
    }
    writeln!(out)?;

    writeln!(out, "Inserting {}...", dataset.plural)?;
    let ids = insert_documents(connector, database, dataset.collection, &entities)?;

    writeln!(out, "Number of {} inserted: {}", dataset.label, ids.len())?;
    for id in &ids {
        writeln!(out, "Inserted {} with _id: {}", dataset.label, id)?;
    }
    writeln!(out)?;

    Ok(ids)
}

/// Print one document from a collection as pretty JSON
///
/// Returns the document that was printed, if any.
pub fn peek<C, W>(
    connector: &C,
    database: &str,
    collection: &str,
    out: &mut W,
) -> Result<Option<Document>>
where
    C: StoreConnector,
    W: Write,
{
    let mut connection = connector.connect()?;
    let found = connection.find_one(database, collection)?;
    drop(connection);

    match &found {
        Some(document) => {
            let json = Bson::Document(document.clone()).into_relaxed_extjson();
            writeln!(out, "{}", serde_json::to_string_pretty(&json)?)?;
        }
        None => {
            writeln!(out, "No document was found")?;
        }
    }

    Ok(found)
}
