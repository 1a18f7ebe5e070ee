use mongodb::{bson::doc, options::ReturnDocument, Collection};
use serde::{Deserialize, Serialize};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
};

#[derive(Debug, Serialize, Deserialize)]
struct Counter {
    #[serde(rename = "_id")]
    name: String,
    seq: i32,
}

/// Integer identifiers backed by a document in the `counters` collection.
pub struct SequenceGenerator {
    collection: Collection<Counter>,
    name: String,
}

impl SequenceGenerator {
    pub fn new(db: &Database, name: &str) -> Self {
        Self {
            collection: db.get_collection("counters"),
            name: name.to_string(),
        }
    }

    /// Atomically increments the counter and returns the new value. The first
    /// id handed out is 1.
    pub async fn next_id(&self) -> AppResult<i32> {
        let counter = self
            .collection
            .find_one_and_update(doc! { "_id": &self.name }, doc! { "$inc": { "seq": 1 } })
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| {
                AppError::InternalError(format!("Counter '{}' was not returned", self.name))
            })?;

        Ok(counter.seq)
    }
}
