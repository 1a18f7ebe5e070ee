use std::collections::HashMap;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc, options::IndexOptions, ClientSession, Collection, IndexModel,
};
use serde::Deserialize;

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{PendingQuestion, Question},
    repositories::sequence::SequenceGenerator,
};

/// The question store. Every write method is atomic: a batch either commits
/// completely or leaves the store untouched.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Question>>;
    async fn find_by_category(&self, category: &str) -> AppResult<Vec<Question>>;
    /// Uniform sample without replacement; may return fewer than `count`.
    async fn find_random_by_category(&self, category: &str, count: u32)
        -> AppResult<Vec<Question>>;
    async fn find_by_ids(&self, ids: &[i32]) -> AppResult<Vec<Question>>;
    /// Maps each id to its stored answer. Ids that are unknown or whose
    /// answer is null are absent from the map.
    async fn find_answers_by_ids(&self, ids: &[i32]) -> AppResult<HashMap<i32, String>>;
    async fn find_all(&self) -> AppResult<Vec<Question>>;
    /// Persists the batch in one transaction and returns the saved records in
    /// input order. An `Existing` entry whose row is gone by write time fails
    /// the whole batch with `NotFound`.
    async fn save_all(&self, questions: Vec<PendingQuestion>) -> AppResult<Vec<Question>>;
    /// Returns `false` when nothing had that id.
    async fn delete_by_id(&self, id: i32) -> AppResult<bool>;
    async fn health_check(&self) -> AppResult<()>;
}

#[derive(Debug, Deserialize)]
struct AnswerKey {
    question_id: i32,
    right_ans: Option<String>,
}

pub struct MongoQuestionRepository {
    db: Database,
    collection: Collection<Question>,
    sequence: SequenceGenerator,
}

impl MongoQuestionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("questions");
        Self {
            db: db.clone(),
            collection,
            sequence: SequenceGenerator::new(db, "question_id"),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for questions collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "question_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("question_id_unique".to_string())
                    .build(),
            )
            .build();

        let category_index = IndexModel::builder()
            .keys(doc! { "category": 1 })
            .options(IndexOptions::builder().name("category".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(category_index).await?;

        log::info!("Successfully created indexes for questions collection");
        Ok(())
    }

    async fn write_all(
        &self,
        session: &mut ClientSession,
        questions: &[(Question, bool)],
    ) -> AppResult<()> {
        for (question, replaces_existing) in questions {
            if *replaces_existing {
                let result = self
                    .collection
                    .replace_one(doc! { "question_id": question.question_id }, question)
                    .session(&mut *session)
                    .await?;
                ensure_replaced(question.question_id, result.matched_count)?;
            } else {
                self.collection
                    .insert_one(question)
                    .session(&mut *session)
                    .await?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl QuestionRepository for MongoQuestionRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Question>> {
        let question = self.collection.find_one(doc! { "question_id": id }).await?;
        Ok(question)
    }

    async fn find_by_category(&self, category: &str) -> AppResult<Vec<Question>> {
        let questions = self
            .collection
            .find(doc! { "category": category })
            .sort(doc! { "question_id": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(questions)
    }

    async fn find_random_by_category(
        &self,
        category: &str,
        count: u32,
    ) -> AppResult<Vec<Question>> {
        // $sample after $match draws without replacement
        let pipeline = vec![
            doc! { "$match": { "category": category } },
            doc! { "$sample": { "size": i64::from(count) } },
        ];

        let questions = self
            .collection
            .aggregate(pipeline)
            .with_type::<Question>()
            .await?
            .try_collect()
            .await?;
        Ok(questions)
    }

    async fn find_by_ids(&self, ids: &[i32]) -> AppResult<Vec<Question>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let questions = self
            .collection
            .find(doc! { "question_id": { "$in": ids.to_vec() } })
            .await?
            .try_collect()
            .await?;
        Ok(questions)
    }

    async fn find_answers_by_ids(&self, ids: &[i32]) -> AppResult<HashMap<i32, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let keys: Vec<AnswerKey> = self
            .collection
            .clone_with_type::<AnswerKey>()
            .find(doc! { "question_id": { "$in": ids.to_vec() } })
            .projection(doc! { "_id": 0, "question_id": 1, "right_ans": 1 })
            .await?
            .try_collect()
            .await?;

        Ok(keys
            .into_iter()
            .filter_map(|key| key.right_ans.map(|answer| (key.question_id, answer)))
            .collect())
    }

    async fn find_all(&self) -> AppResult<Vec<Question>> {
        let questions = self
            .collection
            .find(doc! {})
            .sort(doc! { "question_id": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(questions)
    }

    async fn save_all(&self, questions: Vec<PendingQuestion>) -> AppResult<Vec<Question>> {
        // Ids come from the counter outside the transaction, so an aborted
        // batch can leave gaps in the sequence.
        let mut records = Vec::with_capacity(questions.len());
        for pending in questions {
            let record = match pending {
                PendingQuestion::New(content) => {
                    (Question::new(self.sequence.next_id().await?, content), false)
                }
                PendingQuestion::Existing(question) => (question, true),
            };
            records.push(record);
        }

        let mut session = self.db.start_transaction().await?;
        if let Err(err) = self.write_all(&mut session, &records).await {
            if let Err(abort_err) = session.abort_transaction().await {
                log::warn!("Failed to abort question batch transaction: {}", abort_err);
            }
            return Err(err);
        }
        session.commit_transaction().await?;

        Ok(records.into_iter().map(|(question, _)| question).collect())
    }

    async fn delete_by_id(&self, id: i32) -> AppResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "question_id": id })
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn health_check(&self) -> AppResult<()> {
        self.db.health_check().await
    }
}

/// A replacement must hit a stored row; a question deleted after the batch
/// was resolved fails the batch instead of being recreated.
fn ensure_replaced(question_id: i32, matched_count: u64) -> AppResult<()> {
    if matched_count == 0 {
        log::warn!("Question {} disappeared before it could be replaced", question_id);
        return Err(AppError::NotFound(format!(
            "Question {} no longer exists.",
            question_id
        )));
    }
    Ok(())
}
