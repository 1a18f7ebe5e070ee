use std::collections::HashSet;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, ClientSession, Collection, IndexModel};
use serde::{Deserialize, Serialize};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Quiz,
    repositories::sequence::SequenceGenerator,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Quiz>>;
    /// Creates the quiz when `quiz_id` is `None`, otherwise overwrites the
    /// title and replaces the whole question binding. The quiz row and its
    /// bindings are written in one transaction. Questions deleted since they
    /// were sampled are left out of the binding; if none remain nothing is
    /// written.
    async fn save(
        &self,
        quiz_id: Option<i32>,
        title: &str,
        question_ids: &[i32],
    ) -> AppResult<Quiz>;
}

#[derive(Debug, Serialize, Deserialize)]
struct QuizDocument {
    quiz_id: i32,
    title: String,
}

#[derive(Debug, Deserialize)]
struct QuestionRef {
    question_id: i32,
}

#[derive(Debug, Serialize, Deserialize)]
struct QuizQuestionLink {
    quiz_id: i32,
    question_id: i32,
    position: i32,
}

pub struct MongoQuizRepository {
    db: Database,
    collection: Collection<QuizDocument>,
    links: Collection<QuizQuestionLink>,
    questions: Collection<QuestionRef>,
    sequence: SequenceGenerator,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            db: db.clone(),
            collection: db.get_collection("quizzes"),
            links: db.get_collection("quiz_questions"),
            questions: db.get_collection("questions"),
            sequence: SequenceGenerator::new(db, "quiz_id"),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quizzes and quiz_questions collections");

        let id_index = IndexModel::builder()
            .keys(doc! { "quiz_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("quiz_id_unique".to_string())
                    .build(),
            )
            .build();

        let link_index = IndexModel::builder()
            .keys(doc! { "quiz_id": 1, "question_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("quiz_question_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.links.create_index(link_index).await?;

        log::info!("Successfully created indexes for quiz collections");
        Ok(())
    }

    /// Reads which of the ids still have a question, inside the transaction.
    async fn present_question_ids(
        &self,
        session: &mut ClientSession,
        question_ids: &[i32],
    ) -> AppResult<HashSet<i32>> {
        let mut cursor = self
            .questions
            .find(doc! { "question_id": { "$in": question_ids.to_vec() } })
            .projection(doc! { "_id": 0, "question_id": 1 })
            .session(&mut *session)
            .await?;

        let refs: Vec<QuestionRef> = cursor.stream(&mut *session).try_collect().await?;
        Ok(refs.into_iter().map(|r| r.question_id).collect())
    }

    async fn bind_quiz(
        &self,
        session: &mut ClientSession,
        quiz_id: i32,
        title: &str,
        question_ids: &[i32],
    ) -> AppResult<Quiz> {
        let present = self.present_question_ids(session, question_ids).await?;
        let quiz = Quiz::new(quiz_id, title, retain_present(question_ids, &present)?);
        self.write_quiz(session, &quiz).await?;
        Ok(quiz)
    }

    async fn write_quiz(
        &self,
        session: &mut ClientSession,
        quiz: &Quiz,
    ) -> AppResult<()> {
        let document = QuizDocument {
            quiz_id: quiz.quiz_id,
            title: quiz.title.clone(),
        };

        self.collection
            .replace_one(doc! { "quiz_id": quiz.quiz_id }, &document)
            .upsert(true)
            .session(&mut *session)
            .await?;

        self.links
            .delete_many(doc! { "quiz_id": quiz.quiz_id })
            .session(&mut *session)
            .await?;

        let links: Vec<QuizQuestionLink> = quiz
            .question_ids
            .iter()
            .enumerate()
            .map(|(position, question_id)| QuizQuestionLink {
                quiz_id: quiz.quiz_id,
                question_id: *question_id,
                position: position as i32,
            })
            .collect();

        if !links.is_empty() {
            self.links
                .insert_many(links)
                .session(&mut *session)
                .await?;
        }

        Ok(())
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Quiz>> {
        let Some(document) = self.collection.find_one(doc! { "quiz_id": id }).await? else {
            return Ok(None);
        };

        let links: Vec<QuizQuestionLink> = self
            .links
            .find(doc! { "quiz_id": id })
            .sort(doc! { "position": 1 })
            .await?
            .try_collect()
            .await?;

        Ok(Some(Quiz::new(
            document.quiz_id,
            &document.title,
            links.into_iter().map(|link| link.question_id).collect(),
        )))
    }

    async fn save(
        &self,
        quiz_id: Option<i32>,
        title: &str,
        question_ids: &[i32],
    ) -> AppResult<Quiz> {
        let quiz_id = match quiz_id {
            Some(id) => id,
            None => self.sequence.next_id().await?,
        };

        let mut session = self.db.start_transaction().await?;

        let quiz = match self
            .bind_quiz(&mut session, quiz_id, title, question_ids)
            .await
        {
            Ok(quiz) => quiz,
            Err(err) => {
                if let Err(abort_err) = session.abort_transaction().await {
                    log::warn!("Failed to abort quiz transaction: {}", abort_err);
                }
                return Err(err);
            }
        };
        session.commit_transaction().await?;

        Ok(quiz)
    }
}

/// Keeps the sampled order, dropping ids whose question has been deleted.
fn retain_present(question_ids: &[i32], present: &HashSet<i32>) -> AppResult<Vec<i32>> {
    let retained: Vec<i32> = question_ids
        .iter()
        .copied()
        .filter(|id| present.contains(id))
        .collect();

    if retained.len() < question_ids.len() {
        log::warn!(
            "{} sampled question(s) were deleted before the quiz was saved",
            question_ids.len() - retained.len()
        );
    }

    if retained.is_empty() {
        return Err(AppError::ValidationError(
            "No questions found for the specified category.".to_string(),
        ));
    }
    Ok(retained)
}
