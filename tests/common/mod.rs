#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use tokio::sync::RwLock;

use quiz_content_server::{
    app_state::AppState,
    errors::{AppError, AppResult},
    models::domain::{PendingQuestion, Question, QuestionContent, Quiz},
    repositories::{QuestionRepository, QuizRepository},
};

/// Question store kept in memory. A batch is applied to a copy and only
/// swapped in when every write succeeded.
pub struct InMemoryQuestionRepository {
    questions: RwLock<BTreeMap<i32, Question>>,
    next_id: AtomicI32,
    writes_before_failure: AtomicUsize,
}

impl InMemoryQuestionRepository {
    pub fn new() -> Self {
        Self {
            questions: RwLock::new(BTreeMap::new()),
            next_id: AtomicI32::new(1),
            writes_before_failure: AtomicUsize::new(usize::MAX),
        }
    }

    /// Makes every save after the first `writes` records fail.
    pub fn fail_after_writes(&self, writes: usize) {
        self.writes_before_failure.store(writes, Ordering::SeqCst);
    }

    pub async fn count(&self) -> usize {
        self.questions.read().await.len()
    }

    pub async fn get(&self, id: i32) -> Option<Question> {
        self.questions.read().await.get(&id).cloned()
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Question>> {
        Ok(self.questions.read().await.get(&id).cloned())
    }

    async fn find_by_category(&self, category: &str) -> AppResult<Vec<Question>> {
        let questions = self.questions.read().await;
        Ok(questions
            .values()
            .filter(|q| q.content.category.as_deref() == Some(category))
            .cloned()
            .collect())
    }

    async fn find_random_by_category(
        &self,
        category: &str,
        count: u32,
    ) -> AppResult<Vec<Question>> {
        let candidates = self.find_by_category(category).await?;
        Ok(candidates
            .choose_multiple(&mut rand::thread_rng(), count as usize)
            .cloned()
            .collect())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> AppResult<Vec<Question>> {
        let questions = self.questions.read().await;
        Ok(ids.iter().filter_map(|id| questions.get(id).cloned()).collect())
    }

    async fn find_answers_by_ids(&self, ids: &[i32]) -> AppResult<HashMap<i32, String>> {
        let questions = self.questions.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| questions.get(id))
            .filter_map(|q| q.content.right_ans.clone().map(|answer| (q.question_id, answer)))
            .collect())
    }

    async fn find_all(&self) -> AppResult<Vec<Question>> {
        Ok(self.questions.read().await.values().cloned().collect())
    }

    async fn save_all(&self, pending: Vec<PendingQuestion>) -> AppResult<Vec<Question>> {
        let mut questions = self.questions.write().await;
        let mut staged = questions.clone();
        let allowed = self.writes_before_failure.load(Ordering::SeqCst);

        let mut saved = Vec::with_capacity(pending.len());
        for (written, entry) in pending.into_iter().enumerate() {
            if written >= allowed {
                return Err(AppError::DatabaseError("simulated write failure".to_string()));
            }

            let question = match entry {
                PendingQuestion::New(content) => {
                    Question::new(self.next_id.fetch_add(1, Ordering::SeqCst), content)
                }
                PendingQuestion::Existing(question) => {
                    if !staged.contains_key(&question.question_id) {
                        return Err(AppError::NotFound(format!(
                            "Question {} no longer exists.",
                            question.question_id
                        )));
                    }
                    question
                }
            };
            staged.insert(question.question_id, question.clone());
            saved.push(question);
        }

        *questions = staged;
        Ok(saved)
    }

    async fn delete_by_id(&self, id: i32) -> AppResult<bool> {
        Ok(self.questions.write().await.remove(&id).is_some())
    }

    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Quiz store that checks bindings against the question store at save time.
pub struct InMemoryQuizRepository {
    quizzes: RwLock<HashMap<i32, Quiz>>,
    questions: Arc<InMemoryQuestionRepository>,
    next_id: AtomicI32,
}

impl InMemoryQuizRepository {
    pub fn new(questions: Arc<InMemoryQuestionRepository>) -> Self {
        Self {
            quizzes: RwLock::new(HashMap::new()),
            questions,
            next_id: AtomicI32::new(1),
        }
    }

    pub async fn count(&self) -> usize {
        self.quizzes.read().await.len()
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Quiz>> {
        Ok(self.quizzes.read().await.get(&id).cloned())
    }

    async fn save(
        &self,
        quiz_id: Option<i32>,
        title: &str,
        question_ids: &[i32],
    ) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        let present = self.questions.questions.read().await;
        let retained: Vec<i32> = question_ids
            .iter()
            .copied()
            .filter(|id| present.contains_key(id))
            .collect();

        if retained.is_empty() {
            return Err(AppError::ValidationError(
                "No questions found for the specified category.".to_string(),
            ));
        }

        let quiz_id = quiz_id.unwrap_or_else(|| self.next_id.fetch_add(1, Ordering::SeqCst));
        let quiz = Quiz::new(quiz_id, title, retained);
        quizzes.insert(quiz_id, quiz.clone());
        Ok(quiz)
    }
}

pub struct TestStore {
    pub questions: Arc<InMemoryQuestionRepository>,
    pub quizzes: Arc<InMemoryQuizRepository>,
}

impl TestStore {
    pub fn new() -> Self {
        let questions = Arc::new(InMemoryQuestionRepository::new());
        Self {
            quizzes: Arc::new(InMemoryQuizRepository::new(questions.clone())),
            questions,
        }
    }

    pub fn app_state(&self) -> AppState {
        AppState::from_repositories(self.questions.clone(), self.quizzes.clone())
    }

    /// Stores one question per answer and returns the assigned ids.
    pub async fn seed(&self, category: &str, answers: &[&str]) -> Vec<i32> {
        let pending = answers
            .iter()
            .map(|answer| PendingQuestion::New(content(category, answer)))
            .collect();

        self.questions
            .save_all(pending)
            .await
            .expect("seeding should succeed")
            .into_iter()
            .map(|q| q.question_id)
            .collect()
    }
}

pub fn content(category: &str, right_ans: &str) -> QuestionContent {
    QuestionContent {
        category: Some(category.to_string()),
        question_title: Some(format!("Pick {}", right_ans)),
        option1: Some(right_ans.to_string()),
        option2: Some("other".to_string()),
        option3: Some("another".to_string()),
        option4: Some("none".to_string()),
        right_ans: Some(right_ans.to_string()),
        difficulty_level: Some("easy".to_string()),
    }
}
