pub mod question_repository;
pub mod quiz_repository;
pub mod sequence;

pub use question_repository::{MongoQuestionRepository, QuestionRepository};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};
