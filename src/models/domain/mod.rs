pub mod question;
pub mod quiz;
pub use question::{PendingQuestion, Question, QuestionContent};
pub use quiz::Quiz;
