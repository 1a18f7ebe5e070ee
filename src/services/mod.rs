pub mod grading_service;
pub mod question_service;
pub mod quiz_service;

pub use grading_service::GradingService;
pub use question_service::QuestionService;
pub use quiz_service::QuizService;
