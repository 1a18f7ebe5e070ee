use async_graphql::SimpleObject;
use serde::Serialize;

use crate::models::domain::{Question, Quiz};

/// Full question record, answer key included. Only returned to question
/// authors, never as part of a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDto {
    pub question_id: i32,
    pub category: Option<String>,
    pub question_title: Option<String>,
    pub option1: Option<String>,
    pub option2: Option<String>,
    pub option3: Option<String>,
    pub option4: Option<String>,
    pub right_ans: Option<String>,
    pub difficulty_level: Option<String>,
}

impl From<Question> for QuestionDto {
    fn from(question: Question) -> Self {
        let content = question.content;
        QuestionDto {
            question_id: question.question_id,
            category: content.category,
            question_title: content.question_title,
            option1: content.option1,
            option2: content.option2,
            option3: content.option3,
            option4: content.option4,
            right_ans: content.right_ans,
            difficulty_level: content.difficulty_level,
        }
    }
}

/// A question as served to a quiz taker: no `rightAns`, no `difficultyLevel`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestionDto {
    pub question_id: i32,
    pub category: Option<String>,
    pub question_title: Option<String>,
    pub option1: Option<String>,
    pub option2: Option<String>,
    pub option3: Option<String>,
    pub option4: Option<String>,
}

impl From<Question> for QuizQuestionDto {
    fn from(question: Question) -> Self {
        let content = question.content;
        QuizQuestionDto {
            question_id: question.question_id,
            category: content.category,
            question_title: content.question_title,
            option1: content.option1,
            option2: content.option2,
            option3: content.option3,
            option4: content.option4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizResponse {
    pub quiz_id: i32,
    pub title: String,
    pub question_ids: Vec<i32>,
}

impl From<Quiz> for CreateQuizResponse {
    fn from(quiz: Quiz) -> Self {
        CreateQuizResponse {
            quiz_id: quiz.quiz_id,
            title: quiz.title,
            question_ids: quiz.question_ids,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestionsResponse {
    pub quiz_id: i32,
    pub title: String,
    pub questions: Vec<QuizQuestionDto>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    pub total_questions: u32,
    pub correct_answers: u32,
    pub incorrect_answers: u32,
}

#[derive(Debug, Serialize)]
pub struct CategoryQuestionsResponse {
    pub status: String,
    pub questions: Vec<QuestionDto>,
}

#[derive(Debug, Serialize)]
pub struct AllQuestionsResponse {
    pub status: String,
    #[serde(rename = "AllQuestions")]
    pub all_questions: Vec<QuestionDto>,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct DeleteQuestionResponse {
    pub status: String,
    pub message: String,
    pub question_id: i32,
}
