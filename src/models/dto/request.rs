use async_graphql::InputObject;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use validator::Validate;

use crate::errors::AppError;
use crate::models::domain::QuestionContent;

/// One element of an upsert batch. Field widths follow the question table.
#[derive(Debug, Clone, Default, Deserialize, Validate, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPayload {
    #[serde(default)]
    pub question_id: Option<i32>,

    #[serde(default, deserialize_with = "optional_text")]
    #[validate(length(max = 45, message = "category must be at most 45 characters."))]
    pub category: Option<String>,

    #[serde(default, deserialize_with = "optional_text")]
    #[validate(length(max = 150, message = "questionTitle must be at most 150 characters."))]
    pub question_title: Option<String>,

    #[serde(default, deserialize_with = "optional_text")]
    #[validate(length(max = 100, message = "option1 must be at most 100 characters."))]
    pub option1: Option<String>,

    #[serde(default, deserialize_with = "optional_text")]
    #[validate(length(max = 100, message = "option2 must be at most 100 characters."))]
    pub option2: Option<String>,

    #[serde(default, deserialize_with = "optional_text")]
    #[validate(length(max = 100, message = "option3 must be at most 100 characters."))]
    pub option3: Option<String>,

    #[serde(default, deserialize_with = "optional_text")]
    #[validate(length(max = 100, message = "option4 must be at most 100 characters."))]
    pub option4: Option<String>,

    #[serde(default, deserialize_with = "optional_text")]
    #[validate(length(max = 100, message = "rightAns must be at most 100 characters."))]
    pub right_ans: Option<String>,

    #[serde(default, deserialize_with = "optional_text")]
    #[validate(length(max = 45, message = "difficultyLevel must be at most 45 characters."))]
    pub difficulty_level: Option<String>,
}

impl From<QuestionPayload> for QuestionContent {
    fn from(payload: QuestionPayload) -> Self {
        QuestionContent {
            category: payload.category,
            question_title: payload.question_title,
            option1: payload.option1,
            option2: payload.option2,
            option3: payload.option3,
            option4: payload.option4,
            right_ans: payload.right_ans,
            difficulty_level: payload.difficulty_level,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 1, message = "Category must be provided."))]
    pub category: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteQuestionRequest {
    pub question_id: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizRequest {
    #[serde(default)]
    pub quiz_id: Option<i32>,

    #[serde(default)]
    #[validate(length(max = 255, message = "title must be at most 255 characters."))]
    pub title: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, max = 45, message = "category must be 1 to 45 characters."))]
    pub category: Option<String>,

    #[serde(default, rename = "numQ", alias = "count")]
    #[validate(range(min = 1, message = "numQ must be a positive integer."))]
    pub num_q: Option<i32>,
}

/// A validated assembly request with every required field present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSelection {
    pub quiz_id: Option<i32>,
    pub title: String,
    pub category: String,
    pub count: u32,
}

impl TryFrom<CreateQuizRequest> for QuizSelection {
    type Error = AppError;

    fn try_from(request: CreateQuizRequest) -> Result<Self, Self::Error> {
        request.validate()?;

        match (request.title, request.category, request.num_q) {
            (Some(title), Some(category), Some(num_q)) => Ok(QuizSelection {
                quiz_id: request.quiz_id,
                title,
                category,
                count: u32::try_from(num_q).map_err(|_| {
                    AppError::ValidationError("numQ must be a positive integer.".to_string())
                })?,
            }),
            _ => Err(AppError::ValidationError(
                "Fields 'title', 'category', and 'numQ' are required.".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizLookupRequest {
    pub quiz_id: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionAnswer {
    pub question_id: i32,
    #[serde(deserialize_with = "text")]
    pub response: String,
}

/// Renders a JSON scalar as text; null becomes `None`.
fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        other => Some(value_to_text(other)),
    })
}

fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(value_to_text)
}

pub(crate) fn value_to_text(value: Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(_) | Value::Object(_) => String::new(),
    }
}
