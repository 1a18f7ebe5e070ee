use async_graphql::{InputObject, InputValueError, InputValueResult, Scalar, ScalarType, Value};

use crate::models::dto::request::{value_to_text, SubmissionAnswer};

/// A submitted answer. Accepts any scalar and keeps its text form, so `4`
/// and `"4"` grade alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerText(pub String);

#[Scalar]
impl ScalarType for AnswerText {
    fn parse(value: Value) -> InputValueResult<Self> {
        let json = value.into_json().map_err(InputValueError::custom)?;
        Ok(AnswerText(value_to_text(json)))
    }

    fn to_value(&self) -> Value {
        Value::String(self.0.clone())
    }
}

#[derive(Debug, Clone, InputObject)]
#[graphql(name = "SubmissionAnswer")]
pub struct SubmissionAnswerInput {
    pub question_id: i32,
    pub response: AnswerText,
}

impl From<SubmissionAnswerInput> for SubmissionAnswer {
    fn from(input: SubmissionAnswerInput) -> Self {
        SubmissionAnswer {
            question_id: input.question_id,
            response: input.response.0,
        }
    }
}
