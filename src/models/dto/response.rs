use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::Quiz;

/// Listing projection of a stored quiz. Derived on read, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizSummary {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub question_count: usize,
    pub created_at: DateTime<Utc>,
}

impl From<&Quiz> for QuizSummary {
    fn from(quiz: &Quiz) -> Self {
        QuizSummary {
            id: quiz.id,
            title: quiz.title.clone(),
            url: quiz.url.clone(),
            question_count: quiz.quiz.len(),
            created_at: quiz.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteQuizResponse {
    pub id: i64,
    pub deleted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}
