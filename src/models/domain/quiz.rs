use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::article::KeyEntities;
use crate::models::domain::quiz_question::QuizQuestion;

/// A fully generated quiz as stored and returned by the API.
///
/// Created exactly once per normalized article URL, never mutated after
/// insertion, destroyed only by explicit deletion.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: i64, // assigned by the store, immutable
    pub url: String, // normalized, unique key
    pub title: String,
    pub summary: String,
    pub key_entities: KeyEntities,
    pub sections: Vec<String>,
    pub quiz: Vec<QuizQuestion>,
    pub related_topics: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// A quiz ready to persist, before the store has assigned id and timestamp.
#[derive(Clone, Debug)]
pub struct NewQuiz {
    pub url: String,
    pub title: String,
    pub summary: String,
    pub key_entities: KeyEntities,
    pub sections: Vec<String>,
    pub quiz: Vec<QuizQuestion>,
    pub related_topics: Vec<String>,
}

impl NewQuiz {
    pub fn into_quiz(self, id: i64, created_at: DateTime<Utc>) -> Quiz {
        Quiz {
            id,
            url: self.url,
            title: self.title,
            summary: self.summary,
            key_entities: self.key_entities,
            sections: self.sections,
            quiz: self.quiz,
            related_topics: self.related_topics,
            created_at,
        }
    }
}
