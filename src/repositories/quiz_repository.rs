use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};
use serde::{Deserialize, Serialize};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::{
        domain::{NewQuiz, Quiz},
        dto::QuizSummary,
    },
};

/// Result of attempting to persist a new quiz.
///
/// `DuplicateUrl` means another request won the insert race for the same
/// normalized URL; callers should re-fetch the stored quiz instead of
/// treating this as a failure.
#[derive(Debug)]
pub enum InsertOutcome {
    Inserted(Quiz),
    DuplicateUrl,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Quiz>>;
    async fn find_by_url(&self, url: &str) -> AppResult<Option<Quiz>>;
    async fn insert(&self, quiz: NewQuiz) -> AppResult<InsertOutcome>;
    async fn list_all(&self) -> AppResult<Vec<QuizSummary>>;
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

#[derive(Debug, Deserialize, Serialize)]
struct CounterDoc {
    #[serde(rename = "_id")]
    id: String,
    seq: i64,
}

const QUIZ_ID_COUNTER: &str = "quiz_id";

pub struct MongoQuizRepository {
    collection: Collection<Quiz>,
    counters: Collection<CounterDoc>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        let counters = db.get_collection("counters");
        Self {
            collection,
            counters,
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quizzes collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();
        self.collection.create_index(id_index).await?;

        // The normalized URL is the natural key. The unique index backs the
        // dedup gate: a duplicate-key write means someone else just stored
        // a quiz for the same article.
        let url_index = IndexModel::builder()
            .keys(doc! { "url": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("url_unique".to_string())
                    .build(),
            )
            .build();
        self.collection.create_index(url_index).await?;

        log::info!("Successfully created indexes for quizzes collection");
        Ok(())
    }

    async fn next_id(&self) -> AppResult<i64> {
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let counter = self
            .counters
            .find_one_and_update(
                doc! { "_id": QUIZ_ID_COUNTER },
                doc! { "$inc": { "seq": 1i64 } },
            )
            .with_options(options)
            .await?
            .ok_or_else(|| AppError::Database("quiz id counter unavailable".to_string()))?;

        Ok(counter.seq)
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == 11000
    )
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Quiz>> {
        let quiz = self.collection.find_one(doc! { "id": id }).await?;
        Ok(quiz)
    }

    async fn find_by_url(&self, url: &str) -> AppResult<Option<Quiz>> {
        let quiz = self.collection.find_one(doc! { "url": url }).await?;
        Ok(quiz)
    }

    async fn insert(&self, new_quiz: NewQuiz) -> AppResult<InsertOutcome> {
        let id = self.next_id().await?;
        let quiz = new_quiz.into_quiz(id, Utc::now());

        match self.collection.insert_one(&quiz).await {
            Ok(_) => Ok(InsertOutcome::Inserted(quiz)),
            Err(err) if is_duplicate_key(&err) => Ok(InsertOutcome::DuplicateUrl),
            Err(err) => Err(err.into()),
        }
    }

    async fn list_all(&self) -> AppResult<Vec<QuizSummary>> {
        let cursor = self.collection.find(doc! {}).await?;
        let mut quizzes: Vec<Quiz> = cursor.try_collect().await?;

        quizzes.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(quizzes.iter().map(QuizSummary::from).collect())
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
