use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::{
    constants::FETCH_RETRY_BACKOFF_MS,
    errors::{AppError, AppResult},
    models::{
        domain::{ArticleDigest, NewQuiz, Quiz},
        dto::QuizSummary,
    },
    repositories::{InsertOutcome, QuizRepository},
    services::{
        model_service::LlmClient,
        quiz_synthesizer::{synthesize, SynthesizedQuiz},
        scraper_service::{extract_digest, Fetcher},
        url_validator::validate_article_url,
    },
};

/// Serializes pipeline runs per normalized URL so concurrent requests for
/// the same article trigger at most one scrape-and-generate cycle.
#[derive(Default)]
struct UrlLocks {
    inner: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl UrlLocks {
    async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().await;
            map.entry(key.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    async fn release(&self, key: &str) {
        let mut map = self.inner.lock().await;
        if let Some(lock) = map.get(key) {
            if Arc::strong_count(lock) == 1 {
                map.remove(key);
            }
        }
    }
}

/// The pipeline orchestrator and the only entry point the HTTP layer calls.
///
/// Sequences validate → cache-check → fetch → extract → synthesize →
/// persist. Nothing is written to the store until synthesis fully succeeds,
/// so a failed generation leaves no record behind.
pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
    fetcher: Arc<dyn Fetcher>,
    llm: Arc<dyn LlmClient>,
    url_locks: UrlLocks,
}

impl QuizService {
    pub fn new(
        repository: Arc<dyn QuizRepository>,
        fetcher: Arc<dyn Fetcher>,
        llm: Arc<dyn LlmClient>,
    ) -> Self {
        Self {
            repository,
            fetcher,
            llm,
            url_locks: UrlLocks::default(),
        }
    }

    pub async fn generate_quiz(&self, raw_url: &str) -> AppResult<Quiz> {
        let url = validate_article_url(raw_url)?;

        // Fast path: cached quizzes skip the lock entirely.
        if let Some(quiz) = self.repository.find_by_url(&url).await? {
            log::info!("cache hit for '{}' (quiz {})", url, quiz.id);
            return Ok(quiz);
        }

        let guard = self.url_locks.acquire(&url).await;
        let result = self.generate_locked(&url).await;
        drop(guard);
        self.url_locks.release(&url).await;

        result
    }

    /// Runs extraction and synthesis while holding the per-URL lock.
    async fn generate_locked(&self, url: &str) -> AppResult<Quiz> {
        // Re-check under the lock: a concurrent request may have finished
        // generating while this one waited.
        if let Some(quiz) = self.repository.find_by_url(url).await? {
            log::info!("cache hit for '{}' after waiting on lock", url);
            return Ok(quiz);
        }

        log::info!("generating quiz for '{}'", url);

        let html = self.fetch_with_retry(url).await?;
        let digest = extract_digest(&html)?;
        log::info!(
            "extracted digest for '{}': {} sections, summary {} chars",
            digest.title,
            digest.sections.len(),
            digest.summary.len()
        );

        let synthesized = self.synthesize_with_retry(&digest).await?;
        log::info!(
            "synthesized {} questions for '{}'",
            synthesized.questions.len(),
            digest.title
        );

        let new_quiz = NewQuiz {
            url: url.to_string(),
            title: digest.title,
            summary: digest.summary,
            key_entities: digest.entities,
            sections: digest.sections,
            quiz: synthesized.questions,
            related_topics: synthesized.related_topics,
        };

        match self.repository.insert(new_quiz).await? {
            InsertOutcome::Inserted(quiz) => {
                log::info!("stored quiz {} for '{}'", quiz.id, url);
                Ok(quiz)
            }
            // Unique-URL constraint backstop: someone else just created it.
            InsertOutcome::DuplicateUrl => {
                log::info!("lost insert race for '{}', returning stored quiz", url);
                self.repository.find_by_url(url).await?.ok_or_else(|| {
                    AppError::Database(format!(
                        "quiz for '{}' reported as duplicate but not found",
                        url
                    ))
                })
            }
        }
    }

    /// Transient network blips are common; a failed fetch is retried once
    /// with a fixed backoff before surfacing.
    async fn fetch_with_retry(&self, url: &str) -> AppResult<String> {
        match self.fetcher.fetch(url).await {
            Ok(html) => Ok(html),
            Err(AppError::Fetch(reason)) => {
                log::warn!("fetch of '{}' failed ({}), retrying once", url, reason);
                tokio::time::sleep(Duration::from_millis(FETCH_RETRY_BACKOFF_MS)).await;
                self.fetcher.fetch(url).await
            }
            Err(other) => Err(other),
        }
    }

    /// An unusable model reply is retried once with a fresh completion call
    /// before the generation fails for good.
    async fn synthesize_with_retry(&self, digest: &ArticleDigest) -> AppResult<SynthesizedQuiz> {
        match synthesize(self.llm.as_ref(), digest).await {
            Ok(quiz) => Ok(quiz),
            Err(AppError::QuizGeneration(reason)) => {
                log::warn!(
                    "synthesis for '{}' failed ({}), retrying once",
                    digest.title,
                    reason
                );
                synthesize(self.llm.as_ref(), digest).await
            }
            Err(other) => Err(other),
        }
    }

    pub async fn get_quiz(&self, id: i64) -> AppResult<Quiz> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("quiz with id '{}' not found", id)))
    }

    pub async fn list_quizzes(&self) -> AppResult<Vec<QuizSummary>> {
        self.repository.list_all().await
    }

    pub async fn delete_quiz(&self, id: i64) -> AppResult<bool> {
        let deleted = self.repository.delete(id).await?;
        if deleted {
            log::info!("deleted quiz {}", id);
        }
        Ok(deleted)
    }
}
