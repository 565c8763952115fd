use std::sync::Arc;
use std::time::Duration;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::MongoQuizRepository,
    services::{
        model_service::OpenAiClient, quiz_service::QuizService, scraper_service::HttpFetcher,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db, &config.quizzes_collection));
        quiz_repository.ensure_indexes().await?;

        let fetcher = Arc::new(HttpFetcher::new(Duration::from_secs(
            config.fetch_timeout_secs,
        ))?);
        let llm = Arc::new(OpenAiClient::new(&config));

        let quiz_service = Arc::new(QuizService::new(quiz_repository, fetcher, llm));

        Ok(Self {
            quiz_service,
            config: Arc::new(config),
        })
    }
}
