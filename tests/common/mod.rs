use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use wikiquiz_server::{
    errors::{AppError, AppResult},
    models::{
        domain::{NewQuiz, Quiz},
        dto::QuizSummary,
    },
    repositories::{InsertOutcome, QuizRepository},
    services::{model_service::LlmClient, quiz_service::QuizService, scraper_service::Fetcher},
};

pub const ARTICLE_URL: &str = "https://en.wikipedia.org/wiki/Alan_Turing";

pub struct InMemoryQuizRepository {
    quizzes: RwLock<HashMap<i64, Quiz>>,
    next_id: AtomicI64,
}

impl InMemoryQuizRepository {
    pub fn new() -> Self {
        Self {
            quizzes: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Quiz>> {
        Ok(self.quizzes.read().await.get(&id).cloned())
    }

    async fn find_by_url(&self, url: &str) -> AppResult<Option<Quiz>> {
        Ok(self
            .quizzes
            .read()
            .await
            .values()
            .find(|q| q.url == url)
            .cloned())
    }

    async fn insert(&self, new_quiz: NewQuiz) -> AppResult<InsertOutcome> {
        let mut quizzes = self.quizzes.write().await;
        if quizzes.values().any(|q| q.url == new_quiz.url) {
            return Ok(InsertOutcome::DuplicateUrl);
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let quiz = new_quiz.into_quiz(id, Utc::now());
        quizzes.insert(id, quiz.clone());
        Ok(InsertOutcome::Inserted(quiz))
    }

    async fn list_all(&self) -> AppResult<Vec<QuizSummary>> {
        let quizzes = self.quizzes.read().await;
        let mut all: Vec<&Quiz> = quizzes.values().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all.into_iter().map(QuizSummary::from).collect())
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.quizzes.write().await.remove(&id).is_some())
    }
}

/// Serves a fixed HTML body and counts how often it is asked to fetch.
pub struct CountingFetcher {
    html: String,
    calls: AtomicUsize,
}

impl CountingFetcher {
    pub fn new(html: String) -> Self {
        Self {
            html,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for CountingFetcher {
    async fn fetch(&self, _url: &str) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.html.clone())
    }
}

/// Replies with a fixed completion and counts invocations.
pub struct CountingLlm {
    response: String,
    calls: AtomicUsize,
}

impl CountingLlm {
    pub fn new(response: String) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClient for CountingLlm {
    async fn complete(&self, _prompt: &str) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

/// A fetcher that always fails, for exercising retry and error surfacing.
pub struct FailingFetcher {
    calls: AtomicUsize,
}

impl FailingFetcher {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for FailingFetcher {
    async fn fetch(&self, url: &str) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AppError::Fetch(format!("'{}' unreachable", url)))
    }
}

pub struct TestHarness {
    pub service: Arc<QuizService>,
    pub fetcher: Arc<CountingFetcher>,
    pub llm: Arc<CountingLlm>,
}

pub fn harness(html: String, llm_response: String) -> TestHarness {
    let fetcher = Arc::new(CountingFetcher::new(html));
    let llm = Arc::new(CountingLlm::new(llm_response));
    let service = Arc::new(QuizService::new(
        Arc::new(InMemoryQuizRepository::new()),
        fetcher.clone(),
        llm.clone(),
    ));
    TestHarness {
        service,
        fetcher,
        llm,
    }
}

/// A trimmed-down but structurally faithful Wikipedia article page.
pub fn article_html() -> String {
    r##"<!DOCTYPE html>
<html>
<head><title>Alan Turing - Wikipedia</title></head>
<body>
<h1 id="firstHeading" class="firstHeading">Alan Turing</h1>
<div id="mw-content-text">
  <div class="mw-parser-output">
    <p>Alan Mathison Turing was an English mathematician, computer scientist,
    logician, cryptanalyst, philosopher and theoretical biologist.[1][2] He was
    highly influential in the development of theoretical computer science,
    providing a formalisation of the concepts of algorithm and computation with
    the <a href="/wiki/Turing_machine">Turing machine</a>.[3]</p>
    <p>Born in Maida Vale, London, Turing was educated at
    <a href="/wiki/Princeton_University">Princeton University</a> in the
    <a href="/wiki/United_States">United States</a>, where he studied under
    <a href="/wiki/Alonzo_Church">Alonzo Church</a>.</p>
    <h2><span class="mw-headline">Early life and education</span></h2>
    <p>Turing was born in Maida Vale while his father was on leave from his
    position with the Indian Civil Service, a period documented in archives.</p>
    <h2><span class="mw-headline">Career and research</span></h2>
    <h2><span class="mw-headline">References</span></h2>
  </div>
</div>
</body>
</html>"##
        .to_string()
}

/// A near-empty stub page that fails content extraction.
pub fn stub_page_html() -> String {
    r#"<html>
<head><title>Stub - Wikipedia</title></head>
<body>
<h1 class="firstHeading">Stub</h1>
<div id="mw-content-text"><p>This article is a stub.</p></div>
</body>
</html>"#
        .to_string()
}

/// A well-formed model reply with five valid questions.
pub fn valid_llm_response() -> String {
    serde_json::json!({
        "questions": [
            {
                "question": "Where was Alan Turing born?",
                "options": ["Maida Vale, London", "Cambridge", "Manchester", "Oxford"],
                "answer": "Maida Vale, London",
                "difficulty": "easy",
                "explanation": "Turing was born in Maida Vale, London."
            },
            {
                "question": "Under whom did Turing study at Princeton?",
                "options": ["Alonzo Church", "Kurt Gödel", "John von Neumann", "David Hilbert"],
                "answer": "Alonzo Church",
                "difficulty": "medium",
                "explanation": "His dissertation was supervised by Alonzo Church."
            },
            {
                "question": "Where did Turing work during the Second World War?",
                "options": ["Bletchley Park", "Los Alamos", "Cavendish Laboratory", "Dollis Hill"],
                "answer": "Bletchley Park",
                "difficulty": "easy",
                "explanation": "He worked at the Government Code and Cypher School."
            },
            {
                "question": "Which concept did Turing formalise?",
                "options": ["Computation", "Relativity", "Evolution", "Thermodynamics"],
                "answer": "Computation",
                "difficulty": "medium",
                "explanation": "The Turing machine formalised algorithm and computation."
            },
            {
                "question": "Which machine's ciphers did Turing help break?",
                "options": ["Enigma", "Lorenz only", "Purple", "Sigaba"],
                "answer": "Enigma",
                "difficulty": "hard",
                "explanation": "He devised techniques for breaking German Enigma ciphers."
            }
        ],
        "related_topics": ["Enigma machine", "Turing machine", "Bletchley Park", "Cryptanalysis"]
    })
    .to_string()
}
