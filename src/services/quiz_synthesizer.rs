use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;

use crate::constants::{MAX_QUESTIONS, MAX_RELATED_TOPICS, MIN_VALID_QUESTIONS};
use crate::errors::{AppError, AppResult};
use crate::models::domain::{ArticleDigest, Difficulty, QuizQuestion};
use crate::services::{model_service::LlmClient, prompt_builder::build_prompt};

/// Questions and related topics distilled from one model reply.
#[derive(Debug, Clone)]
pub struct SynthesizedQuiz {
    pub questions: Vec<QuizQuestion>,
    pub related_topics: Vec<String>,
}

/// Per-question screening verdict. Rejections carry the reason so a failed
/// synthesis can say what the model got wrong.
#[derive(Debug)]
enum QuestionOutcome {
    Valid(QuizQuestion),
    Rejected { reason: String },
}

/// Lenient top-level shape of the model reply. Individual questions stay
/// untyped here; they are screened one by one so a single malformed entry
/// does not sink the whole response.
#[derive(Debug, Deserialize)]
struct RawQuizReply {
    #[serde(default, alias = "quiz")]
    questions: Vec<Value>,
    #[serde(default)]
    related_topics: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    question: String,
    options: Vec<String>,
    answer: String,
    difficulty: String,
    explanation: String,
}

/// Runs one model invocation for the digest and validates the reply.
/// Retry policy belongs to the orchestrator; this calls the provider once.
pub async fn synthesize(llm: &dyn LlmClient, digest: &ArticleDigest) -> AppResult<SynthesizedQuiz> {
    let prompt = build_prompt(digest);
    let response = llm.complete(&prompt).await?;

    log::debug!(
        "received model response for '{}' ({} chars)",
        digest.title,
        response.len()
    );

    parse_quiz_response(&response)
}

/// Validates raw model text into a quiz, tolerating prose and code fences
/// around the JSON but never repairing broken JSON syntax.
pub fn parse_quiz_response(response: &str) -> AppResult<SynthesizedQuiz> {
    let json = extract_json_object(response).ok_or_else(|| {
        AppError::QuizGeneration("model response contains no JSON object".to_string())
    })?;

    let reply: RawQuizReply = serde_json::from_str(json)
        .map_err(|e| AppError::QuizGeneration(format!("model returned invalid JSON: {}", e)))?;

    let mut questions = Vec::new();
    let mut rejected = 0usize;
    for value in reply.questions {
        match screen_question(value) {
            QuestionOutcome::Valid(question) => questions.push(question),
            QuestionOutcome::Rejected { reason } => {
                rejected += 1;
                log::warn!("dropping invalid quiz question: {}", reason);
            }
        }
    }

    if questions.len() < MIN_VALID_QUESTIONS {
        return Err(AppError::QuizGeneration(format!(
            "only {} valid questions after filtering ({} rejected), need at least {}",
            questions.len(),
            rejected,
            MIN_VALID_QUESTIONS
        )));
    }
    questions.truncate(MAX_QUESTIONS);

    Ok(SynthesizedQuiz {
        questions,
        related_topics: collect_related_topics(reply.related_topics),
    })
}

/// Finds the first `{...}` substring that is well-formed JSON. Balanced
/// brace runs that fail to parse (braces in the surrounding prose) are
/// skipped and the scan resumes at the next `{`.
fn extract_json_object(text: &str) -> Option<&str> {
    let mut from = 0;
    while let Some(offset) = text[from..].find('{') {
        let start = from + offset;
        if let Some(candidate) = balanced_braces(&text[start..]) {
            if serde_json::from_str::<Value>(candidate).is_ok() {
                return Some(candidate);
            }
        }
        from = start + 1;
    }
    None
}

/// Returns the shortest balanced `{...}` prefix of `text`, tracking JSON
/// string and escape state so braces inside quoted text do not end the scan.
/// `text` must start with `{`.
fn balanced_braces(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&text[..=i]);
                }
            }
            '"' => in_string = true,
            _ => {}
        }
    }

    None
}

fn screen_question(value: Value) -> QuestionOutcome {
    let raw: RawQuestion = match serde_json::from_value(value) {
        Ok(raw) => raw,
        Err(e) => {
            return QuestionOutcome::Rejected {
                reason: format!("malformed question object: {}", e),
            }
        }
    };

    let question = raw.question.trim().to_string();
    if question.is_empty() {
        return QuestionOutcome::Rejected {
            reason: "empty question text".to_string(),
        };
    }

    let explanation = raw.explanation.trim().to_string();
    if explanation.is_empty() {
        return QuestionOutcome::Rejected {
            reason: format!("question '{}' has no explanation", question),
        };
    }

    let options: Vec<String> = raw.options.iter().map(|o| o.trim().to_string()).collect();
    if options.len() != 4 {
        return QuestionOutcome::Rejected {
            reason: format!(
                "question '{}' has {} options, expected 4",
                question,
                options.len()
            ),
        };
    }
    if options.iter().collect::<HashSet<_>>().len() != options.len() {
        return QuestionOutcome::Rejected {
            reason: format!("question '{}' has duplicate options", question),
        };
    }

    let answer = raw.answer.trim().to_string();
    if !options.contains(&answer) {
        return QuestionOutcome::Rejected {
            reason: format!("answer '{}' is not among the options", answer),
        };
    }

    let difficulty: Difficulty = match raw.difficulty.parse() {
        Ok(difficulty) => difficulty,
        Err(reason) => return QuestionOutcome::Rejected { reason },
    };

    QuestionOutcome::Valid(QuizQuestion {
        question,
        options,
        answer,
        difficulty,
        explanation,
    })
}

fn collect_related_topics(raw: Vec<Value>) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.iter()
        .filter_map(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.clone()))
        .take(MAX_RELATED_TOPICS)
        .collect()
}
