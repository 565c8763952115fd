use std::fmt::Write;

use once_cell::sync::Lazy;
use schemars::{schema_for, JsonSchema};
use serde::Deserialize;

use crate::constants::quiz_prompt::{
    QUIZ_PROMPT_CLOSING, QUIZ_PROMPT_FORMAT, QUIZ_PROMPT_ROLE, QUIZ_PROMPT_RULES,
};
use crate::constants::{MAX_QUESTIONS, MIN_REQUESTED_QUESTIONS, REQUESTED_QUESTIONS};
use crate::models::domain::{ArticleDigest, QuizQuestion};

/// Shape the model is asked to reply with. Only used to derive the JSON
/// Schema embedded in the prompt; the synthesizer parses replies leniently.
#[derive(Debug, Deserialize, JsonSchema)]
#[allow(dead_code)]
struct QuizReply {
    questions: Vec<QuizQuestion>,
    related_topics: Vec<String>,
}

static REPLY_SCHEMA_JSON: Lazy<String> = Lazy::new(|| {
    serde_json::to_string_pretty(&schema_for!(QuizReply)).unwrap_or_default()
});

/// Serializes a digest into the quiz-generation prompt.
///
/// Pure and deterministic: the same digest always yields byte-identical
/// prompt text (entity sets iterate in sorted order, sections in document
/// order), which keeps the LLM boundary testable.
pub fn build_prompt(digest: &ArticleDigest) -> String {
    let mut prompt = String::new();

    // Infallible: writing to a String cannot fail.
    let _ = writeln!(prompt, "{}\n", QUIZ_PROMPT_ROLE);
    let _ = writeln!(prompt, "Article Title: {}\n", digest.title);
    let _ = writeln!(prompt, "Article Summary:\n{}\n", digest.summary);

    if !digest.sections.is_empty() {
        let _ = writeln!(prompt, "Article Sections:");
        for (i, section) in digest.sections.iter().enumerate() {
            let _ = writeln!(prompt, "{}. {}", i + 1, section);
        }
        let _ = writeln!(prompt);
    }

    if !digest.entities.is_empty() {
        let _ = writeln!(prompt, "Key Entities:");
        write_entity_line(&mut prompt, "People", digest.entities.people.iter());
        write_entity_line(
            &mut prompt,
            "Organizations",
            digest.entities.organizations.iter(),
        );
        write_entity_line(&mut prompt, "Locations", digest.entities.locations.iter());
        let _ = writeln!(prompt);
    }

    let _ = writeln!(
        prompt,
        "Create between {} and {} multiple-choice questions (aim for {}).\n",
        MIN_REQUESTED_QUESTIONS, MAX_QUESTIONS, REQUESTED_QUESTIONS
    );
    let _ = writeln!(prompt, "{}\n", QUIZ_PROMPT_RULES);
    let _ = writeln!(prompt, "{}\n", QUIZ_PROMPT_FORMAT);
    let _ = writeln!(
        prompt,
        "Your reply must validate against this JSON Schema:\n{}\n",
        *REPLY_SCHEMA_JSON
    );
    let _ = write!(prompt, "{}", QUIZ_PROMPT_CLOSING);

    prompt
}

fn write_entity_line<'a>(
    prompt: &mut String,
    label: &str,
    entities: impl Iterator<Item = &'a String>,
) {
    let joined = entities.map(String::as_str).collect::<Vec<_>>().join(", ");
    if !joined.is_empty() {
        let _ = writeln!(prompt, "- {}: {}", label, joined);
    }
}
