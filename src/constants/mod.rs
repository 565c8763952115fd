pub mod quiz_prompt;

/// Minimum amount of extracted body text required to attempt a quiz.
/// A page below this threshold cannot seed meaningful questions.
pub const MIN_CONTENT_CHARS: usize = 200;

/// Paragraphs shorter than this are treated as chrome/metadata and skipped.
pub const MIN_PARAGRAPH_CHARS: usize = 20;

/// A paragraph must be at least this long to serve as the article summary.
pub const SUBSTANTIAL_PARAGRAPH_CHARS: usize = 100;

/// The summary is truncated to this many characters.
pub const SUMMARY_MAX_CHARS: usize = 500;

/// Only the first N section headings feed the prompt.
pub const MAX_SECTIONS: usize = 10;

/// Cap per entity bucket (people / organizations / locations).
pub const MAX_ENTITIES_PER_KIND: usize = 5;

/// Only the first N internal links are scanned for entities.
pub const MAX_ENTITY_LINKS: usize = 100;

/// Lower bound of the question range the prompt asks the model for.
pub const MIN_REQUESTED_QUESTIONS: usize = 5;

/// How many questions the prompt asks the model to aim for.
pub const REQUESTED_QUESTIONS: usize = 7;

/// A synthesis yielding fewer valid questions than this fails outright.
pub const MIN_VALID_QUESTIONS: usize = 3;

/// Valid questions beyond this are dropped from the end.
pub const MAX_QUESTIONS: usize = 10;

/// Related topics are deduplicated and capped at this count.
pub const MAX_RELATED_TOPICS: usize = 10;

/// Backoff before the single retry of a failed article fetch.
pub const FETCH_RETRY_BACKOFF_MS: u64 = 500;
