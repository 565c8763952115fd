pub mod article;
pub mod quiz;
pub mod quiz_question;

pub use article::{ArticleDigest, KeyEntities};
pub use quiz::{NewQuiz, Quiz};
pub use quiz_question::{Difficulty, QuizQuestion};
