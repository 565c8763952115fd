pub mod quiz_handler;

pub use quiz_handler::{delete_quiz, generate_quiz, get_quiz, index, list_quizzes};
