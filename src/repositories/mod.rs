pub mod quiz_repository;

pub use quiz_repository::{InsertOutcome, MongoQuizRepository, QuizRepository};
