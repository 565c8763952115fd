pub mod model_service;
pub mod prompt_builder;
pub mod quiz_service;
pub mod quiz_synthesizer;
pub mod scraper_service;
pub mod url_validator;
