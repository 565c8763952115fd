use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateQuizRequest {
    #[validate(url(message = "must be an absolute URL"))]
    #[validate(length(min = 1, max = 500))]
    pub url: String,
}
