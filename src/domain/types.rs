use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Classification {
    pub main_category: String,
    /// Fraction in `[0, 1]`.
    pub confidence: f64,
    pub is_confident: bool,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SuggestedResponse {
    pub suggested: String,
}

/// Success payload of `/process-email`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProcessedEmail {
    pub classification: Classification,
    pub response: SuggestedResponse,
}
