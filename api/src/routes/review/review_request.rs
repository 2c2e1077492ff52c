use code_reviewer::{ReviewError, ReviewMode};
use serde::Deserialize;

/// Body of `POST /review/file`.
#[derive(Debug, Deserialize)]
pub struct ReviewFileRequest {
    pub code: String,
    /// Language value, e.g. `"python"`.
    pub language: String,
    /// Set when the code comes from a selected file; pasted code is not recorded.
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub custom_instructions: String,
    #[serde(default)]
    pub mode: Option<String>,
}

/// Body of `POST /review/repo`.
#[derive(Debug, Deserialize)]
pub struct ReviewRepoRequest {
    pub url: String,
    #[serde(default)]
    pub custom_instructions: String,
    #[serde(default)]
    pub mode: Option<String>,
}

/// Body of `POST /review/revise`.
#[derive(Debug, Deserialize)]
pub struct ReviseRequest {
    pub code: String,
    /// Language value or display label.
    pub language: String,
    pub feedback: String,
}

/// Missing or blank means the default mode.
pub fn parse_mode(raw: Option<&str>) -> Result<ReviewMode, ReviewError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s.parse(),
        None => Ok(ReviewMode::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_defaults_and_parses() {
        assert_eq!(parse_mode(None).unwrap(), ReviewMode::Comprehensive);
        assert_eq!(parse_mode(Some("  ")).unwrap(), ReviewMode::Comprehensive);
        assert_eq!(parse_mode(Some("best_practices")).unwrap(), ReviewMode::BestPractices);
        assert!(matches!(
            parse_mode(Some("vibes")),
            Err(ReviewError::UnknownMode(m)) if m == "vibes"
        ));
    }
}
