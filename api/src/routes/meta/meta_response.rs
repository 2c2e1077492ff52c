use code_reviewer::ReviewMode;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Whether `/local/*` routes can grant directories.
    pub local_access: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeView {
    pub value: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub supports_repository: bool,
}

impl From<ReviewMode> for ModeView {
    fn from(mode: ReviewMode) -> Self {
        Self {
            value: mode.value(),
            label: mode.label(),
            description: mode.description(),
            supports_repository: mode.supports_repository(),
        }
    }
}
