use serde::Deserialize;

/// Body of `POST /local/scan`.
///
/// `directory` is relative to `LOCAL_WORKSPACE_ROOT`. Leaving it out is the
/// same as dismissing the directory picker: the scan returns no files.
#[derive(Debug, Default, Deserialize)]
pub struct ScanRequest {
    #[serde(default)]
    pub directory: Option<String>,
}

/// Body of `POST /local/file`: a file path as returned by a scan of `directory`.
#[derive(Debug, Deserialize)]
pub struct LocalFileRequest {
    pub directory: String,
    pub path: String,
}
