use repo_intake::CodeFile;
use serde::Serialize;

/// Listing entry for a discovered file; content is requested separately.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileView {
    pub path: String,
    pub language: &'static str,
    pub language_label: &'static str,
    /// `"local"` or `"remote"`.
    pub source: &'static str,
}

impl From<&CodeFile> for FileView {
    fn from(file: &CodeFile) -> Self {
        Self {
            path: file.path.clone(),
            language: file.language.value,
            language_label: file.language.label,
            source: if file.is_local() { "local" } else { "remote" },
        }
    }
}

pub fn views(files: &[CodeFile]) -> Vec<FileView> {
    files.iter().map(FileView::from).collect()
}
