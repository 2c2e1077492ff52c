//! Local directory intake: grants, traversal and on-demand reads.

pub mod picker;
pub mod scanner;
pub mod walker;

pub use picker::{DirectoryPicker, PickOutcome, WorkspacePicker, WorkspaceRoot};
pub use scanner::{DEFAULT_EXCLUDED_DIRS, ScanConfig, read_content, scan, scan_directory};
pub use walker::{DirectoryHandle, Entry, FsDirectory};
