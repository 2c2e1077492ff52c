//! Review orchestration: modes, prompts, the generator seam, the reviewer,
//! line diffs, markdown export and the end-to-end review workflows.

pub mod diff;
pub mod errors;
pub mod export;
pub mod generator;
pub mod modes;
pub mod prompt;
pub mod reviewer;
pub mod workflow;

pub use diff::{DiffLine, LineDiff, LineTag, line_diff};
pub use errors::{ReviewError, ReviewResult, WorkflowError};
pub use export::{export_file_name, render_markdown};
pub use generator::TextGenerator;
pub use modes::ReviewMode;
pub use reviewer::{Reviewer, strip_code_fence};
pub use workflow::{
    FileReviewOutcome, FileReviewRequest, RepoReviewOutcome, ReviewContext, Revision,
};
