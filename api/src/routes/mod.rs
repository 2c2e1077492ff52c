pub mod file_view;
pub mod history;
pub mod local;
pub mod meta;
pub mod repo;
pub mod review;
