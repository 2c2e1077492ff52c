pub mod repo_request;
pub mod repo_route;
