pub mod local_request;
pub mod local_route;
