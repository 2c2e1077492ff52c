pub mod meta_response;
pub mod meta_route;
