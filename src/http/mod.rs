pub mod request;
pub mod response;

pub use request::{Body, Method, Request, RouteContext};
pub use response::Response;
