pub mod common;
pub mod courses;
pub mod turnitin;
pub mod users;

pub use common::{ApiResponse, AppStartTime, ErrorCode, FieldErrors};
