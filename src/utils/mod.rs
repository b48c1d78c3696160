pub mod datetime;
pub mod file_magic;
pub mod jwt;
pub mod names;
pub mod parameter_error_handler;
pub mod validate;

pub use datetime::current_timestamp;
pub use file_magic::validate_magic_bytes;
pub use names::split_full_name;
pub use parameter_error_handler::{json_error_handler, path_error_handler, query_error_handler};
pub use validate::{is_allowed_extension, validate_ora_submission_id};
