pub mod entities;
pub mod payloads;
pub mod requests;
pub mod responses;
