//! HTTP inbound adapter.
//!
//! `POST /upload` accepts a multipart video and answers once it has been
//! split and thumbnailed; everything else is served from the public directory.

mod routes;
pub mod upload;

pub use routes::{router, upload_video, SUCCESS_MESSAGE};
