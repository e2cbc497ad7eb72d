//! Audio/Video domain modules.

pub mod probe;
pub mod segments;
pub mod thumbnails;
