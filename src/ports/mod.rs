//! Ports - Trait definitions the application depends on.

pub mod media;
