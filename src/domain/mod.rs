//! Domain layer - Pure business logic.

// Probing, segmenting and thumbnailing on top of the media tool port
pub mod av;

// Job definitions and output layout
pub mod jobs;
