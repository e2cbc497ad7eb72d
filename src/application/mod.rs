//! Application layer - Services that use ports.

// Probe, split and thumbnail an upload
pub mod pipeline;
