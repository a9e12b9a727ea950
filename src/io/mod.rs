//! Frame adapters for external formats: CSV for flat frames, JSON for
//! hierarchical ones. Path-based readers and writers handle `.gz`
//! transparently by file extension.

// modules
pub mod csv;
pub mod json;
