//! Core batch machinery
//!
//! The generic paced worker pool and the directory jobs built on it.

pub mod batch;
pub mod directory;
