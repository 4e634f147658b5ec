//! mockexam-core — Exam session engine.
//!
//! This crate samples a question set from a pool, tracks one answer per
//! question over a bounded session, decides when time has run out, and scores
//! the submitted session with a per-question review. Rendering and input
//! handling live in the CLI crate.

pub mod answers;
pub mod bank;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod pool;
pub mod report;
pub mod scoring;
pub mod session;
pub mod timer;

pub use error::{ExamError, ExamResult};
