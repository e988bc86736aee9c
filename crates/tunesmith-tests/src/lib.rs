//! Tunesmith End-to-End Test Infrastructure
//!
//! Integration tests for the generation pipeline and the LLM orchestrator:
//!
//! - **Determinism**: same request and seed, same prompt
//! - **Properties**: tag budget, length bound, truncation idempotence,
//!   multi-genre coverage and fallback completeness over generated inputs
//! - **Scenarios**: genre resolution, truncation and dedup acceptance cases
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p tunesmith-tests
//! ```
//!
//! All LLM traffic goes through the in-memory scripted client; no test
//! touches the network.

pub mod determinism;
pub mod fixtures;

pub use determinism::{assert_deterministic, compute_hash, verify_determinism, DeterminismResult, DiffInfo};
