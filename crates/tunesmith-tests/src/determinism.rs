//! Determinism verification for prompt generation.
//!
//! Tunesmith guarantees that the same request and seed produce the same
//! prompt. These helpers run a generation function several times and compare
//! BLAKE3 hashes of the outputs, reporting the first differing line on a
//! mismatch.

use std::fmt;

/// Result of a determinism verification.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether all runs produced identical output.
    pub is_deterministic: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// BLAKE3 hash of the first run's output.
    pub hash: String,
    /// If non-deterministic, the first difference found.
    pub diff_info: Option<DiffInfo>,
}

/// The first line that differs between the reference run and another run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffInfo {
    /// Which run (0-indexed) produced the differing output.
    pub run_index: usize,
    /// 1-based line number of the difference.
    pub line: usize,
    pub expected: String,
    pub actual: String,
}

impl fmt::Display for DiffInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Difference at line {} (run {}):\n  expected: {:?}\n  actual:   {:?}",
            self.line, self.run_index, self.expected, self.actual
        )
    }
}

impl DeterminismResult {
    /// Panic with a detailed message if not deterministic.
    pub fn assert_deterministic(&self) {
        if let Some(diff) = &self.diff_info {
            panic!(
                "Non-deterministic output detected!\nRuns: {}\nHash: {}\n{}",
                self.runs, self.hash, diff
            );
        }
    }
}

/// BLAKE3 hex digest of `data`.
pub fn compute_hash(data: impl AsRef<[u8]>) -> String {
    blake3::hash(data.as_ref()).to_hex().to_string()
}

/// Runs `generate_fn` `runs` times and verifies every output hashes the same.
///
/// # Panics
///
/// Panics if `runs < 2`.
pub fn verify_determinism<F, O>(generate_fn: F, runs: usize) -> DeterminismResult
where
    F: Fn() -> O,
    O: AsRef<str>,
{
    assert!(runs >= 2, "Must run at least 2 times to verify determinism");

    let reference = generate_fn();
    let reference = reference.as_ref();
    let reference_hash = compute_hash(reference);

    for run_index in 1..runs {
        let output = generate_fn();
        let output = output.as_ref();
        if compute_hash(output) != reference_hash {
            return DeterminismResult {
                is_deterministic: false,
                runs,
                hash: reference_hash,
                diff_info: Some(first_difference(reference, output, run_index)),
            };
        }
    }

    DeterminismResult {
        is_deterministic: true,
        runs,
        hash: reference_hash,
        diff_info: None,
    }
}

/// Panics unless `generate_fn` is deterministic over `runs` runs; returns the
/// output hash.
pub fn assert_deterministic<F, O>(generate_fn: F, runs: usize) -> String
where
    F: Fn() -> O,
    O: AsRef<str>,
{
    let result = verify_determinism(generate_fn, runs);
    result.assert_deterministic();
    result.hash
}

fn first_difference(expected: &str, actual: &str, run_index: usize) -> DiffInfo {
    let mut expected_lines = expected.lines();
    let mut actual_lines = actual.lines();
    let mut line = 1;
    loop {
        match (expected_lines.next(), actual_lines.next()) {
            (Some(e), Some(a)) if e == a => line += 1,
            (e, a) => {
                return DiffInfo {
                    run_index,
                    line,
                    expected: e.unwrap_or_default().to_string(),
                    actual: a.unwrap_or_default().to_string(),
                }
            }
        }
    }
}
