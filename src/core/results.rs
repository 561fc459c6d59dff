//! Per-script outcomes and batch aggregation

use crate::error::exit_codes;
use serde::Serialize;
use std::fmt;

/// Result of one script run attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    /// Script name as requested
    pub script_name: String,
    /// Whether the script accepted its arguments
    pub success: bool,
    /// Exit code the script would have produced
    pub exit_code: i32,
    /// Error message for failed runs
    pub error_message: Option<String>,
}

impl ExecutionResult {
    /// Create a successful result
    pub fn succeeded(script_name: impl Into<String>) -> Self {
        Self {
            script_name: script_name.into(),
            success: true,
            exit_code: exit_codes::SUCCESS,
            error_message: None,
        }
    }

    /// Create a failed result
    pub fn failed(
        script_name: impl Into<String>,
        exit_code: i32,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            script_name: script_name.into(),
            success: false,
            exit_code,
            error_message: Some(error_message.into()),
        }
    }
}

/// Ordered results of one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchResults {
    results: Vec<ExecutionResult>,
}

impl BatchResults {
    /// Create an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result
    pub fn push(&mut self, result: ExecutionResult) {
        self.results.push(result);
    }

    /// Results in execution order
    pub fn results(&self) -> &[ExecutionResult] {
        &self.results
    }

    /// Number of recorded results
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Number of successful scripts
    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    /// Number of failed scripts
    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| !r.success).count()
    }

    /// Whether every script succeeded (vacuously true for an empty batch)
    pub fn all_success(&self) -> bool {
        self.results.iter().all(|r| r.success)
    }

    /// Failed results in execution order
    pub fn failures(&self) -> impl Iterator<Item = &ExecutionResult> {
        self.results.iter().filter(|r| !r.success)
    }

    /// Process exit code for the whole batch
    pub fn exit_code(&self) -> i32 {
        if self.all_success() {
            exit_codes::SUCCESS
        } else {
            exit_codes::ERROR
        }
    }

    /// Human-readable summary
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Executed {} script(s):", self.total()),
            format!("  ✓ Success: {}", self.success_count()),
        ];

        let failed = self.failed_count();
        if failed > 0 {
            lines.push(format!("  ✗ Failed: {failed}"));
            for result in self.failures() {
                lines.push(format!(
                    "    - {}: {}",
                    result.script_name,
                    result.error_message.as_deref().unwrap_or("unknown error")
                ));
            }
        }

        lines.join("\n")
    }
}

impl FromIterator<ExecutionResult> for BatchResults {
    fn from_iter<I: IntoIterator<Item = ExecutionResult>>(iter: I) -> Self {
        Self {
            results: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for BatchResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}
