//! A [`Monitor`] that keeps every problem for later assertions.

use std::sync::{Mutex, MutexGuard, PoisonError};

use bindery_metadata::{Monitor, Problem};

/// Records errors and warnings reported during an inspection.
#[derive(Debug, Default)]
pub struct TestMonitor {
    errors: Mutex<Vec<Problem>>,
    warnings: Mutex<Vec<Problem>>,
}

impl TestMonitor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn errors(&self) -> Vec<Problem> {
        lock(&self.errors).clone()
    }

    #[must_use]
    pub fn warnings(&self) -> Vec<Problem> {
        lock(&self.warnings).clone()
    }

    /// # Panics
    ///
    /// Panics when the number of recorded errors differs from `expected`.
    pub fn assert_number_of_errors(&self, expected: usize) {
        let errors = lock(&self.errors);
        assert!(
            errors.len() == expected,
            "expected {expected} errors but {} were recorded: {}",
            errors.len(),
            render(&errors)
        );
    }

    /// # Panics
    ///
    /// Panics when the number of recorded warnings differs from `expected`.
    pub fn assert_number_of_warnings(&self, expected: usize) {
        let warnings = lock(&self.warnings);
        assert!(
            warnings.len() == expected,
            "expected {expected} warnings but {} were recorded: {}",
            warnings.len(),
            render(&warnings)
        );
    }

    /// # Panics
    ///
    /// Panics unless one recorded error contains every part.
    pub fn assert_matching_error_recorded(&self, parts: &[&str]) {
        let errors = lock(&self.errors);
        assert!(
            errors.iter().any(|problem| problem.matches_all(parts)),
            "no error matching {parts:?} was recorded: {}",
            render(&errors)
        );
    }

    /// # Panics
    ///
    /// Panics unless one recorded warning contains every part.
    pub fn assert_matching_warning_recorded(&self, parts: &[&str]) {
        let warnings = lock(&self.warnings);
        assert!(
            warnings.iter().any(|problem| problem.matches_all(parts)),
            "no warning matching {parts:?} was recorded: {}",
            render(&warnings)
        );
    }
}

impl Monitor for TestMonitor {
    fn on_error(&self, problem: &Problem) {
        lock(&self.errors).push(problem.clone());
    }

    fn on_warning(&self, problem: &Problem) {
        lock(&self.warnings).push(problem.clone());
    }
}

fn lock(problems: &Mutex<Vec<Problem>>) -> MutexGuard<'_, Vec<Problem>> {
    problems.lock().unwrap_or_else(PoisonError::into_inner)
}

fn render(problems: &[Problem]) -> String {
    if problems.is_empty() {
        return "none".to_string();
    }
    problems
        .iter()
        .map(|problem| problem.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
