//! Problem reporting for a single inspection pass.
//!
//! A [`ProblemReporter`] is created per class being inspected. Every error and
//! warning it records is forwarded to a [`Monitor`], optionally logged through
//! `tracing`, and finally frozen into a [`Problems`] list on the metadata.

use std::fmt;

use bindery_core::MethodSignature;
use serde::Serialize;

use crate::error::ConfigurationError;

// ---------------------------------------------------------------------------
// Severity / ProblemKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What part of the class a problem is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemKind {
    /// Not public, abstract, or missing a usable no-arg constructor.
    ClassShape,
    /// Wrong arity, visibility or staticness.
    MethodShape,
    /// Empty, duplicate, ambiguous or misplaced property keys.
    Annotation,
    /// The class has no configuration surface at all.
    NoAttributes,
    /// Non-blocking advice.
    Advisory,
}

// ---------------------------------------------------------------------------
// Problem
// ---------------------------------------------------------------------------

/// One diagnostic record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Problem {
    pub severity: Severity,
    pub kind: ProblemKind,
    pub message: String,
    /// The class being inspected.
    pub class: String,
    /// The method the problem was found on, if any.
    pub method: Option<MethodSignature>,
}

impl Problem {
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }

    /// Whether the message contains every one of `parts`.
    #[must_use]
    pub fn matches_all(&self, parts: &[&str]) -> bool {
        parts.iter().all(|part| self.message.contains(part))
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

// ---------------------------------------------------------------------------
// Monitor
// ---------------------------------------------------------------------------

/// Receives problems as they are recorded.
pub trait Monitor: Send + Sync {
    fn on_error(&self, problem: &Problem);
    fn on_warning(&self, problem: &Problem);
}

/// A monitor that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMonitor;

impl Monitor for NullMonitor {
    fn on_error(&self, _problem: &Problem) {}
    fn on_warning(&self, _problem: &Problem) {}
}

// ---------------------------------------------------------------------------
// ProblemReporter
// ---------------------------------------------------------------------------

/// Accumulates problems while one class is inspected.
pub struct ProblemReporter<'a> {
    class: String,
    problems: Vec<Problem>,
    monitor: &'a dyn Monitor,
    log_problems: bool,
}

impl<'a> ProblemReporter<'a> {
    pub fn new(class: impl Into<String>, monitor: &'a dyn Monitor) -> Self {
        Self {
            class: class.into(),
            problems: Vec::new(),
            monitor,
            log_problems: true,
        }
    }

    /// Enable or disable the tracing event emitted per problem.
    #[must_use]
    pub fn log_problems(mut self, enabled: bool) -> Self {
        self.log_problems = enabled;
        self
    }

    pub fn error(
        &mut self,
        kind: ProblemKind,
        method: Option<&MethodSignature>,
        message: impl Into<String>,
    ) {
        self.record(Severity::Error, kind, method, message.into());
    }

    pub fn warning(
        &mut self,
        kind: ProblemKind,
        method: Option<&MethodSignature>,
        message: impl Into<String>,
    ) {
        self.record(Severity::Warning, kind, method, message.into());
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.problems.iter().filter(|p| p.is_error()).count()
    }

    fn record(
        &mut self,
        severity: Severity,
        kind: ProblemKind,
        method: Option<&MethodSignature>,
        message: String,
    ) {
        let problem = Problem {
            severity,
            kind,
            message,
            class: self.class.clone(),
            method: method.cloned(),
        };
        match severity {
            Severity::Error => {
                if self.log_problems {
                    tracing::warn!(class = %problem.class, ?kind, "{}", problem.message);
                }
                self.monitor.on_error(&problem);
            }
            Severity::Warning => {
                if self.log_problems {
                    tracing::debug!(class = %problem.class, ?kind, "{}", problem.message);
                }
                self.monitor.on_warning(&problem);
            }
        }
        self.problems.push(problem);
    }

    /// Freeze the recorded problems.
    #[must_use]
    pub fn finish(self) -> Problems {
        Problems {
            class: self.class,
            problems: self.problems,
        }
    }
}

// ---------------------------------------------------------------------------
// Problems
// ---------------------------------------------------------------------------

/// The immutable problem list of one inspection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Problems {
    class: String,
    problems: Vec<Problem>,
}

impl Problems {
    pub fn iter(&self) -> impl Iterator<Item = &Problem> {
        self.problems.iter()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Problem> {
        self.problems.iter().filter(|p| p.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Problem> {
        self.problems.iter().filter(|p| p.severity == Severity::Warning)
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.problems.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    /// Fail with every recorded problem when any error was recorded, or any
    /// warning when `warnings_as_errors` is set.
    pub fn check(&self, warnings_as_errors: bool) -> Result<(), ConfigurationError> {
        if self.has_errors() || (warnings_as_errors && self.has_warnings()) {
            return Err(ConfigurationError::Invalid {
                class: self.class.clone(),
                problems: self.problems.clone(),
            });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Problems {
    type Item = &'a Problem;
    type IntoIter = std::slice::Iter<'a, Problem>;

    fn into_iter(self) -> Self::IntoIter {
        self.problems.iter()
    }
}
