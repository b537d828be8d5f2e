use std::fmt;
use std::sync::Arc;
use serde::{ Deserialize, Serialize };

use crate::errors::CheckError;
use crate::models::common::Severity;
use crate::traits::invariant::{ FnCheck, InvariantCheck };

/// Outcome of one named sub-check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvariantCheckResult {
    pub name: String,
    pub passed: bool,
    pub message: String,
    pub severity: Severity,
    /// The observed value, if the check compared one
    pub actual: Option<serde_json::Value>,
    /// The constraint the observed value was compared against
    pub constraint: Option<String>,
}

impl InvariantCheckResult {
    pub fn pass(name: impl Into<String>, severity: Severity) -> Self {
        Self {
            name: name.into(),
            passed: true,
            message: String::new(),
            severity,
            actual: None,
            constraint: None,
        }
    }

    pub fn fail(name: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            name: name.into(),
            passed: false,
            message: message.into(),
            severity,
            actual: None,
            constraint: None,
        }
    }

    /// Pass when `condition` holds, otherwise fail with `message`
    pub fn expect(
        name: impl Into<String>,
        condition: bool,
        message: impl Into<String>,
        severity: Severity
    ) -> Self {
        if condition {
            Self::pass(name, severity)
        } else {
            Self::fail(name, message, severity)
        }
    }

    pub fn with_actual<V: Serialize>(mut self, actual: &V) -> Self {
        self.actual = serde_json::to_value(actual).ok();
        self
    }

    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraint = Some(constraint.into());
        self
    }
}

impl fmt::Display for InvariantCheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.passed { "ok" } else { "FAILED" };
        write!(f, "[{}] {} {}", self.severity, self.name, mark)?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(actual) = &self.actual {
            write!(f, " (actual {}", actual)?;
            if let Some(constraint) = &self.constraint {
                write!(f, ", expected {}", constraint)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// What a check function hands back: its sub-checks and an optional output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub checks: Vec<InvariantCheckResult>,
    pub output: Option<serde_json::Value>,
}

impl CheckOutcome {
    pub fn from_checks(checks: Vec<InvariantCheckResult>) -> Self {
        Self { checks, output: None }
    }

    pub fn with_output<V: Serialize>(mut self, output: &V) -> Self {
        self.output = serde_json::to_value(output).ok();
        self
    }

    pub fn passed(&self) -> bool {
        self.checks.iter().all(|check| check.passed)
    }
}

pub type PredicateFn<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;
pub type PostconditionFn<T> = Arc<dyn Fn(&T, &CheckOutcome) -> bool + Send + Sync>;

/// Named filter on inputs; a false precondition skips the input
pub struct Precondition<T> {
    pub name: String,
    pub predicate: PredicateFn<T>,
}

impl<T> Clone for Precondition<T> {
    fn clone(&self) -> Self {
        Self { name: self.name.clone(), predicate: Arc::clone(&self.predicate) }
    }
}

/// Named assertion over an input and the check's outcome
pub struct Postcondition<T> {
    pub name: String,
    pub severity: Severity,
    pub predicate: PostconditionFn<T>,
}

impl<T> Clone for Postcondition<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            severity: self.severity,
            predicate: Arc::clone(&self.predicate),
        }
    }
}

/// A property that must hold for every generated input
pub struct PropertyInvariant<T> {
    pub description: String,
    pub severity: Severity,
    pub(crate) check: Arc<dyn InvariantCheck<T>>,
    pub(crate) preconditions: Vec<Precondition<T>>,
    pub(crate) postconditions: Vec<Postcondition<T>>,
}

impl<T> Clone for PropertyInvariant<T> {
    fn clone(&self) -> Self {
        Self {
            description: self.description.clone(),
            severity: self.severity,
            check: Arc::clone(&self.check),
            preconditions: self.preconditions.clone(),
            postconditions: self.postconditions.clone(),
        }
    }
}

impl<T: Send + Sync + 'static> PropertyInvariant<T> {
    /// Build an invariant from a synchronous check function
    pub fn new<F>(description: impl Into<String>, severity: Severity, check: F) -> Self
        where F: Fn(&T) -> Result<CheckOutcome, CheckError> + Send + Sync + 'static
    {
        Self::from_check(description, severity, FnCheck::new(check))
    }

    /// Build an invariant from any (possibly asynchronous) check implementation
    pub fn from_check<C>(description: impl Into<String>, severity: Severity, check: C) -> Self
        where C: InvariantCheck<T> + 'static
    {
        Self {
            description: description.into(),
            severity,
            check: Arc::new(check),
            preconditions: Vec::new(),
            postconditions: Vec::new(),
        }
    }

    pub fn with_precondition<P>(mut self, name: impl Into<String>, predicate: P) -> Self
        where P: Fn(&T) -> bool + Send + Sync + 'static
    {
        self.preconditions.push(Precondition { name: name.into(), predicate: Arc::new(predicate) });
        self
    }

    pub fn with_postcondition<P>(mut self, name: impl Into<String>, predicate: P) -> Self
        where P: Fn(&T, &CheckOutcome) -> bool + Send + Sync + 'static
    {
        self.postconditions.push(Postcondition {
            name: name.into(),
            severity: self.severity,
            predicate: Arc::new(predicate),
        });
        self
    }

    pub fn preconditions(&self) -> &[Precondition<T>] {
        &self.preconditions
    }

    pub fn postconditions(&self) -> &[Postcondition<T>] {
        &self.postconditions
    }
}
