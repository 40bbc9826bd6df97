//! Ordered case pipeline
//!
//! Cases run strictly in declaration order against one shared context.
//! Once a case fails or errors, every later case is recorded as skipped
//! without being executed, so no further remote calls are made.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use colored::Colorize;

use crate::common::{Error, Result};

/// A named step of a suite
#[async_trait]
pub trait TestCase<C: Send>: Send + Sync {
    /// Name shown in the report
    fn name(&self) -> &str;

    /// Execute the case, mutating the shared context
    async fn run(&self, ctx: &mut C) -> Result<()>;
}

/// Outcome of one case
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    /// An expectation did not hold
    Failed(String),
    /// The case could not complete (transport, platform or IO error)
    Errored(String),
    /// Not executed because an earlier case did not pass
    Skipped(String),
}

impl Outcome {
    fn from_error(err: &Error) -> Self {
        if err.is_failure() {
            Outcome::Failed(err.to_string())
        } else {
            Outcome::Errored(err.to_string())
        }
    }

    /// Whether this outcome stops the rest of the pipeline
    pub fn is_broken(&self) -> bool {
        matches!(self, Outcome::Failed(_) | Outcome::Errored(_))
    }
}

/// Result of one case
#[derive(Debug, Clone)]
pub struct CaseResult {
    pub name: String,
    pub outcome: Outcome,
    pub elapsed: Duration,
}

/// Results of a whole pipeline run, in execution order
#[derive(Debug, Clone)]
pub struct SuiteReport {
    pub suite: String,
    pub results: Vec<CaseResult>,
}

impl SuiteReport {
    /// True when no case failed or errored
    pub fn passed(&self) -> bool {
        !self.results.iter().any(|r| r.outcome.is_broken())
    }

    pub fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.outcome)).count()
    }

    /// First case that failed or errored
    pub fn first_broken(&self) -> Option<&CaseResult> {
        self.results.iter().find(|r| r.outcome.is_broken())
    }

    pub fn outcome_of(&self, name: &str) -> Option<&Outcome> {
        self.results.iter().find(|r| r.name == name).map(|r| &r.outcome)
    }
}

/// Ordered list of cases sharing a context of type `C`
pub struct Pipeline<C> {
    name: String,
    cases: Vec<Box<dyn TestCase<C>>>,
}

impl<C: Send> Pipeline<C> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: Vec::new(),
        }
    }

    /// Append a case; cases run in the order they were added
    pub fn case(mut self, case: impl TestCase<C> + 'static) -> Self {
        self.cases.push(Box::new(case));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn case_names(&self) -> Vec<&str> {
        self.cases.iter().map(|c| c.name()).collect()
    }

    /// Run every case in order, short-circuiting after the first broken one
    pub async fn run(&self, ctx: &mut C) -> SuiteReport {
        let mut results: Vec<CaseResult> = Vec::with_capacity(self.cases.len());
        let mut broken_by: Option<String> = None;

        for (i, case) in self.cases.iter().enumerate() {
            let case_num = i + 1;

            if let Some(previous) = &broken_by {
                let reason = format!("previous case '{previous}' did not pass");
                println!("  {} Case {}: {} ({})", "-".yellow(), case_num, case.name(), reason.dimmed());
                results.push(CaseResult {
                    name: case.name().to_string(),
                    outcome: Outcome::Skipped(reason),
                    elapsed: Duration::ZERO,
                });
                continue;
            }

            tracing::debug!(case = case.name(), "entering case");
            let started = Instant::now();
            let outcome = match case.run(ctx).await {
                Ok(()) => Outcome::Passed,
                Err(e) => Outcome::from_error(&e),
            };
            let elapsed = started.elapsed();
            tracing::debug!(case = case.name(), ?elapsed, "exiting case");

            match &outcome {
                Outcome::Passed => {
                    println!("  {} Case {}: {}", "✓".green(), case_num, case.name());
                }
                Outcome::Failed(msg) | Outcome::Errored(msg) => {
                    println!("  {} Case {}: {}: {}", "✗".red(), case_num, case.name(), msg);
                    broken_by = Some(case.name().to_string());
                }
                Outcome::Skipped(_) => {}
            }

            results.push(CaseResult {
                name: case.name().to_string(),
                outcome,
                elapsed,
            });
        }

        SuiteReport {
            suite: self.name.clone(),
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Context recording which cases actually executed
    #[derive(Default)]
    struct Trace {
        executed: Vec<String>,
    }

    enum Step {
        Pass(&'static str),
        Fail(&'static str),
        Error(&'static str),
    }

    #[async_trait]
    impl TestCase<Trace> for Step {
        fn name(&self) -> &str {
            match self {
                Step::Pass(n) | Step::Fail(n) | Step::Error(n) => n,
            }
        }

        async fn run(&self, ctx: &mut Trace) -> Result<()> {
            ctx.executed.push(self.name().to_string());
            match self {
                Step::Pass(_) => Ok(()),
                Step::Fail(n) => Err(Error::TestAssertion(format!("{n} mismatch"))),
                Step::Error(_) => Err(Error::NotAuthenticated),
            }
        }
    }

    #[tokio::test]
    async fn test_all_pass_in_declared_order() {
        let pipeline = Pipeline::new("order")
            .case(Step::Pass("c"))
            .case(Step::Pass("a"))
            .case(Step::Pass("b"));
        let mut trace = Trace::default();

        let report = pipeline.run(&mut trace).await;

        assert!(report.passed());
        assert_eq!(trace.executed, vec!["c", "a", "b"]);
        assert_eq!(pipeline.case_names(), vec!["c", "a", "b"]);
        assert_eq!(report.count(|o| *o == Outcome::Passed), 3);
    }

    #[tokio::test]
    async fn test_failure_skips_remaining_cases() {
        let pipeline = Pipeline::new("skip")
            .case(Step::Pass("one"))
            .case(Step::Fail("two"))
            .case(Step::Pass("three"))
            .case(Step::Pass("four"));
        let mut trace = Trace::default();

        let report = pipeline.run(&mut trace).await;

        assert!(!report.passed());
        assert_eq!(trace.executed, vec!["one", "two"]);
        assert!(matches!(report.outcome_of("two"), Some(Outcome::Failed(msg)) if msg.contains("two mismatch")));
        assert!(matches!(report.outcome_of("three"), Some(Outcome::Skipped(_))));
        assert!(matches!(report.outcome_of("four"), Some(Outcome::Skipped(r)) if r.contains("'two'")));
        assert_eq!(report.first_broken().map(|r| r.name.as_str()), Some("two"));
    }

    #[tokio::test]
    async fn test_error_is_distinct_from_failure() {
        let pipeline = Pipeline::new("error").case(Step::Error("auth")).case(Step::Pass("after"));
        let mut trace = Trace::default();

        let report = pipeline.run(&mut trace).await;

        assert!(matches!(report.outcome_of("auth"), Some(Outcome::Errored(_))));
        assert!(matches!(report.outcome_of("after"), Some(Outcome::Skipped(_))));
        assert_eq!(trace.executed, vec!["auth"]);
    }

    #[tokio::test]
    async fn test_empty_pipeline_passes() {
        let pipeline: Pipeline<Trace> = Pipeline::new("empty");
        let report = pipeline.run(&mut Trace::default()).await;
        assert!(report.passed());
        assert!(report.results.is_empty());
    }
}
