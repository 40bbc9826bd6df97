//! Smoke-test runner
//!
//! Runs ordered suites of cases against the platform through the client
//! in [`crate::client`]. Cases share an explicit [`Session`] and the
//! pipeline skips everything after the first broken case.

mod cases;
mod expect;
mod pipeline;
mod runner;
mod session;
mod suites;

pub use cases::{SdkCase, USER_DEPARTMENT, USER_PROFILE_SKILL};
pub use expect::{expect_eq, expect_non_empty};
pub use pipeline::{CaseResult, Outcome, Pipeline, SuiteReport, TestCase};
pub use runner::run_suite;
pub use session::{Hosts, Session};
pub use suites::Suite;
