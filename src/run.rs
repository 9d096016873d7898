//! Routines for driving a registered suite of tests through a listener.
//!
//! The host framework proper is external; this driver is the smallest thing
//! that owns listener registration and the exit-code contract. The listener
//! is injected rather than installed into any global registry.

use crate::Result;
use crate::event_listener::EventListener;
use crate::model::{TestIdentity, TestOutcome};

/// One registered test: an identity and the function that produces its
/// verdict.
pub struct TestCase {
    pub identity: TestIdentity,
    run: Box<dyn FnMut() -> TestOutcome>,
}

/// The set of tests to run, in registration order.
#[derive(Default)]
pub struct Suite {
    cases: Vec<TestCase>,
}

impl Suite {
    pub fn new() -> Self {
        Suite { cases: Vec::new() }
    }

    pub fn add_case<S, T, F>(&mut self, suite: S, test: T, run: F)
        where S: Into<String>, T: Into<String>,
              F: FnMut() -> TestOutcome + 'static {
        self.cases.push(TestCase {
            identity: TestIdentity::new(suite, test),
            run: Box::new(run),
        });
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

/// The final counts, as seen by the driver.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RunStatus {
    pub passed: usize,
    pub failed: usize,
}

impl RunStatus {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// The exit code the enclosing program should return: 0 when every test
    /// passed, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() { 0 } else { 1 }
    }
}

/// Runs all registered tests, delivering lifecycle events to the listener.
///
/// Returns the final counts so the caller can map them to an exit code. An
/// error from the listener means it detected a broken contract; the run is
/// abandoned at that point.
///
/// # Parameters
///
/// * `listener` is the observer to deliver lifecycle events to. Pass
///   `&mut reporter` to keep the reporter for inspection after the run.
/// * `suite_fn` is a function which registers the tests to execute.
///
pub fn tests<L, F>(mut listener: L, suite_fn: F) -> Result<RunStatus>
    where L: EventListener, F: FnOnce(&mut Suite) {
    let mut suite = Suite::new();
    suite_fn(&mut suite);

    listener.on_program_start(suite.len())?;

    let mut status = RunStatus { passed: 0, failed: 0 };

    for case in suite.cases.iter_mut() {
        listener.on_test_start(&case.identity)?;

        let outcome = (case.run)();

        if outcome.is_failed() {
            status.failed += 1;
        } else {
            status.passed += 1;
        }

        listener.on_test_end(&case.identity, outcome)?;
    }

    listener.on_program_end()?;

    Ok(status)
}
