//! The listener seam between a host test runner and its observers.
//!
//! Host frameworks expose many lifecycle hooks; most observers care about a
//! handful. The wrapper hooks default to no-ops so an observer only overrides
//! what it acts on, while still satisfying the full host contract.

use crate::Result;
use crate::model::{TestIdentity, TestOutcome};

/// An object which observes lifecycle events during a test run.
///
/// The host invokes callbacks sequentially on a single thread, and each
/// callback must return promptly. A returned error signals a broken host
/// contract and tells the host to abort the run.
pub trait EventListener {
    /// Called once before any test runs. `total_to_run` is the number of
    /// tests the host intends to execute.
    fn on_program_start(&mut self, total_to_run: usize) -> Result<()>;

    /// Called when an individual test begins executing.
    fn on_test_start(&mut self, identity: &TestIdentity) -> Result<()>;

    /// Called when an individual test finishes, with its verdict.
    fn on_test_end(&mut self, identity: &TestIdentity, outcome: TestOutcome) -> Result<()>;

    /// Called once after the last test.
    fn on_program_end(&mut self) -> Result<()>;

    // Wrapper hooks. Hosts that group tests into iterations, cases, or
    // environment setup phases deliver these too; observers that don't
    // track them inherit the no-ops.

    fn on_iteration_start(&mut self, _iteration: u32) -> Result<()> { Ok(()) }
    fn on_iteration_end(&mut self, _iteration: u32) -> Result<()> { Ok(()) }
    fn on_environments_setup_start(&mut self) -> Result<()> { Ok(()) }
    fn on_environments_setup_end(&mut self) -> Result<()> { Ok(()) }
    fn on_environments_teardown_start(&mut self) -> Result<()> { Ok(()) }
    fn on_environments_teardown_end(&mut self) -> Result<()> { Ok(()) }
    fn on_test_case_start(&mut self, _case_name: &str) -> Result<()> { Ok(()) }
    fn on_test_case_end(&mut self, _case_name: &str) -> Result<()> { Ok(()) }
}

impl<'a, L> EventListener for &'a mut L
    where L: EventListener + ?Sized {
    fn on_program_start(&mut self, total_to_run: usize) -> Result<()> {
        (**self).on_program_start(total_to_run)
    }

    fn on_test_start(&mut self, identity: &TestIdentity) -> Result<()> {
        (**self).on_test_start(identity)
    }

    fn on_test_end(&mut self, identity: &TestIdentity, outcome: TestOutcome) -> Result<()> {
        (**self).on_test_end(identity, outcome)
    }

    fn on_program_end(&mut self) -> Result<()> {
        (**self).on_program_end()
    }

    fn on_iteration_start(&mut self, iteration: u32) -> Result<()> {
        (**self).on_iteration_start(iteration)
    }

    fn on_iteration_end(&mut self, iteration: u32) -> Result<()> {
        (**self).on_iteration_end(iteration)
    }

    fn on_environments_setup_start(&mut self) -> Result<()> {
        (**self).on_environments_setup_start()
    }

    fn on_environments_setup_end(&mut self) -> Result<()> {
        (**self).on_environments_setup_end()
    }

    fn on_environments_teardown_start(&mut self) -> Result<()> {
        (**self).on_environments_teardown_start()
    }

    fn on_environments_teardown_end(&mut self) -> Result<()> {
        (**self).on_environments_teardown_end()
    }

    fn on_test_case_start(&mut self, case_name: &str) -> Result<()> {
        (**self).on_test_case_start(case_name)
    }

    fn on_test_case_end(&mut self, case_name: &str) -> Result<()> {
        (**self).on_test_case_end(case_name)
    }
}
