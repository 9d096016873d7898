use crate::clock::Timestamp;

use std::fmt;

/// Names a single test within a suite.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TestIdentity {
    /// The suite (or test case group) the test belongs to. Non-empty.
    pub suite: String,
    /// The test's own name. Non-empty.
    pub test: String,
}

/// One message attached to a failed test, in the order the host produced them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailurePart {
    /// Arbitrary UTF-8, possibly spanning multiple lines.
    pub message: String,
}

/// The verdict of a single finished test.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TestOutcome {
    Passed,
    Failed(Vec<FailurePart>),
}

/// A finished test: identity, verdict, and how long it took.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestRecord {
    pub identity: TestIdentity,
    pub outcome: TestOutcome,
    pub duration_ms: u64,
}

/// Counters and timestamps accumulated over one run.
///
/// Created when the host announces program start, discarded after the
/// summary is rendered. Never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunAggregate {
    /// How many tests the host intends to run, announced up-front.
    pub total_to_run: usize,
    pub passed_count: usize,
    pub failed_count: usize,
    pub started_at: Timestamp,
    /// Set once the program-end event arrives.
    pub ended_at: Option<Timestamp>,
}

impl TestIdentity {
    pub fn new<S, T>(suite: S, test: T) -> Self
        where S: Into<String>, T: Into<String> {
        TestIdentity { suite: suite.into(), test: test.into() }
    }
}

impl fmt::Display for TestIdentity {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}.{}", self.suite, self.test)
    }
}

impl FailurePart {
    pub fn new<S>(message: S) -> Self where S: Into<String> {
        FailurePart { message: message.into() }
    }
}

impl TestOutcome {
    /// Builds a `Failed` outcome from plain message strings.
    pub fn failed<I, S>(messages: I) -> Self
        where I: IntoIterator<Item=S>, S: Into<String> {
        TestOutcome::Failed(messages.into_iter().map(FailurePart::new).collect())
    }

    pub fn is_failed(&self) -> bool {
        match *self {
            TestOutcome::Passed => false,
            TestOutcome::Failed(..) => true,
        }
    }

    /// The failure messages, empty for a pass.
    pub fn failure_parts(&self) -> &[FailurePart] {
        match *self {
            TestOutcome::Passed => &[],
            TestOutcome::Failed(ref parts) => parts,
        }
    }
}

impl RunAggregate {
    pub fn new(total_to_run: usize, started_at: Timestamp) -> Self {
        RunAggregate {
            total_to_run,
            passed_count: 0,
            failed_count: 0,
            started_at,
            ended_at: None,
        }
    }

    pub fn completed_count(&self) -> usize {
        self.passed_count + self.failed_count
    }
}
