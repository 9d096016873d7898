//! The core reporter: turns host lifecycle events into a progress stream,
//! a terminal summary, and machine-readable aggregates.

use crate::{Config, ErrorKind, Result};
use crate::clock::{self, Clock, Timestamp};
use crate::event_listener::EventListener;
use crate::model::{RunAggregate, TestIdentity, TestOutcome, TestRecord};
use crate::sink::{Console, Sink};
use crate::util;

const TAG_RUNNING: &'static str = "[RUNNING ]";
const TAG_PASS: &'static str = "[  OK  ]";
const TAG_FAIL: &'static str = "[ FAIL ]";

const SUMMARY_SEPARATOR_WIDTH: usize = 50;

/// Where the run currently stands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    /// Program start has not been announced yet.
    Pending,
    Running,
    /// The summary has been rendered; further terminal events are ignored.
    Finished,
    /// A strict-mode contract violation occurred; no further events are
    /// processed and no summary will be published.
    Aborted,
}

/// The single-test slot: Idle -> InProgress -> (reported) -> Idle.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Slot {
    Idle,
    InProgress {
        identity: TestIdentity,
        /// `None` when the clock failed at test start.
        started_at: Option<Timestamp>,
    },
}

/// An `EventListener` which times tests and renders progress and summary
/// lines to a sink.
///
/// The clock and sink are injected at construction so tests can script time
/// and capture output. The reporter owns neither stream lifecycle nor thread
/// safety: the host delivers events sequentially on one thread.
pub struct Reporter<C, S>
    where C: Clock, S: Sink {
    config: Config,
    clock: C,
    sink: S,

    phase: Phase,
    slot: Slot,
    aggregate: Option<RunAggregate>,
    records: Vec<TestRecord>,
}

impl Reporter<clock::Monotonic, Console> {
    /// A reporter bound to the platform monotonic clock and the process
    /// stdout.
    pub fn with_defaults(config: Config) -> Self {
        Reporter::new(config, clock::Monotonic::new(), Console::new())
    }
}

impl<C, S> Reporter<C, S>
    where C: Clock, S: Sink {
    pub fn new(config: Config, clock: C, sink: S) -> Self {
        Reporter {
            config,
            clock,
            sink,
            phase: Phase::Pending,
            slot: Slot::Idle,
            aggregate: None,
            records: Vec::new(),
        }
    }

    /// The run counters and timestamps, once program start has been observed.
    pub fn aggregate(&self) -> Option<&RunAggregate> {
        self.aggregate.as_ref()
    }

    /// Every test finished so far in this run, in completion order.
    pub fn records(&self) -> &[TestRecord] {
        &self.records
    }

    pub fn passed_count(&self) -> usize {
        self.aggregate.as_ref().map(|a| a.passed_count).unwrap_or(0)
    }

    pub fn failed_count(&self) -> usize {
        self.aggregate.as_ref().map(|a| a.failed_count).unwrap_or(0)
    }

    pub fn all_passed(&self) -> bool {
        self.failed_count() == 0
    }

    /// Consumes the reporter, releasing its sink to the caller.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Writes one line to the sink, best-effort.
    ///
    /// A failed write must never mask a test verdict, so the error is logged
    /// and swallowed.
    fn emit(&mut self, line: &str) {
        if let Err(e) = self.sink.write_line(line) {
            debug!("sink write failed, continuing: {}", e);
        }
    }

    /// Reads the clock, degrading to `None` with a one-line diagnostic when
    /// the platform source fails.
    fn read_clock(&mut self) -> Option<Timestamp> {
        match self.clock.now() {
            Ok(timestamp) => Some(timestamp),
            Err(e) => {
                warn!("clock read failed: {}", e);
                self.emit(&format!("(clock error: {}; recording 0 ms)", e));
                None
            },
        }
    }

    /// Handles an out-of-contract event: fatal in strict mode, a logged
    /// diagnostic otherwise.
    fn violation(&mut self, kind: ErrorKind) -> Result<()> {
        if self.config.strict_ordering {
            self.phase = Phase::Aborted;
            Err(kind.into())
        } else {
            warn!("ignoring out-of-contract event: {}", kind);
            Ok(())
        }
    }

    fn guard_aborted(&self) -> Result<()> {
        if self.phase == Phase::Aborted {
            bail!(ErrorKind::ReporterAborted);
        }

        Ok(())
    }

    fn render_failure_parts(&mut self, outcome: &TestOutcome) {
        for part in outcome.failure_parts() {
            let mut lines = part.message.lines();

            match lines.next() {
                Some(first) => self.emit(&format!("  FAILURE: {}", first)),
                None => self.emit("  FAILURE:"),
            }

            // Continuation lines of a multi-line message stay under the
            // FAILURE marker.
            for continuation in lines {
                self.emit(&util::indent(continuation, 1));
            }
        }
    }

    fn render_summary(&mut self, total_ms: u64) {
        let (total_to_run, passed_count, failed_count) = match self.aggregate {
            Some(ref aggregate) => {
                (aggregate.total_to_run, aggregate.passed_count, aggregate.failed_count)
            },
            None => return,
        };

        let separator: String = (0..SUMMARY_SEPARATOR_WIDTH).map(|_| '=').collect();
        self.emit(&separator);

        self.emit(&format!("Total tests run: {}", total_to_run));
        self.emit(&format!("Tests passed: {}", passed_count));
        self.emit(&format!("Tests failed: {}", failed_count));
        self.emit(&format!("Total execution time: {} ms", total_ms));

        if failed_count == 0 {
            self.emit("[SUCCESS] All tests passed.");
        } else {
            self.emit("[WARNING] Some tests failed. Check the output above for details.");
        }

        if total_to_run > 0 {
            let avg_ms = total_ms / total_to_run as u64;
            self.emit(&format!("Average test execution time: {} ms", avg_ms));

            if avg_ms > self.config.slow_test_threshold_ms {
                self.emit(&format!(
                    "[NOTICE] Average test time exceeds {} ms. Consider optimizing slow tests.",
                    self.config.slow_test_threshold_ms));
            }
        } else {
            self.emit("Average test execution time: n/a");
        }
    }
}

impl<C, S> EventListener for Reporter<C, S>
    where C: Clock, S: Sink {
    fn on_program_start(&mut self, total_to_run: usize) -> Result<()> {
        self.guard_aborted()?;

        if self.phase != Phase::Pending {
            return self.violation(ErrorKind::EventOutsideProgram("program start".to_owned()));
        }

        let started_at = self.read_clock().unwrap_or(0);
        self.aggregate = Some(RunAggregate::new(total_to_run, started_at));
        self.phase = Phase::Running;

        let banner = format!("=== {} ===", self.config.suite_name);
        self.emit(&banner);

        let banner_lines = self.config.banner_lines.clone();
        for line in banner_lines {
            self.emit(&line);
        }

        Ok(())
    }

    fn on_test_start(&mut self, identity: &TestIdentity) -> Result<()> {
        self.guard_aborted()?;

        if self.phase != Phase::Running {
            return self.violation(ErrorKind::EventOutsideProgram(format!("test start '{}'", identity)));
        }

        if let Slot::InProgress { .. } = self.slot {
            if self.config.strict_ordering {
                self.phase = Phase::Aborted;
                bail!(ErrorKind::OverlappingStart(identity.to_string()));
            }

            // Duration is measured from the most recent start; restamping
            // below is the whole of the lenient handling.
            debug!("test '{}' started while a prior start is unfinished, restamping", identity);
        }

        let started_at = self.read_clock();
        self.slot = Slot::InProgress {
            identity: identity.clone(),
            started_at,
        };

        self.emit(&format!("{} {}", TAG_RUNNING, identity));

        Ok(())
    }

    fn on_test_end(&mut self, identity: &TestIdentity, outcome: TestOutcome) -> Result<()> {
        self.guard_aborted()?;

        if self.phase != Phase::Running {
            return self.violation(ErrorKind::EventOutsideProgram(format!("test end '{}'", identity)));
        }

        let matching_start = match std::mem::replace(&mut self.slot, Slot::Idle) {
            Slot::InProgress { identity: started, started_at } if started == *identity => {
                Some(started_at)
            },
            _ => None,
        };

        let duration_ms = match matching_start {
            Some(started_at) => {
                let ended_at = self.read_clock();

                match (started_at, ended_at) {
                    (Some(start), Some(end)) => clock::duration_ms(start, end),
                    // Either stamp was lost to a clock failure; the
                    // diagnostic was already written at the failure point.
                    _ => 0,
                }
            },
            None => {
                if self.config.strict_ordering {
                    self.phase = Phase::Aborted;
                    bail!(ErrorKind::EndWithoutStart(identity.to_string()));
                }

                warn!("test '{}' ended without a matching start, recording 0 ms", identity);
                0
            },
        };

        if let Some(ref mut aggregate) = self.aggregate {
            if outcome.is_failed() {
                aggregate.failed_count += 1;
            } else {
                aggregate.passed_count += 1;
            }
        }

        let tag = if outcome.is_failed() { TAG_FAIL } else { TAG_PASS };
        self.emit(&format!("{} {} ({} ms)", tag, identity, duration_ms));

        self.render_failure_parts(&outcome);

        // A record exists only for ends that had a matching start.
        if matching_start.is_some() {
            self.records.push(TestRecord {
                identity: identity.clone(),
                outcome,
                duration_ms,
            });
        }

        Ok(())
    }

    fn on_program_end(&mut self) -> Result<()> {
        self.guard_aborted()?;

        match self.phase {
            Phase::Running => (),
            Phase::Finished => {
                if self.config.strict_ordering {
                    self.phase = Phase::Aborted;
                    bail!(ErrorKind::ProgramEndRepeated);
                }

                // Summary is idempotent in lenient mode.
                return Ok(());
            },
            _ => {
                return self.violation(ErrorKind::EventOutsideProgram("program end".to_owned()));
            },
        }

        let ended_at = self.read_clock();

        let total_ms = match self.aggregate {
            Some(ref mut aggregate) => {
                aggregate.ended_at = ended_at;

                match ended_at {
                    Some(end) => clock::duration_ms(aggregate.started_at, end),
                    None => 0,
                }
            },
            None => 0,
        };

        self.phase = Phase::Finished;
        self.render_summary(total_ms);

        Ok(())
    }
}
