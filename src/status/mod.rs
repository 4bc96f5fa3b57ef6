//! Sequential step-status reporting.
//!
//! [`StepSequencer`] keeps a FIFO queue of step labels and shows exactly one
//! of them as in progress at a time. Callers declare a whole plan up front
//! with [`StepSequencer::add_steps`] and report each completion with
//! [`StepSequencer::done_step`] as the wrapped command finishes.

mod terminal;

pub use terminal::{TerminalStatus, TerminalStep};

use std::collections::VecDeque;

/// Outcome applied to an armed step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step completed
    Success,
    /// The step failed or was interrupted
    Failure,
}

impl From<bool> for StepOutcome {
    fn from(ok: bool) -> Self {
        if ok {
            StepOutcome::Success
        } else {
            StepOutcome::Failure
        }
    }
}

/// Display surface the sequencer renders steps on
pub trait StatusDisplay {
    /// Handle for the step that was just started
    type Handle: StepHandle;

    /// Render `label` as in progress and arm a handle for its outcome
    fn begin(&self, label: &str) -> Self::Handle;
}

/// Completion handle for one in-progress step.
///
/// Resolving consumes the handle, so a step can only be finalized once.
pub trait StepHandle {
    /// Render the step as resolved with `outcome`
    fn resolve(self, outcome: StepOutcome);
}

enum SequencerState<H> {
    Idle,
    Active { label: String, handle: H },
}

/// Ordered step queue with a single armed step
pub struct StepSequencer<D: StatusDisplay> {
    display: D,
    pending: VecDeque<String>,
    state: SequencerState<D::Handle>,
}

impl<D: StatusDisplay> StepSequencer<D> {
    /// Create an idle sequencer rendering on `display`
    pub fn new(display: D) -> Self {
        Self {
            display,
            pending: VecDeque::new(),
            state: SequencerState::Idle,
        }
    }

    /// Append labels to the queue, activating the first one if nothing is
    /// in flight.
    pub fn add_steps<I, S>(&mut self, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pending.extend(labels.into_iter().map(Into::into));
        if matches!(self.state, SequencerState::Idle) {
            self.advance();
        }
    }

    /// Resolve the armed step with `outcome` and activate the next one.
    ///
    /// Must only be called while a step is armed. Debug builds panic on a
    /// stray call; release builds log it and leave the queue untouched.
    pub fn done_step(&mut self, outcome: impl Into<StepOutcome>) {
        let outcome = outcome.into();
        match std::mem::replace(&mut self.state, SequencerState::Idle) {
            SequencerState::Active { label, handle } => {
                log::debug!("step '{}' finished: {:?}", label, outcome);
                handle.resolve(outcome);
                self.advance();
            }
            SequencerState::Idle => {
                debug_assert!(false, "done_step called with no armed step");
                log::error!("done_step({:?}) called with no armed step", outcome);
            }
        }
    }

    /// Drop every pending label and fail the armed step, if any.
    pub fn stop(&mut self) {
        self.pending.clear();
        if let SequencerState::Active { label, handle } =
            std::mem::replace(&mut self.state, SequencerState::Idle)
        {
            log::debug!("step '{}' stopped", label);
            handle.resolve(StepOutcome::Failure);
        }
    }

    /// Label of the armed step
    pub fn current(&self) -> Option<&str> {
        match &self.state {
            SequencerState::Active { label, .. } => Some(label),
            SequencerState::Idle => None,
        }
    }

    /// Labels waiting behind the armed step
    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.pending.iter().map(String::as_str)
    }

    /// Whether a step is in flight
    pub fn is_active(&self) -> bool {
        matches!(self.state, SequencerState::Active { .. })
    }

    /// The display this sequencer renders on
    pub fn display(&self) -> &D {
        &self.display
    }

    fn advance(&mut self) {
        self.state = match self.pending.pop_front() {
            Some(label) => {
                log::debug!("step '{}' started", label);
                let handle = self.display.begin(&label);
                SequencerState::Active { label, handle }
            }
            None => SequencerState::Idle,
        };
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{Event, RecordingDisplay};
    use super::*;

    fn sequencer() -> StepSequencer<RecordingDisplay> {
        StepSequencer::new(RecordingDisplay::default())
    }

    #[test]
    fn test_add_steps_activates_first_label() {
        let mut seq = sequencer();
        seq.add_steps(["bump", "commit", "push"]);

        assert_eq!(seq.current(), Some("bump"));
        assert_eq!(seq.pending().collect::<Vec<_>>(), vec!["commit", "push"]);
        assert_eq!(seq.display().events(), vec![Event::Begin("bump".into())]);
    }

    #[test]
    fn test_bump_commit_push_scenario() {
        let mut seq = sequencer();
        seq.add_steps(["bump", "commit", "push"]);

        seq.done_step(StepOutcome::Success);
        assert_eq!(seq.current(), Some("commit"));

        seq.done_step(StepOutcome::Failure);
        assert_eq!(seq.current(), Some("push"));

        assert_eq!(
            seq.display().events(),
            vec![
                Event::Begin("bump".into()),
                Event::Resolved("bump".into(), StepOutcome::Success),
                Event::Begin("commit".into()),
                Event::Resolved("commit".into(), StepOutcome::Failure),
                Event::Begin("push".into()),
            ]
        );
    }

    #[test]
    fn test_add_steps_while_active_only_queues() {
        let mut seq = sequencer();
        seq.add_steps(["a"]);
        seq.add_steps(["b", "c"]);

        assert_eq!(seq.current(), Some("a"));
        assert_eq!(seq.display().events(), vec![Event::Begin("a".into())]);
    }

    #[test]
    fn test_interleaved_calls_complete_in_fifo_order() {
        let mut seq = sequencer();
        seq.add_steps(["one"]);
        seq.done_step(true);
        assert!(!seq.is_active());

        seq.add_steps(["two", "three"]);
        seq.done_step(true);
        seq.add_steps(["four"]);
        seq.done_step(false);
        seq.done_step(true);

        let resolved = seq.display().resolved();
        assert_eq!(
            resolved,
            vec![
                ("one".to_string(), StepOutcome::Success),
                ("two".to_string(), StepOutcome::Success),
                ("three".to_string(), StepOutcome::Failure),
                ("four".to_string(), StepOutcome::Success),
            ]
        );
        assert!(!seq.is_active());
    }

    #[test]
    fn test_at_most_one_step_in_flight() {
        let mut seq = sequencer();
        seq.add_steps(["a", "b"]);
        seq.add_steps(["c"]);
        seq.done_step(true);
        seq.add_steps(["d"]);

        let mut in_flight = 0i32;
        for event in seq.display().events() {
            match event {
                Event::Begin(_) => in_flight += 1,
                Event::Resolved(..) => in_flight -= 1,
            }
            assert!((0..=1).contains(&in_flight));
        }
        assert_eq!(in_flight, 1);
    }

    #[test]
    fn test_last_done_step_goes_idle() {
        let mut seq = sequencer();
        seq.add_steps(["only"]);
        seq.done_step(true);

        assert!(!seq.is_active());
        assert_eq!(seq.current(), None);
    }

    #[test]
    fn test_stop_fails_armed_step_once() {
        let mut seq = sequencer();
        seq.add_steps(["tag", "push"]);

        seq.stop();
        seq.stop();
        seq.stop();

        assert_eq!(
            seq.display().resolved(),
            vec![("tag".to_string(), StepOutcome::Failure)]
        );
        assert_eq!(seq.pending().count(), 0);
        assert!(!seq.is_active());
    }

    #[test]
    fn test_stop_when_idle_is_noop() {
        let mut seq = sequencer();
        seq.stop();
        assert!(seq.display().events().is_empty());
    }

    #[test]
    fn test_add_steps_after_stop_starts_fresh_queue() {
        let mut seq = sequencer();
        seq.add_steps(["a", "b", "c"]);
        seq.stop();

        seq.add_steps(["x"]);
        assert_eq!(seq.current(), Some("x"));
        assert_eq!(seq.pending().count(), 0);

        seq.done_step(true);
        assert!(!seq.is_active());
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "no armed step")]
    fn test_done_step_without_armed_step_panics_in_debug() {
        let mut seq = sequencer();
        seq.done_step(true);
    }
}
