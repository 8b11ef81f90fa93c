//=========================================================================
// Transition Requests & Handles
//=========================================================================
//
// What a component asks the animation collaborator for, and what it gets
// back: a handle carrying timeline labels and a completion notification.
//
// Label convention:
//   start = `after` label if given, otherwise `t<id>`
//   end   = "<start>+=<seconds, two decimals>"
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::Cell;
use std::fmt;
use std::time::Duration;

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, RecvTimeoutError, TryRecvError};

//=== TargetId ============================================================

/// Identifies the scene object a transition applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u32);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "target#{}", self.0)
    }
}

//=== Property ============================================================

/// Animatable transform component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    PositionX,
    PositionY,
    PositionZ,
    RotationX,
    RotationY,
    RotationZ,
    /// Uniform scale.
    Scale,
}

//=== Easing ==============================================================

/// Easing curve name. Interpolation itself happens in the collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Easing {
    Linear,
    #[default]
    QuadOut,
    SineInOut,
    BackOut,
}

//=== TimelineLabel =======================================================

/// Position on the collaborator's timeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimelineLabel(String);

impl TimelineLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Label `duration` after this one.
    pub fn offset(&self, duration: Duration) -> Self {
        Self(format!("{}+={:.2}", self.0, duration.as_secs_f32()))
    }
}

impl fmt::Display for TimelineLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//=== TransitionRequest ===================================================

/// Default transition length.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(300);

/// Request to move one property of one target to a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionRequest {
    pub target: TargetId,
    pub property: Property,
    pub to: f32,
    pub duration: Duration,
    pub easing: Easing,
    /// Start after this label instead of immediately.
    pub after: Option<TimelineLabel>,
}

impl TransitionRequest {
    pub fn new(target: TargetId, property: Property, to: f32) -> Self {
        Self {
            target,
            property,
            to,
            duration: DEFAULT_DURATION,
            easing: Easing::default(),
            after: None,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn after(mut self, label: TimelineLabel) -> Self {
        self.after = Some(label);
        self
    }

    /// Start and end labels for a request with the given id.
    pub(super) fn labels(&self, id: u64) -> (TimelineLabel, TimelineLabel) {
        let start = self
            .after
            .clone()
            .unwrap_or_else(|| TimelineLabel(format!("t{}", id)));
        let end = start.offset(self.duration);
        (start, end)
    }
}

//=== TransitionStatus ====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStatus {
    /// Accepted, not finished yet.
    Pending,
    /// The collaborator reported completion.
    Complete,
    /// Dropped without completing (queue full, collaborator gone).
    Abandoned,
}

//=== TransitionHandle ====================================================

/// Handle to a requested transition.
pub struct TransitionHandle {
    id: u64,
    start_label: TimelineLabel,
    end_label: TimelineLabel,
    done: Receiver<()>,
    status: Cell<TransitionStatus>,
}

impl TransitionHandle {
    pub(super) fn new(
        id: u64,
        start_label: TimelineLabel,
        end_label: TimelineLabel,
        done: Receiver<()>,
    ) -> Self {
        Self {
            id,
            start_label,
            end_label,
            done,
            status: Cell::new(TransitionStatus::Pending),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn start_label(&self) -> &TimelineLabel {
        &self.start_label
    }

    /// Label at which the transition ends; chain follow-ups with it.
    pub fn end_label(&self) -> &TimelineLabel {
        &self.end_label
    }

    /// Polls the completion notification without blocking.
    pub fn status(&self) -> TransitionStatus {
        if self.status.get() == TransitionStatus::Pending {
            match self.done.try_recv() {
                Ok(()) => self.status.set(TransitionStatus::Complete),
                Err(TryRecvError::Disconnected) => self.status.set(TransitionStatus::Abandoned),
                Err(TryRecvError::Empty) => {}
            }
        }
        self.status.get()
    }

    pub fn is_complete(&self) -> bool {
        self.status() == TransitionStatus::Complete
    }

    /// Blocks until the transition settles or `timeout` elapses.
    pub fn wait_timeout(&self, timeout: Duration) -> TransitionStatus {
        if self.status.get() == TransitionStatus::Pending {
            match self.done.recv_timeout(timeout) {
                Ok(()) => self.status.set(TransitionStatus::Complete),
                Err(RecvTimeoutError::Disconnected) => self.status.set(TransitionStatus::Abandoned),
                Err(RecvTimeoutError::Timeout) => {}
            }
        }
        self.status.get()
    }
}

impl fmt::Debug for TransitionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionHandle")
            .field("id", &self.id)
            .field("start", &self.start_label.as_str())
            .field("end", &self.end_label.as_str())
            .field("status", &self.status.get())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    #[test]
    fn labels_default_to_request_id() {
        let request = TransitionRequest::new(TargetId(1), Property::Scale, 1.1)
            .with_duration(Duration::from_millis(500));

        let (start, end) = request.labels(7);
        assert_eq!(start.as_str(), "t7");
        assert_eq!(end.as_str(), "t7+=0.50");
    }

    #[test]
    fn labels_chain_after_a_given_label() {
        let request = TransitionRequest::new(TargetId(1), Property::RotationY, 0.0)
            .with_duration(Duration::from_millis(250))
            .after(TimelineLabel::new("t3+=0.3"));

        let (start, end) = request.labels(4);
        assert_eq!(start.as_str(), "t3+=0.3");
        assert_eq!(end.to_string(), "t3+=0.3+=0.25");
    }

    #[test]
    fn defaults_are_applied() {
        let request = TransitionRequest::new(TargetId(2), Property::PositionX, 3.0);
        assert_eq!(request.duration, DEFAULT_DURATION);
        assert_eq!(request.easing, Easing::QuadOut);
        assert!(request.after.is_none());
    }

    #[test]
    fn status_follows_the_notification() {
        let (tx, rx) = bounded(1);
        let handle = TransitionHandle::new(1, TimelineLabel::new("a"), TimelineLabel::new("b"), rx);

        assert_eq!(handle.status(), TransitionStatus::Pending);
        tx.send(()).unwrap();
        assert!(handle.is_complete());

        drop(tx);
        assert_eq!(handle.status(), TransitionStatus::Complete);
    }

    #[test]
    fn dropped_sender_abandons() {
        let (tx, rx) = bounded::<()>(1);
        let handle = TransitionHandle::new(1, TimelineLabel::new("a"), TimelineLabel::new("b"), rx);

        drop(tx);
        assert_eq!(
            handle.wait_timeout(Duration::from_millis(10)),
            TransitionStatus::Abandoned
        );
    }

    #[test]
    fn wait_times_out_while_pending() {
        let (_tx, rx) = bounded::<()>(1);
        let handle = TransitionHandle::new(1, TimelineLabel::new("a"), TimelineLabel::new("b"), rx);

        assert_eq!(
            handle.wait_timeout(Duration::from_millis(5)),
            TransitionStatus::Pending
        );
    }
}
