//=========================================================================
// Channel Animator
//=========================================================================
//
// Forwards transition requests to the animation collaborator over a
// bounded crossbeam queue.
//
// Architecture:
//   Card handlers → ChannelAnimator::request() → try_send ─┐
//                                                          ↓
//   Collaborator (any thread) ← Receiver<PendingTransition>
//                                   └─ complete() → TransitionHandle
//
// Input handling never blocks on the collaborator: a full or closed queue
// abandons the request instead.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::Cell;
use std::fmt;

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::request::{TimelineLabel, TransitionHandle, TransitionRequest};
use super::Animator;

//=== PendingTransition ===================================================

/// A request waiting in the collaborator's queue.
///
/// Dropping it without calling [`complete`](Self::complete) marks the
/// transition as abandoned.
pub struct PendingTransition {
    id: u64,
    request: TransitionRequest,
    start_label: TimelineLabel,
    end_label: TimelineLabel,
    done: Sender<()>,
}

impl PendingTransition {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn request(&self) -> &TransitionRequest {
        &self.request
    }

    pub fn start_label(&self) -> &TimelineLabel {
        &self.start_label
    }

    pub fn end_label(&self) -> &TimelineLabel {
        &self.end_label
    }

    /// Notifies the requester that the transition finished.
    pub fn complete(self) {
        // The requester may have dropped its handle already.
        let _ = self.done.try_send(());
    }
}

impl fmt::Debug for PendingTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingTransition")
            .field("id", &self.id)
            .field("request", &self.request)
            .field("end", &self.end_label.as_str())
            .finish()
    }
}

//=== ChannelAnimator =====================================================

/// [`Animator`] backed by a bounded channel.
pub struct ChannelAnimator {
    sender: Sender<PendingTransition>,
    next_id: Cell<u64>,
}

impl ChannelAnimator {
    /// Creates the animator and the receiving end for the collaborator.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn new(capacity: usize) -> (Self, Receiver<PendingTransition>) {
        assert!(capacity > 0, "Transition queue capacity must be positive");

        let (sender, receiver) = bounded(capacity);
        let animator = Self {
            sender,
            next_id: Cell::new(0),
        };
        (animator, receiver)
    }

    /// Number of requests waiting in the queue.
    pub fn queued(&self) -> usize {
        self.sender.len()
    }
}

impl Animator for ChannelAnimator {
    fn request(&self, request: TransitionRequest) -> TransitionHandle {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let (start_label, end_label) = request.labels(id);
        let (done, notified) = bounded(1);
        let handle = TransitionHandle::new(id, start_label.clone(), end_label.clone(), notified);

        let pending = PendingTransition {
            id,
            request,
            start_label,
            end_label,
            done,
        };

        match self.sender.try_send(pending) {
            Ok(()) => {
                trace!(target: "transition", "Queued transition {}", id);
            }
            Err(TrySendError::Full(pending)) => {
                warn!(
                    target: "transition",
                    "Transition queue full, abandoning {} ({:?} of {})",
                    id,
                    pending.request.property,
                    pending.request.target
                );
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!(target: "transition", "Animator disconnected, abandoning transition {}", id);
            }
        }

        handle
    }
}

impl fmt::Debug for ChannelAnimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelAnimator")
            .field("queued", &self.queued())
            .field("next_id", &self.next_id.get())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transition::{Property, TargetId, TransitionStatus};
    use std::thread;
    use std::time::Duration;

    fn scale_to(value: f32) -> TransitionRequest {
        TransitionRequest::new(TargetId(1), Property::Scale, value)
    }

    #[test]
    fn requests_reach_the_collaborator_in_order() {
        let (animator, queue) = ChannelAnimator::new(4);

        let first = animator.request(scale_to(1.1));
        let second = animator.request(scale_to(1.0));

        assert_eq!(first.id(), 0);
        assert_eq!(second.id(), 1);
        assert_eq!(animator.queued(), 2);

        let received: Vec<_> = queue.try_iter().map(|p| p.request().to).collect();
        assert_eq!(received, vec![1.1, 1.0]);
    }

    #[test]
    fn completion_is_reported_to_the_handle() {
        let (animator, queue) = ChannelAnimator::new(1);
        let handle = animator.request(scale_to(1.1));

        assert_eq!(handle.status(), TransitionStatus::Pending);

        let pending = queue.try_recv().unwrap();
        assert_eq!(pending.end_label(), handle.end_label());
        pending.complete();

        assert_eq!(handle.status(), TransitionStatus::Complete);
    }

    #[test]
    fn completion_from_another_thread() {
        let (animator, queue) = ChannelAnimator::new(1);
        let handle = animator.request(scale_to(1.1));

        let worker = thread::spawn(move || {
            if let Ok(pending) = queue.recv() {
                pending.complete();
            }
        });

        assert_eq!(
            handle.wait_timeout(Duration::from_secs(5)),
            TransitionStatus::Complete
        );
        worker.join().unwrap();
    }

    #[test]
    fn full_queue_abandons_without_blocking() {
        let (animator, _queue) = ChannelAnimator::new(1);

        let kept = animator.request(scale_to(1.1));
        let dropped = animator.request(scale_to(1.0));

        assert_eq!(kept.status(), TransitionStatus::Pending);
        assert_eq!(dropped.status(), TransitionStatus::Abandoned);
    }

    #[test]
    fn closed_queue_abandons() {
        let (animator, queue) = ChannelAnimator::new(1);
        drop(queue);

        let handle = animator.request(scale_to(1.1));
        assert_eq!(handle.status(), TransitionStatus::Abandoned);
    }

    #[test]
    fn dropped_pending_transition_abandons() {
        let (animator, queue) = ChannelAnimator::new(1);
        let handle = animator.request(scale_to(1.1));

        drop(queue.try_recv().unwrap());
        assert_eq!(handle.status(), TransitionStatus::Abandoned);
    }

    #[test]
    #[should_panic(expected = "capacity")]
    fn zero_capacity_panics() {
        let _ = ChannelAnimator::new(0);
    }
}
