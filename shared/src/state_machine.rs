//! Tracking State Machine
//!
//! Encodes the start/stop idempotence contract: starting while tracking and
//! stopping while idle are both self-loops.

use crate::WatchId;

/// Tracking state of one device context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingState {
    /// No location watch is active
    Idle,
    /// A location watch is active; the context owns the handle
    Tracking(WatchId),
}

impl TrackingState {
    pub fn is_tracking(&self) -> bool {
        matches!(self, TrackingState::Tracking(_))
    }
}

impl Default for TrackingState {
    fn default() -> Self {
        TrackingState::Idle
    }
}

/// Result of a tracking transition attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingTransition {
    /// Watch acquired; the context now owns the handle
    Started(WatchId),
    /// Watch released; the caller must cancel the returned handle
    Stopped(WatchId),
    /// Start requested while already tracking; the original handle is kept
    AlreadyTracking(WatchId),
    /// Stop requested while idle
    AlreadyIdle,
}

/// The tracking state machine for one device context
#[derive(Debug, Default)]
pub struct TrackingStateMachine {
    state: TrackingState,
}

impl TrackingStateMachine {
    /// Create a new state machine in Idle state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current state
    pub fn state(&self) -> TrackingState {
        self.state
    }

    /// Record a newly acquired watch handle.
    ///
    /// A start while already tracking is a no-op: the original handle stays
    /// in place and the new one is reported back for the caller to discard.
    pub fn record_start(&mut self, watch_id: WatchId) -> TrackingTransition {
        match self.state {
            TrackingState::Idle => {
                self.state = TrackingState::Tracking(watch_id);
                TrackingTransition::Started(watch_id)
            }
            TrackingState::Tracking(existing) => TrackingTransition::AlreadyTracking(existing),
        }
    }

    /// Release the active watch handle, if any
    pub fn record_stop(&mut self) -> TrackingTransition {
        match self.state {
            TrackingState::Idle => TrackingTransition::AlreadyIdle,
            TrackingState::Tracking(watch_id) => {
                self.state = TrackingState::Idle;
                TrackingTransition::Stopped(watch_id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let fsm = TrackingStateMachine::new();
        assert_eq!(fsm.state(), TrackingState::Idle);
    }

    #[test]
    fn test_start_stop_cycle() {
        let mut fsm = TrackingStateMachine::new();
        let watch = WatchId::new(1);

        let result = fsm.record_start(watch);
        assert_eq!(result, TrackingTransition::Started(watch));
        assert_eq!(fsm.state(), TrackingState::Tracking(watch));

        let result = fsm.record_stop();
        assert_eq!(result, TrackingTransition::Stopped(watch));
        assert_eq!(fsm.state(), TrackingState::Idle);
    }

    #[test]
    fn test_double_start_keeps_original_handle() {
        let mut fsm = TrackingStateMachine::new();
        let first = WatchId::new(1);
        let second = WatchId::new(2);

        fsm.record_start(first);
        let result = fsm.record_start(second);

        assert_eq!(result, TrackingTransition::AlreadyTracking(first));
        assert_eq!(fsm.state(), TrackingState::Tracking(first));
    }

    #[test]
    fn test_stop_while_idle_is_noop() {
        let mut fsm = TrackingStateMachine::new();

        let result = fsm.record_stop();
        assert_eq!(result, TrackingTransition::AlreadyIdle);
        assert_eq!(fsm.state(), TrackingState::Idle);
    }
}
