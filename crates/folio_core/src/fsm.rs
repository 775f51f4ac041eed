//! Discrete state machines
//!
//! Widgets with a handful of states (navigation shown/hidden, ...) describe
//! them as a transition table keyed by `(state, event)`. Sending an event
//! with no entry for the current state is a no-op, so feeding the same
//! event repeatedly is idempotent.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Identifier for a state within a state machine
pub type StateId = u32;

/// Identifier for an event type
pub type EventId = u32;

const DEFAULT_HISTORY_LIMIT: usize = 16;

/// One edge of the transition table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: StateId,
    pub event: EventId,
    pub to: StateId,
}

impl Transition {
    pub fn new(from: StateId, event: EventId, to: StateId) -> Self {
        Self { from, event, to }
    }
}

/// Builder for [`StateMachine`]
#[derive(Debug)]
pub struct StateMachineBuilder {
    initial_state: StateId,
    table: FxHashMap<(StateId, EventId), StateId>,
    history_limit: usize,
}

impl StateMachineBuilder {
    pub fn new(initial_state: StateId) -> Self {
        Self {
            initial_state,
            table: FxHashMap::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Add a transition; a later edge for the same `(from, event)` replaces it
    pub fn transition(mut self, transition: Transition) -> Self {
        self.table
            .insert((transition.from, transition.event), transition.to);
        self
    }

    /// Shorthand for [`StateMachineBuilder::transition`]
    pub fn on(self, from: StateId, event: EventId, to: StateId) -> Self {
        self.transition(Transition::new(from, event, to))
    }

    /// Keep at most `limit` transitions of history (0 disables it)
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn build(self) -> StateMachine {
        StateMachine {
            current_state: self.initial_state,
            table: self.table,
            history: SmallVec::new(),
            history_limit: self.history_limit,
        }
    }
}

/// A state machine instance
#[derive(Debug)]
pub struct StateMachine {
    current_state: StateId,
    table: FxHashMap<(StateId, EventId), StateId>,
    /// Most recent transitions, oldest first
    history: SmallVec<[Transition; 4]>,
    history_limit: usize,
}

impl StateMachine {
    pub fn builder(initial_state: StateId) -> StateMachineBuilder {
        StateMachineBuilder::new(initial_state)
    }

    pub fn current_state(&self) -> StateId {
        self.current_state
    }

    pub fn is_in(&self, state: StateId) -> bool {
        self.current_state == state
    }

    /// Whether `event` changes state from the current state
    pub fn can_send(&self, event: EventId) -> bool {
        self.table.contains_key(&(self.current_state, event))
    }

    /// Transitions taken, oldest first, bounded by the history limit
    pub fn history(&self) -> &[Transition] {
        &self.history
    }

    /// Send an event. Returns the state after the event.
    pub fn send(&mut self, event: EventId) -> StateId {
        let from = self.current_state;
        let Some(&to) = self.table.get(&(from, event)) else {
            return from;
        };

        self.current_state = to;
        if self.history_limit > 0 {
            if self.history.len() >= self.history_limit {
                self.history.remove(0);
            }
            self.history.push(Transition { from, event, to });
        }
        to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HIDDEN: StateId = 0;
    const VISIBLE: StateId = 1;

    const SHOW: EventId = 1;
    const HIDE: EventId = 2;

    fn toggle() -> StateMachineBuilder {
        StateMachine::builder(HIDDEN)
            .on(HIDDEN, SHOW, VISIBLE)
            .on(VISIBLE, HIDE, HIDDEN)
    }

    #[test]
    fn test_simple_transitions() {
        let mut fsm = toggle().build();
        assert_eq!(fsm.current_state(), HIDDEN);

        assert_eq!(fsm.send(SHOW), VISIBLE);
        assert_eq!(fsm.send(HIDE), HIDDEN);
    }

    #[test]
    fn test_unmatched_event_is_noop() {
        let mut fsm = toggle().build();

        fsm.send(SHOW);
        assert!(!fsm.can_send(SHOW));
        fsm.send(SHOW);
        fsm.send(SHOW);

        assert!(fsm.is_in(VISIBLE));
        assert_eq!(fsm.history(), &[Transition::new(HIDDEN, SHOW, VISIBLE)]);
    }

    #[test]
    fn test_later_edge_replaces_earlier() {
        let mut fsm = toggle().on(HIDDEN, SHOW, 7).build();
        assert_eq!(fsm.send(SHOW), 7);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut fsm = toggle().history_limit(3).build();

        for _ in 0..5 {
            fsm.send(SHOW);
            fsm.send(HIDE);
        }

        assert_eq!(
            fsm.history(),
            &[
                Transition::new(VISIBLE, HIDE, HIDDEN),
                Transition::new(HIDDEN, SHOW, VISIBLE),
                Transition::new(VISIBLE, HIDE, HIDDEN),
            ]
        );
    }

    #[test]
    fn test_history_disabled() {
        let mut fsm = toggle().history_limit(0).build();
        fsm.send(SHOW);
        assert!(fsm.history().is_empty());
        assert!(fsm.is_in(VISIBLE));
    }
}
