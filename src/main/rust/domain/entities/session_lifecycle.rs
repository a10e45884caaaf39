use std::collections::VecDeque;
use std::time::Instant;

use crate::domain::value_objects::SessionState;

/// Number of transitions kept per session
const MAX_HISTORY: usize = 64;

/// State transition record
#[derive(Debug, Clone)]
pub struct StateTransition {
    pub from: SessionState,
    pub to: SessionState,
    pub timestamp: Instant,
    pub reason: Option<String>,
}

/// Transition history of one stream session
#[derive(Debug)]
pub struct SessionLifecycle {
    current_state: SessionState,
    history: VecDeque<StateTransition>,
    transition_count: usize,
    playing_since: Option<Instant>,
}

impl SessionLifecycle {
    pub fn new(initial: SessionState) -> Self {
        Self {
            current_state: initial,
            history: VecDeque::new(),
            transition_count: 0,
            playing_since: None,
        }
    }

    pub fn current_state(&self) -> SessionState {
        self.current_state
    }

    /// Time since playback was last confirmed; `None` unless playing or paused
    pub fn uptime(&self) -> Option<std::time::Duration> {
        self.playing_since.map(|start| start.elapsed())
    }

    pub fn transition_count(&self) -> usize {
        self.transition_count
    }

    pub fn last_transition(&self) -> Option<&StateTransition> {
        self.history.back()
    }

    /// Record a move to `new_state`, returning the previous state
    pub fn transition(&mut self, new_state: SessionState, reason: Option<String>) -> SessionState {
        let from = self.current_state;
        let transition = StateTransition {
            from,
            to: new_state,
            timestamp: Instant::now(),
            reason,
        };

        if self.history.len() == MAX_HISTORY {
            self.history.pop_front();
        }
        self.history.push_back(transition);
        self.transition_count += 1;
        self.current_state = new_state;

        match new_state {
            SessionState::Playing if self.playing_since.is_none() => {
                self.playing_since = Some(Instant::now());
            }
            SessionState::Playing | SessionState::Paused => {}
            _ => self.playing_since = None,
        }

        from
    }

    /// Whether the history shows `from -> to` at some point
    pub fn has_transition(&self, from: SessionState, to: SessionState) -> bool {
        self.history.iter().any(|t| t.from == from && t.to == to)
    }
}

impl Default for SessionLifecycle {
    fn default() -> Self {
        Self::new(SessionState::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let lifecycle = SessionLifecycle::new(SessionState::Disabled);
        assert_eq!(lifecycle.current_state(), SessionState::Disabled);
        assert_eq!(lifecycle.transition_count(), 0);
        assert!(lifecycle.last_transition().is_none());
    }

    #[test]
    fn test_transitions_are_tracked() {
        let mut lifecycle = SessionLifecycle::default();

        assert_eq!(lifecycle.transition(SessionState::Loading, None), SessionState::Idle);
        lifecycle.transition(SessionState::Playing, None);

        assert_eq!(lifecycle.transition_count(), 2);
        assert_eq!(lifecycle.current_state(), SessionState::Playing);
        assert!(lifecycle.has_transition(SessionState::Idle, SessionState::Loading));
    }

    #[test]
    fn test_uptime_survives_pause_but_not_error() {
        let mut lifecycle = SessionLifecycle::default();
        assert!(lifecycle.uptime().is_none());

        lifecycle.transition(SessionState::Loading, None);
        lifecycle.transition(SessionState::Playing, None);
        std::thread::sleep(std::time::Duration::from_millis(10));
        lifecycle.transition(SessionState::Paused, None);

        assert!(lifecycle.uptime().unwrap().as_millis() >= 10);

        lifecycle.transition(SessionState::Errored, Some("decode".to_string()));
        assert!(lifecycle.uptime().is_none());
    }

    #[test]
    fn test_last_transition_keeps_reason() {
        let mut lifecycle = SessionLifecycle::default();
        lifecycle.transition(SessionState::Unsupported, Some("no proxy".to_string()));

        let last = lifecycle.last_transition().unwrap();
        assert_eq!(last.from, SessionState::Idle);
        assert_eq!(last.to, SessionState::Unsupported);
        assert_eq!(last.reason.as_deref(), Some("no proxy"));
    }

    #[test]
    fn test_history_is_bounded() {
        let mut lifecycle = SessionLifecycle::default();
        for _ in 0..100 {
            lifecycle.transition(SessionState::Playing, None);
            lifecycle.transition(SessionState::Paused, None);
        }

        assert_eq!(lifecycle.history.len(), MAX_HISTORY);
        assert_eq!(lifecycle.transition_count(), 200);
    }
}
