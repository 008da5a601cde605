//! Output events emitted by a tick for the presentation layer
//!
//! The engine never draws or plays anything. It reports where sparks and
//! photons should appear and a human-readable line for each reaction.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Spark,
    Photon,
    ReactionLog,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimEvent {
    pub kind: EventKind,
    pub position: Vec2,
    /// Number of visual elements to emit (1 for log lines)
    pub count: u32,
    pub message: Option<String>,
}

/// Observer for reaction descriptions (HUD feed, console log, ...)
pub trait ReactionSink {
    fn on_reaction(&mut self, message: &str);
}

impl<F> ReactionSink for F
where
    F: FnMut(&str),
{
    fn on_reaction(&mut self, message: &str) {
        self(message)
    }
}

/// Per-tick event buffer
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<SimEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sparks(&mut self, position: Vec2, count: u32) {
        if count == 0 {
            return;
        }
        self.events.push(SimEvent {
            kind: EventKind::Spark,
            position,
            count,
            message: None,
        });
    }

    pub fn photons(&mut self, position: Vec2, count: u32) {
        if count == 0 {
            return;
        }
        self.events.push(SimEvent {
            kind: EventKind::Photon,
            position,
            count,
            message: None,
        });
    }

    pub fn reaction(&mut self, position: Vec2, message: impl Into<String>) {
        let message = message.into();
        log::debug!("{message} at ({:.1}, {:.1})", position.x, position.y);
        self.events.push(SimEvent {
            kind: EventKind::ReactionLog,
            position,
            count: 1,
            message: Some(message),
        });
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn into_events(self) -> Vec<SimEvent> {
        self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bursts_are_dropped() {
        let mut log = EventLog::new();
        log.sparks(Vec2::ZERO, 0);
        log.photons(Vec2::ZERO, 0);
        assert!(log.is_empty());
    }

    #[test]
    fn reaction_lines_carry_messages() {
        let mut log = EventLog::new();
        log.photons(Vec2::new(1.0, 2.0), 5);
        log.reaction(Vec2::new(1.0, 2.0), "Electron and Positron annihilated");
        let events = log.into_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, EventKind::Photon);
        assert_eq!(events[0].count, 5);
        assert_eq!(events[1].kind, EventKind::ReactionLog);
        assert_eq!(
            events[1].message.as_deref(),
            Some("Electron and Positron annihilated")
        );
    }
}
