//! Connect-mode state machine.
//!
//! Wiring is a two-step gesture: pick a source gate, then pick a target.
//! The pending source is UI state and never part of the saved graph.

use crate::document::Wire;
use crate::error::{GraphError, GraphResult};
use crate::gate::GateId;

/// Pending-source state of the connect gesture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConnectionState {
    /// No source picked.
    #[default]
    Idle,
    /// A source was picked and waits for a target.
    SourceSelected(GateId),
}

/// Result of completing a connect gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// A new wire from the pending source to the target.
    Connected(Wire),
    /// Target was the source itself; nothing was wired.
    SelfLoopRejected,
}

impl ConnectionState {
    /// Pick `id` as the source, replacing any earlier pick.
    pub fn select(&mut self, id: GateId) {
        *self = ConnectionState::SourceSelected(id);
    }

    /// Drop the pending source, returning it.
    pub fn clear(&mut self) -> Option<GateId> {
        match std::mem::take(self) {
            ConnectionState::Idle => None,
            ConnectionState::SourceSelected(id) => Some(id),
        }
    }

    pub fn pending(&self) -> Option<&GateId> {
        match self {
            ConnectionState::Idle => None,
            ConnectionState::SourceSelected(id) => Some(id),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, ConnectionState::Idle)
    }

    /// Finish the gesture at `target`. Always leaves the state idle.
    ///
    /// Fails with [`GraphError::NoSourceSelected`] when nothing was picked.
    pub fn complete(&mut self, target: GateId) -> GraphResult<ConnectOutcome> {
        match self.clear() {
            None => Err(GraphError::NoSourceSelected),
            Some(source) if source == target => Ok(ConnectOutcome::SelfLoopRejected),
            Some(source) => Ok(ConnectOutcome::Connected(Wire::new(source, target))),
        }
    }
}
