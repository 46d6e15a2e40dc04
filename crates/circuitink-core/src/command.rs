//! Commands issued by the input layer.
//!
//! Pointer and button handlers translate gestures into [`Command`]s and hand
//! them to [`GraphModel::apply`](crate::model::GraphModel::apply) in the order
//! they happened. Pointer coordinates are passed through raw; the model snaps.

use crate::document::Wire;
use crate::gate::{GateId, GateKind};
use serde::{Deserialize, Serialize};

/// Direction of a one-step nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Unit step in grid cells (y grows downward).
    pub fn step(self) -> (i64, i64) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }
}

/// An editing operation on the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    AddGate { kind: GateKind },
    MoveGate { id: GateId, x: f64, y: f64 },
    DeleteGate { id: GateId },
    SelectSource { id: GateId },
    ClearSelection,
    Connect { target: GateId },
    Disconnect { from: GateId, to: GateId },
    Nudge { id: GateId, direction: Direction },
    Clear,
    Undo,
    Redo,
}

/// What applying a command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A gate was created.
    GateAdded(GateId),
    /// A wire was created.
    WireAdded(Wire),
    /// A connect gesture targeted its own source and was dropped.
    SelfLoopRejected,
    /// State changed.
    Changed,
    /// Nothing to do (unknown id, empty history, ...).
    Unchanged,
}

impl CommandOutcome {
    pub(crate) fn changed_if(changed: bool) -> Self {
        if changed {
            CommandOutcome::Changed
        } else {
            CommandOutcome::Unchanged
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_steps() {
        assert_eq!(Direction::Left.step(), (-1, 0));
        assert_eq!(Direction::Down.step(), (0, 1));
    }

    #[test]
    fn test_command_from_json() {
        let command: Command =
            serde_json::from_str(r#"{ "type": "move_gate", "id": "and_1", "x": 47.5, "y": -3 }"#)
                .unwrap();
        assert_eq!(
            command,
            Command::MoveGate {
                id: GateId::new("and_1"),
                x: 47.5,
                y: -3.0,
            }
        );

        let command: Command =
            serde_json::from_str(r#"{ "type": "add_gate", "kind": "XOR" }"#).unwrap();
        assert_eq!(command, Command::AddGate { kind: GateKind::Xor });

        let command: Command = serde_json::from_str(r#"{ "type": "undo" }"#).unwrap();
        assert_eq!(command, Command::Undo);
    }
}
