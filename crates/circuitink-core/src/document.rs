//! Graph document: gates, wires and undo history.

use crate::gate::{Gate, GateId};
use crate::routing::GateSize;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Default number of undo states to keep.
pub const MAX_UNDO_HISTORY: usize = 50;

/// A directed wire between two gates, stored by id.
///
/// Either id may refer to a gate that no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wire {
    pub from: GateId,
    pub to: GateId,
}

impl Wire {
    pub fn new(from: impl Into<GateId>, to: impl Into<GateId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Whether either end of the wire is attached to `id`.
    pub fn touches(&self, id: &str) -> bool {
        self.from.as_str() == id || self.to.as_str() == id
    }
}

/// A snapshot of graph state for undo/redo.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DocumentSnapshot {
    gates: HashMap<GateId, Gate>,
    z_order: Vec<GateId>,
    wires: Vec<Wire>,
}

fn default_history_limit() -> usize {
    MAX_UNDO_HISTORY
}

/// The circuit being edited: gates keyed by id plus the wire list.
///
/// Duplicate wires between the same pair are kept; nothing here deduplicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphDocument {
    /// Unique document identifier.
    pub id: String,
    gates: HashMap<GateId, Gate>,
    /// Insertion order of gates (back to front).
    z_order: Vec<GateId>,
    wires: Vec<Wire>,
    #[serde(skip)]
    undo_stack: Vec<DocumentSnapshot>,
    #[serde(skip)]
    redo_stack: Vec<DocumentSnapshot>,
    #[serde(skip, default = "default_history_limit")]
    history_limit: usize,
}

impl Default for GraphDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::with_history_limit(MAX_UNDO_HISTORY)
    }

    /// Create an empty document keeping at most `limit` undo states.
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            gates: HashMap::new(),
            z_order: Vec::new(),
            wires: Vec::new(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            history_limit: limit,
        }
    }

    fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            gates: self.gates.clone(),
            z_order: self.z_order.clone(),
            wires: self.wires.clone(),
        }
    }

    fn restore(&mut self, snapshot: DocumentSnapshot) {
        self.gates = snapshot.gates;
        self.z_order = snapshot.z_order;
        self.wires = snapshot.wires;
    }

    /// Push current state to undo stack (call before making changes).
    pub fn push_undo(&mut self) {
        if self.history_limit == 0 {
            return;
        }
        let snapshot = self.snapshot();
        self.undo_stack.push(snapshot);
        self.redo_stack.clear();

        if self.undo_stack.len() > self.history_limit {
            self.undo_stack.remove(0);
        }
    }

    /// Undo the last change.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.undo_stack.pop() else {
            return false;
        };
        let current = self.snapshot();
        self.redo_stack.push(current);
        self.restore(snapshot);
        true
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.redo_stack.pop() else {
            return false;
        };
        let current = self.snapshot();
        self.undo_stack.push(current);
        self.restore(snapshot);
        true
    }

    /// Drop redo states after an edit that bypassed [`push_undo`](Self::push_undo).
    pub(crate) fn discard_redo(&mut self) {
        self.redo_stack.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Insert a gate, returning its id.
    pub fn insert_gate(&mut self, gate: Gate) -> GateId {
        let id = gate.id().clone();
        if self.gates.insert(id.clone(), gate).is_none() {
            self.z_order.push(id.clone());
        }
        id
    }

    /// Remove a gate and every wire attached to it.
    ///
    /// The wire cascade runs even when no gate with `id` exists, so stale
    /// wires pointing at `id` are swept as well.
    pub fn remove_gate(&mut self, id: &str) -> Option<Gate> {
        let removed = self.gates.remove(id);
        if removed.is_some() {
            self.z_order.retain(|gate_id| gate_id.as_str() != id);
        }
        self.wires.retain(|wire| !wire.touches(id));
        removed
    }

    pub fn gate(&self, id: &str) -> Option<&Gate> {
        self.gates.get(id)
    }

    pub(crate) fn gate_mut(&mut self, id: &str) -> Option<&mut Gate> {
        self.gates.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.gates.contains_key(id)
    }

    /// Gates in insertion order (back to front).
    pub fn gates_ordered(&self) -> impl Iterator<Item = &Gate> {
        self.z_order.iter().filter_map(|id| self.gates.get(id))
    }

    /// Append a wire. Endpoints are not checked.
    pub fn push_wire(&mut self, wire: Wire) {
        self.wires.push(wire);
    }

    /// Remove every wire running from `from` to `to`. Returns how many went.
    pub fn remove_wires_between(&mut self, from: &str, to: &str) -> usize {
        let before = self.wires.len();
        self.wires.retain(|wire| !(wire.from.as_str() == from && wire.to.as_str() == to));
        before - self.wires.len()
    }

    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    /// Wires attached to `id` at either end.
    pub fn wires_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Wire> + 'a {
        self.wires.iter().filter(move |wire| wire.touches(id))
    }

    fn resolves(&self, wire: &Wire) -> bool {
        self.gates.contains_key(&wire.from) && self.gates.contains_key(&wire.to)
    }

    /// Wires whose endpoints both exist.
    pub fn resolved_wires(&self) -> impl Iterator<Item = &Wire> {
        self.wires.iter().filter(|wire| self.resolves(wire))
    }

    /// Wires with at least one missing endpoint.
    pub fn dangling_wires(&self) -> impl Iterator<Item = &Wire> {
        self.wires.iter().filter(|wire| !self.resolves(wire))
    }

    /// Remove all gates and wires.
    pub fn clear(&mut self) {
        self.gates.clear();
        self.z_order.clear();
        self.wires.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Number of gates.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Bounding box of all gates.
    pub fn bounds(&self, size: GateSize) -> Option<Rect> {
        self.gates
            .values()
            .map(|gate| gate.bounds(size))
            .reduce(|acc, bounds| acc.union(bounds))
    }

    /// Gates under a point, front to back.
    pub fn gates_at_point(&self, point: Point, size: GateSize, tolerance: f64) -> Vec<GateId> {
        self.z_order
            .iter()
            .rev()
            .filter(|id| {
                self.gates
                    .get(*id)
                    .is_some_and(|gate| gate.hit_test(point, size, tolerance))
            })
            .cloned()
            .collect()
    }
}
