//! The graph model: owns the document and the connect gesture state.
//!
//! Every mutation goes through [`GraphModel`]. Renderers read immutable
//! [`GraphSnapshot`]s and never touch the model directly.

use crate::command::{Command, CommandOutcome, Direction};
use crate::config::EditorConfig;
use crate::connection::{ConnectOutcome, ConnectionState};
use crate::document::{GraphDocument, Wire};
use crate::error::GraphResult;
use crate::gate::{Gate, GateId, GateKind, GridPoint};
use crate::routing::{EdgeRoute, EdgeStyle, GateSize, route_edge};
use crate::snap::snap;
use serde::Serialize;
use std::collections::HashMap;

/// Editable circuit graph with its pending connect selection.
#[derive(Debug, Clone)]
pub struct GraphModel {
    document: GraphDocument,
    connection: ConnectionState,
    config: EditorConfig,
    revision: u64,
}

impl Default for GraphModel {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphModel {
    /// Create an empty model with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Create an empty model. `config` is expected to be validated.
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            document: GraphDocument::with_history_limit(config.max_undo_history),
            connection: ConnectionState::default(),
            config,
            revision: 0,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn document(&self) -> &GraphDocument {
        &self.document
    }

    pub fn gate(&self, id: &str) -> Option<&Gate> {
        self.document.gate(id)
    }

    pub fn wires(&self) -> &[Wire] {
        self.document.wires()
    }

    /// Source gate picked for the next connection, if any.
    pub fn pending_source(&self) -> Option<&GateId> {
        self.connection.pending()
    }

    pub fn connection_state(&self) -> &ConnectionState {
        &self.connection
    }

    /// Bumped on every state change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    fn grid_position(&self, raw_x: f64, raw_y: f64) -> GridPoint {
        let grid = self.config.grid_size;
        GridPoint::new(snap(raw_x, grid), snap(raw_y, grid))
    }

    /// Add a gate of `kind` at the spawn position and return its id.
    pub fn add_node(&mut self, kind: GateKind) -> GateId {
        let spawn = self.config.spawn_position;
        self.add_node_at(kind, spawn.x as f64, spawn.y as f64)
    }

    /// Add a gate of `kind` at the grid point nearest to the raw position.
    pub fn add_node_at(&mut self, kind: GateKind, raw_x: f64, raw_y: f64) -> GateId {
        let position = self.grid_position(raw_x, raw_y);
        self.document.push_undo();
        let id = self.document.insert_gate(Gate::new(kind, position));
        self.touch();
        log::debug!("Added {kind} gate {id} at {},{}", position.x, position.y);
        id
    }

    /// Record an undo point before a drag of `id` starts.
    ///
    /// Moves do not checkpoint on their own; a whole drag is one undo step.
    pub fn begin_move(&mut self, id: &str) {
        if self.document.contains(id) {
            self.document.push_undo();
        }
    }

    /// Move a gate to the grid point nearest to the raw position.
    ///
    /// Unknown ids are ignored. Returns whether the gate exists. Wires are
    /// untouched; their routes follow the gate on the next render.
    ///
    /// A move that changes the position discards the redo history. It does
    /// not record an undo point; call [`begin_move`](Self::begin_move) first
    /// to make the move undoable.
    pub fn move_node(&mut self, id: &str, raw_x: f64, raw_y: f64) -> bool {
        let position = self.grid_position(raw_x, raw_y);
        self.place(id, position)
    }

    /// Move a gate by exactly one grid step.
    ///
    /// At the edge of the coordinate range the gate stays on the outermost
    /// grid line.
    pub fn nudge_node(&mut self, id: &str, direction: Direction) -> bool {
        let grid = self.config.grid_size;
        let (dx, dy) = direction.step();
        let Some(current) = self.document.gate(id).map(Gate::position) else {
            return false;
        };
        let target = current.step(dx, dy, grid);
        if target != current {
            self.document.push_undo();
        }
        self.place(id, target)
    }

    fn place(&mut self, id: &str, position: GridPoint) -> bool {
        let Some(gate) = self.document.gate_mut(id) else {
            log::trace!("Ignoring move of unknown gate {id}");
            return false;
        };
        if gate.position != position {
            gate.position = position;
            self.document.discard_redo();
            self.touch();
        }
        true
    }

    /// Delete a gate and every wire attached to it.
    ///
    /// The pending source is kept even if it was this gate.
    ///
    /// Deleting an unknown id is a no-op, with one exception: stale wires
    /// that still name the id are swept, so the edge set can change even
    /// though no gate was removed. This keeps "no wire touches a deleted id"
    /// true for every graph.
    pub fn delete_node(&mut self, id: &str) -> Option<Gate> {
        let attached = self.document.wires_of(id).count();
        if attached == 0 && !self.document.contains(id) {
            return None;
        }
        self.document.push_undo();
        let removed = self.document.remove_gate(id);
        self.touch();
        log::debug!("Deleted gate {id} and {attached} attached wire(s)");
        removed
    }

    /// Pick `id` as the source of the next connection.
    ///
    /// Overwrites any earlier pick. The id is not checked.
    pub fn select_source(&mut self, id: impl Into<GateId>) {
        let id = id.into();
        log::debug!("Selected {id} as connection source");
        self.connection.select(id);
        self.touch();
    }

    pub fn clear_selection(&mut self) {
        if self.connection.clear().is_some() {
            self.touch();
        }
    }

    /// Wire the pending source to `target` and return to idle.
    ///
    /// Without a pending source this fails with
    /// [`GraphError::NoSourceSelected`](crate::GraphError::NoSourceSelected)
    /// and changes nothing. Targeting the source itself is dropped silently.
    /// Neither endpoint has to exist, and duplicates are allowed.
    pub fn connect(&mut self, target: impl Into<GateId>) -> GraphResult<ConnectOutcome> {
        let target = target.into();
        let outcome = match self.connection.complete(target) {
            Ok(outcome) => outcome,
            Err(err) => {
                log::warn!("Connect attempted with no source selected");
                return Err(err);
            }
        };
        if let ConnectOutcome::Connected(wire) = &outcome {
            self.document.push_undo();
            self.document.push_wire(wire.clone());
            log::debug!("Connected {} -> {}", wire.from, wire.to);
        }
        self.touch();
        Ok(outcome)
    }

    /// Remove every wire from `from` to `to`. Returns how many were removed.
    pub fn disconnect(&mut self, from: &str, to: &str) -> usize {
        let existing = self
            .document
            .wires()
            .iter()
            .any(|wire| wire.from.as_str() == from && wire.to.as_str() == to);
        if !existing {
            return 0;
        }
        self.document.push_undo();
        let removed = self.document.remove_wires_between(from, to);
        self.touch();
        log::debug!("Disconnected {removed} wire(s) {from} -> {to}");
        removed
    }

    /// Remove all gates and wires and drop the pending source.
    ///
    /// Returns whether anything changed. Clearing an empty graph records no
    /// undo point.
    pub fn clear(&mut self) -> bool {
        if self.document.is_empty() && self.document.wires().is_empty() {
            let had_source = self.connection.clear().is_some();
            if had_source {
                self.touch();
            }
            return had_source;
        }
        self.document.push_undo();
        self.document.clear();
        self.connection.clear();
        self.touch();
        log::info!("Cleared circuit");
        true
    }

    pub fn undo(&mut self) -> bool {
        let undone = self.document.undo();
        if undone {
            self.touch();
            log::info!("Undo");
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.document.redo();
        if redone {
            self.touch();
            log::info!("Redo");
        }
        redone
    }

    pub fn can_undo(&self) -> bool {
        self.document.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.document.can_redo()
    }

    /// Route for `wire`, or `None` if an endpoint is missing.
    pub fn edge_route(&self, wire: &Wire) -> Option<EdgeRoute> {
        route_edge(
            self.document.gate(wire.from.as_str()),
            self.document.gate(wire.to.as_str()),
            self.config.gate_size,
        )
    }

    /// Routes of every wire that can currently be drawn.
    pub fn routes(&self) -> impl Iterator<Item = (&Wire, EdgeRoute)> {
        self.document
            .wires()
            .iter()
            .filter_map(|wire| self.edge_route(wire).map(|route| (wire, route)))
    }

    /// Immutable copy of the state a renderer needs.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot::new(
            self.revision,
            self.document.gates_ordered().cloned().collect(),
            self.document.wires().to_vec(),
            self.connection.pending().cloned(),
            self.config.gate_size,
            self.config.edge_style,
        )
    }

    /// Apply one input command.
    pub fn apply(&mut self, command: Command) -> GraphResult<CommandOutcome> {
        let outcome = match command {
            Command::AddGate { kind } => CommandOutcome::GateAdded(self.add_node(kind)),
            Command::MoveGate { id, x, y } => {
                let before = self.revision;
                self.move_node(id.as_str(), x, y);
                CommandOutcome::changed_if(self.revision != before)
            }
            Command::DeleteGate { id } => {
                let before = self.revision;
                self.delete_node(id.as_str());
                CommandOutcome::changed_if(self.revision != before)
            }
            Command::SelectSource { id } => {
                self.select_source(id);
                CommandOutcome::Changed
            }
            Command::ClearSelection => {
                let had_source = !self.connection.is_idle();
                self.clear_selection();
                CommandOutcome::changed_if(had_source)
            }
            Command::Connect { target } => match self.connect(target)? {
                ConnectOutcome::Connected(wire) => CommandOutcome::WireAdded(wire),
                ConnectOutcome::SelfLoopRejected => CommandOutcome::SelfLoopRejected,
            },
            Command::Disconnect { from, to } => {
                CommandOutcome::changed_if(self.disconnect(from.as_str(), to.as_str()) > 0)
            }
            Command::Nudge { id, direction } => {
                CommandOutcome::changed_if(self.nudge_node(id.as_str(), direction))
            }
            Command::Clear => CommandOutcome::changed_if(self.clear()),
            Command::Undo => CommandOutcome::changed_if(self.undo()),
            Command::Redo => CommandOutcome::changed_if(self.redo()),
        };
        Ok(outcome)
    }
}

/// Read-only view of the graph handed to renderers.
#[derive(Debug, Clone, Serialize)]
pub struct GraphSnapshot {
    revision: u64,
    /// Gates back to front.
    gates: Vec<Gate>,
    wires: Vec<Wire>,
    /// Pending connection source; UI state, not serialized.
    #[serde(skip)]
    pending_source: Option<GateId>,
    gate_size: GateSize,
    edge_style: EdgeStyle,
    #[serde(skip)]
    index: HashMap<GateId, usize>,
}

impl GraphSnapshot {
    fn new(
        revision: u64,
        gates: Vec<Gate>,
        wires: Vec<Wire>,
        pending_source: Option<GateId>,
        gate_size: GateSize,
        edge_style: EdgeStyle,
    ) -> Self {
        let index = gates
            .iter()
            .enumerate()
            .map(|(i, gate)| (gate.id().clone(), i))
            .collect();
        Self {
            revision,
            gates,
            wires,
            pending_source,
            gate_size,
            edge_style,
            index,
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Gates back to front.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    pub fn pending_source(&self) -> Option<&GateId> {
        self.pending_source.as_ref()
    }

    pub fn gate_size(&self) -> GateSize {
        self.gate_size
    }

    pub fn edge_style(&self) -> EdgeStyle {
        self.edge_style
    }

    pub fn gate(&self, id: &str) -> Option<&Gate> {
        self.index
            .get(id)
            .and_then(|&i| self.gates.get(i))
            .filter(|gate| gate.id().as_str() == id)
    }

    /// Route for `wire`, or `None` if an endpoint is missing.
    pub fn route(&self, wire: &Wire) -> Option<EdgeRoute> {
        route_edge(
            self.gate(wire.from.as_str()),
            self.gate(wire.to.as_str()),
            self.gate_size,
        )
    }
}
