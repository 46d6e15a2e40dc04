//! CircuitInk Core Library
//!
//! Platform-agnostic graph model for the CircuitInk logic-gate editor:
//! gates and wires, the connect state machine, grid snapping and wire routing.

pub mod command;
pub mod config;
pub mod connection;
pub mod document;
pub mod error;
pub mod gate;
pub mod model;
pub mod routing;
pub mod snap;

pub use command::{Command, CommandOutcome, Direction};
pub use config::{ConfigError, EditorConfig};
pub use connection::{ConnectOutcome, ConnectionState};
pub use document::{GraphDocument, Wire};
pub use error::{GraphError, GraphResult};
pub use gate::{Gate, GateId, GateKind, GridPoint};
pub use model::{GraphModel, GraphSnapshot};
pub use routing::{EdgeRoute, EdgeStyle, GateSize, route_between, route_edge};
pub use snap::{GRID_SIZE, snap, snap_point};
