//! Gate definitions for the circuit canvas.

use crate::error::GraphError;
use crate::routing::GateSize;
use crate::snap::step_on_grid;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

/// Kind of logic gate a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateKind {
    Input,
    Output,
    And,
    Or,
    Not,
    Nand,
    Nor,
    Xor,
}

impl GateKind {
    /// Kinds offered by the toolbox, in palette order.
    pub const TOOLBOX: [GateKind; 5] = [
        GateKind::Input,
        GateKind::Output,
        GateKind::And,
        GateKind::Or,
        GateKind::Not,
    ];

    /// Every known kind.
    pub const ALL: [GateKind; 8] = [
        GateKind::Input,
        GateKind::Output,
        GateKind::And,
        GateKind::Or,
        GateKind::Not,
        GateKind::Nand,
        GateKind::Nor,
        GateKind::Xor,
    ];

    /// Display name (`"AND"`, `"INPUT"`, ...).
    pub fn name(self) -> &'static str {
        match self {
            GateKind::Input => "INPUT",
            GateKind::Output => "OUTPUT",
            GateKind::And => "AND",
            GateKind::Or => "OR",
            GateKind::Not => "NOT",
            GateKind::Nand => "NAND",
            GateKind::Nor => "NOR",
            GateKind::Xor => "XOR",
        }
    }

    /// Lowercase prefix used when generating gate ids.
    pub fn id_prefix(self) -> &'static str {
        match self {
            GateKind::Input => "input",
            GateKind::Output => "output",
            GateKind::And => "and",
            GateKind::Or => "or",
            GateKind::Not => "not",
            GateKind::Nand => "nand",
            GateKind::Nor => "nor",
            GateKind::Xor => "xor",
        }
    }

    /// Names of the input pins this kind exposes.
    pub fn input_pins(self) -> &'static [&'static str] {
        match self {
            GateKind::Input => &[],
            GateKind::Output | GateKind::Not => &["a"],
            GateKind::And | GateKind::Or | GateKind::Nand | GateKind::Nor | GateKind::Xor => {
                &["a", "b"]
            }
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GateKind {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        GateKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| GraphError::UnknownGateKind(s.to_string()))
    }
}

/// Process-wide counter backing gate id generation.
static GATE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Stable identifier of a gate.
///
/// Wires refer to gates by id only, so an id may outlive its gate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GateId(String);

impl GateId {
    /// Wrap an existing id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh id for a gate of `kind`, e.g. `and_7`.
    ///
    /// The numeric part comes from a monotonically increasing counter, so two
    /// calls within one process never return the same id.
    pub fn generate(kind: GateKind) -> Self {
        let n = GATE_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self(format!("{}_{}", kind.id_prefix(), n))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First eight characters, as shown on the gate body.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Display for GateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for GateId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for GateId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GateId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for GateId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&GateId> for GateId {
    fn from(id: &GateId) -> Self {
        id.clone()
    }
}

/// Integer canvas position. Gate positions are always grid multiples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: i64,
    pub y: i64,
}

impl GridPoint {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Move by whole grid cells, saturating at the outermost grid multiple.
    pub fn step(self, dx: i64, dy: i64, grid: i64) -> Self {
        Self::new(step_on_grid(self.x, dx, grid), step_on_grid(self.y, dy, grid))
    }

    pub fn to_point(self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }
}

/// A gate placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    pub(crate) id: GateId,
    pub(crate) kind: GateKind,
    /// Top-left corner of the gate body.
    pub(crate) position: GridPoint,
}

impl Gate {
    /// Create a gate with a freshly generated id.
    ///
    /// `position` is taken as-is; callers place it on the grid.
    pub fn new(kind: GateKind, position: GridPoint) -> Self {
        Self {
            id: GateId::generate(kind),
            kind,
            position,
        }
    }

    pub fn id(&self) -> &GateId {
        &self.id
    }

    pub fn kind(&self) -> GateKind {
        self.kind
    }

    pub fn position(&self) -> GridPoint {
        self.position
    }

    /// Text drawn on the gate body: kind on the first line, short id below.
    pub fn label(&self) -> String {
        format!("{}\n{}", self.kind, self.id.short())
    }

    /// Bounding box of the gate body.
    pub fn bounds(&self, size: GateSize) -> Rect {
        let origin = self.position.to_point();
        Rect::new(
            origin.x,
            origin.y,
            origin.x + size.width,
            origin.y + size.height,
        )
    }

    /// Hit test against the gate body, inflated by `tolerance`.
    pub fn hit_test(&self, point: Point, size: GateSize, tolerance: f64) -> bool {
        self.bounds(size).inflate(tolerance, tolerance).contains(point)
    }
}
