//! Scene building from graph snapshots.

use circuitink_core::{EdgeRoute, GateId, GateKind, GraphSnapshot};
use kurbo::{BezPath, Line, Point, Rect};
use peniko::Color;

/// Fill colour of a gate body.
pub fn gate_fill(kind: GateKind) -> Color {
    match kind {
        GateKind::Input => Color::from_rgba8(220, 255, 220, 255),
        GateKind::Output => Color::from_rgba8(240, 240, 255, 255),
        _ => Color::from_rgba8(238, 238, 238, 255),
    }
}

/// A gate ready to draw.
#[derive(Debug, Clone)]
pub struct GateVisual {
    pub id: GateId,
    pub kind: GateKind,
    pub label: String,
    pub rect: Rect,
    pub fill: Color,
    /// Highlight as the pending connection source.
    pub is_pending_source: bool,
}

/// A wire ready to draw.
#[derive(Debug, Clone)]
pub struct WireVisual {
    pub from: GateId,
    pub to: GateId,
    pub route: EdgeRoute,
    pub path: BezPath,
}

/// Everything a renderer draws for one frame.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Revision of the snapshot this scene was built from.
    pub revision: u64,
    /// Gates back to front.
    pub gates: Vec<GateVisual>,
    pub wires: Vec<WireVisual>,
    pub pending_source: Option<GateId>,
    /// Wires left out because an endpoint no longer exists.
    pub skipped_wires: usize,
}

impl Scene {
    /// Build the scene for `snapshot`. Building is pure and can be repeated.
    pub fn build(snapshot: &GraphSnapshot) -> Self {
        let pending = snapshot.pending_source();

        let gates = snapshot
            .gates()
            .iter()
            .map(|gate| GateVisual {
                id: gate.id().clone(),
                kind: gate.kind(),
                label: gate.label(),
                rect: gate.bounds(snapshot.gate_size()),
                fill: gate_fill(gate.kind()),
                is_pending_source: pending == Some(gate.id()),
            })
            .collect();

        let mut wires = Vec::with_capacity(snapshot.wires().len());
        let mut skipped_wires = 0;
        for wire in snapshot.wires() {
            match snapshot.route(wire) {
                Some(route) => wires.push(WireVisual {
                    from: wire.from.clone(),
                    to: wire.to.clone(),
                    path: route.to_path(snapshot.edge_style()),
                    route,
                }),
                None => {
                    log::trace!("Skipping dangling wire {} -> {}", wire.from, wire.to);
                    skipped_wires += 1;
                }
            }
        }

        Self {
            revision: snapshot.revision(),
            gates,
            wires,
            pending_source: pending.cloned(),
            skipped_wires,
        }
    }

    /// Bounding box of everything drawn.
    pub fn bounds(&self) -> Option<Rect> {
        let gates = self.gates.iter().map(|gate| gate.rect);
        let wires = self.wires.iter().map(|wire| wire.route.bounds());
        gates.chain(wires).reduce(|acc, rect| acc.union(rect))
    }
}

/// Background grid lines covering `viewport`.
pub fn grid_lines(viewport: Rect, grid_size: f64) -> Vec<Line> {
    if !(grid_size.is_finite() && grid_size > 0.0) {
        return Vec::new();
    }
    let mut lines = Vec::new();

    let mut x = (viewport.x0 / grid_size).ceil() * grid_size;
    while x <= viewport.x1 {
        lines.push(Line::new(Point::new(x, viewport.y0), Point::new(x, viewport.y1)));
        x += grid_size;
    }

    let mut y = (viewport.y0 / grid_size).ceil() * grid_size;
    while y <= viewport.y1 {
        lines.push(Line::new(Point::new(viewport.x0, y), Point::new(viewport.x1, y)));
        y += grid_size;
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use circuitink_core::{EdgeStyle, EditorConfig, GraphModel};
    use kurbo::PathEl;

    #[test]
    fn test_build_scene() {
        let mut model = GraphModel::new();
        let a = model.add_node(GateKind::Input);
        let b = model.add_node(GateKind::And);
        model.move_node(a.as_str(), 40.0, 40.0);
        model.move_node(b.as_str(), 260.0, 80.0);
        model.select_source(a.clone());
        model.connect(b.clone()).unwrap();
        model.select_source(b.clone());

        let scene = Scene::build(&model.snapshot());

        assert_eq!(scene.gates.len(), 2);
        assert_eq!(scene.gates[0].id, a);
        assert_eq!(scene.gates[0].rect, Rect::new(40.0, 40.0, 140.0, 90.0));
        assert!(!scene.gates[0].is_pending_source);
        assert!(scene.gates[1].is_pending_source);
        assert_eq!(scene.pending_source, Some(b.clone()));

        assert_eq!(scene.wires.len(), 1);
        assert_eq!(scene.skipped_wires, 0);
        assert_eq!(scene.wires[0].route.start(), Point::new(140.0, 65.0));
        assert_eq!(scene.wires[0].route.end(), Point::new(260.0, 105.0));
    }

    #[test]
    fn test_dangling_wires_are_skipped() {
        let mut model = GraphModel::new();
        let a = model.add_node(GateKind::Input);
        model.select_source(a);
        model.connect("gone").unwrap();

        let scene = Scene::build(&model.snapshot());

        assert!(scene.wires.is_empty());
        assert_eq!(scene.skipped_wires, 1);
    }

    #[test]
    fn test_edge_style_from_config() {
        let config = EditorConfig {
            edge_style: EdgeStyle::Angular,
            ..EditorConfig::default()
        };
        let mut model = GraphModel::with_config(config);
        let a = model.add_node(GateKind::Input);
        let b = model.add_node_at(GateKind::Output, 300.0, 0.0);
        model.select_source(a);
        model.connect(b).unwrap();

        let scene = Scene::build(&model.snapshot());
        let elements = scene.wires[0].path.elements();

        assert_eq!(elements.len(), 4);
        assert!(elements[1..].iter().all(|el| matches!(el, PathEl::LineTo(_))));
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let mut model = GraphModel::new();
        let a = model.add_node(GateKind::Not);
        let b = model.add_node_at(GateKind::Output, 400.0, 200.0);
        model.select_source(a);
        model.connect(b).unwrap();
        let snapshot = model.snapshot();

        let first = Scene::build(&snapshot);
        let second = Scene::build(&snapshot);

        assert_eq!(first.wires[0].route, second.wires[0].route);
        assert_eq!(first.bounds(), second.bounds());
    }

    #[test]
    fn test_scene_bounds() {
        let mut model = GraphModel::new();
        assert!(Scene::build(&model.snapshot()).bounds().is_none());

        model.add_node_at(GateKind::And, 0.0, 0.0);
        model.add_node_at(GateKind::Or, 200.0, 100.0);

        assert_eq!(
            Scene::build(&model.snapshot()).bounds(),
            Some(Rect::new(0.0, 0.0, 300.0, 150.0))
        );
    }

    #[test]
    fn test_gate_fill() {
        let input = gate_fill(GateKind::Input).to_rgba8();
        let and = gate_fill(GateKind::And).to_rgba8();
        assert_eq!((input.r, input.g, input.b), (220, 255, 220));
        assert_eq!((and.r, and.g, and.b), (238, 238, 238));
    }

    #[test]
    fn test_grid_lines() {
        let lines = grid_lines(Rect::new(0.0, 0.0, 100.0, 40.0), 20.0);
        // 6 vertical (0..=100), 3 horizontal (0..=40)
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[1], Line::new(Point::new(20.0, 0.0), Point::new(20.0, 40.0)));

        let offset = grid_lines(Rect::new(-15.0, 5.0, 15.0, 15.0), 10.0);
        assert_eq!(offset.len(), 4);

        assert!(grid_lines(Rect::new(0.0, 0.0, 100.0, 100.0), 0.0).is_empty());
    }
}
