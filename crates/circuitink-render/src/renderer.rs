//! Renderer trait abstraction.

use crate::scene::Scene;

/// Trait for rendering backends.
///
/// Called with a fresh [`Scene`] after every model change. Implementations
/// only read the scene.
pub trait Renderer {
    fn render(&mut self, scene: &Scene);
}

/// Renders the side-panel listing: pending source, gates and connections.
#[derive(Debug, Clone, Default)]
pub struct ListingRenderer {
    lines: Vec<String>,
}

impl ListingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines produced by the last render.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

impl Renderer for ListingRenderer {
    fn render(&mut self, scene: &Scene) {
        self.lines.clear();

        let selected = scene
            .pending_source
            .as_ref()
            .map_or_else(|| "none".to_string(), |id| id.to_string());
        self.lines.push(format!("Selected: {selected}"));

        self.lines.push("Nodes".to_string());
        for gate in &scene.gates {
            self.lines.push(format!(
                "  {} ({}) @ {},{}",
                gate.id, gate.kind, gate.rect.x0, gate.rect.y0
            ));
        }

        self.lines.push("Connections".to_string());
        for wire in &scene.wires {
            self.lines.push(format!("  {} → {}", wire.from, wire.to));
        }
        if scene.skipped_wires > 0 {
            self.lines.push(format!("  ({} unresolved)", scene.skipped_wires));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use circuitink_core::{GateId, GateKind, GraphModel};

    #[test]
    fn test_listing() {
        let mut model = GraphModel::new();
        let a = model.add_node_at(GateKind::Input, 40.0, 40.0);
        let b = model.add_node_at(GateKind::Output, 460.0, 80.0);
        model.select_source(a.clone());
        model.connect(b.clone()).unwrap();

        let mut renderer = ListingRenderer::new();
        renderer.render(&Scene::build(&model.snapshot()));

        assert_eq!(
            renderer.lines(),
            &[
                "Selected: none".to_string(),
                "Nodes".to_string(),
                format!("  {a} (INPUT) @ 40,40"),
                format!("  {b} (OUTPUT) @ 460,80"),
                "Connections".to_string(),
                format!("  {a} → {b}"),
            ]
        );
    }

    #[test]
    fn test_listing_pending_and_unresolved() {
        let mut model = GraphModel::new();
        let a = model.add_node(GateKind::And);
        model.select_source(a.clone());
        model.connect(GateId::new("gone")).unwrap();
        model.select_source(a.clone());

        let mut renderer = ListingRenderer::new();
        renderer.render(&Scene::build(&model.snapshot()));

        assert_eq!(renderer.lines()[0], format!("Selected: {a}"));
        assert_eq!(renderer.lines().last().map(String::as_str), Some("  (1 unresolved)"));
    }

    #[test]
    fn test_render_replaces_previous_output() {
        let mut model = GraphModel::new();
        let mut renderer = ListingRenderer::new();
        model.add_node(GateKind::Or);
        renderer.render(&Scene::build(&model.snapshot()));
        model.clear();
        renderer.render(&Scene::build(&model.snapshot()));

        assert_eq!(renderer.text(), "Selected: none\nNodes\nConnections");
    }
}
