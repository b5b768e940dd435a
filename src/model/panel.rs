//! Panel definition: toothed edges plus cut-outs in one local frame.

use super::{bounding_box_of, BoundingBox, Path, Point, ToothedEdge};
use crate::transform::{ReliefCut, Transform};
use serde::{Deserialize, Serialize};

/// Which part of the box a panel is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelKind {
    Side,
    Bottom,
    Lid,
}

/// Export layer of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    Outline,
    Relief,
    ToothHoles,
    Handles,
    VentHoles,
}

impl Layer {
    /// All layers in drawing order.
    pub const ALL: [Layer; 5] = [
        Layer::Outline,
        Layer::Relief,
        Layer::ToothHoles,
        Layer::Handles,
        Layer::VentHoles,
    ];

    /// Layer name used by the exporters.
    pub fn name(&self) -> &'static str {
        match self {
            Layer::Outline => "OUTLINE",
            Layer::Relief => "RELIEF",
            Layer::ToothHoles => "TOOTH_HOLES",
            Layer::Handles => "HANDLES",
            Layer::VentHoles => "VENT_HOLES",
        }
    }
}

/// Kind of secondary cut-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureKind {
    /// Rectangular hole receiving a bottom tooth.
    ToothHole,
    /// Oval carrying handle.
    Handle,
    /// Round vent hole in the lid.
    VentHole,
}

impl FeatureKind {
    pub fn layer(&self) -> Layer {
        match self {
            FeatureKind::ToothHole => Layer::ToothHoles,
            FeatureKind::Handle => Layer::Handles,
            FeatureKind::VentHole => Layer::VentHoles,
        }
    }
}

/// A closed cut-out inside a panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub kind: FeatureKind,
    pub paths: Vec<Path>,
}

/// Named edge of a panel ("left", "right", "bottom", "top").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelEdge {
    pub name: String,
    pub edge: ToothedEdge,
}

/// One flat part of the box, ready to be placed in a layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub name: String,
    pub kind: PanelKind,
    pub edges: Vec<PanelEdge>,
    pub features: Vec<Feature>,
    pub relief: Vec<ReliefCut>,
}

impl Panel {
    pub fn new(name: impl Into<String>, kind: PanelKind) -> Self {
        Self {
            name: name.into(),
            kind,
            edges: Vec::new(),
            features: Vec::new(),
            relief: Vec::new(),
        }
    }

    /// Look up an edge by name.
    pub fn edge(&self, name: &str) -> Option<&ToothedEdge> {
        self.edges.iter().find(|e| e.name == name).map(|e| &e.edge)
    }

    /// Paths of all edges, in edge order.
    pub fn edge_paths(&self) -> impl Iterator<Item = &Path> {
        self.edges.iter().flat_map(|e| e.edge.paths.iter())
    }

    /// Features of one kind.
    pub fn features_of(&self, kind: FeatureKind) -> impl Iterator<Item = &Feature> {
        self.features.iter().filter(move |f| f.kind == kind)
    }

    /// Every path of the panel tagged with its export layer.
    pub fn layered_paths(&self) -> Vec<(Layer, Path)> {
        let mut out: Vec<(Layer, Path)> =
            self.edge_paths().map(|p| (Layer::Outline, *p)).collect();
        out.extend(self.relief.iter().map(|r| (Layer::Relief, Path::Arc(r.arc))));
        for feature in &self.features {
            let layer = feature.kind.layer();
            out.extend(feature.paths.iter().map(|p| (layer, *p)));
        }
        out
    }

    /// Number of paths the panel exports.
    pub fn path_count(&self) -> usize {
        self.edges.iter().map(|e| e.edge.paths.len()).sum::<usize>()
            + self.relief.len()
            + self.features.iter().map(|f| f.paths.len()).sum::<usize>()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        bounding_box_of(self.layered_paths().iter().map(|(_, p)| p))
    }
}

impl Transform for Panel {
    fn translate(&self, dx: f64, dy: f64) -> Self {
        self.map(|p| p.translate(dx, dy), |r| r.translate(dx, dy))
    }

    fn rotate(&self, degrees: f64, origin: Point) -> Self {
        self.map(|p| p.rotate(degrees, origin), |r| r.rotate(degrees, origin))
    }

    fn mirror(&self, mirror_x: bool, mirror_y: bool) -> Self {
        self.map(
            |p| p.mirror(mirror_x, mirror_y),
            |r| r.mirror(mirror_x, mirror_y),
        )
    }
}

impl Panel {
    fn map(
        &self,
        path_fn: impl Fn(&Path) -> Path,
        relief_fn: impl Fn(&ReliefCut) -> ReliefCut,
    ) -> Self {
        Self {
            name: self.name.clone(),
            kind: self.kind,
            edges: self
                .edges
                .iter()
                .map(|e| PanelEdge {
                    name: e.name.clone(),
                    edge: ToothedEdge {
                        runs: e.edge.runs.clone(),
                        depth: e.edge.depth,
                        paths: e.edge.paths.iter().map(&path_fn).collect(),
                    },
                })
                .collect(),
            features: self
                .features
                .iter()
                .map(|f| Feature {
                    kind: f.kind,
                    paths: f.paths.iter().map(&path_fn).collect(),
                })
                .collect(),
            relief: self.relief.iter().map(relief_fn).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Circle, Run};

    fn sample_panel() -> Panel {
        let mut panel = Panel::new("sample", PanelKind::Lid);
        panel.edges.push(PanelEdge {
            name: "bottom".to_string(),
            edge: ToothedEdge::from_runs(vec![Run::new(10.0, false)], 1.0),
        });
        panel.features.push(Feature {
            kind: FeatureKind::VentHole,
            paths: vec![Path::Circle(Circle::new(Point::new(5.0, 5.0), 1.0))],
        });
        panel
    }

    #[test]
    fn test_layer_names() {
        let names: Vec<&str> = Layer::ALL.iter().map(|l| l.name()).collect();
        assert_eq!(
            names,
            vec!["OUTLINE", "RELIEF", "TOOTH_HOLES", "HANDLES", "VENT_HOLES"]
        );
    }

    #[test]
    fn test_layered_paths() {
        let panel = sample_panel();
        let layered = panel.layered_paths();
        assert_eq!(layered.len(), 2);
        assert_eq!(layered[0].0, Layer::Outline);
        assert_eq!(layered[1].0, Layer::VentHoles);
        assert_eq!(panel.path_count(), 2);
    }

    #[test]
    fn test_edge_lookup() {
        let panel = sample_panel();
        assert!(panel.edge("bottom").is_some());
        assert!(panel.edge("top").is_none());
        assert_eq!(panel.features_of(FeatureKind::VentHole).count(), 1);
        assert_eq!(panel.features_of(FeatureKind::Handle).count(), 0);
    }

    #[test]
    fn test_translate_moves_everything() {
        let panel = sample_panel();
        let moved = panel.translate(100.0, 50.0);
        let before = panel.bounding_box();
        let after = moved.bounding_box();
        assert_eq!(after.min_x, before.min_x + 100.0);
        assert_eq!(after.min_y, before.min_y + 50.0);
        assert_eq!(moved.edges[0].edge.runs, panel.edges[0].edge.runs);
    }
}
