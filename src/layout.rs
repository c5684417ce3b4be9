use crate::config::{LayoutConfig, RenderConfig};
use crate::ir::{NodeId, Orientation, ROOT, Tree};

/// Depth and widest level of a tree, as consumed by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeShape {
    /// Longest root-to-leaf path; the root alone counts as 1.
    pub depth: usize,
    /// Largest number of nodes sharing one depth level.
    pub max_level_width: usize,
}

pub fn analyze_shape(tree: &Tree) -> TreeShape {
    shape_of(&level_buckets(tree))
}

fn shape_of(levels: &[Vec<NodeId>]) -> TreeShape {
    TreeShape {
        depth: levels.len(),
        max_level_width: levels.iter().map(Vec::len).max().unwrap_or(0),
    }
}

/// Buckets nodes by depth level, outline order preserved within a level.
pub(crate) fn level_buckets(tree: &Tree) -> Vec<Vec<NodeId>> {
    fn visit(tree: &Tree, id: NodeId, level: usize, levels: &mut Vec<Vec<NodeId>>) {
        if levels.len() == level {
            levels.push(Vec::new());
        }
        levels[level].push(id);
        for &child in &tree.node(id).children {
            visit(tree, child, level + 1, levels);
        }
    }

    let mut levels = Vec::new();
    visit(tree, ROOT, 0, &mut levels);
    levels
}

#[derive(Debug, Clone)]
pub struct Layout {
    /// Final canvas size: the requested size, grown to the computed minimum.
    pub width: f32,
    pub height: f32,
    /// Node centers, indexed by [`NodeId`].
    pub positions: Vec<(f32, f32)>,
}

impl Layout {
    pub fn position(&self, id: NodeId) -> (f32, f32) {
        self.positions[id]
    }
}

/// Assigns every node a center coordinate.
///
/// Each level is distributed evenly across the whole spread span with spacing
/// `span / (count + 1)`; the 1-based step keeps the outermost nodes off the
/// canvas edges. The distribution is per level, not per subtree: siblings
/// under different parents at the same depth share one even spread. Callers
/// depend on this exact placement; do not switch to subtree centering.
pub fn compute_layout(tree: &Tree, render: &RenderConfig, config: &LayoutConfig) -> Layout {
    let levels = level_buckets(tree);
    let shape = shape_of(&levels);
    let margins = &config.margins;

    let progression_min = shape.depth as f32 * config.level_spacing;
    let spread_min = shape.max_level_width as f32 * config.sibling_spacing;

    let (width, height) = match render.orientation {
        Orientation::Vertical => (
            render
                .width
                .max(margins.left + spread_min + margins.right),
            render
                .height
                .max(margins.top + progression_min + margins.bottom),
        ),
        Orientation::Horizontal => (
            render
                .width
                .max(margins.left + progression_min + margins.right),
            render
                .height
                .max(margins.top + spread_min + margins.bottom),
        ),
    };

    let (spread_lo, spread_span, progression_lo) = match render.orientation {
        Orientation::Vertical => (margins.left, width - margins.left - margins.right, margins.top),
        Orientation::Horizontal => (margins.top, height - margins.top - margins.bottom, margins.left),
    };

    let mut positions = vec![(0.0, 0.0); tree.len()];
    for (level, nodes) in levels.iter().enumerate() {
        let progression = progression_lo + level as f32 * config.level_spacing;
        let spacing = spread_span / (nodes.len() as f32 + 1.0);
        for (i, &id) in nodes.iter().enumerate() {
            let spread = spread_lo + (i as f32 + 1.0) * spacing;
            positions[id] = match render.orientation {
                Orientation::Vertical => (spread, progression),
                Orientation::Horizontal => (progression, spread),
            };
        }
    }

    Layout {
        width,
        height,
        positions,
    }
}
