use crate::config::{LayoutConfig, RenderConfig};
use crate::ir::{NodeId, Orientation, ROOT, Tree};
use crate::layout::Layout;
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

/// Assembles the complete SVG document: defs (glow gradient, styles,
/// entrance keyframes), background, glow, title, then all links, then all
/// nodes. Links come strictly before nodes so connectors never occlude
/// markers.
pub fn render_svg(
    tree: &Tree,
    layout: &Layout,
    render: &RenderConfig,
    theme: &Theme,
    config: &LayoutConfig,
) -> String {
    let width = layout.width;
    let height = layout.height;
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&document_defs(theme));

    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));
    let glow_radius = width.min(height) * 0.45;
    svg.push_str(&format!(
        "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"url(#glow)\"/>",
        width / 2.0,
        height / 2.0,
        glow_radius
    ));

    svg.push_str(&format!(
        "<text class=\"title\" x=\"{:.2}\" y=\"40\" text-anchor=\"middle\" font-size=\"{}\" font-weight=\"700\" fill=\"{}\">{}</text>",
        width / 2.0,
        theme.title_size,
        theme.title_color,
        escape_xml(&render.title)
    ));

    render_links(tree, ROOT, layout, render.orientation, config, &mut svg);

    let mut palette_index = 0usize;
    render_nodes(
        tree,
        ROOT,
        0,
        &mut palette_index,
        layout,
        render,
        theme,
        config,
        &mut svg,
    );

    svg.push_str("</svg>");
    svg
}

fn document_defs(theme: &Theme) -> String {
    format!(
        concat!(
            "<defs>",
            "<radialGradient id=\"glow\">",
            "<stop offset=\"0%\" stop-color=\"{glow}\" stop-opacity=\"0.55\"/>",
            "<stop offset=\"100%\" stop-color=\"{glow}\" stop-opacity=\"0\"/>",
            "</radialGradient>",
            "<style>",
            "@import url('https://fonts.googleapis.com/css2?family=Inter:wght@400;600;700&amp;display=swap');",
            "text{{font-family:{font};}}",
            ".link{{fill:none;stroke:{line};stroke-width:1.6;}}",
            ".label-main{{font-size:{main}px;font-weight:600;}}",
            ".label-sub{{font-size:{sub}px;fill:{muted};}}",
            ".node{{animation:rise 0.5s ease-out backwards;}}",
            "@keyframes rise{{from{{opacity:0;transform:translateY(8px);}}",
            "to{{opacity:1;transform:none;}}}}",
            "</style>",
            "</defs>"
        ),
        glow = theme.glow_color,
        font = theme.font_family,
        line = theme.line_color,
        main = theme.font_size,
        sub = theme.sub_font_size,
        muted = theme.sub_label_color,
    )
}

fn render_links(
    tree: &Tree,
    id: NodeId,
    layout: &Layout,
    orientation: Orientation,
    config: &LayoutConfig,
    out: &mut String,
) {
    for &child in &tree.node(id).children {
        let d = link_path(
            layout.position(id),
            layout.position(child),
            orientation,
            config.node_radius,
        );
        out.push_str(&format!("<path class=\"link\" d=\"{d}\"/>"));
        render_links(tree, child, layout, orientation, config, out);
    }
}

/// Cubic Bezier from the parent's boundary to the child's boundary. Both
/// control points sit at the progression midpoint, each keeping its
/// endpoint's spread coordinate, which gives the S-curve its symmetry.
fn link_path(from: (f32, f32), to: (f32, f32), orientation: Orientation, radius: f32) -> String {
    match orientation {
        Orientation::Vertical => {
            let (x1, y1) = (from.0, from.1 + radius);
            let (x2, y2) = (to.0, to.1 - radius);
            let mid = (y1 + y2) / 2.0;
            format!("M {x1:.2} {y1:.2} C {x1:.2} {mid:.2}, {x2:.2} {mid:.2}, {x2:.2} {y2:.2}")
        }
        Orientation::Horizontal => {
            let (x1, y1) = (from.0 + radius, from.1);
            let (x2, y2) = (to.0 - radius, to.1);
            let mid = (x1 + x2) / 2.0;
            format!("M {x1:.2} {y1:.2} C {mid:.2} {y1:.2}, {mid:.2} {y2:.2}, {x2:.2} {y2:.2}")
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn render_nodes(
    tree: &Tree,
    id: NodeId,
    depth: usize,
    palette_index: &mut usize,
    layout: &Layout,
    render: &RenderConfig,
    theme: &Theme,
    config: &LayoutConfig,
    out: &mut String,
) {
    let node = tree.node(id);
    let accent = node
        .color
        .clone()
        .unwrap_or_else(|| render.colors[*palette_index % render.colors.len()].clone());
    *palette_index += 1;

    let (cx, cy) = layout.position(id);
    out.push_str(&format!(
        "<g class=\"node\" style=\"animation-delay:{:.2}s\">",
        depth as f32 * config.animation_stagger
    ));
    out.push_str(&format!(
        "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"2\"/>",
        config.node_radius, accent, theme.node_ring_color
    ));

    let lines = wrap_label(&node.label, config.wrap_width_chars);
    if !lines.is_empty() {
        let line_height = config.label_line_height;
        let first_y = cy - (lines.len() as f32 - 1.0) * line_height / 2.0;
        for (i, line) in lines.iter().enumerate() {
            let class = if i == 0 { "label-main" } else { "label-sub" };
            let y = first_y + i as f32 * line_height;
            let fill = if i == 0 {
                format!(" fill=\"{accent}\"")
            } else {
                String::new()
            };
            out.push_str(&format!(
                "<text class=\"{class}\" x=\"{cx:.2}\" y=\"{y:.2}\" text-anchor=\"middle\"{fill}>{}</text>",
                escape_xml(line)
            ));
        }
    }
    out.push_str("</g>");

    for &child in &node.children {
        render_nodes(
            tree,
            child,
            depth + 1,
            palette_index,
            layout,
            render,
            theme,
            config,
            out,
        );
    }
}

/// Greedy word wrap at `max_chars`. Words are never split, so a single word
/// longer than the limit occupies its own over-long line. An empty label
/// wraps to zero lines.
pub fn wrap_label(label: &str, max_chars: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in label.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, width: f32, height: f32) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Inter".to_string();
    opt.default_size = usvg::Size::from_wh(width, height)
        .unwrap_or(usvg::Size::from_wh(800.0, 600.0).unwrap());

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LayoutConfig, RenderConfig};
    use crate::layout::compute_layout;
    use crate::parser::parse_outline;

    fn render(source: &str, render_config: &RenderConfig) -> String {
        let tree = parse_outline(source).unwrap();
        let config = LayoutConfig::default();
        let layout = compute_layout(&tree, render_config, &config);
        render_svg(
            &tree,
            &layout,
            render_config,
            &Theme::for_mode(render_config.dark),
            &config,
        )
    }

    #[test]
    fn wraps_long_label_without_splitting_words() {
        let lines = wrap_label("Infrastructure Modernization Program", 12);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(
                line.chars().count() <= 12 || !line.contains(' '),
                "line too long: {line}"
            );
        }
        assert_eq!(lines[0], "Infrastructure");
    }

    #[test]
    fn short_label_stays_on_one_line() {
        assert_eq!(wrap_label("Launch", 12), vec!["Launch"]);
        assert_eq!(wrap_label("Go live soon", 12), vec!["Go live soon"]);
    }

    #[test]
    fn empty_label_wraps_to_nothing() {
        assert!(wrap_label("", 12).is_empty());
        assert!(wrap_label("   ", 12).is_empty());
    }

    #[test]
    fn render_svg_basic() {
        let svg = render("Root\n  Alpha\n  Beta", &RenderConfig::default());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("Alpha"));
        assert!(svg.contains("Project Roadmap"));
        assert!(svg.contains("@keyframes"));
    }

    #[test]
    fn links_are_painted_before_nodes() {
        let svg = render("Root\n  Child", &RenderConfig::default());
        let first_link = svg.find("<path class=\"link\"").unwrap();
        // The glow circle precedes the links, so look for node groups, not
        // the first <circle> in the document.
        let first_node = svg.find("<g class=\"node\"").unwrap();
        assert!(first_link < first_node);
    }

    #[test]
    fn custom_palette_cycles_two_colors() {
        let config = RenderConfig {
            colors: vec!["#111111".to_string(), "#222222".to_string()],
            ..RenderConfig::default()
        };
        let svg = render("r\n a\n b\n c", &config);
        assert!(svg.contains("#111111"));
        assert!(svg.contains("#222222"));
        // Four nodes over a two-color palette: both colors appear twice.
        assert_eq!(svg.matches("fill=\"#111111\"").count(), 4);
        assert_eq!(svg.matches("fill=\"#222222\"").count(), 4);
    }

    #[test]
    fn explicit_node_color_wins_over_palette() {
        let svg = render("r\n a|#ABCDEF\n b", &RenderConfig::default());
        assert!(svg.contains("#ABCDEF"));
    }

    #[test]
    fn dark_mode_changes_background() {
        let dark = RenderConfig {
            dark: true,
            ..RenderConfig::default()
        };
        let svg = render("Root", &dark);
        assert!(svg.contains(&format!("fill=\"{}\"", Theme::dark().background)));
    }

    #[test]
    fn labels_are_xml_escaped() {
        let svg = render("A & B\n  <C>", &RenderConfig::default());
        assert!(svg.contains("A &amp; B"));
        assert!(svg.contains("&lt;C&gt;"));
        assert!(!svg.contains("<C>"));
    }

    #[test]
    fn animation_delay_staggers_by_depth() {
        let svg = render("r\n a\n  b", &RenderConfig::default());
        assert!(svg.contains("animation-delay:0.00s"));
        assert!(svg.contains("animation-delay:0.12s"));
        assert!(svg.contains("animation-delay:0.24s"));
    }

    #[test]
    fn vertical_link_is_a_symmetric_s_curve() {
        let d = link_path((100.0, 100.0), (200.0, 220.0), Orientation::Vertical, 10.0);
        assert_eq!(d, "M 100.00 110.00 C 100.00 160.00, 200.00 160.00, 200.00 210.00");
    }

    #[test]
    fn horizontal_link_swaps_axes() {
        let d = link_path((100.0, 100.0), (220.0, 200.0), Orientation::Horizontal, 10.0);
        assert_eq!(d, "M 110.00 100.00 C 160.00 100.00, 160.00 200.00, 210.00 200.00");
    }
}
