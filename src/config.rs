use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ir::Orientation;
use crate::theme::Theme;

/// Fallback palette cycled across nodes without an explicit color.
pub const DEFAULT_PALETTE: [&str; 5] = ["#4F8EF7", "#9B59F6", "#F76E8E", "#2ECC9A", "#F7B84F"];

pub const DEFAULT_TITLE: &str = "Project Roadmap";
pub const DEFAULT_WIDTH: f32 = 800.0;
pub const DEFAULT_HEIGHT: f32 = 600.0;

static COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:#[0-9a-fA-F]{3,8}|[a-zA-Z]+|(?:rgb|rgba|hsl|hsla)\([^)]*\))$").unwrap()
});

/// Per-document render options, built from the parsed header map. Config is
/// permissive: an unparsable value falls back to its default instead of
/// failing the render.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub title: String,
    pub orientation: Orientation,
    pub colors: Vec<String>,
    /// Requested canvas size; the layout treats both as minimums.
    pub width: f32,
    pub height: f32,
    pub dark: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            orientation: Orientation::Vertical,
            colors: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            dark: false,
        }
    }
}

impl RenderConfig {
    /// Builds a config from the header option map. `dark` comes from the
    /// caller, not from the document.
    pub fn from_options(options: &HashMap<String, String>, dark: bool) -> Self {
        let mut config = Self {
            dark,
            ..Self::default()
        };

        if let Some(title) = options.get("title") {
            let title = title.trim();
            if !title.is_empty() {
                config.title = title.to_string();
            }
        }
        if let Some(orientation) = options.get("orientation")
            && let Some(parsed) = Orientation::from_token(orientation)
        {
            config.orientation = parsed;
        }
        if let Some(colors) = options.get("colors") {
            let parsed = parse_color_list(colors);
            if !parsed.is_empty() {
                config.colors = parsed;
            }
        }
        if let Some(width) = options.get("width")
            && let Ok(parsed) = width.trim().parse::<u32>()
        {
            config.width = parsed as f32;
        }
        if let Some(height) = options.get("height")
            && let Ok(parsed) = height.trim().parse::<u32>()
        {
            config.height = parsed as f32;
        }

        config
    }
}

/// Comma-separated color list; entries that do not look like a color are
/// dropped rather than aborting the render.
fn parse_color_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty() && COLOR_RE.is_match(entry))
        .map(str::to_string)
        .collect()
}

/// Fixed canvas insets. Not user-configurable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 70.0,
            right: 40.0,
            bottom: 40.0,
            left: 40.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Spacing between consecutive levels along the progression axis.
    pub level_spacing: f32,
    /// Minimum spread-axis room reserved per node at the widest level.
    pub sibling_spacing: f32,
    pub node_radius: f32,
    pub wrap_width_chars: usize,
    pub label_line_height: f32,
    /// Per-level entrance animation delay step, seconds.
    pub animation_stagger: f32,
    pub margins: Margins,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            level_spacing: 120.0,
            sibling_spacing: 140.0,
            node_radius: 10.0,
            wrap_width_chars: 12,
            label_line_height: 16.0,
            animation_stagger: 0.12,
            margins: Margins::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Option<Theme>,
    pub layout: LayoutConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    level_spacing: Option<f32>,
    sibling_spacing: Option<f32>,
    node_radius: Option<f32>,
    wrap_width_chars: Option<usize>,
    label_line_height: Option<f32>,
    animation_stagger: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    background: Option<String>,
    title_color: Option<String>,
    sub_label_color: Option<String>,
    line_color: Option<String>,
    glow_color: Option<String>,
}

/// Loads CLI-level overrides from a JSON file. `None` path means defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "dark" {
            config.theme = Some(Theme::dark());
        } else if theme_name == "light" || theme_name == "default" {
            config.theme = Some(Theme::light());
        }
    }

    if let Some(vars) = parsed.theme_variables {
        let theme = config.theme.get_or_insert_with(Theme::light);
        if let Some(v) = vars.font_family {
            theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            theme.font_size = v;
        }
        if let Some(v) = vars.background {
            theme.background = v;
        }
        if let Some(v) = vars.title_color {
            theme.title_color = v;
        }
        if let Some(v) = vars.sub_label_color {
            theme.sub_label_color = v;
        }
        if let Some(v) = vars.line_color {
            theme.line_color = v;
        }
        if let Some(v) = vars.glow_color {
            theme.glow_color = v;
        }
    }

    if let Some(v) = parsed.level_spacing {
        config.layout.level_spacing = v;
    }
    if let Some(v) = parsed.sibling_spacing {
        config.layout.sibling_spacing = v;
    }
    if let Some(v) = parsed.node_radius {
        config.layout.node_radius = v;
    }
    if let Some(v) = parsed.wrap_width_chars {
        config.layout.wrap_width_chars = v;
    }
    if let Some(v) = parsed.label_line_height {
        config.layout.label_line_height = v;
    }
    if let Some(v) = parsed.animation_stagger {
        config.layout.animation_stagger = v;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_when_options_missing() {
        let config = RenderConfig::from_options(&HashMap::new(), false);
        assert_eq!(config.title, DEFAULT_TITLE);
        assert_eq!(config.orientation, Orientation::Vertical);
        assert_eq!(config.colors.len(), 5);
        assert_eq!(config.width, 800.0);
        assert_eq!(config.height, 600.0);
    }

    #[test]
    fn custom_colors_replace_palette() {
        let config = RenderConfig::from_options(&options(&[("colors", "#111111,#222222")]), false);
        assert_eq!(config.colors, vec!["#111111", "#222222"]);
    }

    #[test]
    fn malformed_colors_are_dropped() {
        let config =
            RenderConfig::from_options(&options(&[("colors", "#123456, not a color!, teal")]), false);
        assert_eq!(config.colors, vec!["#123456", "teal"]);
    }

    #[test]
    fn fully_malformed_color_list_falls_back() {
        let config = RenderConfig::from_options(&options(&[("colors", "??, !!")]), false);
        assert_eq!(config.colors.len(), DEFAULT_PALETTE.len());
    }

    #[test]
    fn bad_orientation_and_size_degrade() {
        let config = RenderConfig::from_options(
            &options(&[("orientation", "diagonal"), ("width", "wide"), ("height", "-3")]),
            true,
        );
        assert_eq!(config.orientation, Orientation::Vertical);
        assert_eq!(config.width, 800.0);
        assert_eq!(config.height, 600.0);
        assert!(config.dark);
    }

    #[test]
    fn recognized_options_apply() {
        let config = RenderConfig::from_options(
            &options(&[
                ("title", "Q3 Plan"),
                ("orientation", "horizontal"),
                ("width", "1024"),
                ("height", "768"),
            ]),
            false,
        );
        assert_eq!(config.title, "Q3 Plan");
        assert_eq!(config.orientation, Orientation::Horizontal);
        assert_eq!(config.width, 1024.0);
        assert_eq!(config.height, 768.0);
    }
}
