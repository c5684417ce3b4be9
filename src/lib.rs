#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod parser;
pub mod render;
pub mod theme;

pub use config::{Config, LayoutConfig, Margins, RenderConfig};
pub use ir::{Node, NodeId, Orientation, Tree};
pub use layout::{Layout, TreeShape, analyze_shape, compute_layout};
pub use parser::{ParseError, parse_outline, split_source};
pub use render::render_svg;
pub use theme::Theme;

#[cfg(feature = "cli")]
pub use cli::run;
