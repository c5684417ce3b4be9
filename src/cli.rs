use crate::config::{RenderConfig, load_config};
use crate::layout::compute_layout;
use crate::parser::{parse_outline, split_source};
use crate::render::{render_svg, write_output_svg};
use crate::theme::Theme;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "tlr", version, about = "Outline to SVG tree diagram renderer")]
pub struct Args {
    /// Input file (.tree) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme variables, layout spacing)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Render with the dark theme
    #[arg(long = "dark")]
    pub dark: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let base_config = load_config(args.config.as_deref())?;

    let input = read_input(args.input.as_deref())?;
    let (options, outline) = split_source(&input);
    let render_config = RenderConfig::from_options(&options, args.dark);
    let theme = base_config
        .theme
        .clone()
        .unwrap_or_else(|| Theme::for_mode(render_config.dark));

    let tree = parse_outline(&outline)?;
    let layout = compute_layout(&tree, &render_config, &base_config.layout);
    let svg = render_svg(&tree, &layout, &render_config, &theme, &base_config.layout);

    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            #[cfg(feature = "png")]
            {
                let output = ensure_output(&args.output, "png")?;
                crate::render::write_output_png(&svg, &output, layout.width, layout.height)?;
            }
            #[cfg(not(feature = "png"))]
            return Err(anyhow::anyhow!(
                "PNG output requires building with the `png` feature"
            ));
        }
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok(buf);
        }
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg(feature = "png")]
fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}
