use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use markdown_blog_config::SiteConfig;
use markdown_blog_engine::{MarkdownRenderer, SiteBuilder, SyntectHighlighter, build_excerpt};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "markdown-blog")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Site config file (defaults to ~/.config/markdown-blog/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a Markdown file as highlighted HTML
    Render {
        /// Markdown file to render
        file: PathBuf,
    },
    /// Print the list-page excerpt of a Markdown file
    Excerpt {
        /// Markdown file to summarise
        file: PathBuf,
        /// Maximum excerpt length in characters (defaults to the config value)
        #[arg(short, long)]
        length: Option<usize>,
    },
    /// Render every post under the source directory into the build directory
    Build {
        /// Source directory, overriding the config
        #[arg(long)]
        source: Option<PathBuf>,
        /// Output directory, overriding the config
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn load_config(config_path: Option<&Path>) -> Result<SiteConfig> {
    let config_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(SiteConfig::config_path);
    log::debug!("Config path: {}", config_path.display());

    match SiteConfig::load_from_path(&config_path)? {
        Some(config) => Ok(config),
        None => {
            log::info!(
                "No config at {}, using defaults",
                config_path.display()
            );
            Ok(SiteConfig::default())
        }
    }
}

fn render_file(file: &Path, highlighter: &SyntectHighlighter) -> Result<String> {
    let markdown = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let html = MarkdownRenderer::with_highlighter(highlighter)
        .render(&markdown)
        .with_context(|| format!("Failed to render {}", file.display()))?;
    Ok(html)
}

fn render_command(file: &Path) -> Result<()> {
    let highlighter = SyntectHighlighter::new();
    print!("{}", render_file(file, &highlighter)?);
    Ok(())
}

fn excerpt_command(config: &SiteConfig, file: &Path, length: Option<usize>) -> Result<()> {
    let highlighter = SyntectHighlighter::new();
    let html = render_file(file, &highlighter)?;
    println!(
        "{}",
        build_excerpt(&html, length.unwrap_or(config.excerpt_length))
    );
    Ok(())
}

fn build_command(config: &SiteConfig) -> Result<()> {
    let highlighter = SyntectHighlighter::new();
    let builder = SiteBuilder::new(config, MarkdownRenderer::with_highlighter(&highlighter));

    for post in builder.build()? {
        println!("{}\t{}", post.url, post.output_path.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Render { file } => render_command(&file),
        Commands::Excerpt { file, length } => excerpt_command(&config, &file, length),
        Commands::Build { source, output } => {
            if let Some(source) = source {
                config.source_path = source;
            }
            if let Some(output) = output {
                config.build_path = output;
            }
            build_command(&config)
        }
    }
}
