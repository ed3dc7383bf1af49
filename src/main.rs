use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use history_graph::Settings;
use history_graph::git::GitRepo;
use history_graph::renderer::{DisplayList, PlotRenderer, RasterSurface, Translate};
use history_graph::ui::{FontMetrics, theme};
use history_graph::views::HistoryView;

/// Render a repository's commit graph to PNG
#[derive(Parser, Debug)]
#[command(name = "history-graph", version, about)]
struct Cli {
    /// Repository to open (defaults to the current directory)
    repo: Option<PathBuf>,

    /// Where to write the graph image
    #[arg(short, long, default_value = "history.png")]
    output: PathBuf,

    /// Also write the ref color legend to this file
    #[arg(long)]
    legend: Option<PathBuf>,

    /// Maximum number of commits to walk
    #[arg(short = 'n', long)]
    max_commits: Option<usize>,

    /// Settings file (defaults to ~/.config/history-graph/settings.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// TrueType/OpenType font for labels and subjects
    #[arg(long)]
    font: Option<PathBuf>,

    /// Row height in pixels
    #[arg(long)]
    row_height: Option<i32>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

const PADDING: f32 = 4.0;

fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("history_graph={default_level}")))
        .context("Invalid log filter")?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
    Ok(())
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::load(),
    };
    if let Some(n) = cli.max_commits {
        settings.max_commits = n;
    }
    if let Some(font) = &cli.font {
        settings.font_path = Some(font.clone());
    }
    if let Some(h) = cli.row_height {
        settings.row_height = h;
    }
    Ok(settings)
}

/// Stack row drawings top to bottom into one image
fn write_history(
    rows: &[(DisplayList, f32)],
    row_height: i32,
    font: &FontMetrics,
    path: &Path,
) -> Result<()> {
    let width = rows.iter().map(|(_, w)| *w).fold(0.0, f32::max) + PADDING;
    let height = rows.len() as f32 * row_height as f32;

    let mut canvas =
        RasterSurface::new(width.ceil() as u32, height.ceil() as u32, theme::BACKGROUND)
            .context("Failed to allocate history image")?
            .with_font(font);
    for (i, (drawing, _)) in rows.iter().enumerate() {
        let mut row = Translate::new(&mut canvas, 0.0, i as f32 * row_height as f32);
        drawing.replay(&mut row);
    }
    canvas
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))
}

fn write_legend(legend: &DisplayList, font: &FontMetrics, path: &Path) -> Result<()> {
    let Some(bounds) = legend.bounds(font) else {
        bail!("Legend is empty");
    };
    let mut canvas = RasterSurface::new(
        (bounds.width + 2.0 * PADDING).ceil() as u32,
        (bounds.height + 2.0 * PADDING).ceil() as u32,
        theme::BACKGROUND,
    )
    .context("Failed to allocate legend image")?
    .with_font(font);
    {
        let mut shifted = Translate::new(&mut canvas, PADDING - bounds.x, PADDING - bounds.y);
        legend.replay(&mut shifted);
    }
    canvas
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let settings = load_settings(&cli)?;
    let font_path = settings
        .resolve_font()
        .context("No usable font found; pass --font or set font_path in the settings")?;
    let font = FontMetrics::load(&font_path)
        .with_context(|| format!("Failed to load font {}", font_path.display()))?;
    let renderer = PlotRenderer::new(settings.render_config(), font);

    let repo_path = cli.repo.as_deref().unwrap_or(Path::new("."));
    let repo = GitRepo::open(repo_path)
        .with_context(|| format!("Failed to open repository at {}", repo_path.display()))?;

    let mut view = HistoryView::new();
    view.load(&repo, settings.max_commits, &renderer)
        .context("Failed to walk history")?;
    if view.list().is_empty() {
        bail!("{} has no commits", repo.repo_name());
    }
    tracing::info!(
        repo = %repo.repo_name(),
        commits = view.list().len(),
        lanes = view.list().lane_count(),
        "plotted history"
    );

    let rows = view.render_rows(&renderer);
    write_history(&rows, renderer.config().row_height(), renderer.metrics(), &cli.output)?;
    tracing::info!(path = %cli.output.display(), "wrote history graph");

    if let (Some(path), Some(legend)) = (&cli.legend, view.legend()) {
        write_legend(legend, renderer.metrics(), path)?;
        tracing::info!(path = %path.display(), "wrote legend");
    }

    Ok(())
}
