//! Slidebox: content-aware layout boxes for presentation slides.
//!
//! Slidebox takes a rendered slide and the shape metadata of its deck and
//! works out where the slide's content blocks are. The slide is split into a
//! grid, the ink in each cell is located, and a box is drawn around it whose
//! border does not paint over the content. Recurring template decoration
//! (section banners, logos, page numbers and so on) is recognised and kept
//! out of the picture.
//!
//! # Modules
//!
//! - [`ir`]: Geometry and shape metadata (rectangles, slide geometry, manifests)
//! - [`raster`]: Where slide images come from, and what counts as content
//! - [`classify`]: Recognising template decoration
//! - [`grid`]: Splitting the content area into cells, and inferring layouts
//! - [`detect`]: Finding the content inside a region
//! - [`adjust`]: Moving box edges off content
//! - [`visualize`]: The whole pipeline, plus drawing
//! - [`error`]: Error types for slidebox operations

pub mod adjust;
pub mod classify;
pub mod detect;
pub mod error;
pub mod grid;
pub mod ir;
pub mod raster;
pub mod visualize;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use log::{error, info, warn};
use serde::Serialize;

pub use error::SlideboxError;

use adjust::{AdjustOptions, DEFAULT_LINE_WIDTH, DEFAULT_MAX_ADJUST};
use classify::{ExclusionReport, MasterElementClassifier};
use detect::{DetectMode, DetectOptions};
use ir::manifest::read_manifest;
use ir::{DeckManifest, GridLayout};
use raster::{
    ExternalRenderer, ImageDirSource, RasterSource, RendererConfig, DEFAULT_BACKGROUND_THRESHOLD,
    DEFAULT_DPI,
};
use visualize::{
    save_png, BoxMode, LayoutVisualizer, OverlayColor, Visualization, VisualizeOptions,
};

/// The slidebox CLI application.
#[derive(Parser)]
#[command(name = "slidebox")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Draw layout boxes on one slide.
    Visualize(VisualizeArgs),
    /// Draw layout boxes on every slide (or a chosen list) of a deck.
    Batch(BatchArgs),
    /// List the shapes of a slide that are treated as template decoration.
    Classify(ClassifyArgs),
}

/// Report format for command output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

/// Where slide images come from.
#[derive(clap::Args)]
struct SourceArgs {
    /// Directory of pre-rendered `slide-<n>.png` images; skips rendering.
    #[arg(long, value_name = "DIR")]
    images: Option<PathBuf>,

    /// LibreOffice binary used to convert the deck to PDF.
    #[arg(long, env = "SLIDEBOX_SOFFICE", default_value = "soffice")]
    soffice: PathBuf,

    /// Poppler binary used to rasterize the PDF.
    #[arg(long, env = "SLIDEBOX_PDFTOPPM", default_value = "pdftoppm")]
    pdftoppm: PathBuf,

    /// Rendering resolution in dots per inch.
    #[arg(long, env = "SLIDEBOX_DPI", default_value_t = DEFAULT_DPI)]
    dpi: u32,
}

/// How boxes are computed and drawn.
#[derive(clap::Args)]
struct BoxArgs {
    /// Overlay color: a name (red, green, blue, ...) or #rrggbb.
    #[arg(long, default_value = "red")]
    color: OverlayColor,

    /// Border width in pixels.
    #[arg(long, default_value_t = DEFAULT_LINE_WIDTH)]
    line_width: u32,

    /// Maximum distance in pixels an edge may move to clear content.
    #[arg(long, default_value_t = DEFAULT_MAX_ADJUST)]
    max_adjust: u32,

    /// Per-channel value at or above which a pixel is background.
    #[arg(long, default_value_t = DEFAULT_BACKGROUND_THRESHOLD)]
    threshold: u8,

    /// Draw one box around all content shapes instead of one per grid cell.
    #[arg(long)]
    single_box: bool,

    /// Also count strong gradients as content when detecting (edge-enhanced).
    #[arg(long)]
    edges: bool,
}

/// Arguments for the visualize subcommand.
#[derive(clap::Args)]
struct VisualizeArgs {
    /// Deck manifest (JSON or YAML) describing the slides' shapes.
    manifest: PathBuf,

    /// Slide to visualize (1-based).
    #[arg(short, long, default_value_t = 1)]
    page: usize,

    /// Output image path [default: page_NN_layout.png].
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Grid layout (e.g. 1x2); overrides the manifest and inference.
    /// Ignored with --single-box.
    #[arg(long)]
    layout: Option<GridLayout>,

    /// Do not open the written image.
    #[arg(long)]
    no_show: bool,

    /// Output format for the report ('text' or 'json').
    #[arg(long, value_enum, default_value = "text")]
    report: ReportFormat,

    #[command(flatten)]
    boxes: BoxArgs,

    #[command(flatten)]
    source: SourceArgs,
}

/// Arguments for the batch subcommand.
#[derive(clap::Args)]
struct BatchArgs {
    /// Deck manifest (JSON or YAML) describing the slides' shapes.
    manifest: PathBuf,

    /// Directory the annotated images are written to.
    #[arg(short, long)]
    output_dir: PathBuf,

    /// Slides to process (comma-separated, 1-based) [default: all].
    #[arg(long, value_delimiter = ',')]
    pages: Vec<usize>,

    #[command(flatten)]
    boxes: BoxArgs,

    #[command(flatten)]
    source: SourceArgs,
}

/// Arguments for the classify subcommand.
#[derive(clap::Args)]
struct ClassifyArgs {
    /// Deck manifest (JSON or YAML) describing the slides' shapes.
    manifest: PathBuf,

    /// Slide to classify (1-based).
    #[arg(short, long, default_value_t = 1)]
    page: usize,

    /// Output format for the report ('text' or 'json').
    #[arg(long, value_enum, default_value = "text")]
    report: ReportFormat,
}

/// Run the slidebox CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), SlideboxError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Visualize(args)) => run_visualize(args),
        Some(Commands::Batch(args)) => run_batch(args),
        Some(Commands::Classify(args)) => run_classify(args),
        None => {
            println!("slidebox {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Content-aware layout boxes for rendered presentation slides.");
            println!();
            println!("Run 'slidebox --help' for usage information.");
            Ok(())
        }
    }
}

impl BoxArgs {
    fn options(&self) -> VisualizeOptions {
        VisualizeOptions {
            mode: if self.single_box {
                BoxMode::Single
            } else {
                BoxMode::Grid
            },
            detect: DetectOptions {
                background_threshold: self.threshold,
                mode: if self.edges {
                    DetectMode::Edges
                } else {
                    DetectMode::Threshold
                },
                ..DetectOptions::default()
            },
            adjust: AdjustOptions {
                line_width: self.line_width,
                max_adjust: self.max_adjust,
                background_threshold: self.threshold,
            },
            color: self.color,
            ..VisualizeOptions::default()
        }
    }
}

impl SourceArgs {
    /// Picks the raster source: pre-rendered images if given, otherwise the
    /// deck named by the manifest, rendered on demand.
    fn open(&self, manifest: &DeckManifest, page: usize) -> Result<Box<dyn RasterSource>, SlideboxError> {
        if let Some(dir) = &self.images {
            return Ok(Box::new(ImageDirSource::open(dir)?));
        }
        let Some(deck) = &manifest.source else {
            return Err(SlideboxError::RenderFailure {
                page,
                message: "manifest names no source deck and no --images directory was given"
                    .to_string(),
            });
        };
        let config = RendererConfig {
            soffice: self.soffice.clone(),
            pdftoppm: self.pdftoppm.clone(),
            dpi: self.dpi,
        };
        Ok(Box::new(ExternalRenderer::new(deck, config)))
    }
}

/// Default output name for an annotated slide.
fn page_file_name(page: usize) -> String {
    format!("page_{:02}_layout.png", page)
}

/// Renders, computes and draws one slide, writing the result to `output`.
fn annotate_page(
    visualizer: &LayoutVisualizer,
    source: &dyn RasterSource,
    manifest: &DeckManifest,
    page: usize,
    layout: Option<GridLayout>,
    output: &Path,
) -> Result<Visualization, SlideboxError> {
    let slide = manifest.slide(page)?;
    let raster = source.render(page)?;
    let geometry = manifest.geometry(raster.width(), raster.height())?;

    let (annotated, result) =
        visualizer.annotate(&raster, &geometry, &slide.shapes, layout.or(slide.layout))?;
    save_png(&annotated, output)?;
    info!(
        "slide {}: {} box(es) written to {}",
        page,
        result.box_count(),
        output.display()
    );
    Ok(result)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), SlideboxError> {
    let json = serde_json::to_string_pretty(value).map_err(SlideboxError::ReportSerialize)?;
    println!("{}", json);
    Ok(())
}

/// Opens `path` in the platform viewer. Failure is not fatal.
fn show(path: &Path) {
    if let Err(e) = open::that(path) {
        warn!("could not open {}: {}", path.display(), e);
    }
}

#[derive(Serialize)]
struct PageReport<'a> {
    page: usize,
    output: &'a Path,
    #[serde(flatten)]
    visualization: &'a Visualization,
}

/// Execute the visualize subcommand.
fn run_visualize(args: VisualizeArgs) -> Result<(), SlideboxError> {
    let manifest = read_manifest(&args.manifest)?;
    // Checked before anything is rendered.
    manifest.slide(args.page)?;

    let source = args.source.open(&manifest, args.page)?;
    let visualizer = LayoutVisualizer::new(args.boxes.options());
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(page_file_name(args.page)));

    let result = annotate_page(
        &visualizer,
        source.as_ref(),
        &manifest,
        args.page,
        args.layout,
        &output,
    )?;

    match args.report {
        ReportFormat::Json => print_json(&PageReport {
            page: args.page,
            output: &output,
            visualization: &result,
        })?,
        ReportFormat::Text => {
            println!("Slide {} -> {}", args.page, output.display());
            print!("{}", result);
        }
    }

    if !args.no_show {
        show(&output);
    }
    Ok(())
}

/// Execute the batch subcommand.
fn run_batch(args: BatchArgs) -> Result<(), SlideboxError> {
    let manifest = read_manifest(&args.manifest)?;
    let pages: Vec<usize> = if args.pages.is_empty() {
        (1..=manifest.slide_count()).collect()
    } else {
        args.pages.clone()
    };
    for &page in &pages {
        manifest.slide(page)?;
    }

    let first = pages.first().copied().unwrap_or(1);
    let source = args.source.open(&manifest, first)?;
    let visualizer = LayoutVisualizer::new(args.boxes.options());
    std::fs::create_dir_all(&args.output_dir)?;

    let mut failed = 0usize;
    for &page in &pages {
        let output = args.output_dir.join(page_file_name(page));
        match annotate_page(&visualizer, source.as_ref(), &manifest, page, None, &output) {
            Ok(result) => println!(
                "Slide {}: {} box(es) -> {}",
                page,
                result.box_count(),
                output.display()
            ),
            Err(e) => {
                error!("slide {}: {}", page, e);
                failed += 1;
            }
        }
    }

    println!(
        "Processed {} slide(s): {} succeeded, {} failed",
        pages.len(),
        pages.len() - failed,
        failed
    );

    if failed > 0 {
        Err(SlideboxError::BatchIncomplete {
            failed,
            total: pages.len(),
        })
    } else {
        Ok(())
    }
}

#[derive(Serialize)]
struct ClassifyReport<'a> {
    page: usize,
    #[serde(flatten)]
    report: &'a ExclusionReport,
}

/// Execute the classify subcommand.
fn run_classify(args: ClassifyArgs) -> Result<(), SlideboxError> {
    let manifest = read_manifest(&args.manifest)?;
    let slide = manifest.slide(args.page)?;
    let geometry = manifest.geometry_at_dpi(DEFAULT_DPI)?;

    let report = MasterElementClassifier::new().classify_slide(&slide.shapes, &geometry);

    match args.report {
        ReportFormat::Json => print_json(&ClassifyReport {
            page: args.page,
            report: &report,
        }),
        ReportFormat::Text => {
            println!("Slide {}", args.page);
            print!("{}", report);
            Ok(())
        }
    }
}
