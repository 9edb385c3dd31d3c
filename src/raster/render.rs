//! Rendering a deck through LibreOffice and poppler.

use image::RgbImage;
use log::{debug, info};
use std::cell::OnceCell;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use walkdir::WalkDir;

use super::{ImageDirSource, RasterSource};
use crate::error::SlideboxError;

/// Resolution used when none is configured. A 4:3 slide comes out at
/// roughly 1500x1125 pixels.
pub const DEFAULT_DPI: u32 = 150;

/// Which tools to run and how.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RendererConfig {
    /// LibreOffice binary used to convert the deck to PDF.
    pub soffice: PathBuf,
    /// Poppler binary used to rasterize the PDF.
    pub pdftoppm: PathBuf,
    /// Output resolution in dots per inch.
    pub dpi: u32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            soffice: PathBuf::from("soffice"),
            pdftoppm: PathBuf::from("pdftoppm"),
            dpi: DEFAULT_DPI,
        }
    }
}

/// A [`RasterSource`] that renders the original presentation on first use.
///
/// The whole deck is converted once into a private temporary directory; later
/// pages are served from there. A failed conversion is remembered and reported
/// for every page requested afterwards.
pub struct ExternalRenderer {
    source: PathBuf,
    config: RendererConfig,
    rendered: OnceCell<Result<(TempDir, ImageDirSource), String>>,
}

impl ExternalRenderer {
    pub fn new(source: impl Into<PathBuf>, config: RendererConfig) -> Self {
        Self {
            source: source.into(),
            config,
            rendered: OnceCell::new(),
        }
    }

    /// Path of the presentation being rendered.
    pub fn source(&self) -> &Path {
        &self.source
    }

    fn pages(&self) -> Result<&ImageDirSource, &str> {
        self.rendered
            .get_or_init(|| self.render_deck())
            .as_ref()
            .map(|(_, pages)| pages)
            .map_err(String::as_str)
    }

    fn render_deck(&self) -> Result<(TempDir, ImageDirSource), String> {
        let workdir = tempfile::tempdir().map_err(|e| format!("cannot create work dir: {}", e))?;
        let pdf_dir = workdir.path().join("pdf");

        info!(
            "rendering {} at {} dpi",
            self.source.display(),
            self.config.dpi
        );

        let mut soffice = Command::new(&self.config.soffice);
        soffice
            .arg("--headless")
            .args(["--convert-to", "pdf", "--outdir"])
            .arg(&pdf_dir)
            .arg(&self.source);
        run_tool(&mut soffice, &self.config.soffice)?;

        let pdf = find_pdf(&pdf_dir)?;
        debug!("converted to {}", pdf.display());

        let mut pdftoppm = Command::new(&self.config.pdftoppm);
        pdftoppm
            .args(["-png", "-r"])
            .arg(self.config.dpi.to_string())
            .arg(&pdf)
            .arg(workdir.path().join("slide"));
        run_tool(&mut pdftoppm, &self.config.pdftoppm)?;

        let pages = ImageDirSource::open(workdir.path()).map_err(|e| e.to_string())?;
        if pages.last_page().is_none() {
            return Err(format!("{} produced no images", self.config.pdftoppm.display()));
        }
        Ok((workdir, pages))
    }
}

impl RasterSource for ExternalRenderer {
    fn last_page(&self) -> Option<usize> {
        self.pages().ok().and_then(|pages| pages.last_page())
    }

    fn render(&self, page: usize) -> Result<RgbImage, SlideboxError> {
        match self.pages() {
            Ok(pages) => pages.render(page),
            Err(message) => Err(SlideboxError::RenderFailure {
                page,
                message: message.to_string(),
            }),
        }
    }
}

fn run_tool(command: &mut Command, tool: &Path) -> Result<(), String> {
    let output = command.output().map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => format!("{} not found", tool.display()),
        _ => format!("cannot run {}: {}", tool.display(), e),
    })?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!(
            "{} exited with {}: {}",
            tool.display(),
            output.status,
            stderr.trim()
        ));
    }
    Ok(())
}

fn find_pdf(dir: &Path) -> Result<PathBuf, String> {
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| format!("no PDF output in {}: {}", dir.display(), e))?;
        let is_pdf = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
        if is_pdf && entry.file_type().is_file() {
            return Ok(entry.into_path());
        }
    }
    Err(format!("no PDF output in {}", dir.display()))
}
