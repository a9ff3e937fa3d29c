//! Presentation → PDF → page images.
//!
//! The presentation is converted with a headless office suite into a PDF
//! inside a temporary directory, then each page is rasterized with Poppler's
//! `pdftoppm` and loaded into memory. The temporary directory is removed
//! when rendering returns, whatever the outcome.

use deckcheck_core::{Error, Result};
use image::DynamicImage;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Rendering resolution used for OCR.
pub const DEFAULT_DPI: u32 = 200;

/// Prefix given to `pdftoppm` output files.
const PAGE_PREFIX: &str = "page";

/// Configuration for [`SlideRenderer`].
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Office suite executable used for the PDF conversion.
    pub office_bin: PathBuf,

    /// Directory holding the Poppler binaries; `PATH` is used when unset.
    pub poppler_path: Option<PathBuf>,

    /// Rasterization resolution.
    pub dpi: u32,

    /// Parent of the per-run temporary directory; the system temp dir when unset.
    pub scratch_dir: Option<PathBuf>,

    /// Log subprocess commands and output.
    pub debug: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            office_bin: PathBuf::from("libreoffice"),
            poppler_path: None,
            dpi: DEFAULT_DPI,
            scratch_dir: None,
            debug: false,
        }
    }
}

/// Renders slides to in-memory images.
#[derive(Debug, Clone, Default)]
pub struct SlideRenderer {
    config: RenderConfig,
}

impl SlideRenderer {
    /// Create a renderer with the given configuration.
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// The renderer configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render every slide to an image, in page order.
    ///
    /// Failures are logged and yield an empty sequence; callers fall back to
    /// native text only.
    pub fn render(&self, pptx_path: &Path) -> Vec<DynamicImage> {
        log::info!("Converting PPTX to images...");

        match self.try_render(pptx_path) {
            Ok(images) => images,
            Err(Error::Render(msg)) => {
                log::warn!("PPTX to PDF conversion failed: {}", msg);
                Vec::new()
            }
            Err(e) => {
                log::error!("PDF to image conversion error: {}", e);
                Vec::new()
            }
        }
    }

    /// Render every slide, reporting why rendering failed.
    ///
    /// Conversion failures are `Error::Render`, rasterization failures
    /// `Error::Rasterize` or `Error::IoError`.
    pub fn try_render(&self, pptx_path: &Path) -> Result<Vec<DynamicImage>> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("deckcheck-");
        let tmp_dir = match &self.config.scratch_dir {
            Some(dir) => builder.tempdir_in(dir),
            None => builder.tempdir(),
        }
        .map_err(|e| Error::Render(format!("Failed to create temp dir: {}", e)))?;

        let pdf_path = self.convert_to_pdf(pptx_path, tmp_dir.path())?;
        let images = self.rasterize(&pdf_path, tmp_dir.path())?;

        if self.config.debug {
            log::debug!("Rendered {} page images", images.len());
        }
        Ok(images)
    }

    /// Convert the presentation into a PDF inside `out_dir`.
    fn convert_to_pdf(&self, pptx_path: &Path, out_dir: &Path) -> Result<PathBuf> {
        let mut cmd = Command::new(&self.config.office_bin);
        cmd.arg("--headless")
            .arg("--convert-to")
            .arg("pdf")
            .arg("--outdir")
            .arg(out_dir)
            .arg(pptx_path);

        let output = self
            .run(&mut cmd)
            .map_err(|e| Error::Render(format!("{}: {}", self.config.office_bin.display(), e)))?;
        check_status(&output, "office conversion").map_err(Error::Render)?;

        let pdf_path = out_dir.join(pdf_file_name(pptx_path));
        if !pdf_path.exists() {
            return Err(Error::Render(format!("PDF not created: {}", pdf_path.display())));
        }
        Ok(pdf_path)
    }

    /// Rasterize every PDF page into memory.
    fn rasterize(&self, pdf_path: &Path, out_dir: &Path) -> Result<Vec<DynamicImage>> {
        let pdftoppm = self.pdftoppm_bin();
        if self.config.debug {
            log::debug!(
                "Converting PDF to images with pdftoppm={} at {} dpi",
                pdftoppm.display(),
                self.config.dpi
            );
        }

        let mut cmd = Command::new(&pdftoppm);
        cmd.arg("-r")
            .arg(self.config.dpi.to_string())
            .arg("-png")
            .arg(pdf_path)
            .arg(out_dir.join(PAGE_PREFIX));

        let output = self.run(&mut cmd)?;
        check_status(&output, "pdftoppm").map_err(Error::Rasterize)?;

        let pages = page_files(out_dir)?;
        let mut images = Vec::with_capacity(pages.len());
        for page in &pages {
            let image = image::open(page).map_err(|e| {
                Error::Rasterize(format!("Failed to load '{}': {}", page.display(), e))
            })?;
            images.push(image);
        }
        Ok(images)
    }

    /// Run a subprocess to completion, logging it in debug mode.
    fn run(&self, cmd: &mut Command) -> std::io::Result<Output> {
        if self.config.debug {
            log::debug!("Running command: {:?}", cmd);
        }

        let output = cmd.output()?;

        if self.config.debug {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stdout.trim().is_empty() {
                log::debug!("stdout: {}", stdout.trim_end());
            }
            if !stderr.trim().is_empty() {
                log::debug!("stderr: {}", stderr.trim_end());
            }
        }
        Ok(output)
    }

    fn pdftoppm_bin(&self) -> PathBuf {
        let name = format!("pdftoppm{}", std::env::consts::EXE_SUFFIX);
        match &self.config.poppler_path {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        }
    }
}

/// Turn a non-zero exit into an error message carrying stderr.
fn check_status(output: &Output, what: &str) -> std::result::Result<(), String> {
    if output.status.success() {
        return Ok(());
    }
    Err(format!(
        "{} exited with {}: {}",
        what,
        output.status,
        String::from_utf8_lossy(&output.stderr).trim()
    ))
}

/// The PDF name the office suite writes for an input file.
fn pdf_file_name(pptx_path: &Path) -> String {
    let stem = pptx_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    format!("{}.pdf", stem)
}

/// Page images written by `pdftoppm`, in page order.
///
/// Files are named `page-N.png`, with `N` zero-padded to the width of the
/// page count.
fn page_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut pages: Vec<(usize, PathBuf)> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter_map(|path| page_index(&path).map(|idx| (idx, path)))
        .collect();
    pages.sort_by_key(|(idx, _)| *idx);
    Ok(pages.into_iter().map(|(_, path)| path).collect())
}

/// Page number of a `page-N.png` file.
fn page_index(path: &Path) -> Option<usize> {
    if path.extension()?.to_str()? != "png" {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    let number = stem.strip_prefix(PAGE_PREFIX)?.strip_prefix('-')?;
    number.parse().ok()
}
