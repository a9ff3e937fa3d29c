//! CLI tool for finding inconsistencies in PowerPoint presentations.

mod pipeline;

use anyhow::{bail, Result};
use clap::Parser;
use deckcheck_analyzer::{
    GeminiClient, GeminiConfig, InconsistencyAnalyzer, API_KEY_ENV, DEFAULT_MODEL,
};
use deckcheck_core::ResultWriter;
use deckcheck_render::{RenderConfig, SlideRenderer, TesseractCli, DEFAULT_DPI};
use pipeline::Pipeline;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Find inconsistencies in PowerPoint presentations.
#[derive(Parser, Debug)]
#[command(name = "deckcheck")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the PowerPoint (.pptx) file
    input: PathBuf,

    /// Output JSON file path
    #[arg(long, default_value = "results.json")]
    output: PathBuf,

    /// Path to the Poppler bin directory
    #[arg(long)]
    poppler: Option<PathBuf>,

    /// Gemini API key (defaults to the GOOGLE_API_KEY environment variable)
    #[arg(long)]
    api_key: Option<String>,

    /// Office suite binary used to convert slides to PDF
    #[arg(long, default_value = "libreoffice")]
    office: PathBuf,

    /// Gemini model name
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Tesseract language, e.g. "eng" or "eng+deu"
    #[arg(long)]
    ocr_lang: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
            .init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .init();
    }

    log::info!("Starting PPTX consistency checker");

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let api_key = preflight(
        &args.input,
        args.api_key.as_deref(),
        std::env::var(API_KEY_ENV).ok().as_deref(),
    )?;

    if cfg!(windows) && std::env::var_os("TESSDATA_PREFIX").is_none() {
        log::warn!(
            "TESSDATA_PREFIX environment variable not set - Tesseract might not work properly"
        );
    }

    let renderer = SlideRenderer::new(RenderConfig {
        office_bin: args.office.clone(),
        poppler_path: args.poppler.clone(),
        dpi: DEFAULT_DPI,
        scratch_dir: None,
        debug: args.debug,
    });
    let ocr = TesseractCli::new().with_language(args.ocr_lang.clone());
    let client = GeminiClient::new(GeminiConfig::new(api_key).with_model(&args.model))?;
    log::debug!("Using model {}", client.model());
    let analyzer = InconsistencyAnalyzer::new(client).with_debug(args.debug);
    let writer = ResultWriter::new(&args.output);

    let pipeline = Pipeline {
        renderer: &renderer,
        ocr: &ocr,
        analyzer: &analyzer,
        writer: &writer,
        debug: args.debug,
    };
    pipeline.run(&args.input)?;

    Ok(())
}

/// Check the input file and resolve the API key before any work starts.
fn preflight(input: &Path, flag_key: Option<&str>, env_key: Option<&str>) -> Result<String> {
    if !input.exists() {
        bail!("File not found: {}", input.display());
    }

    let usable = |k: &&str| !k.trim().is_empty();
    match flag_key.filter(usable).or(env_key.filter(usable)) {
        Some(key) => Ok(key.to_string()),
        None => bail!(
            "API key not provided. Use --api-key or set {} environment variable",
            API_KEY_ENV
        ),
    }
}
