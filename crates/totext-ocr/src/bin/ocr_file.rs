//! Recognize text in an image file - run with: cargo run -p totext-ocr --bin ocr_file -- <path>

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use totext_config::ocr::OcrConfig;
use totext_ocr::{OcrInvoker, TesseractEngine};
use totext_types::{ImageReference, RecognitionResult};

#[derive(Parser, Debug)]
#[command(name = "ocr_file", about = "Run OCR on a single image file")]
struct Args {
    /// Image to recognize
    path: PathBuf,

    /// Tesseract language code(s)
    #[arg(short, long)]
    lang: Option<String>,

    /// Path to the tesseract binary
    #[arg(long)]
    tesseract: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = OcrConfig::new();
    if let Some(lang) = args.lang {
        config.language = lang;
    }
    if let Some(tesseract) = args.tesseract {
        config.tesseract_path = tesseract;
    }

    let engine = TesseractEngine::new(&config);
    match engine.probe().await {
        Ok(version) => tracing::debug!("Using {}", version),
        Err(e) => anyhow::bail!("{e}"),
    }

    let invoker = OcrInvoker::new(Arc::new(engine));
    let start = std::time::Instant::now();
    let result = invoker.recognize(&ImageReference::new(&args.path)).await;
    tracing::debug!("Recognition took {:?}", start.elapsed());

    match result {
        RecognitionResult::Success(text) => {
            println!("{text}");
            Ok(())
        }
        RecognitionResult::Failure { stage, reason } => {
            anyhow::bail!(RecognitionResult::failure_notice(stage, &reason))
        }
    }
}
