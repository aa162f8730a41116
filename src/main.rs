use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use ecosort::{Normalization, OnnxClassifier, Pipeline, DEFAULT_THRESHOLD};

/// Waste-image classifier CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify a single image, reporting `uncertain` below the threshold
    Predict {
        /// ONNX model file path
        #[arg(long, value_name = "FILE")]
        model: PathBuf,

        /// Image to classify (PNG/JPEG/BMP/GIF)
        #[arg(long, value_name = "IMAGE")]
        image: PathBuf,

        /// Minimum confidence required to assign a class (0.0 - 1.0)
        #[arg(long, default_value_t = DEFAULT_THRESHOLD, value_name = "THRESHOLD")]
        threshold: f32,

        /// Use MobileNet-style [-1, 1] preprocessing instead of [0, 1] scaling
        #[arg(long)]
        mobilenet_preprocessing: bool,
    },

    /// Classify every image under a directory of per-class folders
    Evaluate {
        /// ONNX model file path
        #[arg(long, value_name = "FILE")]
        model: PathBuf,

        /// Root directory whose subdirectories are named after the true class
        #[arg(long, value_name = "DIR")]
        dir: PathBuf,

        /// Write per-image results to a CSV file
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,

        /// Use MobileNet-style [-1, 1] preprocessing instead of [0, 1] scaling
        #[arg(long)]
        mobilenet_preprocessing: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    match args.command {
        Command::Predict { model, image, threshold, mobilenet_preprocessing } => {
            run_predict(&model, &image, threshold, mobilenet_preprocessing)
        }
        Command::Evaluate { model, dir, csv, mobilenet_preprocessing } => {
            run_evaluate(&model, &dir, csv.as_deref(), mobilenet_preprocessing)
        }
    }
}

fn load_pipeline(model: &Path, mobilenet_preprocessing: bool) -> Result<Pipeline> {
    let normalization = if mobilenet_preprocessing {
        Normalization::MobileNet
    } else {
        Normalization::ZeroToOne
    };
    let classifier = OnnxClassifier::load(model)
        .with_context(|| format!("failed to load model from {}", model.display()))?;
    Ok(Pipeline::new(Box::new(classifier), normalization))
}

// ---------------------------------------------------------------------------
// predict
// ---------------------------------------------------------------------------

fn run_predict(
    model: &Path,
    image: &Path,
    threshold: f32,
    mobilenet_preprocessing: bool,
) -> Result<()> {
    let pipeline = load_pipeline(model, mobilenet_preprocessing)?;
    let bytes = std::fs::read(image)
        .with_context(|| format!("failed to read image {}", image.display()))?;
    let prediction = pipeline.predict_image_bytes(&bytes)?;

    println!(
        "Predicted class: {} ({:.2}%)",
        prediction.verdict(threshold),
        prediction.confidence * 100.0
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// evaluate
// ---------------------------------------------------------------------------

const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

fn run_evaluate(
    model: &Path,
    root: &Path,
    csv: Option<&Path>,
    mobilenet_preprocessing: bool,
) -> Result<()> {
    let pipeline = load_pipeline(model, mobilenet_preprocessing)?;

    let mut csv_writer = match csv {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            writeln!(writer, "folder,image,predicted_class,confidence")?;
            Some(writer)
        }
        None => None,
    };

    let mut total = 0usize;
    let mut hits = 0usize;

    let mut categories: Vec<PathBuf> = std::fs::read_dir(root)
        .with_context(|| format!("failed to read directory {}", root.display()))?
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    categories.sort();

    for category_path in &categories {
        let category = category_path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_owned();

        let mut images: Vec<PathBuf> = std::fs::read_dir(category_path)?
            .flatten()
            .map(|e| e.path())
            .filter(|p| is_image_file(p))
            .collect();
        images.sort();

        for image_path in &images {
            let file_name = image_path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or_default();

            let bytes = std::fs::read(image_path)?;
            let prediction = match pipeline.predict_image_bytes(&bytes) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("{}/{}: skipped ({})", category, file_name, e);
                    continue;
                }
            };

            println!(
                "{}/{}: {} ({:.2}%)",
                category,
                file_name,
                prediction.class,
                prediction.confidence * 100.0
            );
            if let Some(writer) = csv_writer.as_mut() {
                writeln!(
                    writer,
                    "{},{},{},{}",
                    category, file_name, prediction.class, prediction.confidence
                )?;
            }

            total += 1;
            if prediction.class.name() == category {
                hits += 1;
            }
        }
    }

    if total == 0 {
        println!("No images found under {}", root.display());
    } else {
        println!();
        println!(
            "Accuracy: {}/{} ({:.2}%)",
            hits,
            total,
            hits as f32 / total as f32 * 100.0
        );
    }
    Ok(())
}

fn is_image_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|s| s.to_str())
            .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false)
}
