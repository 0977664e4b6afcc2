//! Extract questions from a fragment dump
//!
//! Reads a JSON fragment dump (see `quiz_oxide::document::MemoryDocument`),
//! segments it into question records and prints them as JSON. Optionally
//! renders and crops every question body to PNG.
//!
//! Usage:
//!   cargo run --release --bin quiz_extract -- dump.json
//!   cargo run --release --bin quiz_extract -- dump.json --config cfg.json --crop-dir crops/
//!   cargo run --release --bin quiz_extract -- dump.json --output questions.json

use quiz_oxide::document::MemoryDocument;
use quiz_oxide::pipeline::{ExamPipeline, ExamPipelineConfig, LoadedExam};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

struct ExtractConfig {
    dump: PathBuf,
    config: Option<PathBuf>,
    crop_dir: Option<PathBuf>,
    output: Option<PathBuf>,
}

impl ExtractConfig {
    fn from_args() -> Option<Self> {
        let args: Vec<String> = std::env::args().collect();
        let mut dump = None;
        let mut config = None;
        let mut crop_dir = None;
        let mut output = None;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--config" => {
                    i += 1;
                    config = args.get(i).map(PathBuf::from);
                },
                "--crop-dir" => {
                    i += 1;
                    crop_dir = args.get(i).map(PathBuf::from);
                },
                "--output" | "-o" => {
                    i += 1;
                    output = args.get(i).map(PathBuf::from);
                },
                other if !other.starts_with('-') && dump.is_none() => {
                    dump = Some(PathBuf::from(other));
                },
                other => {
                    eprintln!("Ignoring unknown argument: {}", other);
                },
            }
            i += 1;
        }

        Some(Self {
            dump: dump?,
            config,
            crop_dir,
            output,
        })
    }
}

fn run(args: &ExtractConfig) -> quiz_oxide::Result<()> {
    let config = match &args.config {
        Some(path) => ExamPipelineConfig::from_json_str(&fs::read_to_string(path)?)?,
        None => ExamPipelineConfig::default(),
    };

    let start = Instant::now();
    let doc = MemoryDocument::from_json_file(&args.dump)?;
    let exam = LoadedExam::load(doc, ExamPipeline::with_config(config))?;

    if exam.is_empty() {
        eprintln!("No questions found in {}", args.dump.display());
    }

    let json = serde_json::to_string_pretty(exam.records())?;
    match &args.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            writer.write_all(json.as_bytes())?;
            writer.flush()?;
        },
        None => println!("{}", json),
    }

    if let Some(dir) = &args.crop_dir {
        fs::create_dir_all(dir)?;
        for (i, record) in exam.records().iter().enumerate() {
            if let Some(image) = exam.render(i)? {
                let path = dir.join(format!("q{}_p{}.png", record.number, record.page + 1));
                image.save(&path)?;
            }
        }
    }

    let defaulted = exam
        .records()
        .iter()
        .filter(|r| !r.answer_detected())
        .count();
    eprintln!(
        "{} questions ({} without marked answer) in {:.2}s",
        exam.len(),
        defaulted,
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn main() {
    env_logger::init();

    let Some(args) = ExtractConfig::from_args() else {
        eprintln!("Usage: quiz_extract <dump.json> [--config cfg.json] [--crop-dir DIR] [--output FILE]");
        std::process::exit(2);
    };

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
