use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use license_detect::cli::Cli;
use license_detect::license_detection::{Corpus, Detector};
use license_detect::report::{FileReport, MatchReport, Report, ReportHeader};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let start_time = Utc::now();

    let corpus = Corpus::load(&cli.corpus_dirs).context("failed to load license corpus")?;
    log::debug!("loaded corpus with {} reference licenses", corpus.licenses().len());
    let detector = Detector::new(corpus);

    let files = collect_files(Path::new(&cli.path)).context("failed to enumerate scan targets")?;
    let progress = create_progress_bar(files.len());

    let file_reports: Vec<FileReport> = files
        .par_iter()
        .map(|path| {
            let report = scan_one(&detector, path, cli.threshold);
            progress.inc(1);
            report
        })
        .collect::<Result<Vec<_>>>()?;
    progress.finish_with_message("scan complete");

    let end_time = Utc::now();
    let header = ReportHeader::new(start_time, end_time, cli.threshold, detector.corpus().licenses().len());
    let report = Report {
        header,
        files: file_reports,
    };

    write_report(&cli.output_file, &report)?;
    println!("JSON report written to {}", cli.output_file);
    Ok(())
}

fn scan_one(detector: &Detector, path: &Path, threshold: f32) -> Result<FileReport> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let matches = detector
        .detect(&text, threshold)
        .with_context(|| format!("detection failed for {}", path.display()))?;
    Ok(FileReport {
        path: path.to_path_buf(),
        matches: matches.iter().map(MatchReport::from).collect(),
    })
}

/// A file scans itself; a directory is scanned non-recursively, one level
/// deep, matching the corpus loader's own non-recursive directory contract.
fn collect_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(path).with_context(|| format!("failed to read directory {}", path.display()))? {
        let entry = entry?;
        let entry_path = entry.path();
        if entry_path.is_file() {
            files.push(entry_path);
        }
    }
    files.sort();
    Ok(files)
}

fn create_progress_bar(total: usize) -> Arc<ProgressBar> {
    let bar = if total > 1 {
        ProgressBar::new(total as u64)
    } else {
        ProgressBar::hidden()
    };
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files scanned")
            .expect("valid progress bar template")
            .progress_chars("#>-"),
    );
    Arc::new(bar)
}

fn write_report(output_file: &str, report: &Report) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("failed to serialise report")?;
    let mut file = File::create(output_file).with_context(|| format!("failed to create {output_file}"))?;
    file.write_all(json.as_bytes())
        .with_context(|| format!("failed to write {output_file}"))?;
    Ok(())
}
