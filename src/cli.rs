use clap::Parser;

/// Fingerprint known open-source licenses inside a file or directory of
/// text files, reporting SPDX identifiers, confidence, and byte ranges.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// File or directory to scan. A directory is scanned non-recursively.
    pub path: String,

    /// Reference directories to load the license corpus from. May be given
    /// more than once; each is scanned non-recursively for `.txt` files.
    #[arg(short, long = "corpus", required = true)]
    pub corpus_dirs: Vec<String>,

    /// Minimum confidence, in (0, 1], required to report a match.
    #[arg(short, long, default_value = "0.9")]
    pub threshold: f32,

    /// Output file path for the JSON report.
    #[arg(short, long, default_value = "output.json")]
    pub output_file: String,
}
