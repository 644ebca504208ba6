//! bagdump - Extract quiz databases from compiled binaries
//!
//! This tool pulls the compressed quiz database out of a quiz executable,
//! decodes its questions and answers, and writes an answer-key report in
//! Markdown together with any embedded images.

use anyhow::{bail, Context, Result};
use bagdump_core::{ContentItem, Decoder, Question, QuestionSet};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

/// Extract quiz databases from compiled binaries
#[derive(Parser, Debug)]
#[command(name = "bagdump")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the quiz executable containing the embedded database
    input: PathBuf,

    /// Output directory for the report and extracted images
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Dry run - don't write files, just show what would be written
    #[arg(long)]
    dry_run: bool,

    /// Overwrite an existing report directory
    #[arg(long)]
    force: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .init();

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    if !cli.input.exists() {
        bail!("Input file does not exist: {}", cli.input.display());
    }
    if !cli.input.is_file() {
        bail!("Input path is not a file: {}", cli.input.display());
    }

    let set = Decoder::new()
        .decode_file(&cli.input)
        .with_context(|| format!("Failed to decode database from {}", cli.input.display()))?;

    info!(
        "decoded {} question(s) from {}",
        set.len(),
        cli.input.display()
    );

    export_report(cli, &set)
}

/// Writes extracted images under the report's `images/` directory,
/// numbering them in order of appearance.
struct ImageSink {
    dir: PathBuf,
    next: usize,
    dry_run: bool,
}

impl ImageSink {
    fn new(dir: PathBuf, dry_run: bool) -> Self {
        Self {
            dir,
            next: 1,
            dry_run,
        }
    }

    /// Writes one image and returns its report-relative path.
    fn write(&mut self, bytes: &[u8]) -> Result<String> {
        let name = format!("Picture_{}.png", self.next);
        self.next += 1;

        let path = self.dir.join(&name);
        if self.dry_run {
            println!("Would write: {} ({} bytes)", path.display(), bytes.len());
        } else {
            fs::write(&path, bytes)
                .with_context(|| format!("Failed to write image: {}", path.display()))?;
            debug!("wrote {} ({} bytes)", path.display(), bytes.len());
        }
        Ok(format!("images/{name}"))
    }

    fn written(&self) -> usize {
        self.next - 1
    }
}

/// Render the answer-key report and write it with its images.
///
/// The report lands in `<output>/<exe-stem>/Answers_<exe-stem>.md`, with
/// images under an `images/` subdirectory next to it.
fn export_report(cli: &Cli, set: &QuestionSet) -> Result<()> {
    let stem = exe_stem(&cli.input);
    let report_dir = cli.output.join(&stem);

    if report_dir.exists() && !cli.force {
        bail!(
            "Report directory already exists: {} (use --force to overwrite)",
            report_dir.display()
        );
    }

    let images_dir = report_dir.join("images");
    if !cli.dry_run {
        fs::create_dir_all(&images_dir)
            .with_context(|| format!("Failed to create directory: {}", images_dir.display()))?;
    }

    let mut images = ImageSink::new(images_dir, cli.dry_run);
    let mut report = String::new();
    for question in set {
        render_question(&mut report, question, &mut images)?;
    }

    let report_path = report_dir.join(format!("Answers_{stem}.md"));
    if cli.dry_run {
        println!(
            "Would write: {} ({} questions)",
            report_path.display(),
            set.len()
        );
    } else {
        fs::write(&report_path, &report)
            .with_context(|| format!("Failed to write report: {}", report_path.display()))?;
        println!("Wrote {}", report_path.display());
    }

    info!(
        "Summary: {} questions, {} images",
        set.len(),
        images.written()
    );
    Ok(())
}

/// Render one question and its correct answer.
fn render_question(report: &mut String, question: &Question, images: &mut ImageSink) -> Result<()> {
    for item in &question.body {
        match item {
            ContentItem::Text(text) => {
                report.push_str(&format!("**{text}**\n\n"));
            }
            ContentItem::Picture(bytes) => {
                let rel = images.write(bytes)?;
                report.push_str(&format!("![]({rel})\n\n"));
            }
            ContentItem::Empty => {}
        }
    }

    for item in &question.correct().items {
        match item {
            ContentItem::Text(text) => {
                report.push_str(&format!(">{text}\n"));
            }
            ContentItem::Picture(bytes) => {
                let rel = images.write(bytes)?;
                report.push_str(&format!("![]({rel})\n"));
            }
            ContentItem::Empty => {}
        }
    }

    report.push_str("\n---\n\n");
    Ok(())
}

/// File stem of the input executable, used to name the report directory.
fn exe_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "database".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bagdump_core::Answer;
    use tempfile::TempDir;

    fn tiny_png() -> Vec<u8> {
        let mut png = b"\x89PNG\r\n\x1a\n".to_vec();
        png.extend_from_slice(&[0, 0, 0, 0]);
        png.extend_from_slice(b"IEND");
        png.extend_from_slice(&[0xAE, 0x42, 0x60, 0x82]);
        png
    }

    fn text_answer(text: &str) -> Answer {
        Answer {
            items: vec![ContentItem::Text(text.to_string())],
        }
    }

    fn sample_set() -> QuestionSet {
        QuestionSet {
            questions: vec![
                Question {
                    body: vec![ContentItem::Text("2+2?".to_string())],
                    answers: vec![text_answer("3"), text_answer("4")],
                    correct_answer: 1,
                },
                Question {
                    body: vec![ContentItem::Text("which sign?".to_string())],
                    answers: vec![
                        Answer {
                            items: vec![ContentItem::Picture(tiny_png())],
                        },
                        text_answer("none"),
                    ],
                    correct_answer: 0,
                },
            ],
        }
    }

    fn cli_for(input: &Path, output: &Path, extra: &[&str]) -> Cli {
        let mut args = vec![
            "bagdump".to_string(),
            input.to_string_lossy().into_owned(),
            "-o".to_string(),
            output.to_string_lossy().into_owned(),
        ];
        args.extend(extra.iter().map(|s| s.to_string()));
        Cli::parse_from(args)
    }

    #[test]
    fn test_export_writes_report_and_images() {
        let temp_dir = TempDir::new().unwrap();
        let cli = cli_for(Path::new("quiz.exe"), temp_dir.path(), &[]);

        export_report(&cli, &sample_set()).unwrap();

        let report =
            fs::read_to_string(temp_dir.path().join("quiz").join("Answers_quiz.md")).unwrap();
        assert!(report.contains("**2+2?**"));
        assert!(report.contains(">4"));
        assert!(!report.contains(">3"));
        assert!(report.contains("![](images/Picture_1.png)"));

        let image =
            fs::read(temp_dir.path().join("quiz").join("images").join("Picture_1.png")).unwrap();
        assert_eq!(image, tiny_png());
    }

    #[test]
    fn test_export_dry_run_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let cli = cli_for(Path::new("quiz.exe"), temp_dir.path(), &["--dry-run"]);

        export_report(&cli, &sample_set()).unwrap();

        assert!(!temp_dir.path().join("quiz").exists());
    }

    #[test]
    fn test_export_refuses_existing_directory_without_force() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("quiz")).unwrap();

        let cli = cli_for(Path::new("quiz.exe"), temp_dir.path(), &[]);
        assert!(export_report(&cli, &sample_set()).is_err());

        let cli = cli_for(Path::new("quiz.exe"), temp_dir.path(), &["--force"]);
        export_report(&cli, &sample_set()).unwrap();
    }

    #[test]
    fn test_exe_stem() {
        assert_eq!(exe_stem(Path::new("/tmp/Quiz2003.exe")), "Quiz2003");
        assert_eq!(exe_stem(Path::new("quiz")), "quiz");
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
