//! Minimal CLI: infer → (dart | schema)
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::GeneratedFile;
use crate::codegen::{OutputStyle, freezed};
use crate::error::{Error, Result};
use crate::inference::str;
use crate::settings::{DEFAULT_ROOT_CLASS, GenerateOptions};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer Dart data classes from sample JSON documents
#[derive(Parser, Debug)]
#[command(name = "json-dart-gen", version)]
pub struct CommandLineInterface {
    /// log inference decisions (same as RUST_LOG=debug)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// infer and emit Dart classes
    Dart(DartOut),
    /// infer and print the class registry as JSON
    Schema(SchemaOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON Pointer to select the sample inside each document (e.g. /data/items)
    #[arg(long)]
    json_pointer: Option<String>,

    /// root class name; with several inputs each file defaults to its Pascal-cased stem
    #[arg(long)]
    root_class: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns or '-' for stdin
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct DartOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[arg(long, value_enum, default_value_t = OutputStyle::Plain)]
    style: OutputStyle,

    /// output .dart file (stdout if omitted)
    #[arg(short, long, conflicts_with = "out_dir")]
    out: Option<PathBuf>,

    /// directory receiving one `<snake_case root>.dart` per input
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct SchemaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    Stdin,
    File(PathBuf),
}

/// One loaded input plus the settings it is generated with.
#[derive(Debug)]
struct Job {
    source: Source,
    text: String,
    options: GenerateOptions,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Source {
    fn label(&self) -> String {
        match self {
            Self::Stdin => "<stdin>".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }

    fn read(&self) -> Result<String> {
        match self {
            Self::Stdin => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .map_err(|e| Error::io("<stdin>", e))?;
                Ok(text)
            }
            Self::File(path) => std::fs::read_to_string(path).map_err(|e| Error::io(path, e)),
        }
    }

    /// `order-items.json` → `OrderItems`
    fn stem_class(&self) -> Option<String> {
        match self {
            Self::Stdin => None,
            Self::File(path) => path
                .file_stem()
                .map(|stem| str::pascal(&stem.to_string_lossy())),
        }
    }
}

impl InputSettings {
    fn load(&self, style: OutputStyle) -> Result<Vec<Job>> {
        let sources = resolve_sources(&self.input)?;
        let batch = sources.len() > 1;
        if self.ignores_root_class(sources.len()) {
            warn!(inputs = sources.len(), "--root-class is ignored with several inputs; using file stems");
        }
        sources
            .into_iter()
            .map(|source| {
                let root = match (&self.root_class, batch) {
                    (Some(root), false) => root.clone(),
                    (_, true) => source
                        .stem_class()
                        .unwrap_or_else(|| DEFAULT_ROOT_CLASS.to_string()),
                    (None, false) => DEFAULT_ROOT_CLASS.to_string(),
                };
                let options = GenerateOptions::new()
                    .with_root_class(root)
                    .with_style(style)
                    .with_json_pointer(self.json_pointer.clone());
                let text = source.read()?;
                Ok(Job { source, text, options })
            })
            .collect()
    }

    /// `--root-class` only names the root of a single resolved input.
    fn ignores_root_class(&self, source_count: usize) -> bool {
        source_count > 1 && self.root_class.is_some()
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Dart(target) => target.run(),
            Command::Schema(target) => target.run(),
        }
    }
}

impl DartOut {
    fn run(&self) -> anyhow::Result<()> {
        let jobs = self.input_settings.load(self.style)?;
        if jobs.len() > 1 && self.out_dir.is_none() {
            return Err(Error::MissingOutDir { count: jobs.len() }.into());
        }

        // each job owns its own registry
        let files = jobs
            .par_iter()
            .map(|job| {
                info!(input = %job.source.label(), root = %job.options.root_class, "generating");
                crate::generate(&job.text, &job.options)
                    .with_context(|| format!("failed to generate {}", job.source.label()))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        check_distinct_outputs(&jobs, &files)?;

        for file in &files {
            match (&self.out_dir, &self.out) {
                (Some(dir), _) => write_output(&dir.join(&file.file_name), &file.contents)?,
                (None, Some(out)) => write_output(out, &file.contents)?,
                (None, None) => print!("{}", file.contents),
            }
        }

        if self.style == OutputStyle::Freezed {
            eprintln!("{}", "Install the freezed toolchain, then run build_runner:".yellow());
            eprintln!("{}", freezed::INSTALL_COMMANDS.dimmed());
        }
        Ok(())
    }
}

impl SchemaOut {
    fn run(&self) -> anyhow::Result<()> {
        let jobs = self.input_settings.load(OutputStyle::default())?;
        let generations = jobs
            .par_iter()
            .map(|job| {
                crate::infer(&job.text, &job.options)
                    .with_context(|| format!("failed to infer {}", job.source.label()))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        let schema_src = match generations.as_slice() {
            [single] => serde_json::to_string_pretty(single)?,
            many => serde_json::to_string_pretty(many)?,
        };
        match self.out.as_ref() {
            Some(out) => write_output(out, &schema_src)?,
            None => println!("{schema_src}"),
        }
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    std::fs::write(path, contents).map_err(|e| Error::io(path, e))?;
    info!(path = %path.display(), "wrote output");
    Ok(())
}

/// Batch outputs are keyed by file name only; two inputs with the same slug
/// would overwrite each other.
fn check_distinct_outputs(jobs: &[Job], files: &[GeneratedFile]) -> Result<()> {
    let mut seen = HashMap::<&str, &Job>::new();
    for (job, file) in jobs.iter().zip(files) {
        if let Some(first) = seen.insert(file.file_name.as_str(), job) {
            return Err(Error::DuplicateOutput {
                file_name: file.file_name.clone(),
                first: first.source.label(),
                second: job.source.label(),
            });
        }
    }
    Ok(())
}

fn resolve_sources<I>(patterns: I) -> Result<Vec<Source>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<Source>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if pattern == "-" {
            out.push(Source::Stdin);
        } else if has_glob_chars(pattern) {
            let mut matches = glob::glob(pattern)?.collect::<Result<Vec<_>, _>>()?;
            if matches.is_empty() {
                return Err(Error::NoMatches { pattern: pattern.to_string() });
            }
            matches.sort();
            out.extend(matches.into_iter().map(Source::File));
        } else {
            out.push(Source::File(PathBuf::from(pattern)));
        }
    }

    Ok(out)
}
