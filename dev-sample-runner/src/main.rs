//! Runs every fixture through both output styles twice and checks that the
//! output is stable.
use anyhow::{Context, bail};
use colored::Colorize;
use json_dart_gen::{GenerateOptions, OutputStyle, generate};

const STYLES: [OutputStyle; 2] = [OutputStyle::Plain, OutputStyle::Freezed];

fn main() -> anyhow::Result<()> {
    let pattern = std::env::args().nth(1).unwrap_or_else(|| "fixtures/*.json".to_string());
    let mut failures = 0usize;
    let mut total = 0usize;

    for entry in glob::glob(&pattern)? {
        let path = entry?;
        let source = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let stem = path.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default();

        for style in STYLES {
            total += 1;
            let options = GenerateOptions::new().with_root_class(&stem).with_style(style);
            let first = generate(&source, &options);
            let second = generate(&source, &options);
            match (first, second) {
                (Ok(a), Ok(b)) if a == b => {
                    eprintln!(
                        "{} {} ({style:?}): {} classes",
                        "✅".green(),
                        path.display(),
                        a.class_count
                    );
                }
                (Ok(_), Ok(_)) => {
                    failures += 1;
                    eprintln!("{} {} ({style:?}): output differs between runs", "❌".red(), path.display());
                }
                (Err(error), _) | (_, Err(error)) => {
                    failures += 1;
                    eprintln!("{} {} ({style:?}): {error}", "❌".red(), path.display());
                }
            }
        }
    }

    if total == 0 {
        bail!("no fixtures matched {pattern}");
    }
    if failures > 0 {
        bail!("{failures} of {total} runs failed");
    }
    eprintln!("{}", format!("all {total} runs stable").green().bold());
    Ok(())
}
