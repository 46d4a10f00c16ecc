//! Per-file extraction pipeline.
//!
//! Files are processed sequentially: each one is read, scanned for tags,
//! folded into a fresh catalog, serialized, and merged into the cumulative
//! output before the next file starts.

use std::{
    env, fs,
    io::{self, Write},
    path::Path,
};

use anyhow::{Context, Result};
use colored::Colorize;

use super::args::Arguments;
use crate::catalog::{Catalog, POT_HEADER};
use crate::config::load_config;
use crate::extract::{TagExtractor, line_from_offset};
use crate::merge::{MergeStrategy, merge_into};
use crate::scanner::collect_files;

pub fn run(args: Arguments) -> Result<()> {
    let start_dir = env::current_dir().context("Could not determine current directory")?;
    let config = load_config(&start_dir)?.config;
    let extractor = TagExtractor::new(&config)?;
    let strategy = if args.msgcat {
        MergeStrategy::Msgcat
    } else {
        MergeStrategy::Native
    };

    let files = collect_files(&args.paths, &config.extensions)?;

    // When no output path is given, accumulate into a temp file and print
    // it at the end; the file is removed when the guard drops.
    let temp_out;
    let outfile = match &args.output {
        Some(path) => path.as_path(),
        None => {
            temp_out = tempfile::NamedTempFile::new()
                .context("Could not create temporary file")?;
            temp_out.path()
        }
    };

    fs::write(outfile, POT_HEADER)
        .with_context(|| format!("Failed to initialize {}", outfile.display()))?;

    for file in &files {
        if args.verbose {
            eprintln!("{} {}", "extracting".bold().green(), file.display());
        }
        process_file(&extractor, file, outfile, strategy)?;
    }

    if args.output.is_none() {
        let content = fs::read_to_string(outfile)
            .with_context(|| format!("Could not read {}", outfile.display()))?;
        io::stdout().write_all(content.as_bytes())?;
    }

    Ok(())
}

fn process_file(
    extractor: &TagExtractor,
    file: &Path,
    outfile: &Path,
    strategy: MergeStrategy,
) -> Result<()> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("Could not read {}", file.display()))?;
    let file_name = file.to_string_lossy();

    let mut catalog = Catalog::new();
    for tag in extractor.matches(&content) {
        let line = line_from_offset(&content, tag.offset);
        catalog.add(
            tag.context(),
            tag.body,
            tag.plural(),
            format!("{file_name}:{line}"),
        );
    }

    // nothing matched, nothing to merge
    if catalog.is_empty() {
        return Ok(());
    }

    merge_into(outfile, &catalog.to_pot(), strategy)
}
