//! Merging per-file catalogs into the cumulative output catalog.
//!
//! The default strategy is a native union of POT entries; the `--msgcat`
//! flag shells out to the gettext `msgcat` utility instead. Both replace
//! the output file via write-to-temp-then-rename so a failed merge leaves
//! the previous cumulative state untouched.

use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use tempfile::NamedTempFile;

use crate::catalog::POT_HEADER;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStrategy {
    /// In-process union of catalog entries.
    Native,
    /// Shell out to the gettext `msgcat` utility.
    Msgcat,
}

/// Merge serialized catalog text into the cumulative catalog at `outfile`.
pub fn merge_into(outfile: &Path, data: &str, strategy: MergeStrategy) -> Result<()> {
    match strategy {
        MergeStrategy::Native => merge_native(outfile, data),
        MergeStrategy::Msgcat => merge_msgcat(outfile, data),
    }
}

/// A message parsed from POT text. Values stay in their escaped form;
/// union keys compare escaped strings, so no unescaping is needed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct PotMessage {
    refs: Vec<String>,
    plural: Option<String>,
}

fn merge_native(outfile: &Path, data: &str) -> Result<()> {
    let existing = fs::read_to_string(outfile)
        .with_context(|| format!("Could not read {}", outfile.display()))?;

    let mut merged: IndexMap<(Option<String>, String), PotMessage> = IndexMap::new();
    parse_pot(&existing, &mut merged);
    parse_pot(data, &mut merged);

    let mut out = String::from(POT_HEADER);
    for ((ctx, msgid), message) in &merged {
        if !message.refs.is_empty() {
            out.push_str("#: ");
            out.push_str(&message.refs.join(" "));
            out.push('\n');
        }
        if let Some(ctx) = ctx {
            out.push_str(&format!("msgctxt \"{ctx}\"\n"));
        }
        out.push_str(&format!("msgid \"{msgid}\"\n"));
        match &message.plural {
            Some(plural) => {
                out.push_str(&format!("msgid_plural \"{plural}\"\n"));
                out.push_str("msgstr[0] \"\"\n");
                out.push_str("msgstr[1] \"\"\n");
            }
            None => out.push_str("msgstr \"\"\n"),
        }
        out.push('\n');
    }

    replace_file(outfile, &out)
}

fn merge_msgcat(outfile: &Path, data: &str) -> Result<()> {
    let input = NamedTempFile::new().context("Could not create temporary file")?;
    fs::write(input.path(), data)
        .with_context(|| format!("Failed to write {}", input.path().display()))?;

    let result = NamedTempFile::new_in(parent_dir(outfile))
        .context("Could not create temporary file")?;
    let status = Command::new("msgcat")
        .arg("-o")
        .arg(result.path())
        .arg(outfile)
        .arg(input.path())
        .status()
        .context("Failed to run msgcat")?;

    if !status.success() {
        bail!("msgcat failed with {}", status);
    }

    result
        .persist(outfile)
        .with_context(|| format!("Failed to replace {}", outfile.display()))?;
    Ok(())
}

fn replace_file(outfile: &Path, content: &str) -> Result<()> {
    let tmp = NamedTempFile::new_in(parent_dir(outfile))
        .context("Could not create temporary file")?;
    fs::write(tmp.path(), content)
        .with_context(|| format!("Failed to write {}", tmp.path().display()))?;
    tmp.persist(outfile)
        .with_context(|| format!("Failed to replace {}", outfile.display()))?;
    Ok(())
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if parent != Path::new("") => parent,
        _ => Path::new("."),
    }
}

/// Fold entries of POT text into `entries`. Identical `(msgctxt, msgid)`
/// keys collapse: references are concatenated with duplicates dropped and
/// the first-seen plural form wins, matching msgcat's union behavior.
/// Only the single-line strings our serializer emits are handled.
fn parse_pot(content: &str, entries: &mut IndexMap<(Option<String>, String), PotMessage>) {
    let mut refs: Vec<String> = Vec::new();
    let mut ctx: Option<String> = None;
    let mut msgid: Option<String> = None;
    let mut plural: Option<String> = None;

    for line in content.lines().chain(std::iter::once("")) {
        let line = line.trim();

        if let Some(rest) = line.strip_prefix("#:") {
            refs.extend(rest.split_whitespace().map(String::from));
        } else if let Some(rest) = line.strip_prefix("msgctxt ") {
            ctx = Some(unquote(rest));
        } else if let Some(rest) = line.strip_prefix("msgid_plural ") {
            plural = Some(unquote(rest));
        } else if let Some(rest) = line.strip_prefix("msgid ") {
            msgid = Some(unquote(rest));
        } else if line.is_empty() {
            if let Some(id) = msgid.take() {
                // the header entry has no refs and no context
                if !(id.is_empty() && ctx.is_none() && refs.is_empty()) {
                    let entry = entries.entry((ctx.take(), id)).or_default();
                    for reference in refs.drain(..) {
                        if !entry.refs.contains(&reference) {
                            entry.refs.push(reference);
                        }
                    }
                    if entry.plural.is_none() {
                        entry.plural = plural.take();
                    }
                }
            }
            ctx = None;
            plural = None;
            refs.clear();
        }
        // msgstr lines and other comments are ignored
    }
}

/// Strip one pair of surrounding quotes; the value keeps its escaped form.
fn unquote(value: &str) -> String {
    let value = value.trim();
    let value = value.strip_prefix('"').unwrap_or(value);
    let value = value.strip_suffix('"').unwrap_or(value);
    value.to_string()
}
