//! In-memory message catalog and POT serialization.
//!
//! A catalog is built per input file, serialized, merged into the
//! cumulative output, and discarded. Entries live in two insertion-ordered
//! mappings: one keyed by `(context, msgid)` for context-bearing messages
//! and one keyed by `msgid` alone. Serialization emits the context-bearing
//! section first, grouped by context, then the context-free section.

use indexmap::IndexMap;

/// Header of every emitted catalog. Each per-file catalog carries it so the
/// merge step can union them into a single valid POT file.
pub const POT_HEADER: &str =
    "msgid \"\"\nmsgstr \"Content-Type: text/plain; charset=UTF-8\\n\"\n\n";

/// One distinct translatable message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Plural form, taken from the `plural` attribute's captured value.
    pub plural: Option<String>,
    /// `"file:line"` references in order of appearance. Duplicates are
    /// retained within a file pass.
    pub refs: Vec<String>,
}

#[derive(Debug, Default)]
pub struct Catalog {
    contextual: IndexMap<(String, String), CatalogEntry>,
    plain: IndexMap<String, CatalogEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.contextual.is_empty() && self.plain.is_empty()
    }

    /// Fold one tag match into the catalog.
    ///
    /// A repeated `(context, msgid)` key appends to the existing entry's
    /// references; a repeated key carrying a plural overwrites the stored
    /// plural (last write wins).
    pub fn add(
        &mut self,
        context: Option<&str>,
        msgid: &str,
        plural: Option<&str>,
        reference: String,
    ) {
        let entry = match context {
            Some(ctx) => self
                .contextual
                .entry((ctx.to_string(), msgid.to_string()))
                .or_default(),
            None => self.plain.entry(msgid.to_string()).or_default(),
        };

        if let Some(plural) = plural {
            entry.plural = Some(plural.to_string());
        }
        entry.refs.push(reference);
    }

    /// Serialize to POT text: header, context-bearing entries grouped by
    /// context in order of first appearance, then context-free entries.
    pub fn to_pot(&self) -> String {
        let mut out = String::from(POT_HEADER);

        let mut contexts: Vec<&str> = Vec::new();
        for (ctx, _) in self.contextual.keys() {
            if !contexts.contains(&ctx.as_str()) {
                contexts.push(ctx.as_str());
            }
        }

        for wanted in contexts {
            for ((ctx, msgid), entry) in &self.contextual {
                if ctx.as_str() != wanted {
                    continue;
                }
                out.push_str("#: ");
                out.push_str(&entry.refs.join(" "));
                out.push('\n');
                out.push_str(&format!("msgctxt \"{}\"\n", fix_string(ctx)));
                emit_message(&mut out, msgid, entry);
            }
        }

        for (msgid, entry) in &self.plain {
            out.push_str("#: ");
            out.push_str(&entry.refs.join(" "));
            out.push('\n');
            emit_message(&mut out, msgid, entry);
        }

        out
    }
}

fn emit_message(out: &mut String, msgid: &str, entry: &CatalogEntry) {
    out.push_str(&format!("msgid \"{}\"\n", fix_string(msgid)));
    match &entry.plural {
        Some(plural) => {
            out.push_str(&format!("msgid_plural \"{}\"\n", fix_string(plural)));
            out.push_str("msgstr[0] \"\"\n");
            out.push_str("msgstr[1] \"\"\n");
        }
        None => out.push_str("msgstr \"\"\n"),
    }
    out.push('\n');
}

/// "Fix" a captured string for POT output: strip one layer of backslash
/// escapes from the template source, then escape double quotes, then turn
/// literal newlines into the two-character sequence `\n`. The order
/// matters; the transform is deliberately asymmetric (unescaping the
/// result restores quotes but not newlines).
pub fn fix_string(s: &str) -> String {
    strip_slashes(s).replace('"', "\\\"").replace('\n', "\\n")
}

/// Remove one layer of backslash escapes; a trailing lone backslash is
/// dropped.
fn strip_slashes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}
