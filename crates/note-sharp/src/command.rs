//! Parsing of editor commands read one per line.

use std::str::FromStr;

use anyhow::{bail, Result};

/// One line of input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New,
    Open(String),
    /// Save to the given path, or to the document's own path.
    Save(Option<String>),
    Undo,
    Redo,
    /// Typed one character at a time.
    Type(String),
    /// Replaces the whole text as a single edit.
    Set(String),
    Print,
    Status,
    ZoomIn,
    ZoomOut,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    /// Lines starting with `:` are commands. Anything else is typed text
    /// followed by a newline; a leading `::` types a literal `:`.
    fn from_str(line: &str) -> Result<Self> {
        let Some(body) = line.strip_prefix(':') else {
            return Ok(Self::Type(format!("{line}\n")));
        };
        if body.starts_with(':') {
            return Ok(Self::Type(format!("{body}\n")));
        }

        let (name, arg) = match body.split_once(' ') {
            Some((name, arg)) => (name, Some(arg)),
            None => (body, None),
        };
        let arg = arg.filter(|a| !a.is_empty());

        let command = match (name, arg) {
            ("new", None) => Self::New,
            ("open", Some(path)) => Self::Open(path.to_string()),
            ("open", None) => bail!(":open needs a path"),
            ("save", path) => Self::Save(path.map(str::to_string)),
            ("undo", None) => Self::Undo,
            ("redo", None) => Self::Redo,
            ("type", Some(text)) => Self::Type(unescape(text)),
            ("type", None) => bail!(":type needs text"),
            ("set", text) => Self::Set(text.map(unescape).unwrap_or_default()),
            ("print", None) => Self::Print,
            ("status", None) => Self::Status,
            ("zoom", Some("in")) => Self::ZoomIn,
            ("zoom", Some("out")) => Self::ZoomOut,
            ("zoom", _) => bail!(":zoom takes 'in' or 'out'"),
            ("quit" | "q", None) => Self::Quit,
            (
                "new" | "undo" | "redo" | "print" | "status" | "quit" | "q",
                Some(_),
            ) => bail!(":{name} takes no arguments"),
            _ => bail!("unknown command ':{name}'"),
        };
        Ok(command)
    }
}

/// Expands `\n`, `\t` and `\\` escapes.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
