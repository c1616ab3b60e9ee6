//! Line-oriented editing session driving a single document.

use std::fmt::Write as _;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use note_sharp_config::AppConfig;
use note_sharp_core::Document;

use crate::command::Command;

/// Whether the read loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One open document plus the configuration it was created with.
pub struct Session {
    doc: Document,
    config: AppConfig,
    /// Where to persist the config (remembered folder). `None` = never write.
    config_path: Option<PathBuf>,
}

impl Session {
    pub fn new(config: AppConfig, config_path: Option<PathBuf>) -> Self {
        Self {
            doc: Document::new(&config),
            config,
            config_path,
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Loads `path` into the document, resetting its history.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        self.doc.load(path)?;
        self.remember_folder(path);
        Ok(())
    }

    /// Reads commands from `input` until EOF or `:quit`.
    ///
    /// Command failures are reported on `out` and do not stop the loop.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        let mut reply = String::new();
        for line in input.lines() {
            let line = line.context("failed to read command")?;
            reply.clear();
            let outcome = line
                .parse::<Command>()
                .and_then(|command| self.execute(command, &mut reply));
            let flow = match outcome {
                Ok(flow) => flow,
                Err(e) => {
                    tracing::debug!("Command failed: {e:#}");
                    writeln!(reply, "error: {e:#}")?;
                    Flow::Continue
                }
            };
            out.write_all(reply.as_bytes()).context("failed to write output")?;
            if flow == Flow::Quit {
                break;
            }
        }
        out.flush().context("failed to flush output")?;
        Ok(())
    }

    /// Runs a single command against the document, appending its response
    /// to `reply`.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails (I/O, missing path, ...).
    pub fn execute(&mut self, command: Command, reply: &mut String) -> Result<Flow> {
        match command {
            Command::New => {
                self.doc.new_document();
                writeln!(reply, "new document")?;
            }
            Command::Open(raw) => {
                let path = self.config.expand_path(&raw);
                self.open(&path)?;
                writeln!(reply, "opened {} ({})", path.display(), self.doc.encoding)?;
            }
            Command::Save(raw) => {
                match raw {
                    Some(raw) => {
                        let path = self.config.expand_path(&raw);
                        self.doc.save_to(&path)?;
                    }
                    None => self.doc.save()?,
                }
                if let Some(path) = self.doc.file_path.clone() {
                    self.remember_folder(&path);
                    writeln!(reply, "saved {}", path.display())?;
                }
            }
            Command::Undo => {
                if self.doc.undo() {
                    self.write_position(reply, "undo")?;
                } else {
                    writeln!(reply, "nothing to undo")?;
                }
            }
            Command::Redo => {
                if self.doc.redo() {
                    self.write_position(reply, "redo")?;
                } else {
                    writeln!(reply, "nothing to redo")?;
                }
            }
            Command::Type(text) => self.doc.type_str(&text),
            Command::Set(text) => self.doc.edit(text),
            Command::Print => {
                let text = self.doc.text();
                reply.push_str(text);
                if !text.ends_with('\n') {
                    reply.push('\n');
                }
            }
            Command::Status => {
                let marker = if self.doc.modified { "*" } else { "" };
                writeln!(reply, "{}{marker} | {}", self.doc.title, self.doc.status())?;
            }
            Command::ZoomIn => {
                self.doc.zoom.zoom_in();
                writeln!(reply, "zoom {}", self.doc.zoom)?;
            }
            Command::ZoomOut => {
                self.doc.zoom.zoom_out();
                writeln!(reply, "zoom {}", self.doc.zoom)?;
            }
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn write_position(&self, reply: &mut String, action: &str) -> Result<()> {
        let history = self.doc.history();
        writeln!(reply, "{action} ({}/{})", history.index(), history.len())?;
        Ok(())
    }

    /// Records the folder of `path` and persists the config if it changed.
    fn remember_folder(&mut self, path: &Path) {
        let before = self.config.last_used_folder.clone();
        self.config.remember_folder_of(path);
        if self.config.last_used_folder == before {
            return;
        }
        if let Some(config_path) = &self.config_path {
            if let Err(e) = self.config.save(config_path) {
                tracing::warn!("Failed to save config at {}: {e}", config_path.display());
            }
        }
    }
}
