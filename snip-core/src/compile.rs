//! Compiling definitions into artifacts
//!
//! A compiled artifact lives in a hidden folder next to its definition and is
//! named after the slug of the description plus the definition's uuid. The uuid
//! is the only stable key: descriptions change, so before a new artifact is
//! written every artifact in the folder carrying the same uuid is removed. At any
//! time there is at most one artifact per uuid.
//!
//! Failures are split by how much they matter to the author:
//! - parse errors and a missing identity are reported through the [`Reporter`];
//! - stale artifacts that cannot be removed are only logged;
//! - a failed write aborts the compile of that one file.

use crate::definition::{definition_name, parse, SnippetDefinition};
use crate::error::SnippetError;
use crate::slug::slug;
use log::{debug, error, warn};
use std::cell::RefCell;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

pub const DEFAULT_OUTPUT_DIR: &str = ".compiled";
pub const DEFAULT_SOURCE_EXTENSION: &str = "sane-snippet";
pub const DEFAULT_ARTIFACT_EXTENSION: &str = "sane-snippet.json";

/// Where definitions are found and where their artifacts go.
///
/// Extensions are given without the leading dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    pub output_dir: String,
    pub source_extension: String,
    pub artifact_extension: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            source_extension: DEFAULT_SOURCE_EXTENSION.to_string(),
            artifact_extension: DEFAULT_ARTIFACT_EXTENSION.to_string(),
        }
    }
}

/// User-facing error channel of the host.
pub trait Reporter {
    fn report_error(&self, message: &str);
}

/// Reports errors to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report_error(&self, message: &str) {
        error!("{message}");
    }
}

/// Keeps reported messages in memory.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    messages: RefCell<Vec<String>>,
}

impl CollectingReporter {
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl Reporter for CollectingReporter {
    fn report_error(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

/// Result of [`ensure_dir`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirStatus {
    Created,
    AlreadyExists,
}

/// Create `path` and any missing parents unless it already exists as a directory.
pub fn ensure_dir(path: &Path) -> Result<DirStatus, SnippetError> {
    if path.is_dir() {
        return Ok(DirStatus::AlreadyExists);
    }
    match fs::create_dir_all(path) {
        Ok(()) => Ok(DirStatus::Created),
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => {
            Ok(DirStatus::AlreadyExists)
        }
        Err(err) => Err(SnippetError::io(path, err)),
    }
}

/// What happened to one definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileOutcome {
    /// The artifact was written; `replaced` lists the stale artifacts removed first.
    Compiled {
        path: PathBuf,
        replaced: Vec<PathBuf>,
    },
    /// The definition has no usable identity. The problem was reported and
    /// nothing was written.
    Refused,
    /// The saved file is not a definition.
    Ignored,
}

/// Counters of a [`Compiler::regenerate`] sweep.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RegenerateSummary {
    pub removed: usize,
    pub compiled: usize,
    pub failed: usize,
}

/// Read a compiled artifact back into a definition.
pub fn load_artifact(path: &Path) -> Result<SnippetDefinition, SnippetError> {
    let text = fs::read_to_string(path).map_err(|err| SnippetError::io(path, err))?;
    Ok(serde_json::from_str(&text)?)
}

pub struct Compiler<'a> {
    options: CompileOptions,
    reporter: &'a dyn Reporter,
}

impl<'a> Compiler<'a> {
    pub fn new(options: CompileOptions, reporter: &'a dyn Reporter) -> Self {
        Self { options, reporter }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// The hidden folder holding artifacts for definitions next to `source_path`.
    pub fn output_folder(&self, source_path: &Path) -> PathBuf {
        source_path
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(&self.options.output_dir)
    }

    /// `<slug(description)>-<uuid>.<artifact extension>`
    pub fn artifact_file_name(&self, definition: &SnippetDefinition, uuid: &str) -> String {
        format!(
            "{}-{uuid}.{}",
            slug(&definition.description),
            self.options.artifact_extension
        )
    }

    pub fn is_definition(&self, path: &Path) -> bool {
        has_extension(path, &self.options.source_extension)
    }

    pub fn is_artifact(&self, path: &Path) -> bool {
        has_extension(path, &self.options.artifact_extension)
    }

    /// Compile `definition`, read from `source_path`, into its artifact.
    pub fn compile(
        &self,
        source_path: &Path,
        definition: &SnippetDefinition,
    ) -> Result<CompileOutcome, SnippetError> {
        let uuid = match identity_of(source_path, definition) {
            Ok(uuid) => uuid,
            Err(err) => {
                self.reporter.report_error(&err.to_string());
                return Ok(CompileOutcome::Refused);
            }
        };

        let folder = self.output_folder(source_path);
        if ensure_dir(&folder)? == DirStatus::Created {
            debug!("created {}", folder.display());
        }

        let record = serde_json::to_vec_pretty(definition)?;
        let replaced = self.remove_stale(&folder, uuid);
        let path = folder.join(self.artifact_file_name(definition, uuid));
        write_atomically(&folder, &path, &record)?;
        debug!("compiled {} -> {}", source_path.display(), path.display());

        Ok(CompileOutcome::Compiled { path, replaced })
    }

    /// Read, parse and compile the definition at `path`.
    pub fn compile_file(&self, path: &Path) -> Result<CompileOutcome, SnippetError> {
        let text = fs::read_to_string(path).map_err(|err| SnippetError::io(path, err))?;
        let name = definition_name(path, &self.options.source_extension);
        let definition = parse(&name, &text)?;
        self.compile(path, &definition)
    }

    /// Save hook: recompile `path` if it is a definition.
    ///
    /// Errors are reported naming the file before being returned.
    pub fn on_definition_saved(&self, path: &Path) -> Result<CompileOutcome, SnippetError> {
        if !self.is_definition(path) {
            return Ok(CompileOutcome::Ignored);
        }
        self.compile_file(path).inspect_err(|err| self.report_failure(path, err))
    }

    /// Rebuild every artifact under `root`.
    ///
    /// Directories are visited children first, so a folder's artifact folder has
    /// been swept by the time its definitions are compiled into it. Within a
    /// directory all artifacts are removed, then all definitions compiled. One
    /// file failing never stops the sweep.
    pub fn regenerate(&self, root: &Path) -> RegenerateSummary {
        let mut summary = RegenerateSummary::default();

        for entry in WalkDir::new(root).contents_first(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("skipping unreadable entry: {err}");
                    continue;
                }
            };
            if entry.file_type().is_dir() {
                self.regenerate_dir(entry.path(), &mut summary);
            }
        }

        summary
    }

    fn regenerate_dir(&self, dir: &Path, summary: &mut RegenerateSummary) {
        let files = match list_files(dir) {
            Ok(files) => files,
            Err(err) => {
                warn!("skipping {}: {err}", dir.display());
                return;
            }
        };

        for path in files.iter().filter(|path| self.is_artifact(path)) {
            match fs::remove_file(path) {
                Ok(()) => summary.removed += 1,
                Err(err) => warn!("could not remove {}: {err}", path.display()),
            }
        }

        for path in files.iter().filter(|path| self.is_definition(path)) {
            match self.compile_file(path) {
                Ok(CompileOutcome::Compiled { .. }) => summary.compiled += 1,
                Ok(_) => summary.failed += 1,
                Err(err) => {
                    self.report_failure(path, &err);
                    summary.failed += 1;
                }
            }
        }
    }

    /// Remove every artifact in `folder` carrying `uuid`, whatever its slug.
    ///
    /// A name ending in `-<uuid>.<ext>` is only a candidate: uuids may contain
    /// `-`, so `x-1` also ends in `-1`. The artifact's own `uuid` field decides.
    /// Unreadable candidates are left in place.
    fn remove_stale(&self, folder: &Path, uuid: &str) -> Vec<PathBuf> {
        let suffix = format!("-{uuid}.{}", self.options.artifact_extension);
        let entries = match fs::read_dir(folder) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("could not scan {}: {err}", folder.display());
                return Vec::new();
            }
        };

        let mut removed = Vec::new();
        for entry in entries.flatten() {
            if !entry.file_name().to_string_lossy().ends_with(&suffix) {
                continue;
            }
            let path = entry.path();
            match load_artifact(&path) {
                Ok(artifact) if artifact.uuid.as_deref() == Some(uuid) => {}
                Ok(_) => continue,
                Err(err) => {
                    warn!("not removing unreadable {}: {err}", path.display());
                    continue;
                }
            }
            match fs::remove_file(&path) {
                Ok(()) => {
                    debug!("removed stale {}", path.display());
                    removed.push(path);
                }
                Err(err) => warn!("could not remove stale {}: {err}", path.display()),
            }
        }
        removed
    }

    fn report_failure(&self, path: &Path, err: &SnippetError) {
        match err {
            SnippetError::Io { .. } => self.reporter.report_error(&err.to_string()),
            _ => self
                .reporter
                .report_error(&format!("{}: {err}", path.display())),
        }
    }
}

/// The uuid to compile under; it must be present and usable in a file name.
fn identity_of<'d>(
    source_path: &Path,
    definition: &'d SnippetDefinition,
) -> Result<&'d str, SnippetError> {
    let uuid = definition
        .uuid
        .as_deref()
        .filter(|uuid| !uuid.is_empty())
        .ok_or_else(|| SnippetError::MissingIdentity {
            path: source_path.to_path_buf(),
        })?;

    if slug(uuid) != uuid {
        return Err(SnippetError::InvalidIdentity {
            path: source_path.to_path_buf(),
            uuid: uuid.to_string(),
        });
    }
    Ok(uuid)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().ends_with(&format!(".{extension}")))
        .unwrap_or(false)
}

fn list_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

/// Write through a temporary file in `folder` renamed over `path`.
fn write_atomically(folder: &Path, path: &Path, bytes: &[u8]) -> Result<(), SnippetError> {
    let mut file = NamedTempFile::new_in(folder).map_err(|err| SnippetError::io(folder, err))?;
    file.write_all(bytes)
        .map_err(|err| SnippetError::io(file.path(), err))?;
    file.persist(path)
        .map_err(|err| SnippetError::io(path, err.error))?;
    Ok(())
}
