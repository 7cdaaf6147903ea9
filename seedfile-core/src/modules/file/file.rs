use super::structs::FileParams;
use crate::config::{SeedfileConfig, WriteMode};
use crate::error::MaterializeError;
use crate::modules::{Module, ModuleResult};
use crate::paths::expand_home;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Requesting this exact path always fails without touching the filesystem.
pub const FAIL_SENTINEL: &str = "fail me";

pub const MSG_CREATED: &str = "file created with given content";
pub const MSG_EXISTS: &str = "file already exists";

/// What a successful materialization did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created { path: PathBuf, bytes: usize },
    AlreadyExists { path: PathBuf },
}

impl Outcome {
    pub fn path(&self) -> &Path {
        match self {
            Outcome::Created { path, .. } | Outcome::AlreadyExists { path } => path,
        }
    }

    pub fn changed(&self) -> bool {
        matches!(self, Outcome::Created { .. })
    }
}

/// Ensures a file exists at a path, creating it with the given content only
/// when nothing is there yet.
#[derive(Debug, Clone)]
pub struct FileModule {
    default_path: String,
    write_mode: WriteMode,
    home: Option<PathBuf>,
}

impl Default for FileModule {
    fn default() -> Self {
        Self::new(&SeedfileConfig::default())
    }
}

impl FileModule {
    pub fn new(config: &SeedfileConfig) -> Self {
        Self {
            default_path: config.default_path.clone(),
            write_mode: config.write_mode,
            home: dirs::home_dir(),
        }
    }

    /// Override the home directory used for `~` expansion.
    pub fn with_home<P: Into<PathBuf>>(mut self, home: Option<P>) -> Self {
        self.home = home.map(Into::into);
        self
    }

    pub fn write_mode(&self) -> WriteMode {
        self.write_mode
    }

    pub fn resolve(&self, params: &FileParams) -> Result<PathBuf, MaterializeError> {
        let requested = params.requested_path(&self.default_path);
        if requested == FAIL_SENTINEL {
            return Err(MaterializeError::RequestedFailure);
        }
        expand_home(requested, self.home.as_deref())
    }

    pub fn materialize(&self, params: &FileParams) -> Result<Outcome, MaterializeError> {
        let path = self.resolve(params)?;

        // symlink_metadata so a dangling link counts as an existing entry
        if fs::symlink_metadata(&path).is_ok() {
            debug!(target: "seedfile::module", path = %path.display(), "entry already present");
            return Ok(Outcome::AlreadyExists { path });
        }

        self.create(path, params.content())
    }

    /// Create `path` with `content`, without a prior existence check.
    ///
    /// An entry that is already there (or appears concurrently) yields
    /// `Outcome::AlreadyExists`; it is never overwritten.
    pub fn create(&self, path: PathBuf, content: &str) -> Result<Outcome, MaterializeError> {
        match create_file(self.write_mode, &path, content) {
            Ok(()) => {
                info!(target: "seedfile::module", path = %path.display(), bytes = content.len(), mode = ?self.write_mode, "file created");
                Ok(Outcome::Created { path, bytes: content.len() })
            }
            // Lost a race with another creator after the existence check
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                debug!(target: "seedfile::module", path = %path.display(), "entry appeared during create");
                Ok(Outcome::AlreadyExists { path })
            }
            Err(source) => Err(MaterializeError::Write { path, source }),
        }
    }
}

impl Module for FileModule {
    type Params = FileParams;

    fn name(&self) -> &'static str {
        "file"
    }

    fn description(&self) -> &'static str {
        "Creates a file with the given content at the given path unless something already exists there."
    }

    fn run(&self, params: FileParams) -> ModuleResult {
        let original = params.requested_path(&self.default_path).to_string();

        let result = match self.materialize(&params) {
            Ok(outcome) => {
                let msg = if outcome.changed() { MSG_CREATED } else { MSG_EXISTS };
                let path = outcome.path().to_string_lossy().to_string();
                if outcome.changed() {
                    ModuleResult::changed(msg).with_path(path)
                } else {
                    ModuleResult::unchanged(msg).with_path(path)
                }
            }
            Err(e) => {
                warn!(target: "seedfile::module", path = %original, error = %e, "materialize failed");
                match &e {
                    MaterializeError::Write { path, .. } => {
                        ModuleResult::error(e.to_string()).with_path(path.to_string_lossy().to_string())
                    }
                    _ => ModuleResult::error(e.to_string()),
                }
            }
        };

        result.with_original_message(original)
    }
}

pub(crate) fn create_file(mode: WriteMode, path: &Path, content: &str) -> io::Result<()> {
    match mode {
        WriteMode::Exclusive => create_exclusive(path, content),
        WriteMode::Atomic => create_atomic(path, content).map_err(without_temp_path),
    }
}

fn create_exclusive(path: &Path, content: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;

    if let Err(e) = file.write_all(content.as_bytes()).and_then(|_| file.sync_all()) {
        drop(file);
        if let Err(cleanup) = fs::remove_file(path) {
            warn!(target: "seedfile::module", path = %path.display(), error = %cleanup, "partial file left behind");
        }
        return Err(e);
    }
    Ok(())
}

fn create_atomic(path: &Path, content: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".seedfile");
    // Same mode as a plain create; the umask still applies
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }

    let mut tmp = builder.tempfile_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist_noclobber(path).map_err(|e| e.error)?;
    Ok(())
}

/// tempfile suffixes its errors with the random temp path; report the
/// underlying error text only.
fn without_temp_path(e: io::Error) -> io::Error {
    let text = e.to_string();
    match text.find(" at path ") {
        Some(idx) => io::Error::new(e.kind(), &text[..idx]),
        None => e,
    }
}
