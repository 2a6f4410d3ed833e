use std::path::{Path, PathBuf};

pub mod server;
pub mod upstream;

pub use upstream::{CredentialProvider, EnvCredential, FixedCredential};

const ENV_FILE_NAME: &str = ".env";

/// Loads `.env` from the working directory (or any parent) into the process
/// environment. Values from the file replace variables that are already set.
///
/// Returns the path of the loaded file, or `None` when there is no file.
pub fn load_env_file() -> Option<PathBuf> {
    match std::env::current_dir() {
        Ok(dir) => load_env_file_in(&dir),
        Err(error) => {
            tracing::warn!("Cannot resolve working directory for .env lookup: {}", error);
            None
        }
    }
}

/// [`load_env_file`] starting the search at `dir` instead of the working directory.
pub fn load_env_file_in(dir: &Path) -> Option<PathBuf> {
    let path = dir
        .ancestors()
        .map(|dir| dir.join(ENV_FILE_NAME))
        .find(|path| path.is_file())?;

    match load_env_file_from(&path) {
        Ok(()) => Some(path),
        Err(error) => {
            tracing::warn!("Failed to load {}: {}", path.display(), error);
            None
        }
    }
}

/// Same as [`load_env_file`], for an explicit path.
pub fn load_env_file_from(path: impl AsRef<Path>) -> Result<(), dotenvy::Error> {
    dotenvy::from_path_override(path)
}

pub fn validate() {
    server::validate();
    upstream::validate();
}
