//! Storage configuration.

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::Context;

/// Environment variable overriding the draft file location.
pub const DATA_FILE_ENV: &str = "BILLDESK_DATA_FILE";

/// Where the working draft is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub data_file: PathBuf,
}

impl StorageConfig {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
        }
    }

    /// `BILLDESK_DATA_FILE` if set, otherwise `<data dir>/billdesk/draft.json`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_override(std::env::var_os(DATA_FILE_ENV))
    }

    /// An empty override counts as unset.
    fn from_override(data_file: Option<OsString>) -> anyhow::Result<Self> {
        match data_file {
            Some(path) if !path.is_empty() => Ok(Self::new(path)),
            _ => Ok(Self::new(default_data_file()?)),
        }
    }
}

fn default_data_file() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

    let mut path = base;
    path.push("billdesk");
    path.push("draft.json");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_ends_with_app_file() {
        let path = default_data_file().unwrap();
        assert!(path.ends_with("billdesk/draft.json"));
    }

    #[test]
    fn override_path_is_used_verbatim() {
        let config = StorageConfig::from_override(Some("/tmp/custom/draft.json".into())).unwrap();
        assert_eq!(config.data_file, PathBuf::from("/tmp/custom/draft.json"));
    }

    #[test]
    fn empty_or_missing_override_uses_default() {
        let default = default_data_file().unwrap();
        assert_eq!(
            StorageConfig::from_override(Some(OsString::new())).unwrap().data_file,
            default
        );
        assert_eq!(StorageConfig::from_override(None).unwrap().data_file, default);
    }

    // The only test in this crate that touches the process environment.
    #[test]
    fn from_env_reads_data_file_variable() {
        // SAFETY: no other test reads or writes BILLDESK_DATA_FILE.
        unsafe { std::env::set_var(DATA_FILE_ENV, "/tmp/billdesk-env/draft.json") };
        let set = StorageConfig::from_env().unwrap();

        unsafe { std::env::set_var(DATA_FILE_ENV, "") };
        let empty = StorageConfig::from_env().unwrap();

        unsafe { std::env::remove_var(DATA_FILE_ENV) };
        let unset = StorageConfig::from_env().unwrap();

        assert_eq!(set.data_file, PathBuf::from("/tmp/billdesk-env/draft.json"));
        assert_eq!(empty.data_file, default_data_file().unwrap());
        assert_eq!(unset, empty);
    }
}
