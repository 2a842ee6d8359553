//! Group files on disk
//!
//! A group is one JSON object file mapping keys to string blobs.

use crate::app_name::AppName;
use shopping_list::BlobError;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Contents of one group file
pub type Group = HashMap<String, String>;

/// Get the storage directory for the application
///
/// Uses platform-specific conventions:
/// - Linux: `$XDG_CONFIG_HOME/<app>/store` or `~/.config/<app>/store`
/// - macOS: `~/Library/Application Support/<qualifier>.<org>.<app>/store`
/// - Windows: `%LOCALAPPDATA%\<org>\<app>\config\store`
///
/// Falls back to `./store` when no home directory can be determined.
pub fn storage_dir(app_name: &AppName) -> PathBuf {
    directories::ProjectDirs::from(
        app_name.qualifier.as_str(),
        app_name.organization.as_str(),
        app_name.application.as_str(),
    )
    .map(|dirs| dirs.config_local_dir().to_path_buf())
    .unwrap_or_else(|| PathBuf::from("."))
    .join("store")
}

/// File path of a group inside `dir`, named `<group>.json`
pub fn group_path(dir: &Path, group: &str) -> PathBuf {
    dir.join(format!("{}.json", group))
}

/// Load a group from disk
///
/// A missing or empty file is an empty group.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON object of
/// strings.
pub async fn load_group(path: &Path) -> Result<Group, BlobError> {
    let contents = match fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Group::new()),
        Err(source) => {
            return Err(BlobError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if contents.trim().is_empty() {
        return Ok(Group::new());
    }

    serde_json::from_str(&contents).map_err(|source| BlobError::Format {
        path: path.to_path_buf(),
        source,
    })
}

/// Save a group to disk as pretty-printed JSON
///
/// Creates the parent directory if it doesn't exist. The contents go to a
/// sibling temporary file that is synced and then renamed over `path`, so
/// an interrupted save leaves the previous file intact.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be
/// written.
pub async fn save_group(path: &Path, data: &Group) -> Result<(), BlobError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| BlobError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    let contents = serde_json::to_string_pretty(data).map_err(|source| BlobError::Format {
        path: path.to_path_buf(),
        source,
    })?;

    let tmp = temp_path(path);
    if let Err(source) = write_synced(&tmp, contents.as_bytes()).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(BlobError::Io { path: tmp, source });
    }

    fs::rename(&tmp, path)
        .await
        .map_err(|source| BlobError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Temporary file a group is staged in before replacing `path`
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

async fn write_synced(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(contents).await?;
    file.sync_all().await
}

/// Load a group, apply `modifier`, and save it back if it reports a change
///
/// Returns whether the group was modified and saved.
///
/// # Errors
///
/// Returns an error if loading or saving fails.
pub async fn modify_group<F>(path: &Path, modifier: F) -> Result<bool, BlobError>
where
    F: FnOnce(&mut Group) -> bool,
{
    let mut data = load_group(path).await?;
    let modified = modifier(&mut data);

    if modified {
        save_group(path, &data).await?;
    }

    Ok(modified)
}
