//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "catalog";
const APPLICATION: &str = "catalog-tui";

/// Name of the log file for the running session.
pub const LATEST_LOG: &str = "latest.log";

/// Maximum number of old log files to keep.
pub const MAX_OLD_LOGS: usize = 25;

/// Get project directories, or None if home directory cannot be determined.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the cache directory, where logs live.
///
/// - Linux: `$XDG_CACHE_HOME/catalog-tui` or `~/.cache/catalog-tui`
/// - macOS: `~/Library/Caches/dev.catalog.catalog-tui`
/// - Windows: `C:\Users\<User>\AppData\Local\catalog\catalog-tui\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the config directory.
///
/// - Linux: `$XDG_CONFIG_HOME/catalog-tui` or `~/.config/catalog-tui`
/// - macOS: `~/Library/Application Support/dev.catalog.catalog-tui`
/// - Windows: `C:\Users\<User>\AppData\Roaming\catalog\catalog-tui\config`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the config file.
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.json"))
}

/// Get the path to the latest log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Rotate logs in the cache directory.
///
/// Call this at startup before creating the new log file.
pub fn rotate_logs() {
    let Some(cache) = cache_dir() else { return };
    rotate_logs_in(&cache);
}

/// Rename `latest.log` in `dir` to a timestamped name, then drop all but the
/// newest [`MAX_OLD_LOGS`] old logs.
pub fn rotate_logs_in(dir: &Path) {
    let latest = dir.join(LATEST_LOG);

    if latest.exists() {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let mut archived = dir.join(format!("{}.log", timestamp));
        // Two starts within the same second.
        let mut n = 1;
        while archived.exists() {
            archived = dir.join(format!("{}_{}.log", timestamp, n));
            n += 1;
        }
        let _ = fs::rename(&latest, &archived);
    }

    cleanup_old_logs(dir);
}

fn cleanup_old_logs(dir: &Path) {
    let Ok(entries) = fs::read_dir(dir) else { return };

    let mut logs: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".log") && name != LATEST_LOG
        })
        .collect();

    // Oldest first; file names break ties between equal mtimes.
    logs.sort_by_key(|e| (e.metadata().and_then(|m| m.modified()).ok(), e.file_name()));

    if logs.len() > MAX_OLD_LOGS {
        for entry in logs.iter().take(logs.len() - MAX_OLD_LOGS) {
            let _ = fs::remove_file(entry.path());
        }
    }
}
