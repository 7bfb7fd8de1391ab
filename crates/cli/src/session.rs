//! Session-cookie persistence between CLI invocations.
//!
//! The server tracks login state in a session cookie; a browser keeps it
//! alive across page loads, so the CLI keeps it in a file under the user's
//! data directory instead.

use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

fn session_file() -> Option<PathBuf> {
    ProjectDirs::from("", "", "promarket").map(|dirs| dirs.data_dir().join("session"))
}

/// Token of the previously saved session, if any.
pub fn load() -> Option<String> {
    let path = session_file()?;
    let token = fs::read_to_string(&path).ok()?;
    let token = token.trim().to_string();
    if token.is_empty() {
        None
    } else {
        debug!(path = %path.display(), "restored session from file");
        Some(token)
    }
}

/// Persist the session token for later invocations.
pub fn store(token: &str) -> std::io::Result<()> {
    let Some(path) = session_file() else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, token)
}

/// Forget the saved session (logout, account deletion).
pub fn clear() {
    if let Some(path) = session_file() {
        let _ = fs::remove_file(path);
    }
}
