//! Per-user directory resolution.
//!
//! Follows the XDG base directory layout: `$XDG_DATA_HOME/opsconsole` and
//! `$XDG_CONFIG_HOME/opsconsole`, falling back to `~/.local/share/opsconsole`
//! and `~/.config/opsconsole`. Without `HOME` the current directory is used.

use std::path::PathBuf;

/// Directory name under the data and config roots.
pub const APP_DIR: &str = "opsconsole";

/// Config file name inside [`config_dir`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory for the session file and trace log.
///
/// ```
/// let dir = opsconsole::infrastructure::data_dir();
/// assert!(dir.ends_with("opsconsole"));
/// ```
#[must_use]
pub fn data_dir() -> PathBuf {
    resolve(std::env::var_os("XDG_DATA_HOME"), &[".local", "share"])
}

/// Directory holding `config.toml`.
#[must_use]
pub fn config_dir() -> PathBuf {
    resolve(std::env::var_os("XDG_CONFIG_HOME"), &[".config"])
}

/// Default location of the config file.
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}

fn resolve(xdg: Option<std::ffi::OsString>, home_relative: &[&str]) -> PathBuf {
    let root = xdg
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME")
                .filter(|value| !value.is_empty())
                .map(|home| home_relative.iter().fold(PathBuf::from(home), |p, part| p.join(part)))
        })
        .unwrap_or_else(|| PathBuf::from("."));
    root.join(APP_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xdg_root_wins() {
        let dir = resolve(Some("/tmp/xdg".into()), &[".local", "share"]);
        assert_eq!(dir, PathBuf::from("/tmp/xdg/opsconsole"));
    }

    #[test]
    fn empty_xdg_is_ignored() {
        let dir = resolve(Some("".into()), &[".config"]);
        assert!(dir.ends_with("opsconsole"));
        assert_ne!(dir, PathBuf::from("opsconsole"));
    }
}
