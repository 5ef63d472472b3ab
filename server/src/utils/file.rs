//! Path helpers

use std::path::PathBuf;

/// Expand a user-supplied path string to an absolute path.
///
/// Handles `~` and `~/...` via the home directory, and anchors relative
/// paths (including bare names) at the current working directory.
/// Absolute paths pass through untouched; components are not
/// canonicalized.
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();

    if path.is_empty() {
        return std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    }

    let expanded = if path == "~" {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from(path))
    } else if let Some(rest) = path.strip_prefix("~/") {
        match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => PathBuf::from(path),
        }
    } else {
        PathBuf::from(path)
    };

    if expanded.is_relative() {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    } else {
        expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_path_unchanged() {
        assert_eq!(expand_path("/etc/cityhop"), PathBuf::from("/etc/cityhop"));
    }

    #[test]
    fn bare_name_anchored_at_cwd() {
        let result = expand_path("cityhop.db");
        assert!(result.is_absolute());
        assert!(result.ends_with("cityhop.db"));
    }

    #[test]
    fn dot_relative_anchored_at_cwd() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(expand_path("./data"), cwd.join("./data"));
        assert_eq!(expand_path("../data"), cwd.join("../data"));
    }

    #[test]
    fn tilde_expands_to_home() {
        let result = expand_path("~/.cityhop");
        assert!(result.is_absolute());
        assert!(!result.to_string_lossy().contains('~'));
        assert!(result.ends_with(".cityhop"));

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~"), home);
        }
    }

    #[test]
    fn whitespace_trimmed_and_empty_falls_back_to_cwd() {
        assert_eq!(expand_path("  /data  "), PathBuf::from("/data"));
        assert!(expand_path("").is_absolute());
        assert!(expand_path("   ").is_absolute());
    }
}
