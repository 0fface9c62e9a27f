//! Path-format classification.
//!
//! Pure string inspection: no I/O, independent of the host platform, so a
//! Windows path is recognized as such even when running on Linux.

use serde::Serialize;

/// Shape of a path string. Exactly one variant applies to every input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathFormat {
    /// `C:\...` or `C:/...`
    Windows,
    /// `/mnt/<drive>/...`
    Wsl,
    /// Any other absolute `/...` path.
    Unix,
    /// Relative or unrecognized, including the empty string.
    Relative,
}

impl std::fmt::Display for PathFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathFormat::Windows => write!(f, "windows"),
            PathFormat::Wsl => write!(f, "wsl"),
            PathFormat::Unix => write!(f, "unix"),
            PathFormat::Relative => write!(f, "relative"),
        }
    }
}

pub fn classify(path: &str) -> PathFormat {
    if is_windows_path(path) {
        PathFormat::Windows
    } else if is_wsl_path(path) {
        PathFormat::Wsl
    } else if is_unix_path(path) {
        PathFormat::Unix
    } else {
        PathFormat::Relative
    }
}

/// Drive letter, colon, separator.
pub fn is_windows_path(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 3 && bytes[1] == b':' && matches!(bytes[2], b'/' | b'\\')
}

pub fn is_wsl_path(path: &str) -> bool {
    path.starts_with("/mnt/")
}

pub fn is_unix_path(path: &str) -> bool {
    path.starts_with('/') && !is_wsl_path(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "/",
        "C:",
        "C:\\",
        "C:/",
        "C:\\Users\\dev\\file.py",
        "D:/work/file.py",
        "c:x",
        "/mnt/",
        "/mnt",
        "/mnt/c/Users/dev",
        "/home/dev/file.py",
        "src/utils.py",
        "..\\up\\file.py",
        "\\\\server\\share\\file",
        "é:/unicode",
        ":/odd",
    ];

    #[test]
    fn classifiers_are_mutually_exclusive() {
        for sample in SAMPLES {
            let hits = [
                is_windows_path(sample),
                is_wsl_path(sample),
                is_unix_path(sample),
            ]
            .iter()
            .filter(|hit| **hit)
            .count();
            assert!(hits <= 1, "{:?} matched {} classifiers", sample, hits);
        }
    }

    #[test]
    fn windows_paths() {
        assert!(is_windows_path("C:\\Users\\dev"));
        assert!(is_windows_path("C:/Users/dev"));
        assert!(is_windows_path("z:\\"));
        assert!(!is_windows_path("C:"));
        assert!(!is_windows_path("C:file.py"));
        assert!(!is_windows_path("/c:/x"));
    }

    #[test]
    fn multibyte_first_char_is_not_windows() {
        // Byte 1 is a UTF-8 continuation byte, never ':'.
        assert!(!is_windows_path("é:/unicode"));
        assert_eq!(classify("é:/unicode"), PathFormat::Relative);
    }

    #[test]
    fn wsl_paths() {
        assert!(is_wsl_path("/mnt/c/Users"));
        assert!(is_wsl_path("/mnt/"));
        assert!(!is_wsl_path("/mnt"));
        assert!(!is_wsl_path("/mntx/c"));
    }

    #[test]
    fn unix_paths_exclude_wsl() {
        assert!(is_unix_path("/home/dev"));
        assert!(is_unix_path("/mnt"));
        assert!(!is_unix_path("/mnt/c/Users"));
        assert!(!is_unix_path("relative/path"));
    }

    #[test]
    fn classify_covers_all_shapes() {
        assert_eq!(classify("C:\\a\\b"), PathFormat::Windows);
        assert_eq!(classify("/mnt/d/a"), PathFormat::Wsl);
        assert_eq!(classify("/usr/a"), PathFormat::Unix);
        assert_eq!(classify("a/b"), PathFormat::Relative);
        assert_eq!(classify(""), PathFormat::Relative);
    }
}
