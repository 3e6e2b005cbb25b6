//! Path helpers for the Zellij sandbox.

use std::path::PathBuf;

/// File name of the OTLP trace export inside [`data_dir`].
pub const TRACE_FILE_NAME: &str = "animescope-otlp.json";

/// Plugin-private data directory provided by Zellij.
#[must_use]
pub fn data_dir() -> PathBuf {
    PathBuf::from("/data")
}

/// Location of the trace export file.
#[must_use]
pub fn trace_file() -> PathBuf {
    data_dir().join(TRACE_FILE_NAME)
}

/// Maps `~` paths onto the `/host` mount.
///
/// # Examples
///
/// ```
/// use animescope::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dusk.toml"), "/host/themes/dusk.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/genres.toml"), "/etc/genres.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_inside_path_is_left_alone() {
        assert_eq!(expand_tilde("/tmp/~/x"), "/tmp/~/x");
        assert_eq!(expand_tilde("~user/x"), "~user/x");
    }

    #[test]
    fn trace_file_lives_in_data_dir() {
        assert_eq!(trace_file(), PathBuf::from("/data/animescope-otlp.json"));
    }
}
