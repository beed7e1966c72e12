//! Shared helpers used by multiple signal probes.
//!
//! Probes that shell out to system utilities (xrandr, system_profiler,
//! fc-match, ...) or read one-line pseudo-files all go through these.

use std::path::Path;

/// Check if a command exists by running `which`.
pub fn command_exists(name: &str) -> bool {
    std::process::Command::new("which")
        .arg(name)
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Run a subprocess command and return its stdout as a `String`.
///
/// Returns `None` if the command fails to execute or exits with a non-zero
/// status.
pub fn run_command(program: &str, args: &[&str]) -> Option<String> {
    let output = std::process::Command::new(program)
        .args(args)
        .stdin(std::process::Stdio::null())
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Read a small text file and return its trimmed contents, or `None`.
pub fn read_trimmed(path: impl AsRef<Path>) -> Option<String> {
    let text = std::fs::read_to_string(path).ok()?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Find the first line of `text` containing `needle` and return the part
/// after the last `:` on that line, trimmed.
pub fn line_value_after_colon(text: &str, needle: &str) -> Option<String> {
    text.lines()
        .find(|line| line.contains(needle))
        .and_then(|line| line.rsplit(':').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_command_missing_binary() {
        assert_eq!(run_command("definitely-not-a-real-binary", &[]), None);
    }

    #[test]
    fn test_line_value_after_colon() {
        let text = "model name\t: AMD Ryzen 9\nflags: fpu vme\n";
        assert_eq!(
            line_value_after_colon(text, "model name").as_deref(),
            Some("AMD Ryzen 9")
        );
        assert_eq!(line_value_after_colon(text, "absent"), None);
    }

    #[test]
    fn test_read_trimmed_missing_file() {
        assert_eq!(read_trimmed("/nonexistent/path/for/tests"), None);
    }
}
