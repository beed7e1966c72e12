//! Font-stack signals: installed fonts and the text-rendering configuration.
//!
//! The installed-font census is one of the most discriminating stable facets
//! of a machine. The probe scans the platform font directories directly so it
//! works without fontconfig; the `canvas` probe asks fontconfig how it would
//! actually resolve and render a generic family, which captures substitution
//! rules and rendering options beyond the raw file list.

use std::collections::BTreeSet;
use std::path::Path;

use crate::signal::{SignalInfo, SignalSource};

use super::helpers::{command_exists, run_command};

/// Directories scanned for font files, per platform convention.
const FONT_DIRS: &[&str] = &[
    "/usr/share/fonts",
    "/usr/local/share/fonts",
    "/Library/Fonts",
    "/System/Library/Fonts",
];

const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc", "woff2"];

fn scan_fonts(dir: &Path, names: &mut BTreeSet<String>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            scan_fonts(&path, names);
        } else if path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| FONT_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.insert(stem.to_string());
            }
        }
    }
}

static FONTS_INFO: SignalInfo = SignalInfo {
    name: "fonts",
    description: "Sorted census of installed font names",
    platform_requirements: &[],
};

/// Comma-joined sorted list of installed font file names.
pub struct FontsSignal;

impl SignalSource for FontsSignal {
    fn info(&self) -> &SignalInfo {
        &FONTS_INFO
    }

    fn is_available(&self) -> bool {
        FONT_DIRS.iter().any(|d| Path::new(d).is_dir())
    }

    fn probe(&self) -> String {
        let mut names = BTreeSet::new();
        for dir in FONT_DIRS {
            scan_fonts(Path::new(dir), &mut names);
        }
        // Home-directory fonts too, when resolvable.
        if let Some(home) = std::env::var_os("HOME") {
            let mut home_fonts = std::path::PathBuf::from(&home);
            home_fonts.push(".fonts");
            scan_fonts(&home_fonts, &mut names);
            let mut local = std::path::PathBuf::from(&home);
            local.push(".local/share/fonts");
            scan_fonts(&local, &mut names);
        }
        names.into_iter().collect::<Vec<_>>().join(",")
    }
}

static CANVAS_INFO: SignalInfo = SignalInfo {
    name: "canvas",
    description: "Text-rendering stack: fontconfig resolution of generic families",
    platform_requirements: &["fontconfig"],
};

/// How the text-rendering stack resolves the generic families.
///
/// Two machines with the same font list can still render differently when
/// their substitution rules or font versions differ; `fc-match` exposes both.
pub struct CanvasSignal;

impl SignalSource for CanvasSignal {
    fn info(&self) -> &SignalInfo {
        &CANVAS_INFO
    }

    fn is_available(&self) -> bool {
        command_exists("fc-match")
    }

    fn probe(&self) -> String {
        let mut parts = Vec::new();
        for family in ["sans-serif", "serif", "monospace"] {
            if let Some(resolved) = run_command(
                "fc-match",
                &["--format=%{family}|%{file}|%{fontversion}", family],
            ) {
                parts.push(format!("{family}={}", resolved.trim()));
            }
        }
        parts.join(";")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fonts_probe_sorted_and_stable() {
        let first = FontsSignal.probe();
        assert_eq!(first, FontsSignal.probe());
        if first.contains(',') {
            let names: Vec<&str> = first.split(',').collect();
            let mut sorted = names.clone();
            sorted.sort_unstable();
            assert_eq!(names, sorted);
        }
    }

    #[test]
    fn test_canvas_probe_never_panics() {
        let _ = CanvasSignal.probe();
    }
}
