//! Path, filter, naming, and formatting utilities.

use std::path::{Path, PathBuf};

use crate::utils::config::PackerConsts;

/// Convert absolute path to relative path from base
pub fn path_relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    path.strip_prefix(base).ok().map(|p| p.to_path_buf())
}

/// Check if a file should be excluded based on OS-specific hidden files
pub fn is_os_hidden_file(path: &Path) -> bool {
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        match name {
            // macOS
            ".DS_Store" | ".AppleDouble" | ".LSOverride" => true,
            // Windows
            "Thumbs.db" | "ehthumbs.db" | "Desktop.ini" | "$RECYCLE.BIN" => true,
            // Linux
            ".directory" => true,
            // macOS resource fork files
            _ => name.starts_with("._"),
        }
    } else {
        false
    }
}

/// Returns true if the path should be emitted by the walk (not excluded).
/// The manifest file and the scratch directory are excluded by canonical
/// path so a run never tries to archive its own outputs.
pub fn should_include_in_walk(
    path: &Path,
    root: &Path,
    manifest_canonical: &Option<PathBuf>,
    scratch_canonical: &Option<PathBuf>,
    exclude_patterns: &[String],
) -> bool {
    if path == root {
        return false;
    }
    if let Some(manifest) = manifest_canonical
        && path == manifest.as_path()
    {
        return false;
    }
    if let Some(scratch) = scratch_canonical
        && path.starts_with(scratch)
    {
        return false;
    }
    if is_os_hidden_file(path) {
        return false;
    }
    if exclude_patterns.is_empty() {
        return true;
    }
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(n) => n,
        None => return true,
    };
    let path_str = path.to_str().unwrap_or("");
    for pattern in exclude_patterns {
        if glob_match(pattern, name) || glob_match(pattern, path_str) {
            return false;
        }
    }
    true
}

/// Simple glob pattern matching (supports * and ?)
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let mut pattern_chars = pattern.chars().peekable();
    let mut text_chars = text.chars().peekable();

    while let Some(&p) = pattern_chars.peek() {
        match p {
            '*' => {
                pattern_chars.next();
                if pattern_chars.peek().is_none() {
                    return true; // trailing * matches everything
                }
                // Try to match rest of pattern at every suffix
                while text_chars.peek().is_some() {
                    if glob_match(
                        &pattern_chars.clone().collect::<String>(),
                        &text_chars.clone().collect::<String>(),
                    ) {
                        return true;
                    }
                    text_chars.next();
                }
                return false;
            }
            '?' => {
                pattern_chars.next();
                if text_chars.next().is_none() {
                    return false;
                }
            }
            _ => {
                pattern_chars.next();
                if text_chars.next() != Some(p) {
                    return false;
                }
            }
        }
    }

    text_chars.peek().is_none()
}

/// Left-pad a numeric string with zeros up to `min_width`. Never truncates:
/// a string already at or above the minimum width is returned unchanged.
pub fn pad_id(id: &str, min_width: usize) -> String {
    format!("{id:0>min_width$}")
}

/// Instantiate the naming template for one batch: every occurrence of the
/// id placeholder is replaced with the zero-padded batch id.
pub fn render_archive_name(template: &str, id: u64, pad_width: usize) -> String {
    template.replace(PackerConsts::ID_PLACEHOLDER, &pad_id(&id.to_string(), pad_width))
}

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;
const GIB: u64 = MIB * 1024;

/// Render a byte count in the largest unit below the next 1024x threshold,
/// truncated (not rounded) to one decimal place for non-byte units. Sizes
/// of a TiB and up still render in GiB.
pub fn format_size(size: u64) -> String {
    if size < KIB {
        return format!("{size} bytes");
    }
    let (div, unit) = if size < MIB {
        (KIB, "KiB")
    } else if size < GIB {
        (MIB, "MiB")
    } else {
        (GIB, "GiB")
    };
    // Integer tenths so truncation is exact (no float flooring).
    let tenths = (size as u128 * 10 / div as u128) as u64;
    format!("{}.{} {unit}", tenths / 10, tenths % 10)
}

/// True if the process is running with effective uid 0 (e.g. via sudo).
#[cfg(unix)]
pub fn running_as_root() -> bool {
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
pub fn running_as_root() -> bool {
    false
}
