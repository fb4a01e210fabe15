//! Collision-free file names for newly materialized configs
//!
//! A display label such as `"Support Agent: EU/West"` becomes a portable file
//! stem, and a numeric `-N` suffix is appended when the directory already
//! holds a file with that name.

use std::collections::HashSet;
use std::fs;

use crate::{Error, NormalizedPath, Result};

/// Longest stem produced by [`sanitize_label`], in characters.
pub const MAX_STEM_CHARS: usize = 100;

/// Stem used when nothing printable survives sanitization.
pub const FALLBACK_STEM: &str = "unnamed";

const RESERVED: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Turn an arbitrary label into a file stem that is safe on every platform.
pub fn sanitize_label(label: &str) -> String {
    let mut stem = String::with_capacity(label.len());
    for ch in label.chars() {
        let ch = if RESERVED.contains(&ch) || ch.is_control() || ch.is_whitespace() {
            '-'
        } else {
            ch
        };
        if ch == '-' && stem.ends_with('-') {
            continue;
        }
        stem.push(ch);
    }

    let mut stem = trim_edges(&stem).to_string();

    // No hidden files: leading dots become a single underscore.
    if stem.starts_with('.') {
        let rest = trim_edges(stem.trim_start_matches('.'));
        stem = if rest.is_empty() {
            String::new()
        } else {
            format!("_{rest}")
        };
    }

    if stem.chars().count() > MAX_STEM_CHARS {
        let truncated: String = stem.chars().take(MAX_STEM_CHARS).collect();
        stem = trim_edges(&truncated).to_string();
    }

    if stem.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        stem
    }
}

fn trim_edges(s: &str) -> &str {
    s.trim_matches('-').trim_end_matches('.').trim_end_matches('-')
}

fn normalize_extension(extension: &str) -> String {
    match extension {
        "" => String::new(),
        ext if ext.starts_with('.') => ext.to_string(),
        ext => format!(".{ext}"),
    }
}

/// Pick a free file name for `label` given the names already taken.
///
/// The bare name is used when free. Otherwise the suffix search starts one
/// above the highest numeric suffix already present for this stem, so a
/// freed lower number is never handed out again. Names are compared
/// case-insensitively since `Agent.json` and `agent.json` are the same file
/// on Windows and default macOS volumes.
pub fn unique_file_name<'a, I>(taken: I, label: &str, extension: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let stem = sanitize_label(label);
    let extension = normalize_extension(extension);
    let taken: HashSet<String> = taken.into_iter().map(str::to_lowercase).collect();
    let is_taken = |name: &str| taken.contains(&name.to_lowercase());

    let bare = format!("{stem}{extension}");
    if !is_taken(&bare) {
        return bare;
    }

    let prefix = format!("{stem}-").to_lowercase();
    let lower_extension = extension.to_lowercase();
    let highest = taken
        .iter()
        .filter_map(|name| name.strip_suffix(lower_extension.as_str()))
        .filter_map(|name| name.strip_prefix(prefix.as_str()))
        .filter(|suffix| !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|suffix| suffix.parse::<u64>().ok())
        .max()
        .unwrap_or(0);

    let mut counter = highest + 1;
    loop {
        let candidate = format!("{stem}-{counter}{extension}");
        if !is_taken(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// Allocate a collision-free path for `label` inside `directory`.
///
/// A directory that does not exist yet is treated as empty; nothing is
/// created here.
pub fn allocate_filename(
    directory: &NormalizedPath,
    label: &str,
    extension: &str,
) -> Result<NormalizedPath> {
    let names = list_file_names(directory)?;
    let name = unique_file_name(names.iter().map(String::as_str), label, extension);
    tracing::debug!(directory = %directory, label, file = %name, "allocated file name");
    Ok(directory.join(&name))
}

fn list_file_names(directory: &NormalizedPath) -> Result<Vec<String>> {
    let native = directory.to_native();
    let entries = match fs::read_dir(&native) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(Error::io(&native, e)),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(&native, e))?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("My Agent", "My-Agent")]
    #[case("Agent:Test/File*Name?", "Agent-Test-File-Name")]
    #[case("", "unnamed")]
    #[case("   ", "unnamed")]
    #[case("***//\\\\", "unnamed")]
    #[case("...Agent...", "_Agent")]
    #[case(".hidden", "_hidden")]
    #[case("Agent---Test", "Agent-Test")]
    #[case("-Agent-", "Agent")]
    #[case("Agent 测试 🚀", "Agent-测试-🚀")]
    #[case("tab\there", "tab-here")]
    #[case("<Support> | \"Bot\"", "Support-Bot")]
    fn sanitizes_labels(#[case] label: &str, #[case] expected: &str) {
        assert_eq!(sanitize_label(label), expected);
    }

    #[test]
    fn truncates_long_labels_by_characters() {
        assert_eq!(sanitize_label(&"A".repeat(150)), "A".repeat(100));
        let wide = "测".repeat(120);
        assert_eq!(sanitize_label(&wide).chars().count(), MAX_STEM_CHARS);
    }

    #[test]
    fn bare_name_when_free() {
        assert_eq!(unique_file_name(std::iter::empty(), "Agent", ".json"), "Agent.json");
    }

    #[test]
    fn first_collision_gets_suffix_one() {
        assert_eq!(unique_file_name(["Agent.json"], "Agent", ".json"), "Agent-1.json");
    }

    #[test]
    fn continues_after_highest_suffix() {
        let taken = ["Agent.json", "Agent-1.json", "Agent-2.json"];
        assert_eq!(unique_file_name(taken, "Agent", ".json"), "Agent-3.json");
    }

    #[test]
    fn freed_lower_suffix_is_not_reused() {
        let taken = ["Agent.json", "Agent-4.json"];
        assert_eq!(unique_file_name(taken, "Agent", ".json"), "Agent-5.json");
    }

    #[test]
    fn other_extensions_do_not_collide() {
        let taken = ["Agent.txt", "Agent-1.txt"];
        assert_eq!(unique_file_name(taken, "Agent", ".json"), "Agent.json");
        assert_eq!(unique_file_name(taken, "Agent", "txt"), "Agent-2.txt");
    }

    #[test]
    fn collisions_ignore_case() {
        assert_eq!(unique_file_name(["Agent.json"], "agent", ".json"), "agent-1.json");
        let taken = ["support-bot.json", "SUPPORT-BOT-3.JSON"];
        assert_eq!(unique_file_name(taken, "Support Bot", ".json"), "Support-Bot-4.json");
    }

    #[test]
    fn non_numeric_suffixes_are_ignored() {
        let taken = ["Agent.json", "Agent-Test.json", "Agent-7b.json"];
        assert_eq!(unique_file_name(taken, "Agent", ".json"), "Agent-1.json");
    }
}
