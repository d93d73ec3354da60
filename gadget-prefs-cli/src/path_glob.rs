use std::collections::HashSet;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use rayon::prelude::*;

use crate::validation::{CommandError, ErrorCode};

fn has_glob_meta(s: &str) -> bool {
    s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
}

/// Directory to start walking from: the longest literal prefix of a pattern.
fn walk_root(pattern: &str) -> PathBuf {
    let literal = if has_glob_meta(pattern) {
        let end = pattern
            .find(['*', '?', '[', '{'])
            .unwrap_or(pattern.len());
        &pattern[..end]
    } else {
        pattern
    };

    if literal.len() > 1 && literal.ends_with('/') {
        return PathBuf::from(literal.trim_end_matches('/'));
    }
    let path = Path::new(literal);
    if has_glob_meta(pattern) && path.is_dir() {
        return path.to_path_buf();
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet, CommandError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| {
                CommandError::new(
                    ErrorCode::NotFound,
                    format!("Invalid glob pattern '{}': {}", pattern, e),
                )
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| {
        CommandError::new(ErrorCode::NotFound, format!("Failed to build glob set: {}", e))
    })
}

fn matching_files(root: &Path, set: &GlobSet) -> Vec<String> {
    WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .parents(true)
        .build()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
        .map(|entry| entry.path().to_string_lossy().into_owned())
        .filter(|path| set.is_match(path))
        .collect()
}

/// Expands glob patterns among the description inputs into file paths.
///
/// Plain paths are kept as given, so a missing file is reported later with
/// its own `not-found` error. Roots are walked in parallel and the result is
/// de-duplicated in first-seen order.
pub fn expand_input_globs(inputs: &[String]) -> Result<Vec<String>, CommandError> {
    let (patterns, literals): (Vec<String>, Vec<String>) =
        inputs.iter().cloned().partition(|input| has_glob_meta(input));
    if patterns.is_empty() {
        return Ok(literals);
    }

    let set = build_glob_set(&patterns)?;
    let mut roots: Vec<PathBuf> = Vec::new();
    for pattern in &patterns {
        let root = walk_root(pattern);
        if !roots.contains(&root) {
            roots.push(root);
        }
    }

    let mut matched: Vec<String> = roots
        .par_iter()
        .flat_map_iter(|root| matching_files(root, &set))
        .collect();
    matched.sort();

    let mut seen = HashSet::new();
    Ok(literals
        .into_iter()
        .chain(matched)
        .filter(|path| seen.insert(path.clone()))
        .collect())
}
