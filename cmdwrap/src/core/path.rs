//! Lexical normalisation of paths reported by `tar -v`.

use std::path::PathBuf;

/// Collapse repeated separators, `.` segments and resolvable `..` segments.
///
/// Returns `None` for lines that normalise to nothing (empty or `.`).
pub fn normalize_listed(line: &str) -> Option<PathBuf> {
    let line = line.trim_end_matches('\r');
    if line.is_empty() {
        return None;
    }
    let absolute = line.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for segment in line.split('/') {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if absolute => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }
    if parts.is_empty() {
        return absolute.then(|| PathBuf::from("/"));
    }
    let joined = parts.join("/");
    Some(PathBuf::from(if absolute {
        format!("/{joined}")
    } else {
        joined
    }))
}
