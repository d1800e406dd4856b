//! Virtual-path helpers for the in-memory desktop file tree.

/// Normalizes a virtual path.
///
/// Whitespace is trimmed, backslashes become `/`, `.` and `..` segments are resolved, a leading
/// slash is ensured, and an empty or fully collapsed path becomes `/`.
pub fn normalize_virtual_path(path: &str) -> String {
    let segments = virtual_path_segments(path);
    if segments.is_empty() {
        return "/".to_string();
    }
    let mut out = String::new();
    for segment in segments {
        out.push('/');
        out.push_str(&segment);
    }
    out
}

/// Splits a path into its resolved segments (no empty, `.` or `..` entries).
pub fn virtual_path_segments(path: &str) -> Vec<String> {
    let mut segments: Vec<String> = Vec::new();
    for segment in path.trim().replace('\\', "/").split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other.to_string()),
        }
    }
    segments
}

/// Appends `name` to the normalized form of `parent`.
pub fn join_virtual_path(parent: &str, name: &str) -> String {
    let parent = normalize_virtual_path(parent);
    if parent == "/" {
        format!("/{name}")
    } else {
        format!("{parent}/{name}")
    }
}
