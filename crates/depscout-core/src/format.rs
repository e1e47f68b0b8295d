// Small text helpers shared by the analysis and the renderers

/// Human readable byte count, 1024-based, one decimal
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;

    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{:.1} {}", size, unit);
        }
        size /= 1024.0;
    }

    format!("{:.1} TB", size)
}

/// First `max` names joined with commas, "..." if some were cut
pub fn preview<S: AsRef<str>>(names: &[S], max: usize) -> String {
    let shown: Vec<&str> = names.iter().take(max).map(AsRef::as_ref).collect();
    let ellipsis = if names.len() > max { "..." } else { "" };

    format!("{}{}", shown.join(", "), ellipsis)
}
