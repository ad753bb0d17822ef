pub fn format_number(value: u64) -> String {
    let raw = value.to_string();
    let mut out = String::with_capacity(raw.len() + raw.len() / 3);
    for (index, ch) in raw.chars().rev().enumerate() {
        if index > 0 && index % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}

/// Human-readable size for log lines.
pub fn format_size(value: u64) -> String {
    scaled("", value)
}

/// Signed variant of [`format_size`]; RAM headroom can go below zero.
pub fn format_bytes(value: i64) -> String {
    scaled(if value < 0 { "-" } else { "" }, value.unsigned_abs())
}

fn scaled(sign: &str, magnitude: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    if magnitude < 1024 {
        return format!("{sign}{magnitude} B");
    }

    let mut size = magnitude as f64;
    let mut unit = 0usize;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    format!("{sign}{size:.2} {}", UNITS[unit])
}
