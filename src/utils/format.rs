const UNITS: &[&str] = &["B", "kB", "MB", "GB", "TB", "PB"];

/// Format a byte count with decimal (SI) units, e.g. `1.5 MB`
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1000 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1000.0 && unit < UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }

    // Three significant digits, trailing zeros dropped
    let formatted = if value >= 100.0 {
        format!("{:.0}", value)
    } else if value >= 10.0 {
        format!("{:.1}", value)
    } else {
        format!("{:.2}", value)
    };
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted.as_str()
    };

    format!("{} {}", trimmed, UNITS[unit])
}
