fn group_thousands(digits: &str) -> String {
    digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| String::from_utf8_lossy(chunk))
        .collect::<Vec<_>>()
        .join(",")
}

/// Abbreviated dollar amount: `$1.50T`, `$2.30B`, `$45.60M`, `$12,345`.
///
/// Missing, NaN and infinite values render as `N/A`.
pub fn format_currency(value: impl Into<Option<f64>>) -> String {
    let value = match value.into() {
        Some(v) if v.is_finite() => v,
        _ => return "N/A".to_string(),
    };
    let abs = value.abs();
    if abs >= 1e12 {
        format!("${:.2}T", value / 1e12)
    } else if abs >= 1e9 {
        format!("${:.2}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("${:.2}M", value / 1e6)
    } else {
        let digits = format!("{:.0}", abs);
        let sign = if value < 0.0 && digits != "0" { "-" } else { "" };
        format!("${}{}", sign, group_thousands(&digits))
    }
}

pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Two-decimal multiple (P/E, P/B, D/E). Zero and missing read as `N/A`.
pub fn format_multiple(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 && v.is_finite() => format!("{:.2}", v),
        _ => "N/A".to_string(),
    }
}

pub fn format_optional_percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 && v.is_finite() => format_percent(v),
        _ => "N/A".to_string(),
    }
}

pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let end = s
            .char_indices()
            .nth(max_len.saturating_sub(3))
            .map(|(i, _)| i)
            .unwrap_or(s.len());
        format!("{}...", &s[..end])
    } else {
        s.to_string()
    }
}
