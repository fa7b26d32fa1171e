/// Rounds to a whole number and inserts thousands separators, e.g. `1,000,000`.
pub(crate) fn group_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if value < 0.0 && digits != "0" {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Two decimals at most, trailing zeros removed.
pub(crate) fn trim_decimal(value: f64) -> String {
    let text = format!("{value:.2}");
    if !text.contains('.') {
        return text;
    }
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Like [`trim_decimal`] but keeps at least one decimal, e.g. `2.0` or `1.75`.
pub(crate) fn ratio_threshold(value: f64) -> String {
    let text = trim_decimal(value);
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}
