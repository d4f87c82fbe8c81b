const PLACEHOLDERS: &[&str] = &["-", "--", "—", "–", "na", "n.a.", "n/a", "nil", "null", "none"];

const STRIPPED_TOKENS: &[&str] = &["rs.", "rs", "inr", "cr.", "cr", "lakhs", "lakh"];

/// Parses a cell such as `"12,345.67"`, `"5.2%"` or `"₹ 1,200"`.
///
/// Anything that does not yield a finite, non-negative number is absent.
pub fn parse_number(raw: &str) -> Option<f64> {
    let mut cleaned = raw
        .trim()
        .chars()
        .filter(|character| {
            !character.is_whitespace() && !matches!(character, ',' | '%' | '₹' | '`' | '$' | '*')
        })
        .collect::<String>()
        .to_ascii_lowercase();

    if cleaned.is_empty() || PLACEHOLDERS.contains(&cleaned.as_str()) {
        return None;
    }

    for token in STRIPPED_TOKENS {
        if let Some(rest) = cleaned.strip_prefix(token) {
            cleaned = rest.to_string();
        }
        if let Some(rest) = cleaned.strip_suffix(token) {
            cleaned = rest.to_string();
        }
    }

    if cleaned.starts_with('(') && cleaned.ends_with(')') {
        return None;
    }

    let value = cleaned.parse::<f64>().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }

    Some(value)
}

/// Like [`parse_number`], restricted to the `[0, 100]` range.
pub fn parse_percent(raw: &str) -> Option<f64> {
    parse_number(raw).filter(|value| *value <= 100.0)
}

/// Upper-cased ISIN when `raw` is a 12-character token whose first character
/// is a letter and the rest are alphanumeric.
pub fn clean_isin(raw: &str) -> Option<String> {
    let candidate = raw
        .chars()
        .filter(|character| !character.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase();

    is_isin(&candidate).then_some(candidate)
}

pub fn is_isin(candidate: &str) -> bool {
    candidate.len() == 12
        && candidate
            .chars()
            .next()
            .map(|character| character.is_ascii_alphabetic())
            .unwrap_or(false)
        && candidate.chars().all(|character| character.is_ascii_alphanumeric())
}
