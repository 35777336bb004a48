//! Small helpers shared by the console reports.

use serde_json::Value;

/// Formats an integer with `,` between thousands, e.g. `1234567` as `1,234,567`.
pub fn thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}

/// Like [`thousands`], but always shows the sign.
pub fn signed_thousands(value: i64) -> String {
    if value < 0 {
        thousands(value)
    } else {
        format!("+{}", thousands(value))
    }
}

/// Rounds a float to the nearest integer and formats it with [`thousands`].
#[allow(clippy::cast_possible_truncation)]
pub fn rounded_thousands(value: f64) -> String {
    thousands(value.round() as i64)
}

pub fn yes_no(value: bool) -> &'static str {
    if value {
        "✅ Yes"
    } else {
        "❌ No"
    }
}

pub fn check_mark(value: bool) -> &'static str {
    if value {
        "✅"
    } else {
        "❌"
    }
}

/// Describes a movement restriction: `forbidden` means the action is disabled.
pub fn allowed(forbidden: bool) -> &'static str {
    if forbidden {
        "❌ Disabled"
    } else {
        "✅ Enabled"
    }
}

/// A time limit of zero means there is none.
pub fn time_limit(seconds: u32) -> String {
    if seconds == 0 {
        "None".to_string()
    } else {
        format!("{seconds}s")
    }
}

/// Cuts `value` down to at most `max` characters.
pub fn truncate(value: &str, max: usize) -> &str {
    match value.char_indices().nth(max) {
        Some((index, _)) => &value[..index],
        None => value,
    }
}

/// Renders a scalar JSON value the way a person would write it, without the
/// quotes around strings.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "N/A".to_string(),
        other => other.to_string(),
    }
}

/// Falls back to `N/A` for a missing value.
pub fn or_na<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "N/A".to_string(), |value| value.to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1_000), "1,000");
        assert_eq!(thousands(25_000), "25,000");
        assert_eq!(thousands(1_234_567), "1,234,567");
        assert_eq!(thousands(-4_321), "-4,321");
    }

    #[test]
    fn signed_thousands_shows_sign() {
        assert_eq!(signed_thousands(1_500), "+1,500");
        assert_eq!(signed_thousands(0), "+0");
        assert_eq!(signed_thousands(-12), "-12");
    }

    #[test]
    fn rounded_thousands_rounds_half_away() {
        assert_eq!(rounded_thousands(12_345.5), "12,346");
        assert_eq!(rounded_thousands(999.4), "999");
    }

    #[test]
    fn time_limit_zero_is_none() {
        assert_eq!(time_limit(0), "None");
        assert_eq!(time_limit(60), "60s");
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("abcdef", 3), "abc");
        assert_eq!(truncate("ab", 3), "ab");
        assert_eq!(truncate("ÅÄÖÜ", 2), "ÅÄ");
    }

    #[test]
    fn value_text_strips_quotes() {
        assert_eq!(value_text(&json!("Stripe")), "Stripe");
        assert_eq!(value_text(&json!(3)), "3");
        assert_eq!(value_text(&Value::Null), "N/A");
    }

    #[test]
    fn restrictions() {
        assert_eq!(allowed(true), "❌ Disabled");
        assert_eq!(allowed(false), "✅ Enabled");
        assert_eq!(or_na::<u32>(None), "N/A");
        assert_eq!(or_na(Some(12)), "12");
    }
}
