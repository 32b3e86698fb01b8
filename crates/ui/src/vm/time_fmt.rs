use chrono::{DateTime, Utc};

/// "Nov 14, 2023 22:13 UTC"
#[must_use]
pub fn format_taken_at(value: DateTime<Utc>) -> String {
    value.format("%b %-d, %Y %H:%M UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clario_core::time::fixed_now;

    #[test]
    fn formats_without_padding_day() {
        assert_eq!(format_taken_at(fixed_now()), "Nov 14, 2023 22:13 UTC");
    }
}
