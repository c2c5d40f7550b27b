//! Display formatting shared by the summary and insight text.

/// Unit suffix for totals.
pub const UNIT_TONS: &str = "ton";
/// Unit suffix for monthly averages.
pub const UNIT_TONS_PER_MONTH: &str = "ton/bulan";

/// Round to a whole number and group thousands with commas: `12345.6` -> `"12,346"`.
///
/// Halfway cases round to even, and a value that rounds to zero never
/// carries a minus sign.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if value < 0.0 && digits != "0" {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// `"1,234 ton"`
pub fn format_tons(value: f64) -> String {
    format!("{} {}", format_number(value), UNIT_TONS)
}

/// `"1,234 ton/bulan"`
pub fn format_tons_per_month(value: f64) -> String {
    format!("{} {}", format_number(value), UNIT_TONS_PER_MONTH)
}

/// Capitalize the first letter of each word, lowercase the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(1234567.0), "1,234,567");
        assert_eq!(format_number(12345.6), "12,346");
    }

    #[test]
    fn test_rounding_and_sign() {
        assert_eq!(format_number(2.5), "2");
        assert_eq!(format_number(3.5), "4");
        assert_eq!(format_number(-1500.0), "-1,500");
        assert_eq!(format_number(-0.3), "0");
    }

    #[test]
    fn test_unit_suffixes() {
        assert_eq!(format_tons(340.0), "340 ton");
        assert_eq!(format_tons_per_month(45210.4), "45,210 ton/bulan");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("JANUARI"), "Januari");
        assert_eq!(title_case("march"), "March");
        assert_eq!(title_case("12"), "12");
    }
}
