/// Group the digits of a whole number in threes: 1234567 -> "1,234,567".
fn group_thousands(whole: u64) -> String {
    let digits = whole.to_string();
    let lead = digits.len() % 3;
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Render a due amount to two places with thousands separators, as shown in
/// the run summary. Amounts that round to zero cents print unsigned.
pub fn amount(val: f64) -> String {
    let cents = (val.abs() * 100.0).round() as u64;
    let sign = if val < 0.0 && cents != 0 { "-" } else { "" };
    format!("{sign}{}.{:02}", group_thousands(cents / 100), cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(12345678), "12,345,678");
    }

    #[test]
    fn test_amount_rounds_to_cents() {
        assert_eq!(amount(800.0), "800.00");
        assert_eq!(amount(1234.566), "1,234.57");
        assert_eq!(amount(-2500.1), "-2,500.10");
        assert_eq!(amount(-0.001), "0.00");
    }
}
