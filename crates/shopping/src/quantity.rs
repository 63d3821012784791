/// Parse the numeric prefix of a free-text quantity.
///
/// Mirrors a lenient float parse: leading whitespace is skipped and the
/// longest decimal prefix wins, so "1.5 cups" is 1.5 and "1/2" is 1.
/// Text without a numeric prefix ("to taste", "a pinch") yields `None`.
pub fn parse_quantity(quantity_str: &str) -> Option<f64> {
    let trimmed = quantity_str.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let integer_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - integer_start;

    if bytes.get(end) == Some(&b'.') {
        let fraction_start = end + 1;
        let mut cursor = fraction_start;
        while bytes.get(cursor).is_some_and(u8::is_ascii_digit) {
            cursor += 1;
        }
        digits += cursor - fraction_start;
        if digits > 0 {
            end = cursor;
        }
    }

    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut cursor = end + 1;
        if matches!(bytes.get(cursor), Some(b'+' | b'-')) {
            cursor += 1;
        }
        let exponent_start = cursor;
        while bytes.get(cursor).is_some_and(u8::is_ascii_digit) {
            cursor += 1;
        }
        if cursor > exponent_start {
            end = cursor;
        }
    }

    trimmed[..end]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Shortest decimal form of a quantity: `4` rather than `4.0`.
pub fn format_quantity(quantity: f64) -> String {
    if quantity == 0.0 {
        return "0".to_owned();
    }

    quantity.to_string()
}
