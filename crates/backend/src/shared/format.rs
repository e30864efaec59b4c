/// Форматирует число с разделителями тысяч (точками)
///
/// # Примеры
/// ```ignore
/// assert_eq!(format_number(1234567), "1.234.567");
/// assert_eq!(format_number(42), "42");
/// ```
pub fn format_number(n: usize) -> String {
    let digits = n.to_string();
    let head = digits.len() % 3;
    let mut groups: Vec<&str> = Vec::with_capacity(digits.len() / 3 + 1);
    if head > 0 {
        groups.push(&digits[..head]);
    }
    let mut start = head;
    while start < digits.len() {
        groups.push(&digits[start..start + 3]);
        start += 3;
    }
    groups.join(".")
}

/// Длительность запроса для лога: миллисекунды, а для быстрых ответов микросекунды
pub fn format_elapsed(elapsed: std::time::Duration) -> String {
    let ms = elapsed.as_millis();
    if ms == 0 {
        format!("{}µs", elapsed.as_micros())
    } else {
        format!("{}ms", format_number(ms as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(42), "42");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1.000");
        assert_eq!(format_number(1234), "1.234");
        assert_eq!(format_number(123456), "123.456");
        assert_eq!(format_number(1234567890), "1.234.567.890");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_micros(250)), "250µs");
        assert_eq!(format_elapsed(Duration::from_millis(42)), "42ms");
        assert_eq!(format_elapsed(Duration::from_millis(1500)), "1.500ms");
    }
}
