//! Circular progress indicator.

use std::f64::consts::PI;

/// Parse a `data-value` percentage attribute.
///
/// Reads an optional sign and the leading run of digits, ignoring anything
/// after it (`"42%"` is 42). Missing or unparsable values count as 0, and
/// the result is clamped to 0..=100.
pub fn parse_percent(attr: Option<&str>) -> u8 {
    let Some(raw) = attr else {
        return 0;
    };
    let raw = raw.trim_start();
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if negative || end == 0 {
        return 0;
    }
    digits[..end]
        .parse::<u64>()
        .map(|value| value.min(100) as u8)
        .unwrap_or(100)
}

/// Inline stroke styles for the ring's `<circle>`.
#[derive(Debug, Clone, PartialEq)]
pub struct RingStyle {
    /// `stroke-dasharray`: the circumference twice, space separated.
    pub dash_array: String,
    /// `stroke-dashoffset` with two decimals.
    pub dash_offset: String,
}

/// Geometry of one progress ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressRing {
    pub radius: f64,
}

impl ProgressRing {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    pub fn circumference(&self) -> f64 {
        self.radius * 2.0 * PI
    }

    /// Length of the undrawn part of the stroke for `percent` complete.
    pub fn offset(&self, percent: u8) -> f64 {
        let percent = f64::from(percent.min(100));
        let circumference = self.circumference();
        circumference - percent / 100.0 * circumference
    }

    pub fn style(&self, percent: u8) -> RingStyle {
        let circumference = self.circumference();
        RingStyle {
            dash_array: format!("{} {}", circumference, circumference),
            dash_offset: format!("{:.2}", self.offset(percent)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_percent() {
        assert_eq!(parse_percent(Some("42")), 42);
        assert_eq!(parse_percent(Some(" 42%")), 42);
        assert_eq!(parse_percent(Some("+7")), 7);
        assert_eq!(parse_percent(Some("250")), 100);
        assert_eq!(parse_percent(Some("99999999999999999999999")), 100);
        assert_eq!(parse_percent(Some("-5")), 0);
        assert_eq!(parse_percent(Some("abc")), 0);
        assert_eq!(parse_percent(Some("")), 0);
        assert_eq!(parse_percent(None), 0);
    }

    #[test]
    fn test_offset_bounds() {
        let ring = ProgressRing::new(10.0);
        assert!((ring.offset(0) - ring.circumference()).abs() < 1e-9);
        assert!(ring.offset(100).abs() < 1e-9);
        assert!((ring.offset(50) - ring.circumference() / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_style_formatting() {
        let ring = ProgressRing::new(1.0);
        let style = ring.style(25);
        let circumference = 2.0 * PI;
        assert_eq!(style.dash_array, format!("{} {}", circumference, circumference));
        // 2π × 0.75 = 4.712...
        assert_eq!(style.dash_offset, "4.71");
    }

    #[test]
    fn test_complete_ring_has_zero_offset() {
        assert_eq!(ProgressRing::new(52.0).style(100).dash_offset, "0.00");
    }
}
