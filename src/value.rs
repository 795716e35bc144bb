//! Metric values as they appear in a stats region.

use core::fmt;

/// A metric value read from a `<name> <value>` line.
///
/// Most simulator statistics are numeric, but some (e.g. distributions with
/// placeholder tokens) are not. Non-numeric tokens are kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    /// The raw token parsed as a floating-point number.
    Number(f64),
    /// The raw token, kept as-is because it is not a number.
    Text(String),
}

impl MetricValue {
    /// Classify a raw value token.
    ///
    /// ```text
    /// "12345"  -> Number(12345.0)
    /// "1.5e3"  -> Number(1500.0)
    /// "nan"    -> Number(NaN)
    /// "|"      -> Text("|")
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<f64>() {
            Ok(v) => Self::Number(v),
            Err(_) => Self::Text(raw.to_string()),
        }
    }

    /// Returns the numeric value, if this is a number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer() {
        assert_eq!(MetricValue::parse("12345"), MetricValue::Number(12345.0));
    }

    #[test]
    fn test_parse_scientific() {
        assert_eq!(MetricValue::parse("1.5e3"), MetricValue::Number(1500.0));
    }

    #[test]
    fn test_parse_nan_is_numeric() {
        let v = MetricValue::parse("nan");
        assert!(v.as_number().is_some_and(f64::is_nan));
    }

    #[test]
    fn test_parse_text() {
        assert_eq!(
            MetricValue::parse("|"),
            MetricValue::Text("|".to_string())
        );
        assert_eq!(MetricValue::parse("12%").as_number(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(MetricValue::Number(2.5).to_string(), "2.5");
        assert_eq!(MetricValue::Text("abc".into()).to_string(), "abc");
    }
}
