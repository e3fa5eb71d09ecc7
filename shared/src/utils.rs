//! Display helpers for report text. Values are formatted the Brazilian way:
//! comma as decimal separator, magnitude suffixes for trillion/billion/million.

/// Formats a decimal with a fixed number of places and a decimal comma.
pub fn format_decimal(value: f64, decimals: usize) -> String {
    format!("{:.decimals$}", value, decimals = decimals).replace('.', ",")
}

/// Compact currency display for report headlines, e.g. `R$ 7,32 T`.
/// Falls back to a plain figure below one million.
pub fn format_currency_compact(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e12 {
        format!("R$ {} T", format_decimal(value / 1e12, 2))
    } else if abs >= 1e9 {
        format!("R$ {} B", format_decimal(value / 1e9, 2))
    } else if abs >= 1e6 {
        format!("R$ {} M", format_decimal(value / 1e6, 2))
    } else {
        format!("R$ {}", format_decimal(value, 2))
    }
}

/// Percentage with one decimal place, e.g. `80,0%`.
pub fn format_percent(value: f64) -> String {
    format!("{}%", format_decimal(value, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(6.04, 1), "6,0");
        assert_eq!(format_decimal(80.0, 1), "80,0");
    }

    #[test]
    fn test_format_currency_compact() {
        assert_eq!(format_currency_compact(7.32e12), "R$ 7,32 T");
        assert_eq!(format_currency_compact(2.5e9), "R$ 2,50 B");
        assert_eq!(format_currency_compact(3.0e6), "R$ 3,00 M");
        assert_eq!(format_currency_compact(1234.5), "R$ 1234,50");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(80.0), "80,0%");
        assert_eq!(format_percent(0.05), "0,1%");
    }
}
