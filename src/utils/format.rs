//! Display formatting for durations and quantities.

use crate::store::Unit;

/// Format seconds as a zero padded `HH:MM:SS` clock. Hours keep growing
/// past 99.
///
pub fn format_hms(seconds: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

/// Format logged seconds as hours and minutes, e.g. `14h 05m`.
///
pub fn format_logged(seconds: u64) -> String {
    format!("{}h {:02}m", seconds / 3600, (seconds % 3600) / 60)
}

/// Format a stock quantity with its unit, dropping a zero fraction.
///
pub fn format_quantity(quantity: f64, unit: Unit) -> String {
    if quantity.fract() == 0.0 {
        format!("{:.0} {}", quantity, unit)
    } else {
        format!("{:.2} {}", quantity, unit)
    }
}

/// Format a cost with two decimals.
///
pub fn format_cost(cost: f64) -> String {
    format!("{:.2}", cost)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(8), "00:00:08");
        assert_eq!(format_hms(3_725), "01:02:05");
        assert_eq!(format_hms(360_000), "100:00:00");
    }

    #[test]
    fn test_format_logged() {
        assert_eq!(format_logged(50_400), "14h 00m");
        assert_eq!(format_logged(50_700), "14h 05m");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(500.0, Unit::G), "500 g");
        assert_eq!(format_quantity(2.5, Unit::Kg), "2.50 kg");
    }
}
