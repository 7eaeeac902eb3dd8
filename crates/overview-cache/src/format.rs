//! Display formatters for dashboard figures.

/// Compact count: `999`, `1.5K`, `2.5M`.
pub fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Dollar cost with precision scaled to magnitude: `$0.5000`, `$5.00`, `$2.5K`.
///
/// Negative and non-finite costs render as zero.
pub fn format_cost(cost: f64) -> String {
    let cost = if cost.is_finite() && cost > 0.0 {
        cost
    } else {
        0.0
    };

    if cost >= 1_000.0 {
        format!("${:.1}K", cost / 1_000.0)
    } else if cost >= 1.0 {
        format!("${:.2}", cost)
    } else {
        format!("${:.4}", cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count_boundaries() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1.0K");
        assert_eq!(format_count(1_500), "1.5K");
        assert_eq!(format_count(999_999), "1000.0K");
        assert_eq!(format_count(1_000_000), "1.0M");
        assert_eq!(format_count(2_500_000), "2.5M");
    }

    #[test]
    fn test_format_cost_boundaries() {
        assert_eq!(format_cost(0.5), "$0.5000");
        assert_eq!(format_cost(0.0), "$0.0000");
        assert_eq!(format_cost(1.0), "$1.00");
        assert_eq!(format_cost(5.0), "$5.00");
        assert_eq!(format_cost(999.99), "$999.99");
        assert_eq!(format_cost(2_500.0), "$2.5K");
    }

    #[test]
    fn test_format_cost_clamps_invalid_input() {
        assert_eq!(format_cost(-3.0), "$0.0000");
        assert_eq!(format_cost(f64::NAN), "$0.0000");
        assert_eq!(format_cost(f64::INFINITY), "$0.0000");
    }
}
