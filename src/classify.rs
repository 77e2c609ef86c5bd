//! Affordability classification of a predicted price

use crate::constants::{AFFORDABLE_LIMIT, MID_RANGE_LIMIT};

/// Affordability tier derived solely from the price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Terjangkau,
    Menengah,
    Mewah,
}

impl Tier {
    pub fn label(self) -> &'static str {
        match self {
            Tier::Terjangkau => "Terjangkau",
            Tier::Menengah => "Menengah",
            Tier::Mewah => "Mewah",
        }
    }
}

/// Display color token, mapped to concrete colors by the theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorToken {
    Green,
    Yellow,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub tier: Tier,
    pub color: ColorToken,
    /// Meter fill in percent
    pub width: u8,
}

/// Map a non-negative price to its tier. Boundary values go to the higher tier.
pub fn classify(price: f64) -> Classification {
    if price < AFFORDABLE_LIMIT {
        Classification {
            tier: Tier::Terjangkau,
            color: ColorToken::Green,
            width: 30,
        }
    } else if price < MID_RANGE_LIMIT {
        Classification {
            tier: Tier::Menengah,
            color: ColorToken::Yellow,
            width: 60,
        }
    } else {
        Classification {
            tier: Tier::Mewah,
            color: ColorToken::Red,
            width: 100,
        }
    }
}

/// Format a price as rupiah with Indonesian grouping ("Rp 1.250.000,5").
///
/// Only separators are added: the integer part is never truncated and up to
/// three fraction digits are kept, trailing zeros dropped.
pub fn format_rupiah(price: f64) -> String {
    let fixed = format!("{:.3}", price.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let frac = frac_part.trim_end_matches('0');
    let sign = if price < 0.0 { "-" } else { "" };
    if frac.is_empty() {
        format!("Rp {}{}", sign, grouped)
    } else {
        format!("Rp {}{},{}", sign, grouped, frac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_follow_cutoffs() {
        assert_eq!(classify(0.0).tier, Tier::Terjangkau);
        assert_eq!(classify(450_000_000.0).tier, Tier::Terjangkau);
        assert_eq!(classify(499_999_999.99).tier, Tier::Terjangkau);
        assert_eq!(classify(750_000_000.0).tier, Tier::Menengah);
        assert_eq!(classify(1_499_999_999.0).tier, Tier::Menengah);
        assert_eq!(classify(9_000_000_000.0).tier, Tier::Mewah);
    }

    #[test]
    fn boundaries_belong_to_higher_tier() {
        assert_eq!(classify(500_000_000.0).tier, Tier::Menengah);
        assert_eq!(classify(1_500_000_000.0).tier, Tier::Mewah);
    }

    #[test]
    fn display_metadata_matches_tier() {
        let low = classify(1.0);
        assert_eq!((low.color, low.width), (ColorToken::Green, 30));
        let mid = classify(600_000_000.0);
        assert_eq!((mid.color, mid.width), (ColorToken::Yellow, 60));
        let high = classify(2_000_000_000.0);
        assert_eq!((high.color, high.width), (ColorToken::Red, 100));
    }

    #[test]
    fn tiers_are_monotonic_in_price() {
        let order = |t: Tier| match t {
            Tier::Terjangkau => 0,
            Tier::Menengah => 1,
            Tier::Mewah => 2,
        };
        let mut last = 0;
        let mut price = 0.0;
        while price < 3_000_000_000.0 {
            let current = order(classify(price).tier);
            assert!(current >= last, "tier went down at {price}");
            last = current;
            price += 12_345_678.9;
        }
    }

    #[test]
    fn rupiah_groups_thousands() {
        assert_eq!(format_rupiah(450_000_000.0), "Rp 450.000.000");
        assert_eq!(format_rupiah(1_500_000_000.0), "Rp 1.500.000.000");
        assert_eq!(format_rupiah(999.0), "Rp 999");
        assert_eq!(format_rupiah(1000.0), "Rp 1.000");
        assert_eq!(format_rupiah(0.0), "Rp 0");
    }

    #[test]
    fn rupiah_keeps_fraction() {
        assert_eq!(format_rupiah(1_234.5), "Rp 1.234,5");
        assert_eq!(format_rupiah(12.125), "Rp 12,125");
    }
}
