//! Lenient price parsing and promotional price derivation.
//!
//! Product prices arrive from the remote store as JSON numbers, but older
//! rows carry formatted strings ("Rp 1.299.000", "249000"). Parsing strips
//! everything except digits and `.` and treats anything that still fails to
//! parse as absent. Absent prices are excluded from percentile math and
//! compare as zero when sorting.
//!
//! The promotional "old price" shown next to a discount badge is a display
//! heuristic derived from the badge text, not a persisted field.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

/// Minimum discount percentage a badge can encode.
const PROMO_PCT_MIN: u32 = 5;
/// Maximum discount percentage a badge can encode.
const PROMO_PCT_MAX: u32 = 80;
/// Discount assumed when the badge only names a promotion without a percent.
const PROMO_PCT_DEFAULT: u32 = 15;

static BADGE_PCT: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a compile-time constant
    Regex::new(r"(\d{1,2})\s*%").unwrap()
});

/// Parse a raw price value leniently.
///
/// Strips every character except ASCII digits and `.`, then parses the
/// remainder as a decimal. Returns `None` for empty input or anything that
/// still does not parse (e.g. thousands separators leaving multiple dots).
#[must_use]
pub fn parse_price(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Derive the discount percentage encoded in a badge, if any.
///
/// A literal percentage like "20%" wins and is clamped to [5, 80]. Without
/// one, the keywords "promo", "diskon" and "sale" (case-insensitive) imply
/// a default 15% discount.
#[must_use]
pub fn promo_percent(badge: &str) -> Option<u32> {
    let lower = badge.trim().to_lowercase();
    if lower.is_empty() {
        return None;
    }

    if let Some(caps) = BADGE_PCT.captures(&lower) {
        let pct: u32 = caps.get(1)?.as_str().parse().ok()?;
        return Some(pct.clamp(PROMO_PCT_MIN, PROMO_PCT_MAX));
    }

    if lower.contains("promo") || lower.contains("diskon") || lower.contains("sale") {
        return Some(PROMO_PCT_DEFAULT);
    }

    None
}

/// Compute the displayed pre-discount price.
///
/// `round(price / (1 - pct / 100))`, rounded half away from zero to match
/// the storefront display convention.
#[must_use]
pub fn old_price(price: Decimal, pct: u32) -> Decimal {
    let pct = Decimal::from(pct.min(99));
    let divisor = Decimal::ONE - pct / Decimal::ONE_HUNDRED;
    if divisor <= Decimal::ZERO {
        return price;
    }
    (price / divisor).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_plain_number() {
        assert_eq!(parse_price("249000"), Some(Decimal::from(249_000)));
    }

    #[test]
    fn test_parse_price_strips_currency() {
        assert_eq!(parse_price("Rp 249000"), Some(Decimal::from(249_000)));
    }

    #[test]
    fn test_parse_price_thousands_separators_fail() {
        // "1.299.000" keeps both dots and no longer parses, matching the
        // storefront's NaN behavior for formatted strings.
        assert_eq!(parse_price("1.299.000"), None);
    }

    #[test]
    fn test_parse_price_empty_and_garbage() {
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("gratis"), None);
    }

    #[test]
    fn test_parse_price_decimal_point() {
        assert_eq!(parse_price("19.99"), Some("19.99".parse().unwrap()));
    }

    #[test]
    fn test_promo_percent_literal() {
        assert_eq!(promo_percent("Diskon 20%"), Some(20));
        assert_eq!(promo_percent("20 %"), Some(20));
    }

    #[test]
    fn test_promo_percent_clamped() {
        assert_eq!(promo_percent("2%"), Some(5));
        assert_eq!(promo_percent("99%"), Some(80));
    }

    #[test]
    fn test_promo_percent_keyword_default() {
        assert_eq!(promo_percent("PROMO"), Some(15));
        assert_eq!(promo_percent("Flash Sale"), Some(15));
        assert_eq!(promo_percent("diskon spesial"), Some(15));
    }

    #[test]
    fn test_promo_percent_none() {
        assert_eq!(promo_percent(""), None);
        assert_eq!(promo_percent("Best Seller"), None);
    }

    #[test]
    fn test_old_price_rounds() {
        // 100000 / 0.8 = 125000
        assert_eq!(
            old_price(Decimal::from(100_000), 20),
            Decimal::from(125_000)
        );
        // 249000 / 0.85 = 292941.17... -> 292941
        assert_eq!(
            old_price(Decimal::from(249_000), 15),
            Decimal::from(292_941)
        );
    }
}
