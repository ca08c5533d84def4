//! Shipping rate resolution.
//!
//! Lookups here never fail the purchase flow over data quality: blank
//! inputs, unmatched routes and junk cost values all resolve to zero so the
//! checkout can proceed and a human can fix the rate table later.

use rust_decimal::Decimal;

use arc_audio_core::{CommerceStore, StoreError};

/// Distinct provinces with at least one active rate, sorted.
///
/// # Errors
///
/// Returns [`StoreError`] when the store fails.
pub async fn provinces<S: CommerceStore>(store: &S) -> Result<Vec<String>, StoreError> {
    let rates = store.shipping_rates(None, None).await?;
    Ok(distinct_sorted(rates.iter().map(|r| r.province.as_str())))
}

/// Distinct cities with an active rate in `province`, sorted.
///
/// A blank province short-circuits to an empty list without touching the
/// store.
///
/// # Errors
///
/// Returns [`StoreError`] when the store fails.
pub async fn cities<S: CommerceStore>(
    store: &S,
    province: &str,
) -> Result<Vec<String>, StoreError> {
    let province = province.trim();
    if province.is_empty() {
        return Ok(Vec::new());
    }
    let rates = store.shipping_rates(Some(province), None).await?;
    Ok(distinct_sorted(rates.iter().map(|r| r.city.as_str())))
}

/// Shipping cost for a province/city pair.
///
/// Resolves to zero when either input is blank, when no active rate matches,
/// or when the matched rate's cost is absent or unusable.
///
/// # Errors
///
/// Returns [`StoreError`] when the store fails.
pub async fn cost<S: CommerceStore>(
    store: &S,
    province: &str,
    city: &str,
) -> Result<Decimal, StoreError> {
    let province = province.trim();
    let city = city.trim();
    if province.is_empty() || city.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let rates = store.shipping_rates(Some(province), Some(city)).await?;
    Ok(rates
        .first()
        .and_then(|rate| rate.cost)
        .unwrap_or(Decimal::ZERO))
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = values
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect();
    out.sort();
    out.dedup();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_sorted_trims_dedups_and_sorts() {
        let values = vec!["  Jawa Barat ", "DKI Jakarta", "Jawa Barat", "", "   "];
        assert_eq!(
            distinct_sorted(values.into_iter()),
            vec!["DKI Jakarta".to_string(), "Jawa Barat".to_string()]
        );
    }
}
