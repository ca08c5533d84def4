//! Catalog filtering and sorting.
//!
//! Pure in-memory transforms over a fetched product list. Filters compose
//! with AND semantics and always run before sorting; sorts are stable so
//! ties keep their curated order.

use rust_decimal::Decimal;
use serde::Deserialize;

use arc_audio_core::Product;

/// Fraction of priced products considered "budget" picks.
const BUDGET_PERCENTILE: usize = 35;

/// Sort orders the catalog page offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum SortMode {
    #[default]
    #[serde(rename = "featured")]
    Featured,
    #[serde(rename = "titleAsc")]
    TitleAsc,
    #[serde(rename = "priceAsc")]
    PriceAsc,
    #[serde(rename = "priceDesc")]
    PriceDesc,
}

/// Curated shopping intents, each backed by a keyword list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UseCase {
    Gaming,
    Musik,
    Bass,
    Anc,
    Budget,
}

impl UseCase {
    const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Gaming => &["gaming", "latency", "low latency"],
            Self::Musik => &["musik", "music", "audio", "detail", "vocal"],
            Self::Bass => &["bass", "deep bass", "sub bass"],
            Self::Anc => &["anc", "noise cancel", "noise cancelling", "cancel"],
            Self::Budget => &["budget", "murah", "hemat"],
        }
    }

    /// Display label for the storefront filter chips.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Gaming => "Gaming",
            Self::Musik => "Musik",
            Self::Bass => "Bass",
            Self::Anc => "ANC",
            Self::Budget => "Budget",
        }
    }
}

/// Use cases whose keywords match the product's descriptive fields.
///
/// Budget is excluded: it is a percentile over the whole catalog, not a
/// per-product property.
#[must_use]
pub fn use_case_labels(product: &Product) -> Vec<&'static str> {
    let hay = haystack(product);
    [UseCase::Gaming, UseCase::Musik, UseCase::Bass, UseCase::Anc]
        .into_iter()
        .filter(|use_case| use_case.keywords().iter().any(|kw| hay.contains(kw)))
        .map(UseCase::label)
        .collect()
}

/// The full filter/sort selection from the catalog page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogFilter {
    /// Free-text search over the product's descriptive fields.
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub use_case: Option<UseCase>,
    /// Exact color match; "", "all" and "semua" mean no filter.
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub sort: SortMode,
}

/// Apply filters then sort, returning a new list.
#[must_use]
pub fn apply(products: &[Product], filter: &CatalogFilter) -> Vec<Product> {
    let mut out: Vec<Product> = products.to_vec();

    if let Some(query) = filter.query.as_deref() {
        let needle = query.trim().to_lowercase();
        if !needle.is_empty() {
            out.retain(|p| haystack(p).contains(&needle));
        }
    }

    if let Some(use_case) = filter.use_case {
        out = match use_case {
            UseCase::Budget => budget_picks(out),
            other => keyword_picks(out, other),
        };
    }

    if let Some(color) = filter.color.as_deref() {
        let color = color.trim();
        if !color.is_empty() && !color.eq_ignore_ascii_case("all") && !color.eq_ignore_ascii_case("semua")
        {
            out.retain(|p| {
                p.color
                    .as_deref()
                    .is_some_and(|c| c.trim().eq_ignore_ascii_case(color))
            });
        }
    }

    match filter.sort {
        SortMode::Featured => {}
        // Case-folded byte order, not locale collation; catalog titles are
        // ASCII model names, accented titles would need an ICU collator.
        SortMode::TitleAsc => out.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase())),
        SortMode::PriceAsc => out.sort_by_key(|p| p.price.unwrap_or(Decimal::ZERO)),
        SortMode::PriceDesc => {
            out.sort_by(|a, b| {
                b.price
                    .unwrap_or(Decimal::ZERO)
                    .cmp(&a.price.unwrap_or(Decimal::ZERO))
            });
        }
    }

    out
}

/// Distinct colors across the catalog, in first-seen order.
#[must_use]
pub fn color_options(products: &[Product]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for product in products {
        let Some(color) = product.color.as_deref().map(str::trim) else {
            continue;
        };
        if color.is_empty() {
            continue;
        }
        if !out.iter().any(|c| c.eq_ignore_ascii_case(color)) {
            out.push(color.to_string());
        }
    }
    out
}

/// Lowercased concatenation of the product's descriptive fields.
fn haystack(product: &Product) -> String {
    [
        Some(product.title.as_str()),
        product.subtitle.as_deref(),
        product.description.as_deref(),
        product.badge.as_deref(),
        product.color.as_deref(),
    ]
    .iter()
    .flatten()
    .copied()
    .collect::<Vec<_>>()
    .join(" ")
    .to_lowercase()
}

fn keyword_picks(products: Vec<Product>, use_case: UseCase) -> Vec<Product> {
    products
        .into_iter()
        .filter(|p| {
            let hay = haystack(p);
            use_case.keywords().iter().any(|kw| hay.contains(kw))
        })
        .collect()
}

/// "Budget" keeps the cheapest slice of priced products: everything at or
/// below the 35th-percentile price. Degrades to all priced products when
/// the slice would be empty, and to keyword matching when nothing has a
/// price at all.
fn budget_picks(products: Vec<Product>) -> Vec<Product> {
    let mut prices: Vec<Decimal> = products.iter().filter_map(|p| p.price).collect();
    if prices.is_empty() {
        return keyword_picks(products, UseCase::Budget);
    }
    prices.sort();

    let n = prices.len();
    let idx = (n * BUDGET_PERCENTILE).div_ceil(100).saturating_sub(1).min(n - 1);
    let threshold = prices[idx];

    let cheap: Vec<Product> = products
        .iter()
        .filter(|p| p.price.is_some_and(|price| price <= threshold))
        .cloned()
        .collect();
    if cheap.is_empty() {
        return products.into_iter().filter(|p| p.price.is_some()).collect();
    }
    cheap
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(title: &str, price: Option<i64>) -> Product {
        serde_json::from_value(serde_json::json!({
            "id": uuid::Uuid::new_v4(),
            "slug": title.to_lowercase().replace(' ', "-"),
            "title": title,
            "price": price,
        }))
        .unwrap()
    }

    fn with_color(mut p: Product, color: &str) -> Product {
        p.color = Some(color.to_string());
        p
    }

    fn with_badge(mut p: Product, badge: &str) -> Product {
        p.badge = Some(badge.to_string());
        p
    }

    #[test]
    fn test_query_matches_across_fields() {
        let products = vec![
            with_badge(product("Arc Pulse", Some(199_000)), "Deep Bass"),
            product("Arc Mini", Some(99_000)),
        ];
        let filter = CatalogFilter {
            query: Some("deep bass".to_string()),
            ..CatalogFilter::default()
        };
        let out = apply(&products, &filter);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Arc Pulse");
    }

    #[test]
    fn test_color_sentinels_do_not_filter() {
        let products = vec![
            with_color(product("Arc Pulse", None), "Black"),
            with_color(product("Arc Mini", None), "White"),
        ];
        for sentinel in ["", "all", "semua", "Semua"] {
            let filter = CatalogFilter {
                color: Some(sentinel.to_string()),
                ..CatalogFilter::default()
            };
            assert_eq!(apply(&products, &filter).len(), 2, "sentinel {sentinel:?}");
        }

        let filter = CatalogFilter {
            color: Some("black".to_string()),
            ..CatalogFilter::default()
        };
        let out = apply(&products, &filter);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Arc Pulse");
    }

    #[test]
    fn test_budget_keeps_cheapest_percentile() {
        let products: Vec<Product> = (1..=10)
            .map(|i| product(&format!("Arc {i}"), Some(i64::from(i) * 100_000)))
            .collect();
        let filter = CatalogFilter {
            use_case: Some(UseCase::Budget),
            ..CatalogFilter::default()
        };
        let out = apply(&products, &filter);
        // ceil(10 * 0.35) = 4, so the threshold is the 4th-cheapest price.
        assert_eq!(out.len(), 4);
        assert!(out.iter().all(|p| p.price.unwrap() <= Decimal::from(400_000)));
    }

    #[test]
    fn test_budget_falls_back_to_keywords_without_prices() {
        let products = vec![
            with_badge(product("Arc Lite", None), "Hemat"),
            product("Arc Max", None),
        ];
        let filter = CatalogFilter {
            use_case: Some(UseCase::Budget),
            ..CatalogFilter::default()
        };
        let out = apply(&products, &filter);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Arc Lite");
    }

    #[test]
    fn test_title_sort_ignores_case() {
        let products = vec![
            product("arc zero", None),
            product("Arc Max", None),
            product("ARC ace", None),
        ];
        let filter = CatalogFilter {
            sort: SortMode::TitleAsc,
            ..CatalogFilter::default()
        };
        let out = apply(&products, &filter);
        assert_eq!(out[0].title, "ARC ace");
        assert_eq!(out[1].title, "Arc Max");
        assert_eq!(out[2].title, "arc zero");
    }

    #[test]
    fn test_price_sort_treats_unpriced_as_zero() {
        let products = vec![
            product("Arc Max", Some(500_000)),
            product("Arc Mystery", None),
            product("Arc Mini", Some(99_000)),
        ];
        let filter = CatalogFilter {
            sort: SortMode::PriceAsc,
            ..CatalogFilter::default()
        };
        let out = apply(&products, &filter);
        assert_eq!(out[0].title, "Arc Mystery");
        assert_eq!(out[2].title, "Arc Max");
    }

    #[test]
    fn test_filters_compose_before_sort() {
        let products = vec![
            with_color(with_badge(product("Arc Pulse", Some(300_000)), "Gaming"), "Black"),
            with_color(with_badge(product("Arc Ace", Some(200_000)), "Gaming"), "Black"),
            with_color(with_badge(product("Arc Neo", Some(100_000)), "Gaming"), "White"),
        ];
        let filter = CatalogFilter {
            use_case: Some(UseCase::Gaming),
            color: Some("Black".to_string()),
            sort: SortMode::PriceAsc,
            ..CatalogFilter::default()
        };
        let out = apply(&products, &filter);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].title, "Arc Ace");
        assert_eq!(out[1].title, "Arc Pulse");
    }

    #[test]
    fn test_color_options_deduplicate_case_insensitively() {
        let products = vec![
            with_color(product("A", None), "Black"),
            with_color(product("B", None), "black "),
            with_color(product("C", None), "White"),
            product("D", None),
        ];
        assert_eq!(color_options(&products), vec!["Black", "White"]);
    }
}
