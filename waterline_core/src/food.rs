//! Food calorie lookup (OpenFoodFacts).
//!
//! A free-text query returns at most one resolved product: the best-ranked
//! candidate with a usable name. Parsing and ranking are pure functions over
//! the decoded response, so they are testable without the network; the HTTP
//! layer degrades to `None` on any failure, like the weather lookup.

use crate::config::FoodConfig;
use crate::{Error, Result};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// kJ per kcal, for products that only report `energy_100g`
const KJ_PER_KCAL: f64 = 4.184;

/// A resolved food: display name plus calorie density
#[derive(Clone, Debug, PartialEq)]
pub struct FoodInfo {
    pub name: String,
    pub calories_per_100g: f64,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Debug, Default, Deserialize)]
struct Product {
    product_name: Option<String>,
    product_name_ru: Option<String>,
    #[serde(default)]
    categories_tags: Vec<String>,
    #[serde(default)]
    nutriments: Nutriments,
}

/// OpenFoodFacts reports energy values as numbers or strings depending on
/// the product, so both fields decode through `Value`.
#[derive(Debug, Default, Deserialize)]
struct Nutriments {
    #[serde(rename = "energy-kcal_100g")]
    energy_kcal_100g: Option<Value>,
    energy_100g: Option<Value>,
}

impl Product {
    /// Russian name preferred, HTML entities decoded
    fn display_name(&self) -> Option<String> {
        self.product_name_ru
            .as_deref()
            .or(self.product_name.as_deref())
            .filter(|name| !name.trim().is_empty())
            .map(|name| html_escape::decode_html_entities(name).into_owned())
    }

    /// kcal per 100 g, falling back to the kJ field
    fn calories_per_100g(&self) -> f64 {
        if let Some(kcal) = numeric(self.nutriments.energy_kcal_100g.as_ref()) {
            return kcal;
        }
        numeric(self.nutriments.energy_100g.as_ref())
            .map(|kj| kj / KJ_PER_KCAL)
            .unwrap_or(0.0)
    }
}

fn numeric(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Rank a candidate against the lowercased query: exact prefix beats
/// substring beats the rest, beverages get a penalty.
fn score(product: &Product, query: &str) -> i32 {
    let name = product
        .display_name()
        .map(|name| name.to_lowercase())
        .unwrap_or_default();

    let mut score = 0;
    if name.starts_with(query) {
        score += 3;
    } else if name.contains(query) {
        score += 1;
    }
    if product
        .categories_tags
        .iter()
        .any(|tag| tag.contains("beverages"))
    {
        score -= 2;
    }
    score
}

/// Pick the best-ranked product that has a usable name
fn select_best(mut products: Vec<Product>, query: &str) -> Option<FoodInfo> {
    // Stable sort keeps the API's relevance order among equal scores
    products.sort_by_key(|product| std::cmp::Reverse(score(product, query)));

    let best = products.into_iter().next()?;
    let name = best.display_name()?;
    Some(FoodInfo {
        calories_per_100g: best.calories_per_100g(),
        name,
    })
}

/// OpenFoodFacts search client
pub struct FoodClient {
    endpoint: String,
    page_size: u32,
    http: reqwest::blocking::Client,
}

impl FoodClient {
    pub fn new(config: &FoodConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            page_size: config.page_size,
            http,
        })
    }

    /// Find the best matching product for a free-text query.
    ///
    /// Returns `None` on network failure or when nothing matches; callers
    /// report that as a not-found condition, never a crash. The returned
    /// calorie density may still be zero when the product carries no energy
    /// data; `log_food` rejects that case.
    pub fn search(&self, query: &str) -> Option<FoodInfo> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        let page_size = self.page_size.to_string();
        let response = match self
            .http
            .get(&self.endpoint)
            .query(&[
                ("action", "process"),
                ("search_terms", query),
                ("json", "true"),
                ("page_size", page_size.as_str()),
                ("search_simple", "1"),
                (
                    "fields",
                    "product_name,product_name_ru,categories_tags,nutriments",
                ),
                ("lang", "ru"),
            ])
            .send()
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Food search request failed: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!("Food API error ({}) for query {:?}", response.status(), query);
            return None;
        }

        let body: SearchResponse = match response.json() {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Failed to decode food response: {}", e);
                return None;
            }
        };

        select_best(body.products, &query.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Vec<Product> {
        serde_json::from_str::<SearchResponse>(json).unwrap().products
    }

    #[test]
    fn test_prefix_match_beats_substring() {
        let products = parse(
            r#"{"products": [
                {"product_name": "Dried apple chips", "nutriments": {"energy-kcal_100g": 340}},
                {"product_name": "Apple", "nutriments": {"energy-kcal_100g": 52}}
            ]}"#,
        );
        let best = select_best(products, "apple").unwrap();
        assert_eq!(best.name, "Apple");
        assert_eq!(best.calories_per_100g, 52.0);
    }

    #[test]
    fn test_beverage_penalty() {
        let products = parse(
            r#"{"products": [
                {"product_name": "Apple juice", "categories_tags": ["en:beverages"],
                 "nutriments": {"energy-kcal_100g": 46}},
                {"product_name": "Apple sauce", "nutriments": {"energy-kcal_100g": 68}}
            ]}"#,
        );
        let best = select_best(products, "apple").unwrap();
        assert_eq!(best.name, "Apple sauce");
    }

    #[test]
    fn test_russian_name_preferred_and_unescaped() {
        let products = parse(
            r#"{"products": [
                {"product_name": "Cottage cheese", "product_name_ru": "Творог &quot;Домик&quot;",
                 "nutriments": {"energy-kcal_100g": 159}}
            ]}"#,
        );
        let best = select_best(products, "творог").unwrap();
        assert_eq!(best.name, "Творог \"Домик\"");
    }

    #[test]
    fn test_kj_fallback() {
        let products = parse(
            r#"{"products": [
                {"product_name": "Oatmeal", "nutriments": {"energy_100g": 1548}}
            ]}"#,
        );
        let best = select_best(products, "oatmeal").unwrap();
        assert!((best.calories_per_100g - 1548.0 / 4.184).abs() < 1e-9);
    }

    #[test]
    fn test_string_energy_values_accepted() {
        let products = parse(
            r#"{"products": [
                {"product_name": "Rice", "nutriments": {"energy-kcal_100g": "130"}}
            ]}"#,
        );
        let best = select_best(products, "rice").unwrap();
        assert_eq!(best.calories_per_100g, 130.0);
    }

    #[test]
    fn test_missing_energy_yields_zero_density() {
        let products = parse(
            r#"{"products": [{"product_name": "Water", "nutriments": {}}]}"#,
        );
        let best = select_best(products, "water").unwrap();
        assert_eq!(best.calories_per_100g, 0.0);
    }

    #[test]
    fn test_no_products_is_none() {
        assert_eq!(select_best(parse(r#"{"products": []}"#), "apple"), None);
        assert_eq!(select_best(parse(r#"{}"#), "apple"), None);
    }

    #[test]
    fn test_nameless_best_is_none() {
        let products = parse(
            r#"{"products": [{"nutriments": {"energy-kcal_100g": 100}}]}"#,
        );
        assert_eq!(select_best(products, "apple"), None);
    }
}
