//! Search response models and the defensive parsers that build them from
//! untrusted API payloads.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;


fn default_currency() -> String {
    "USD".to_string()
}

/// One funding opportunity as listed by the search API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: u64,
    pub title: String,
    pub organization: String,
    pub country: String,
    pub research_area: String,
    pub description: String,
    pub application_url: String,
    pub deadline: Option<NaiveDate>,
    pub amount_min: Option<u64>,
    pub amount_max: Option<u64>,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub eligibility_criteria: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Opportunity {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            organization: String::new(),
            country: String::new(),
            research_area: String::new(),
            description: String::new(),
            application_url: String::new(),
            deadline: None,
            amount_min: None,
            amount_max: None,
            currency: default_currency(),
            eligibility_criteria: None,
            tags: vec![],
        }
    }

    /// Amount shown on a card: the upper bound, else the lower one.
    pub fn headline_amount(&self) -> Option<u64> {
        self.amount_max.or(self.amount_min)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub total_pages: u64,
}

impl<T> PageResult<T> {
    pub fn empty() -> Self {
        Self { items: vec![], total_count: 0, total_pages: 1 }
    }

    pub fn from_items(items: Vec<T>, total_count: u64, page_size: u64) -> Self {
        let total_pages = total_count.div_ceil(page_size.max(1)).max(1);
        Self { items, total_count, total_pages }
    }
}

impl<T> Default for PageResult<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Facet catalog served by `GET /filters`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    pub countries: Vec<String>,
    pub organizations: Vec<String>,
    pub research_areas: Vec<String>,
    pub tags: Vec<String>,
}

/// Aggregate counters served by `GET /statistics`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Statistics {
    pub active_opportunities: u64,
    pub total_funding: u64,
    pub countries: u64,
    pub funding_sources: u64,
}


/// Reads a `GET /opportunities` body. Never fails: a payload that is not an
/// object yields an empty page, and a record without a usable id is dropped
/// without affecting the others.
pub fn parse_page_result(raw: &Value) -> PageResult<Opportunity> {
    let Some(body) = raw.as_object() else {
        warn!("search response is not an object, showing empty page");
        return PageResult::empty();
    };

    let items = match body.get("opportunities") {
        Some(Value::Array(records)) => records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| {
                let parsed = parse_opportunity(record);
                if parsed.is_none() {
                    warn!("skipping malformed opportunity at index {index}");
                }
                parsed
            })
            .collect(),
        _ => vec![],
    };
    let total_count = body.get("total").and_then(Value::as_u64).unwrap_or(0);
    let total_pages = body.get("pages").and_then(Value::as_u64).unwrap_or(1).max(1);

    PageResult { items, total_count, total_pages }
}

pub fn parse_opportunity(raw: &Value) -> Option<Opportunity> {
    let record = raw.as_object()?;
    let id = parse_id(record.get("id")?)?;

    let mut amount_min = record.get("amount_min").and_then(parse_amount);
    let mut amount_max = record.get("amount_max").and_then(parse_amount);
    if let (Some(min), Some(max)) = (amount_min, amount_max) {
        if min > max {
            amount_min = Some(max);
            amount_max = Some(min);
        }
    }

    Some(Opportunity {
        id,
        title: text_field(record, "title"),
        organization: text_field(record, "organization"),
        country: text_field(record, "country"),
        research_area: text_field(record, "research_area"),
        description: text_field(record, "description"),
        application_url: text_field(record, "application_url"),
        deadline: record.get("deadline").and_then(parse_deadline),
        amount_min,
        amount_max,
        currency: record
            .get("currency")
            .and_then(Value::as_str)
            .filter(|c| !c.is_empty())
            .map_or_else(default_currency, str::to_string),
        eligibility_criteria: record
            .get("eligibility_criteria")
            .and_then(Value::as_str)
            .map(str::to_string),
        tags: string_list(record.get("tags")),
    })
}

pub fn parse_filter_options(raw: &Value) -> FilterOptions {
    FilterOptions {
        countries: string_list(raw.get("countries")),
        organizations: string_list(raw.get("organizations")),
        research_areas: string_list(raw.get("research_areas")),
        tags: string_list(raw.get("tags")),
    }
}

pub fn parse_statistics(raw: &Value) -> Statistics {
    let counter = |name: &str| raw.get(name).and_then(parse_amount).unwrap_or(0);
    Statistics {
        active_opportunities: counter("active_opportunities"),
        total_funding: counter("total_funding"),
        countries: counter("countries"),
        funding_sources: counter("funding_sources"),
    }
}


fn parse_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn text_field(record: &Map<String, Value>, name: &str) -> String {
    record.get(name).and_then(Value::as_str).unwrap_or_default().to_string()
}

// sample payloads carry float amounts such as `0.8 * amount`
fn parse_amount(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.is_finite() && f >= 0.0 {
        Some(f.round() as u64)
    } else {
        None
    }
}

fn parse_deadline(value: &Value) -> Option<NaiveDate> {
    let s = value.as_str()?.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| s.parse::<NaiveDateTime>().ok().map(|dt| dt.date()))
        .or_else(|| s.get(..10).and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()))
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(entries)) => {
            entries.iter().filter_map(Value::as_str).map(str::to_string).collect()
        }
        _ => vec![],
    }
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn full_opportunity() -> Opportunity {
        Opportunity {
            id: 7,
            title: "Early Career Fellowship".to_string(),
            organization: "Wellcome Trust".to_string(),
            country: "United Kingdom".to_string(),
            research_area: "Global Health".to_string(),
            description: "Three years of salary support.".to_string(),
            application_url: "https://example.com/grant/7".to_string(),
            deadline: NaiveDate::from_ymd_opt(2026, 3, 31),
            amount_min: Some(200_000),
            amount_max: Some(250_000),
            currency: "GBP".to_string(),
            eligibility_criteria: Some("Within 5 years of PhD.".to_string()),
            tags: vec!["Early Career".to_string(), "Fellowship".to_string()],
        }
    }

    #[test]
    fn empty_object_is_an_empty_first_page() {
        let result = parse_page_result(&json!({}));
        assert_eq!(result, PageResult::empty());
        assert_eq!(result.total_pages, 1);
    }

    #[test]
    fn non_object_payloads_are_absorbed() {
        for raw in [json!(null), json!([1, 2]), json!("oops"), json!(42)] {
            assert_eq!(parse_page_result(&raw), PageResult::empty(), "{raw}");
        }
    }

    #[test]
    fn non_positive_page_count_is_clamped() {
        let result = parse_page_result(&json!({ "opportunities": [], "total": 23, "pages": 0 }));
        assert_eq!(result.total_count, 23);
        assert_eq!(result.total_pages, 1);

        let result = parse_page_result(&json!({ "total": 23, "pages": -4 }));
        assert_eq!(result.total_pages, 1);

        let result = parse_page_result(&json!({ "total": 23, "pages": 3 }));
        assert_eq!(result.total_pages, 3);
    }

    #[test]
    fn fully_populated_record_survives_unchanged() {
        let original = full_opportunity();
        let raw = json!({
            "opportunities": [serde_json::to_value(&original).unwrap()],
            "total": 1,
            "pages": 1,
        });
        let result = parse_page_result(&raw);
        assert_eq!(result.items, vec![original]);
        assert_eq!(result.total_count, 1);
    }

    #[test]
    fn missing_optional_fields_become_absent() {
        let raw = json!({
            "opportunities": [{ "id": 3, "title": "Seed Grant", "organization": "NSF" }],
            "total": 1,
            "pages": 1,
        });
        let item = &parse_page_result(&raw).items[0];
        assert_eq!(item.id, 3);
        assert_eq!(item.title, "Seed Grant");
        assert_eq!(item.deadline, None);
        assert_eq!(item.amount_min, None);
        assert_eq!(item.amount_max, None);
        assert!(item.tags.is_empty());
        assert_eq!(item.currency, "USD");
        assert_eq!(item.description, "");
    }

    #[test]
    fn one_bad_record_does_not_spoil_the_page() {
        let raw = json!({
            "opportunities": [
                { "id": 1, "title": "Kept" },
                "not a record",
                { "title": "No id" },
                { "id": "12", "title": "String id", "tags": ["Travel Grant", 5, null] },
            ],
            "total": 4,
            "pages": 1,
        });
        let result = parse_page_result(&raw);
        let ids = result.items.iter().map(|o| o.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![1, 12]);
        assert_eq!(result.items[1].tags, vec!["Travel Grant".to_string()]);
        assert_eq!(result.total_count, 4);
    }

    #[test]
    fn loose_amounts_and_deadlines_are_normalized() {
        let raw = json!({
            "id": 9,
            "amount_min": 400000.0,
            "amount_max": 80000,
            "deadline": "2026-01-15T08:30:00.123456",
        });
        let item = parse_opportunity(&raw).unwrap();
        assert_eq!(item.amount_min, Some(80_000));
        assert_eq!(item.amount_max, Some(400_000));
        assert_eq!(item.deadline, NaiveDate::from_ymd_opt(2026, 1, 15));

        let raw = json!({ "id": 10, "amount_min": -5, "amount_max": "lots", "deadline": "soon" });
        let item = parse_opportunity(&raw).unwrap();
        assert_eq!(item.amount_min, None);
        assert_eq!(item.amount_max, None);
        assert_eq!(item.deadline, None);
    }

    #[test]
    fn headline_amount_prefers_upper_bound() {
        let mut opportunity = Opportunity::new(1, "Grant");
        assert_eq!(opportunity.headline_amount(), None);
        opportunity.amount_min = Some(10);
        assert_eq!(opportunity.headline_amount(), Some(10));
        opportunity.amount_max = Some(20);
        assert_eq!(opportunity.headline_amount(), Some(20));
    }

    #[test]
    fn page_count_derives_from_total() {
        let page = PageResult::from_items(vec![1, 2, 3], 23, 10);
        assert_eq!(page.total_pages, 3);
        let page: PageResult<u8> = PageResult::from_items(vec![], 0, 10);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn filter_catalog_drops_junk_entries() {
        let options = parse_filter_options(&json!({
            "countries": ["Canada", 3, "Germany"],
            "organizations": "Gates Foundation",
            "research_areas": ["Physics"],
        }));
        assert_eq!(options.countries, vec!["Canada".to_string(), "Germany".to_string()]);
        assert!(options.organizations.is_empty());
        assert_eq!(options.research_areas, vec!["Physics".to_string()]);
        assert!(options.tags.is_empty());
    }

    #[test]
    fn statistics_default_to_zero() {
        let stats = parse_statistics(&json!({ "active_opportunities": 52, "total_funding": "many" }));
        assert_eq!(stats.active_opportunities, 52);
        assert_eq!(stats.total_funding, 0);
        assert_eq!(stats, Statistics { active_opportunities: 52, ..Statistics::default() });
    }

    #[test]
    fn statistics_round_float_counters() {
        let stats = parse_statistics(&json!({
            "active_opportunities": 3,
            "total_funding": 1250000.6,
            "countries": -2,
            "funding_sources": 1.5,
        }));
        assert_eq!(
            stats,
            Statistics { active_opportunities: 3, total_funding: 1_250_001, countries: 0, funding_sources: 2 }
        );
    }
}
