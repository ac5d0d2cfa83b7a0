/// Data models for dataset-service
///
/// - Dataset: list view of one catalog row
/// - FullDataset: every column, accepted by the bulk insert
/// - ListDatasetQuery / PageResponse: pagination in and out
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

// ========================================
// Catalog Records
// ========================================

/// Catalog record as returned by the list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Dataset {
    pub name: String,
    pub type_1: String,
    pub type_2: Option<String>,
    pub generation: i64,
    pub legendary: bool,
}

/// Integer field as clients send it: a number, a whole float or a numeric string
#[derive(Deserialize)]
#[serde(untagged)]
enum LenientInt {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Accept `1`, `1.0` and `"1"`; reject fractions and non-numeric text
fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match LenientInt::deserialize(deserializer)? {
        LenientInt::Int(value) => Ok(value),
        LenientInt::Float(value) => {
            // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound
            if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
                Ok(value as i64)
            } else {
                Err(D::Error::custom(format!("expected an integer, got {}", value)))
            }
        }
        LenientInt::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("expected an integer, got {:?}", text))),
    }
}

/// Complete catalog record accepted by the bulk insert
///
/// Integers are 64-bit so out-of-range values reach the database and come
/// back as a data-format error instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullDataset {
    #[serde(deserialize_with = "lenient_i64")]
    pub id: i64,
    pub name: String,
    pub type_1: String,
    #[serde(default)]
    pub type_2: Option<String>,
    #[serde(deserialize_with = "lenient_i64")]
    pub total: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub hp: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub attack: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub defense: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub sp_atk: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub sp_def: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub speed: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub generation: i64,
    pub legendary: bool,
}

// ========================================
// Pagination
// ========================================

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    1
}

/// Query string of `GET /dataset`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ListDatasetQuery {
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: i64,

    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: i64,

    #[validate(range(min = 1))]
    pub poke_generation: Option<i64>,
}

impl ListDatasetQuery {
    /// Rows to skip before the requested page
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Body of a successful `GET /dataset`; page and limit are echoed verbatim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse {
    pub data: Vec<Dataset>,
    pub page: i64,
    pub limit: i64,
}

/// Body of a successful `POST /dataset`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertSummary {
    pub message: String,
    pub inserted_records: usize,
    pub total_records: i64,
}

impl InsertSummary {
    pub fn new(inserted_records: usize, total_records: i64) -> Self {
        Self {
            message: format!("{} records inserted successfully", inserted_records),
            inserted_records,
            total_records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: i64, limit: i64, poke_generation: Option<i64>) -> ListDatasetQuery {
        ListDatasetQuery {
            page,
            limit,
            poke_generation,
        }
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(query(1, 10, None).offset(), 0);
        assert_eq!(query(3, 10, None).offset(), 20);
        assert_eq!(query(i64::MAX, 100, None).offset(), i64::MAX);
    }

    #[test]
    fn query_defaults_to_first_single_row_page() {
        let parsed: ListDatasetQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.page, 1);
        assert_eq!(parsed.limit, 1);
        assert!(parsed.poke_generation.is_none());
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn query_validation_bounds() {
        assert!(query(1, 100, Some(1)).validate().is_ok());
        assert!(query(0, 10, None).validate().is_err());
        assert!(query(1, 0, None).validate().is_err());
        assert!(query(1, 101, None).validate().is_err());
        assert!(query(1, 10, Some(0)).validate().is_err());
        assert!(query(1, 10, Some(-2)).validate().is_err());
    }

    #[test]
    fn full_dataset_accepts_missing_secondary_type() {
        let record: FullDataset = serde_json::from_value(serde_json::json!({
            "id": 4, "name": "Charmander", "type_1": "Fire",
            "total": 309, "hp": 39, "attack": 52, "defense": 43,
            "sp_atk": 60, "sp_def": 50, "speed": 65,
            "generation": 1, "legendary": false
        }))
        .unwrap();
        assert_eq!(record.type_2, None);
    }

    fn bulbasaur_with(field: &str, value: serde_json::Value) -> serde_json::Value {
        let mut record = serde_json::json!({
            "id": 1, "name": "Bulbasaur", "type_1": "Grass", "type_2": "Poison",
            "total": 318, "hp": 45, "attack": 49, "defense": 49,
            "sp_atk": 65, "sp_def": 65, "speed": 45,
            "generation": 1, "legendary": false
        });
        record[field] = value;
        record
    }

    #[test]
    fn full_dataset_coerces_numeric_strings_and_whole_floats() {
        let record: FullDataset =
            serde_json::from_value(bulbasaur_with("id", serde_json::json!("1"))).unwrap();
        assert_eq!(record.id, 1);

        let record: FullDataset =
            serde_json::from_value(bulbasaur_with("generation", serde_json::json!(1.0))).unwrap();
        assert_eq!(record.generation, 1);

        let record: FullDataset =
            serde_json::from_value(bulbasaur_with("hp", serde_json::json!(" 45 "))).unwrap();
        assert_eq!(record.hp, 45);
    }

    #[test]
    fn full_dataset_rejects_fractions_and_words() {
        for (field, value) in [
            ("generation", serde_json::json!(1.5)),
            ("id", serde_json::json!("one")),
            ("hp", serde_json::json!(true)),
            ("speed", serde_json::json!(1e300)),
        ] {
            let parsed = serde_json::from_value::<FullDataset>(bulbasaur_with(field, value));
            assert!(parsed.is_err(), "{} should be rejected", field);
        }
    }

    #[test]
    fn full_dataset_serializes_plain_integers() {
        let record: FullDataset =
            serde_json::from_value(bulbasaur_with("id", serde_json::json!("1"))).unwrap();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], serde_json::json!(1));
    }

    #[test]
    fn insert_summary_message() {
        let summary = InsertSummary::new(3, 803);
        assert_eq!(summary.message, "3 records inserted successfully");
        assert_eq!(summary.inserted_records, 3);
        assert_eq!(summary.total_records, 803);
    }
}
