//! NEIS client. Implements SchoolDirectory and MealService against the
//! open.neis.go.kr hub endpoints.
//!
//! The hub wraps every payload in a per-endpoint top-level key holding an
//! array of blocks, only one of which carries `row`. A missing key or a
//! missing `row` means "no data", not a protocol error. Certificate
//! verification stays enabled.

use crate::domain::{DishEntry, DomainError, MealSlot};
use crate::ports::{MealService, SchoolDirectory};
use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const SCHOOL_INFO_URL: &str = "https://open.neis.go.kr/hub/schoolInfo";
const MEAL_SERVICE_URL: &str = "https://open.neis.go.kr/hub/mealServiceDietInfo";

/// Line-break marker NEIS embeds in the dish-list string.
const DISH_SEPARATOR: &str = "<br/>";

/// NEIS API adapter. Holds one pooled reqwest client; each request carries
/// the configured timeout, and a timeout surfaces as an ordinary `Err`.
pub struct NeisClient {
    client: reqwest::Client,
    api_key: String,
}

impl NeisClient {
    /// Build the adapter with a per-request timeout.
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Config(format!("HTTP client init failed: {e}")))?;
        Ok(Self { client, api_key })
    }

    /// Common query parameters for every hub request.
    fn base_params(&self) -> [(&'static str, &str); 4] {
        [
            ("KEY", self.api_key.as_str()),
            ("Type", "json"),
            ("pIndex", "1"),
            ("pSize", "10"),
        ]
    }
}

#[derive(Deserialize)]
struct SchoolInfoResponse {
    #[serde(rename = "schoolInfo", default)]
    school_info: Option<Vec<Block<SchoolRow>>>,
}

#[derive(Deserialize)]
struct MealServiceResponse {
    #[serde(rename = "mealServiceDietInfo", default)]
    meal_service: Option<Vec<Block<MealRow>>>,
}

/// One block of a hub payload. The head block carries metadata we ignore;
/// the data block carries `row`.
#[derive(Deserialize)]
struct Block<T> {
    #[serde(default)]
    row: Option<Vec<T>>,
}

#[derive(Debug, Default, Deserialize)]
struct SchoolRow {
    #[serde(rename = "SCHUL_NM")]
    name: String,
    #[serde(rename = "SD_SCHUL_CODE")]
    code: String,
}

#[derive(Debug, Default, Deserialize)]
struct MealRow {
    #[serde(rename = "DDISH_NM", default)]
    dish_list: String,
}

/// Pulls the data rows out of a block list, if any block carries them.
fn rows_of<T>(blocks: Option<Vec<Block<T>>>) -> Vec<T> {
    blocks
        .into_iter()
        .flatten()
        .find_map(|b| b.row)
        .unwrap_or_default()
}

/// Exact-name match preferred; the provider matches fuzzily, so the first
/// candidate is the fallback. First-listed wins among duplicates.
fn select_candidate<'a>(rows: &'a [SchoolRow], school_name: &str) -> Option<&'a SchoolRow> {
    rows.iter()
        .find(|r| r.name == school_name)
        .or_else(|| rows.first())
}

/// Splits the provider's dish-list string into ordered entries: split on the
/// marker, trim, drop empties. Serving order is meaningful and preserved.
fn split_dish_list(raw: &str) -> Vec<DishEntry> {
    raw.split(DISH_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(DishEntry::new)
        .collect()
}

#[async_trait::async_trait]
impl SchoolDirectory for NeisClient {
    async fn find_school_code(
        &self,
        office_code: &str,
        school_name: &str,
    ) -> Result<Option<String>, DomainError> {
        let response = self
            .client
            .get(SCHOOL_INFO_URL)
            .query(&self.base_params())
            .query(&[
                ("ATPT_OFCDC_SC_CODE", office_code),
                ("SCHUL_NM", school_name),
            ])
            .send()
            .await
            .map_err(|e| DomainError::Directory(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(DomainError::Directory(format!(
                "API error {}",
                response.status()
            )));
        }

        let body: SchoolInfoResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Directory(format!("malformed response: {e}")))?;

        let rows = rows_of(body.school_info);
        let code = select_candidate(&rows, school_name).map(|r| r.code.clone());
        debug!(school = school_name, found = code.is_some(), "directory lookup");
        Ok(code)
    }
}

#[async_trait::async_trait]
impl MealService for NeisClient {
    async fn fetch_dishes(
        &self,
        office_code: &str,
        school_code: &str,
        date: NaiveDate,
        slot: MealSlot,
    ) -> Result<Option<Vec<DishEntry>>, DomainError> {
        let date_str = date.format("%Y%m%d").to_string();
        let response = self
            .client
            .get(MEAL_SERVICE_URL)
            .query(&self.base_params())
            .query(&[
                ("ATPT_OFCDC_SC_CODE", office_code),
                ("SD_SCHUL_CODE", school_code),
                ("MLSV_YMD", date_str.as_str()),
                ("MMEAL_SC_CODE", slot.wire_code()),
            ])
            .send()
            .await
            .map_err(|e| DomainError::MealService(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(DomainError::MealService(format!(
                "API error {}",
                response.status()
            )));
        }

        let body: MealServiceResponse = response
            .json()
            .await
            .map_err(|e| DomainError::MealService(format!("malformed response: {e}")))?;

        let rows = rows_of(body.meal_service);
        match rows.first() {
            Some(record) => Ok(Some(split_dish_list(&record.dish_list))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_dish_list_drops_trailing_empties_and_keeps_order() {
        let dishes = split_dish_list("백미밥(1.5.6)<br/>김치찌개<br/>");
        assert_eq!(dishes.len(), 2);
        assert_eq!(dishes[0].name(), "백미밥");
        assert_eq!(dishes[0].allergen_codes(), vec![1, 5, 6]);
        assert_eq!(dishes[1].name(), "김치찌개");
        assert!(dishes[1].allergen_codes().is_empty());
    }

    #[test]
    fn split_dish_list_trims_whitespace() {
        let dishes = split_dish_list(" 잡곡밥 <br/>  <br/>미역국 (5) ");
        assert_eq!(dishes.len(), 2);
        assert_eq!(dishes[0].raw, "잡곡밥");
        assert_eq!(dishes[1].name(), "미역국");
    }

    #[test]
    fn split_dish_list_empty_input() {
        assert!(split_dish_list("").is_empty());
        assert!(split_dish_list("<br/><br/>").is_empty());
    }

    #[test]
    fn candidate_selection_prefers_exact_match() {
        let rows = vec![
            SchoolRow {
                name: "황지초등학교병설유치원".into(),
                code: "1111".into(),
            },
            SchoolRow {
                name: "황지초등학교".into(),
                code: "2222".into(),
            },
        ];
        let picked = select_candidate(&rows, "황지초등학교").unwrap();
        assert_eq!(picked.code, "2222");
    }

    #[test]
    fn candidate_selection_falls_back_to_first_row() {
        let rows = vec![
            SchoolRow {
                name: "태백초등학교".into(),
                code: "3333".into(),
            },
            SchoolRow {
                name: "태백중학교".into(),
                code: "4444".into(),
            },
        ];
        let picked = select_candidate(&rows, "태백").unwrap();
        assert_eq!(picked.code, "3333");
    }

    #[test]
    fn candidate_selection_none_on_empty() {
        assert!(select_candidate(&[], "태백초등학교").is_none());
    }

    #[test]
    fn school_info_response_shape_parses() {
        let json = r#"{
            "schoolInfo": [
                {"head": [{"list_total_count": 1}, {"RESULT": {"CODE": "INFO-000", "MESSAGE": "정상 처리되었습니다."}}]},
                {"row": [{"SCHUL_NM": "태백초등학교", "SD_SCHUL_CODE": "7801100", "ATPT_OFCDC_SC_CODE": "K10"}]}
            ]
        }"#;
        let body: SchoolInfoResponse = serde_json::from_str(json).unwrap();
        let rows = rows_of(body.school_info);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "태백초등학교");
        assert_eq!(rows[0].code, "7801100");
    }

    #[test]
    fn no_data_response_shape_parses_to_empty() {
        // INFO-200: the hub omits the top-level key entirely
        let json = r#"{"RESULT": {"CODE": "INFO-200", "MESSAGE": "해당하는 데이터가 없습니다."}}"#;
        let body: MealServiceResponse = serde_json::from_str(json).unwrap();
        assert!(rows_of(body.meal_service).is_empty());
    }

    #[test]
    fn meal_response_shape_parses() {
        let json = r#"{
            "mealServiceDietInfo": [
                {"head": [{"list_total_count": 1}]},
                {"row": [{"DDISH_NM": "백미밥(1.5.6)<br/>김치찌개", "MLSV_YMD": "20240304"}]}
            ]
        }"#;
        let body: MealServiceResponse = serde_json::from_str(json).unwrap();
        let rows = rows_of(body.meal_service);
        assert_eq!(rows.len(), 1);
        let dishes = split_dish_list(&rows[0].dish_list);
        assert_eq!(dishes.len(), 2);
    }
}
