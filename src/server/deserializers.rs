use axum::extract::{FromRequest, FromRequestParts};
use serde::{Deserialize, Deserializer};
use serde_aux::field_attributes::deserialize_number_from_string;

use super::errors::ApiError;

// clients send ids either as numbers or as numeric strings
#[derive(Deserialize)]
struct LenientId(#[serde(deserialize_with = "deserialize_number_from_string")] i64);

pub fn deserialize_ids<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Vec::<LenientId>::deserialize(deserializer)?
        .into_iter()
        .map(|id| id.0)
        .collect())
}

/// `axum::Json` answering malformed bodies with the JSON error body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Query` answering unreadable query strings with the JSON error body.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// `axum::extract::Path` answering unparsable segments with 404.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Previous {
        #[serde(deserialize_with = "deserialize_ids")]
        ids: Vec<i64>,
    }

    #[test]
    fn ids_accept_numbers_and_numeric_strings() {
        let previous: Previous = serde_json::from_str(r#"{"ids": [1, "2", 3]}"#).unwrap();
        assert_eq!(previous.ids, vec![1, 2, 3]);
    }

    #[test]
    fn ids_reject_non_numeric_strings() {
        assert!(serde_json::from_str::<Previous>(r#"{"ids": ["two"]}"#).is_err());
    }
}
