//! HTTP handlers for the folder and note resources.

pub mod folders;
pub mod notes;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::{header, HeaderMap},
    Json,
};
use serde_json::{Map, Value};

use crate::ApiError;

/// A request body read as a JSON object and checked field by field.
///
/// A body sent without a JSON content type reads as `{}`, so it is reported
/// as missing its required field rather than as a transport error.
#[derive(Debug, Default)]
pub struct JsonObject(pub Map<String, Value>);

#[async_trait]
impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(Value::Object(fields))) => Ok(JsonObject(fields)),
            Ok(Json(_)) => Err(ApiError::BadRequest(
                "The request body must be a JSON object".to_string(),
            )),
            Err(JsonRejection::MissingJsonContentType(_)) => Ok(JsonObject::default()),
            Err(rejection) => Err(rejection.into()),
        }
    }
}

impl JsonObject {
    /// A string field. Absent and `null` both read as `None`.
    pub fn string(&self, field: &str) -> Result<Option<String>, ApiError> {
        match self.0.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(ApiError::BadRequest(format!(
                "The `{}` must be a string",
                field
            ))),
        }
    }
}

/// Location of a newly created resource.
///
/// Absolute when the request names its host, otherwise a path.
pub(crate) fn location(headers: &HeaderMap, path: &str) -> String {
    match headers.get(header::HOST).and_then(|h| h.to_str().ok()) {
        Some(host) => format!("http://{}{}", host, path),
        None => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_location_with_host_is_absolute() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("localhost:8080"));
        assert_eq!(
            location(&headers, "/folders/abc"),
            "http://localhost:8080/folders/abc"
        );
    }

    fn object(raw: Value) -> JsonObject {
        match raw {
            Value::Object(fields) => JsonObject(fields),
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn test_string_field_absent_or_null_is_none() {
        let body = object(serde_json::json!({ "name": null }));
        assert_eq!(body.string("name").unwrap(), None);
        assert_eq!(body.string("other").unwrap(), None);
    }

    #[test]
    fn test_string_field_of_wrong_type_names_the_field() {
        let body = object(serde_json::json!({ "folderId": 123, "name": "Work" }));
        assert_eq!(body.string("name").unwrap().as_deref(), Some("Work"));
        let err = body.string("folderId").unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(m) if m == "The `folderId` must be a string"));
    }

    #[test]
    fn test_location_without_host_is_path() {
        assert_eq!(location(&HeaderMap::new(), "/notes/abc"), "/notes/abc");
    }
}
