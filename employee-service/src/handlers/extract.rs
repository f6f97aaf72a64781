//! Request extractors for the employee routes

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};

use super::error::{ApiError, ApiOperation};
use crate::model::{Employee, EmployeeId, ENTITY_TYPE};

/// Employee identifier taken from the `{id}` path segment
///
/// Only a run of ASCII digits that fits in an [`EmployeeId`] is accepted.
/// Anything else is answered with 404 since no route exists for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmployeeIdPath(pub EmployeeId);

impl<S> FromRequestParts<S> for EmployeeIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::not_found(ENTITY_TYPE, last_segment(parts)))?;

        parse_employee_id(&raw)
            .map(Self)
            .ok_or_else(|| ApiError::not_found(ENTITY_TYPE, raw))
    }
}

/// Parse a path segment as an employee identifier
pub fn parse_employee_id(raw: &str) -> Option<EmployeeId> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Undecoded final path segment, reported when the segment cannot be decoded
fn last_segment(parts: &Parts) -> &str {
    parts.uri.path().rsplit('/').next().unwrap_or_default()
}

/// Search criteria body
///
/// Accepts an employee object, a JSON `null`, or no body at all; the latter
/// two mean "no criteria".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchBody(pub Option<Employee>);

impl<S> FromRequest<S> for SearchBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(ApiOperation::Search, e.body_text()))?;

        parse_search_body(&bytes).map(Self)
    }
}

fn parse_search_body(bytes: &[u8]) -> Result<Option<Employee>, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(bytes).map_err(|e| {
        ApiError::bad_request(ApiOperation::Search, format!("Invalid search criteria: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::ApiErrorKind;

    #[test]
    fn test_parse_employee_id() {
        assert_eq!(parse_employee_id("0"), Some(0));
        assert_eq!(parse_employee_id("42"), Some(42));
        assert_eq!(parse_employee_id("007"), Some(7));

        assert_eq!(parse_employee_id(""), None);
        assert_eq!(parse_employee_id("-1"), None);
        assert_eq!(parse_employee_id("+1"), None);
        assert_eq!(parse_employee_id("12a"), None);
        assert_eq!(parse_employee_id("search"), None);
        // digits, but beyond i64
        assert_eq!(parse_employee_id("99999999999999999999"), None);
    }

    #[tokio::test]
    async fn test_undecodable_id_reports_raw_segment() {
        use axum::{body::Body, routing::get, Router};
        use tower::ServiceExt;

        let app: Router = Router::new().route(
            "/employee/{id}",
            get(|EmployeeIdPath(id): EmployeeIdPath| async move { id.to_string() }),
        );

        let response = app
            .oneshot(
                axum::http::Request::get("/employee/%FF")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["entity_type"], "Employee");
        assert_eq!(json["entity_id"], "%FF");
    }

    #[test]
    fn test_parse_search_body_without_criteria() {
        assert_eq!(parse_search_body(b"").unwrap(), None);
        assert_eq!(parse_search_body(b"  \n").unwrap(), None);
        assert_eq!(parse_search_body(b"null").unwrap(), None);
    }

    #[test]
    fn test_parse_search_body_with_criteria() {
        let criteria = parse_search_body(br#"{"firstName":"Jo"}"#).unwrap().unwrap();
        assert_eq!(criteria.first_name.as_deref(), Some("Jo"));
        assert_eq!(criteria.last_name, None);
    }

    #[test]
    fn test_parse_search_body_rejects_malformed_json() {
        let err = parse_search_body(b"{firstName").unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::BadRequest);
        assert_eq!(err.operation, ApiOperation::Search);
    }
}
