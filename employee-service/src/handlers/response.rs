//! Response types for employee writes

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

/// 200 OK with an empty body, optionally pointing at the saved resource
///
/// ```rust
/// use axum::response::IntoResponse;
/// use employee_service::handlers::Saved;
///
/// let response = Saved::new().with_location("/employee/1").into_response();
/// assert_eq!(response.status(), 200);
/// assert_eq!(response.headers()["location"], "/employee/1");
/// ```
#[derive(Debug, Default)]
pub struct Saved {
    location: Option<String>,
}

impl Saved {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a Location header pointing to the saved resource
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl IntoResponse for Saved {
    fn into_response(self) -> Response {
        let mut response = StatusCode::OK.into_response();

        if let Some(location) = self.location {
            if let Ok(header_value) = HeaderValue::from_str(&location) {
                response.headers_mut().insert(header::LOCATION, header_value);
            }
        }

        response
    }
}
