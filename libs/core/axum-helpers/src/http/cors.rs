use axum::http::{HeaderValue, Method, header};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// CORS layer restricted to `origins`.
///
/// Allows the methods the API uses, JSON content headers and a one hour
/// preflight cache.
///
/// # Errors
/// Returns the offending entry if an origin is not a valid header value, or
/// an empty string if the list is empty.
pub fn create_cors_layer<S: AsRef<str>>(origins: &[S]) -> Result<CorsLayer, String> {
    let allowed = origins
        .iter()
        .map(|origin| origin.as_ref().trim())
        .filter(|origin| !origin.is_empty())
        .map(|origin| origin.parse::<HeaderValue>().map_err(|_| origin.to_string()))
        .collect::<Result<Vec<_>, _>>()?;

    if allowed.is_empty() {
        return Err(String::new());
    }

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
        .max_age(Duration::from_secs(3600)))
}

/// Allows any origin. Development only.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_trimmed_origins() {
        assert!(create_cors_layer(&[" http://localhost:3000 ", "https://shop.example.com"]).is_ok());
    }

    #[test]
    fn test_rejects_empty_list() {
        assert!(create_cors_layer(&["", "  "]).is_err());
    }

    #[test]
    fn test_rejects_invalid_header_value() {
        let err = create_cors_layer(&["http://bad\norigin"]).unwrap_err();
        assert!(err.contains("bad"));
    }
}
