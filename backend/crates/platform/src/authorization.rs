//! Authorization Header Parsing
//!
//! Extracts the key from `Authorization: <keyword> <key>` headers.

use axum::http::{HeaderMap, header};
use thiserror::Error;

/// Malformed token header
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenHeaderError {
    #[error("Invalid token header. No credentials provided.")]
    MissingCredentials,

    #[error("Invalid token header. Token string should not contain spaces.")]
    ContainsSpaces,

    #[error("Invalid token header. Token string should not contain invalid characters.")]
    InvalidCharacters,
}

/// Parse a token from the `Authorization` header
///
/// ## Returns
/// * `Ok(None)` - header absent, or it uses a different scheme
/// * `Ok(Some(key))` - `"<keyword> <key>"` (keyword matched case-insensitively)
/// * `Err(_)` - the scheme matched but the credentials are malformed
pub fn parse_token_header(
    headers: &HeaderMap,
    keyword: &str,
) -> Result<Option<String>, TokenHeaderError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let parts: Vec<&[u8]> = value
        .as_bytes()
        .split(|b| b.is_ascii_whitespace())
        .filter(|part| !part.is_empty())
        .collect();

    match parts.first() {
        Some(scheme) if scheme.eq_ignore_ascii_case(keyword.as_bytes()) => {}
        _ => return Ok(None),
    }

    match parts.as_slice() {
        [_] => Err(TokenHeaderError::MissingCredentials),
        [_, key] => std::str::from_utf8(key)
            .map(|key| Some(key.to_string()))
            .map_err(|_| TokenHeaderError::InvalidCharacters),
        _ => Err(TokenHeaderError::ContainsSpaces),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_absent_header() {
        assert_eq!(parse_token_header(&HeaderMap::new(), "Token"), Ok(None));
    }

    #[test]
    fn test_other_scheme_is_ignored() {
        assert_eq!(parse_token_header(&headers("Bearer abc"), "Token"), Ok(None));
        assert_eq!(parse_token_header(&headers(""), "Token"), Ok(None));
    }

    #[test]
    fn test_valid_token() {
        assert_eq!(
            parse_token_header(&headers("Token 9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b"), "Token"),
            Ok(Some("9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b".to_string()))
        );
        // Scheme is case-insensitive
        assert_eq!(
            parse_token_header(&headers("token abc"), "Token"),
            Ok(Some("abc".to_string()))
        );
    }

    #[test]
    fn test_malformed_credentials() {
        assert_eq!(
            parse_token_header(&headers("Token"), "Token"),
            Err(TokenHeaderError::MissingCredentials)
        );
        assert_eq!(
            parse_token_header(&headers("Token abc def"), "Token"),
            Err(TokenHeaderError::ContainsSpaces)
        );
    }

    #[test]
    fn test_invalid_utf8() {
        let mut map = HeaderMap::new();
        map.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes(b"Token \xff\xfe").unwrap(),
        );
        assert_eq!(
            parse_token_header(&map, "Token"),
            Err(TokenHeaderError::InvalidCharacters)
        );
    }
}
