use http_types::Headers;
use http_types::headers::AUTHORIZATION;
use thiserror::Error;

/// Scheme expected in front of the key, compared case-sensitively.
pub const API_KEY_SCHEME: &str = "ApiKey";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("no authorization header included")]
    NoAuthHeader,
    #[error("malformed authorization header")]
    MalformedHeader,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKey(pub String);

/// Only the first `Authorization` value is looked at. It is split on single spaces without
/// trimming, so `"ApiKey "` yields an empty key and surrounding whitespace is malformed.
pub fn get_api_key<H>(headers: &H) -> Result<String, AuthError>
where
    H: AsRef<Headers> + ?Sized,
{
    let value = headers
        .as_ref()
        .get(AUTHORIZATION)
        .and_then(|values| values.iter().next())
        .map(|value| value.as_str())
        .unwrap_or_default();

    if value.is_empty() {
        return Err(AuthError::NoAuthHeader);
    }

    let mut parts = value.split(' ');
    match (parts.next(), parts.next()) {
        (Some(API_KEY_SCHEME), Some(key)) => Ok(key.to_string()),
        _ => Err(AuthError::MalformedHeader),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_types::{Method, Request, Url};

    fn request_with(values: &[&str]) -> Request {
        let mut req = Request::new(Method::Get, Url::parse("http://localhost/").unwrap());
        for value in values {
            req.append_header("Authorization", *value);
        }
        req
    }

    #[test]
    fn extracts_api_key() {
        let cases: &[(&str, &[&str], Result<&str, AuthError>)] = &[
            ("no authorization header", &[], Err(AuthError::NoAuthHeader)),
            ("empty authorization header", &[""], Err(AuthError::NoAuthHeader)),
            ("no space after scheme", &["ApiKeysomekey"], Err(AuthError::MalformedHeader)),
            ("wrong scheme", &["Bearer somekey"], Err(AuthError::MalformedHeader)),
            ("valid header", &["ApiKey somekey"], Ok("somekey")),
            ("extra parts are ignored", &["ApiKey somekey extra"], Ok("somekey")),
            ("empty key", &["ApiKey "], Ok("")),
            ("lowercase scheme", &["apikey somekey"], Err(AuthError::MalformedHeader)),
            (
                "leading and trailing spaces",
                &["  ApiKey somekey  "],
                Err(AuthError::MalformedHeader),
            ),
            ("scheme only", &["ApiKey"], Err(AuthError::MalformedHeader)),
            ("double space gives empty key", &["ApiKey  key"], Ok("")),
            ("tab is not a separator", &["ApiKey\tkey"], Err(AuthError::MalformedHeader)),
            ("trailing tab stays in key", &["ApiKey key\t"], Ok("key\t")),
        ];

        for (name, values, expected) in cases {
            let req = request_with(values);
            let got = get_api_key(&req);
            assert_eq!(
                got.as_deref().map_err(Clone::clone),
                expected.clone(),
                "case `{}`",
                name
            );
        }
    }

    #[test]
    fn header_name_is_case_insensitive() {
        let mut req = Request::new(Method::Get, Url::parse("http://localhost/").unwrap());
        req.insert_header("AUTHORIZATION", "ApiKey upper");
        assert_eq!(get_api_key(&req), Ok("upper".to_string()));

        let mut req = Request::new(Method::Get, Url::parse("http://localhost/").unwrap());
        req.insert_header("authorization", "ApiKey lower");
        assert_eq!(get_api_key(&req), Ok("lower".to_string()));
    }

    #[test]
    fn only_first_value_is_used() {
        let req = request_with(&["ApiKey first", "ApiKey second"]);
        assert_eq!(get_api_key(&req), Ok("first".to_string()));

        let req = request_with(&["Bearer first", "ApiKey second"]);
        assert_eq!(get_api_key(&req), Err(AuthError::MalformedHeader));
    }

    #[test]
    fn repeated_calls_agree() {
        let req = request_with(&["ApiKey somekey extra"]);
        assert_eq!(get_api_key(&req), get_api_key(&req));

        let req = request_with(&["  ApiKey somekey  "]);
        assert_eq!(get_api_key(&req), get_api_key(&req));
    }

    #[test]
    fn error_messages() {
        assert_eq!(AuthError::NoAuthHeader.to_string(), "no authorization header included");
        assert_eq!(AuthError::MalformedHeader.to_string(), "malformed authorization header");
    }
}
