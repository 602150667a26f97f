use subtle::ConstantTimeEq;
use tide::prelude::*;
use tide::{log, Middleware, Next, Request, Response, StatusCode};

use crate::auth::{self, ApiKey};

/// Accepted keys are stored as an [`ApiKey`] extension for the handlers.
#[derive(Debug, Clone)]
pub struct RequireApiKey {
    expected: Option<String>,
}

impl RequireApiKey {
    pub fn new(expected: Option<String>) -> Self {
        RequireApiKey { expected }
    }
}

fn keys_match(presented: &str, expected: &str) -> bool {
    presented.as_bytes().ct_eq(expected.as_bytes()).into()
}

fn unauthorized(message: &str) -> Response {
    Response::builder(StatusCode::Unauthorized)
        .body(json!({ "error": message }))
        .build()
}

#[tide::utils::async_trait]
impl<State: Clone + Send + Sync + 'static> Middleware<State> for RequireApiKey {
    async fn handle(&self, mut req: Request<State>, next: Next<'_, State>) -> tide::Result {
        let key = match auth::get_api_key(&req) {
            Ok(key) => key,
            Err(e) => {
                log::warn!("Rejected {} {}: {}", req.method(), req.url().path(), e);
                return Ok(unauthorized(&e.to_string()));
            }
        };

        if let Some(expected) = &self.expected {
            if !keys_match(&key, expected) {
                log::warn!("Rejected {} {}: invalid api key", req.method(), req.url().path());
                return Ok(unauthorized("invalid api key"));
            }
        }

        log::debug!("Accepted api key for {} {}", req.method(), req.url().path());
        req.set_ext(ApiKey(key));
        Ok(next.run(req).await)
    }
}
