use tide::prelude::*;
use tide::{log, Request, Response, StatusCode};

use crate::auth::ApiKey;
use crate::config::Config;
use crate::middleware::RequireApiKey;

#[derive(Debug, serde::Serialize)]
struct AuthCheck {
    authenticated: bool,
    key_length: usize,
}

/// Build the app: `/` is public, everything under `/auth` needs an api key.
pub fn build(config: &Config) -> tide::Server<()> {
    let mut app = tide::new();

    if config.api_key.is_none() {
        log::info!("API_KEY not set, any well-formed api key is accepted");
    }

    app.at("/").get(|_| async { Ok("API Key Auth Service") });
    app.at("/auth/check")
        .with(RequireApiKey::new(config.api_key.clone()))
        .get(auth_check);
    app
}

async fn auth_check(req: Request<()>) -> tide::Result<Response> {
    let key_length = req.ext::<ApiKey>().map(|key| key.0.len()).unwrap_or_default();

    let check = AuthCheck {
        authenticated: true,
        key_length,
    };

    let mut res = Response::new(StatusCode::Ok);
    res.set_content_type("application/json");
    res.set_body(json!(check));
    Ok(res)
}
