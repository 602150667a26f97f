use api_key_auth::{config::Config, server};
use dotenv::dotenv;
use tide::log;

#[async_std::main]
async fn main() -> tide::Result<()> {
    dotenv().ok();
    let config = Config::from_env()?;
    log::with_level(config.log_level);

    let app = server::build(&config);

    let addr = config.listen_addr();
    log::info!("Server running on http://{}", addr);
    app.listen(addr).await?;
    Ok(())
}
