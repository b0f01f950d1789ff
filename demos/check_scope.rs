use std::io;

use oauth_consent::{AuthorizationClient, Scope};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let server = std::env::var("SDK_SERVER").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SDK_SERVER environment variable is required",
        )
    })?;
    let scope = std::env::var("SDK_SCOPE").unwrap_or_else(|_| "SMS".to_owned());

    let client = AuthorizationClient::new(server)?;
    let scope = Scope::parse(&scope)?;
    let authorized = client.is_authorized(&scope).await?;

    println!("scope: {scope}, authorized: {authorized}");

    Ok(())
}
