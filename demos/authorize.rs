use std::io;
use std::time::Duration;

use oauth_consent::{
    AuthorizationClient, AuthorizationRequest, AuthorizeOutcome, Location, MemoryLocation,
    Redirect, ReturnUrl, Scope,
};
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
    let page = std::env::var("SDK_PAGE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SDK_PAGE environment variable is required (the page the flow runs on)",
        )
    })?;
    let scope = std::env::var("SDK_SCOPE").unwrap_or_else(|_| "SMS".to_owned());
    let return_url = std::env::var("SDK_RETURN_URL").ok();
    let skip_check = std::env::var("SDK_SKIP_CHECK").is_ok_and(|it| it == "1");

    let client = AuthorizationClient::builder(server)
        .timeout(Duration::from_secs(30))
        .build()?;
    let location = MemoryLocation::new(page.parse()?);

    let mut request =
        AuthorizationRequest::new(Scope::parse(&scope)?).skip_auth_check(skip_check);
    if let Some(return_url) = return_url {
        request = request.with_return_url(ReturnUrl::parse(&return_url)?);
    }

    match client.authorize(&request, &location).await? {
        AuthorizeOutcome::AlreadyAuthorized => println!("already authorized"),
        AuthorizeOutcome::Redirected(Redirect::ReturnUrl(url)) => {
            println!("already authorized, continue at: {url}");
        }
        AuthorizeOutcome::Redirected(Redirect::Consent(url)) => {
            println!("open this consent page in a browser: {url}");
        }
    }
    println!("host location is now: {}", location.href());

    Ok(())
}
