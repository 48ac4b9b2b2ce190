//! Interactive OAuth flow that creates a session for one Google account.

use anyhow::{Context, Result};
use google_calendar::Client;
use google_calendar::types::MinAccessRole;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use url::Url;

use crate::app_config::AppConfig;
use crate::session::{Session, SessionData};

const REDIRECT_PORT: u16 = 8085;
const REDIRECT_URI: &str = "http://localhost:8085/callback";

/// Creating the shifts calendar needs the full calendar scope.
pub const SCOPES: &[&str] = &["https://www.googleapis.com/auth/calendar"];

/// Run the browser consent flow and save the resulting session.
/// Returns the account email (the id of the primary calendar).
pub async fn authenticate() -> Result<String> {
    let app_config = AppConfig::load()?;

    let mut client = Client::new(
        app_config.client_id.clone(),
        app_config.client_secret.clone(),
        REDIRECT_URI.to_string(),
        String::new(),
        String::new(),
    );

    let scopes: Vec<String> = SCOPES.iter().map(|s| s.to_string()).collect();
    let auth_url = client.user_consent_url(&scopes);

    eprintln!("\nOpen this URL in your browser to authenticate:\n");
    eprintln!("{}\n", auth_url);

    if open::that(&auth_url).is_err() {
        eprintln!("(Could not open browser automatically, please copy the URL above)");
    }

    let (code, state) = tokio::task::spawn_blocking(wait_for_callback)
        .await
        .context("OAuth callback listener crashed")??;

    let tokens = client
        .get_access_token(&code, &state)
        .await
        .context("Failed to exchange authorization code for tokens")?;

    let session_data: SessionData = (&tokens).into();

    let client = Client::new(
        app_config.client_id.clone(),
        app_config.client_secret.clone(),
        REDIRECT_URI.to_string(),
        tokens.access_token.clone(),
        tokens.refresh_token.clone(),
    );

    let calendars = client
        .calendar_list()
        .list_all(MinAccessRole::default(), false, false)
        .await
        .context("Failed to fetch calendars")?
        .body;

    let account_email = calendars
        .into_iter()
        .find(|cal| cal.primary)
        .map(|cal| cal.id)
        .ok_or_else(|| anyhow::anyhow!("No primary calendar found"))?;

    Session::new(&account_email, session_data).save()?;

    Ok(account_email)
}

/// Accept one request on the loopback redirect and pull `code` and `state`
/// out of its query string.
fn wait_for_callback() -> Result<(String, String)> {
    let listener = TcpListener::bind(format!("127.0.0.1:{}", REDIRECT_PORT))
        .with_context(|| format!("Failed to bind to port {}", REDIRECT_PORT))?;

    eprintln!("Waiting for OAuth callback on port {}...", REDIRECT_PORT);

    let (mut stream, _) = listener.accept().context("Failed to accept connection")?;

    let mut request_line = String::new();
    BufReader::new(&stream).read_line(&mut request_line)?;

    let result = parse_callback(&request_line);

    let body = if result.is_ok() {
        "<h1>Authentication successful!</h1><p>You can close this window and return to the terminal.</p>"
    } else {
        "<h1>Authentication failed</h1><p>Return to the terminal for details.</p>"
    };
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nConnection: close\r\n\r\n<html><body>{}</body></html>",
        body
    );

    stream.write_all(response.as_bytes())?;
    stream.flush()?;

    result
}

fn parse_callback(request_line: &str) -> Result<(String, String)> {
    let path = request_line
        .split_whitespace()
        .nth(1)
        .context("Invalid request")?;

    let url = Url::parse(&format!("http://localhost{}", path))?;
    let param = |name: &str| {
        url.query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.to_string())
    };

    if let Some(error) = param("error") {
        anyhow::bail!("Authorization was denied: {}", error);
    }

    let code = param("code").context("No code in callback")?;
    let state = param("state").context("No state in callback")?;

    Ok((code, state))
}
