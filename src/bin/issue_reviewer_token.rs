//! Issue a bearer token for the review API.
//!
//! Prompts for a host user id, username and role, then prints a token signed with
//! `JWT_SECRET`. Role `0` is the instance administrator.
//!
//! Usage:
//!     cargo run --bin issue_reviewer_token

use aimod::presentation::http::middleware::user::{ReviewerClaims, issue_reviewer_token};
use std::io::{self, Write};

const TOKEN_LIFETIME_SECS: i64 = 12 * 3600;

fn prompt(label: &str) -> io::Result<String> {
    print!("{}\n> ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| anyhow::anyhow!("Missing required environment variable: JWT_SECRET"))?;

    let sub: i32 = prompt("Host user id:")?.parse()?;
    let username = prompt("Username:")?;
    if username.is_empty() {
        anyhow::bail!("Username cannot be empty");
    }
    let role: i32 = prompt("Role (0 = administrator):")?.parse()?;

    let claims = ReviewerClaims {
        sub,
        username,
        role,
        exp: (chrono::Utc::now().timestamp() + TOKEN_LIFETIME_SECS) as usize,
    };
    let token = issue_reviewer_token(&claims, &secret)?;

    println!("\nAuthorization: Bearer {}\n", token);
    Ok(())
}
