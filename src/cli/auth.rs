//! Remote account commands

use std::io::Write;

use anyhow::{Context, Result};

use advoca::remote;

use super::AppContext;

fn prompt_password() -> Result<String> {
    print!("Password: ");
    std::io::stdout().flush().context("Failed to flush stdout")?;
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("Failed to read password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub fn login_command(ctx: &AppContext, email: &str) -> Result<()> {
    let client = ctx
        .remote()
        .context("No remote backend configured (set [remote] url and anon_key in config.toml)")?;

    let password = prompt_password()?;
    let session = client.sign_in(email, &password).context("Login failed")?;
    remote::save_session(ctx.store.dir(), &session)?;
    println!("Logged in as {}", session.email);
    Ok(())
}

pub fn signup_command(ctx: &AppContext, email: &str, name: &str, location: &str) -> Result<()> {
    let client = ctx
        .remote()
        .context("No remote backend configured (set [remote] url and anon_key in config.toml)")?;

    let password = prompt_password()?;
    client
        .sign_up(name, email, &password, location)
        .context("Signup failed")?;
    println!("Check your email to confirm your account.");
    Ok(())
}

pub fn logout_command(ctx: &AppContext) -> Result<()> {
    remote::clear_session(ctx.store.dir())?;
    println!("Logged out.");
    Ok(())
}
