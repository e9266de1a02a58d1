//! Login / logout commands.

use anyhow::Result;

use plantlab_client::{Api, ClientConfig};

/// Login to the current context's server and save the bearer token.
pub fn login(username: &str, password: &str, config_path: &std::path::Path) -> Result<()> {
    let mut config = ClientConfig::load(config_path)?;
    let ctx = config.require_current()?.clone();

    if ctx.server.is_empty() {
        anyhow::bail!(
            "No server URL set for context \"{}\". Run `plantlab context set {} --server <url>`.",
            ctx.name,
            ctx.name
        );
    }

    // Login runs without the (possibly stale) stored token.
    let api = Api::new(&ctx.server, None)?;
    let token = api.login(username, password)?;

    let ctx_mut = config
        .get_mut(&ctx.name)
        .ok_or_else(|| anyhow::anyhow!("Context disappeared."))?;
    ctx_mut.token = token;
    config.save(config_path)?;

    println!("Logged in as {}.", username);
    println!("Token saved to context \"{}\".", ctx.name);
    Ok(())
}

/// Logout — clear token from current context.
pub fn logout(config_path: &std::path::Path) -> Result<()> {
    let mut config = ClientConfig::load(config_path)?;

    let current_name = config.current_context.clone();
    if current_name.is_empty() {
        anyhow::bail!("No current context.");
    }

    let ctx = config
        .get_mut(&current_name)
        .ok_or_else(|| anyhow::anyhow!("Current context not found."))?;

    ctx.token = String::new();
    config.save(config_path)?;
    println!("Logged out from context \"{}\".", current_name);
    Ok(())
}
