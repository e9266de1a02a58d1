//! Context management commands.

use anyhow::Result;

use plantlab_client::{ClientConfig, Context};

/// Register a new context in the client config.
pub fn create(name: &str, server: Option<&str>, config_path: &std::path::Path) -> Result<()> {
    let mut config = ClientConfig::load(config_path)?;

    if config.contexts.iter().any(|c| c.name == name) {
        anyhow::bail!("Context \"{}\" already exists.", name);
    }

    config.upsert_context(Context {
        name: name.to_string(),
        server: server.unwrap_or("").to_string(),
        token: String::new(),
    });
    if config.current_context.is_empty() {
        config.current_context = name.to_string();
    }
    config.save(config_path)?;

    println!("Context \"{}\" created.", name);
    Ok(())
}

/// List all contexts.
pub fn list(config_path: &std::path::Path) -> Result<()> {
    let config = ClientConfig::load(config_path)?;

    if config.contexts.is_empty() {
        println!("No contexts. Run `plantlab context create <name> --server <url>`.");
        return Ok(());
    }

    println!("{:2} {:20} {:40} {:6}", "", "NAME", "SERVER", "TOKEN");
    for ctx in &config.contexts {
        let marker = if ctx.name == config.current_context { "*" } else { " " };
        let server = if ctx.server.is_empty() { "-" } else { &ctx.server };
        let token = if ctx.token.is_empty() { "-" } else { "set" };
        println!("{:2} {:20} {:40} {:6}", marker, ctx.name, server, token);
    }

    Ok(())
}

/// Switch current context.
pub fn use_context(name: &str, config_path: &std::path::Path) -> Result<()> {
    let mut config = ClientConfig::load(config_path)?;

    if !config.contexts.iter().any(|c| c.name == name) {
        anyhow::bail!(
            "Context \"{}\" not found. Run `plantlab context list` to see available contexts.",
            name
        );
    }

    config.current_context = name.to_string();
    config.save(config_path)?;
    println!("Switched to context \"{}\".", name);
    Ok(())
}

/// Set properties on a context.
pub fn set(name: &str, server: Option<&str>, config_path: &std::path::Path) -> Result<()> {
    let mut config = ClientConfig::load(config_path)?;

    let ctx = config
        .get_mut(name)
        .ok_or_else(|| anyhow::anyhow!("Context \"{}\" not found.", name))?;

    if let Some(s) = server {
        ctx.server = s.to_string();
    }

    config.save(config_path)?;
    println!("Context \"{}\" updated.", name);
    Ok(())
}

/// Delete a context.
pub fn delete(name: &str, config_path: &std::path::Path) -> Result<()> {
    let mut config = ClientConfig::load(config_path)?;

    if !config.remove_context(name) {
        anyhow::bail!("Context \"{}\" not found.", name);
    }

    config.save(config_path)?;
    println!("Context \"{}\" deleted.", name);
    Ok(())
}
