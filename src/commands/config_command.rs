//! Configuration inspection command.

use crate::cli::ConfigArgs;
use crate::config::ConfigService;
use crate::{Result, error::CapxError};

/// Execute the config command.
pub fn execute(args: ConfigArgs, config_service: &dyn ConfigService) -> Result<()> {
    let config = config_service.get_config()?;

    if let Some(key) = &args.get {
        let value = lookup(&config, key)
            .ok_or_else(|| CapxError::config(format!("unknown configuration key '{}'", key)))?;
        println!("{}", value);
        return Ok(());
    }

    // --list and the bare command both print the full configuration.
    let text = toml::to_string_pretty(&config)
        .map_err(|e| CapxError::config(format!("cannot serialize configuration: {}", e)))?;
    print!("{}", text);
    Ok(())
}

/// Resolve a dotted key ("timing.words_per_minute") against the TOML view
/// of the configuration.
fn lookup(config: &crate::config::Config, key: &str) -> Option<String> {
    let value = toml::Value::try_from(config).ok()?;
    let mut current = &value;
    for part in key.split('.') {
        current = current.get(part)?;
    }
    Some(match current {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}
