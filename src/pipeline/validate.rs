// src/pipeline/validate.rs

use std::path::Path;

use crate::error::Result;
use crate::models::Config;
use crate::render::PageRenderer;

/// Validate configuration, sources and page template.
///
/// Returns the number of configured sources.
pub fn run_validate(config: &Config, base_dir: &Path) -> Result<usize> {
    log::info!("Validating configuration...");

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }
    log::info!("Config OK");
    log::info!("  user agent: {}", config.fetch.user_agent);
    log::info!("  timeout: {}s", config.fetch.timeout_secs);
    log::info!("  escape output: {}", config.render.escape_output);

    let sources = config.load_sources(base_dir)?;
    for source in &sources {
        if let Err(e) = source.validate() {
            log::error!("Source validation failed: {}", e);
            return Err(e);
        }
    }
    log::info!("Sources OK ({} feed(s))", sources.len());

    PageRenderer::new(&config.render)?;
    log::info!(
        "Template OK ({})",
        config.render.template_path.as_deref().unwrap_or("built-in")
    );

    Ok(sources.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_defaults() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(run_validate(&Config::default(), tmp.path()).unwrap(), 3);
    }

    #[test]
    fn test_validate_rejects_bad_source() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("sources.toml"),
            "[[sources]]\nname = \"Bad\"\nurl = \"ftp://bad.example/feed\"\n",
        )
        .unwrap();
        assert!(run_validate(&Config::default(), tmp.path()).is_err());
    }
}
