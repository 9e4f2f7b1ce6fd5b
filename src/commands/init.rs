/*!
 * spare init - write a starter `.spare.yml`
 *
 * The generated file carries the current template version, the default
 * deploy target and region, and a randomly suffixed bucket name. An existing
 * file is never overwritten.
 */

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use tracing::info;

use crate::cli_style::Theme;
use crate::config::Config;

/// Create a default configuration at `config_path`
pub fn run_init(config_path: &Path) -> Result<Config> {
    let config = Config::default();
    config
        .create_file(config_path)
        .with_context(|| format!("Failed to create {}", config_path.display()))?;

    info!(file = %config_path.display(), bucket = %config.s3_bucket_name, "Created configuration");
    print_summary(config_path, &config);
    Ok(config)
}

fn print_summary(config_path: &Path, config: &Config) {
    println!(
        "{} {}",
        style("[ CREATE ]").green().bold(),
        Theme::value(config_path.display())
    );
    println!(
        "  Bucket:        {}",
        style(&config.s3_bucket_name).cyan()
    );
    println!("  Region:        {}", style(&config.region).cyan());
    println!(
        "  Deploy target: {}",
        style(config.deploy_target.as_path().display()).cyan()
    );
    println!(
        "\n  Edit the file, then run {} to provision.",
        style("spare build").yellow()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_run_init_writes_readable_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".spare.yml");

        let written = run_init(&path).unwrap();
        let read = Config::from_file(&path).unwrap();
        assert_eq!(written, read);
        assert!(read.validate(false).is_ok());
    }

    #[test]
    fn test_run_init_refuses_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".spare.yml");
        std::fs::write(&path, "keep: me\n").unwrap();

        let err = run_init(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to create"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep: me\n");
    }
}
