//! Init command - write a config template

use anyhow::{Context, Result};
use console::style;
use hmpi::config::CONFIG_TEMPLATE;
use std::path::Path;

/// Run the init command
pub fn run(path: &Path, force: bool) -> Result<()> {
    let dir = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;

    if !dir.is_dir() {
        anyhow::bail!("Path is not a directory: {}", dir.display());
    }

    let config_path = dir.join("hmpi.toml");
    if config_path.exists() && !force {
        println!(
            "{} Already initialized at {} (use --force to overwrite)",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
        return Ok(());
    }

    std::fs::write(&config_path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_template() {
        let dir = tempfile::tempdir().expect("tempdir");
        run(dir.path(), false).expect("init");
        let written = std::fs::read_to_string(dir.path().join("hmpi.toml")).expect("read");
        assert_eq!(written, CONFIG_TEMPLATE);
    }

    #[test]
    fn test_init_keeps_existing_without_force() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("hmpi.toml");
        std::fs::write(&path, "# mine\n").expect("write");

        run(dir.path(), false).expect("init");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "# mine\n");

        run(dir.path(), true).expect("init --force");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), CONFIG_TEMPLATE);
    }

    #[test]
    fn test_init_rejects_missing_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(run(&dir.path().join("nope"), false).is_err());
    }
}
