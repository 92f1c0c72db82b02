use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::Path;

use crate::config::Config;

const HEADER: &str = "\
# eco-trip configuration
#
# dataset: path to the JSON knowledge store export
# scoring: placeholders of the scoring model (distance, price proxy, ...)
";

/// Write a default config file. Refuses to overwrite an existing file
/// unless `force` is set.
pub fn write_default_config(path: &Path, dataset: Option<&Path>, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory at {}", parent.display()))?;
    }

    let config = Config {
        dataset: dataset.map(Path::to_path_buf),
        scoring: Some(Default::default()),
    };
    let yaml = serde_saphyr::to_string(&config).context("Failed to serialize config")?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(HEADER.as_bytes()).context("Failed to write config")?;
    file.write_all(yaml.as_bytes()).context("Failed to write config")?;
    file.commit().context("Failed to save config")?;

    Ok(())
}
