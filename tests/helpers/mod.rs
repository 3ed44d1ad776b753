use std::path::{Path, PathBuf};

use mealweek::Planner;
use mealweek_store::FileStore;
use time::OffsetDateTime;

/// Writes a config file pointing storage and exports into `dir`.
#[allow(dead_code)]
pub fn write_config(dir: &Path, extra: &str) -> anyhow::Result<PathBuf> {
    let path = dir.join("mealweek.toml");
    let config = format!(
        "[storage]\ndir = {:?}\nexport_dir = {:?}\n\n{extra}",
        dir.join("state").display().to_string(),
        dir.join("out").display().to_string(),
    );
    std::fs::write(&path, config)?;

    Ok(path)
}

#[allow(dead_code)]
pub fn file_planner(dir: &Path, now: OffsetDateTime) -> anyhow::Result<Planner<FileStore>> {
    Ok(Planner::new(FileStore::open(dir.join("state"))?, now))
}
