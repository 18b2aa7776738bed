use std::{fs, path::PathBuf};

use anyhow::{Context, Result};

use crate::config::DirectoryConfig;

#[derive(Debug, Clone)]
pub struct ResolvedPaths {
    pub logs_dir: PathBuf,
}

pub fn ensure_directories(cfg: &DirectoryConfig) -> Result<ResolvedPaths> {
    let logs_dir = PathBuf::from(&cfg.logs_dir);
    fs::create_dir_all(&logs_dir)
        .with_context(|| format!("failed to create log directory {}", cfg.logs_dir))?;
    Ok(ResolvedPaths {
        logs_dir: logs_dir.canonicalize().unwrap_or(logs_dir),
    })
}
