//! Configuration and map files for CLI commands

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::frozen_lake::LakeMap;

/// Load a JSON config file, or the defaults when no file is given.
///
/// Keys missing from the file keep their default values.
pub fn load_json_config<T>(path: Option<&Path>) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let Some(path) = path else {
        return Ok(T::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Load a lake layout from a text file with one row per line, or the default
/// 8x8 lake.
pub fn load_lake_map(path: Option<&Path>) -> Result<LakeMap> {
    let Some(path) = path else {
        return Ok(LakeMap::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read map file: {}", path.display()))?;
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    LakeMap::parse(&rows).with_context(|| format!("Invalid map file: {}", path.display()))
}
