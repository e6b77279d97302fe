use crate::conf::load_config;
use serde::Serialize;
use std::path::PathBuf;

/// JSON unless `yaml` is set.
pub fn dump(path: PathBuf, json: bool, yaml: bool) -> anyhow::Result<()> {
    let cfg = load_config(&path)?;

    if yaml && !json {
        dump_yaml(&cfg)
    } else {
        dump_json(&cfg)
    }
}

fn dump_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    println!("{s}");
    Ok(())
}

fn dump_yaml<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_yaml::to_string(value)?;
    println!("{s}");
    Ok(())
}
