//! House geometry persistence (JSON).
//!
//! Experiments configure houses in code; this module lets a configured
//! [`House`] round-trip through a JSON file so a layout can be shared between
//! runs without re-building it.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};

use crate::house::House;

/// Writes a house to a JSON file.
pub fn write_house(path: &Path, house: &House) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, house)
        .with_context(|| format!("Failed to serialize house to: {}", path.display()))?;

    Ok(())
}

/// Reads a house from a JSON file.
pub fn read_house(path: &Path) -> Result<House> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;
    let reader = BufReader::new(file);

    let house: House = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to deserialize house from: {}", path.display()))?;

    Ok(house)
}

/// Serializes a house to a JSON string.
pub fn to_json_string(house: &House) -> Result<String> {
    serde_json::to_string_pretty(house).context("Failed to serialize house to string")
}

/// Deserializes a house from a JSON string.
pub fn from_json_string(json: &str) -> Result<House> {
    serde_json::from_str(json).context("Failed to deserialize house from string")
}
