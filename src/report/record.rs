//! Lossless game records.
//!
//! `GameRecord` is written twice: pretty JSON (`game_record.json`) for
//! people and other tools, and bincode (`game_record.bin`) for compact
//! storage and fast reload.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::ReportError;
use crate::game::GameRecord;

pub const JSON_FILE: &str = "game_record.json";
pub const BINARY_FILE: &str = "game_record.bin";

pub fn to_json_writer<W: Write>(out: W, record: &GameRecord) -> Result<(), ReportError> {
    serde_json::to_writer_pretty(out, record)?;
    Ok(())
}

pub fn from_json_reader<R: Read>(input: R) -> Result<GameRecord, ReportError> {
    Ok(serde_json::from_reader(input)?)
}

pub fn to_bytes(record: &GameRecord) -> Result<Vec<u8>, ReportError> {
    bincode::serialize(record).map_err(|e| ReportError::Serialization(e.to_string()))
}

pub fn from_bytes(bytes: &[u8]) -> Result<GameRecord, ReportError> {
    bincode::deserialize(bytes).map_err(|e| ReportError::Serialization(e.to_string()))
}

/// Write both encodings into `dir`.
pub fn save(dir: &Path, record: &GameRecord) -> Result<(), ReportError> {
    let json = dir.join(JSON_FILE);
    to_json_writer(fs::File::create(&json)?, record)?;

    // Write-then-rename so a reader never sees a partial record.
    let bin = dir.join(BINARY_FILE);
    let temp = bin.with_extension("bin.tmp");
    fs::write(&temp, to_bytes(record)?)?;
    fs::rename(&temp, &bin)?;

    tracing::debug!("Saved game record to {} and {}", json.display(), bin.display());
    Ok(())
}

/// Load the binary record from `dir`.
pub fn load(dir: &Path) -> Result<GameRecord, ReportError> {
    let bytes = fs::read(dir.join(BINARY_FILE))?;
    from_bytes(&bytes)
}
