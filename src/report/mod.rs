//! Reports for a finished game.
//!
//! - `text`: the text game log, its parser, and console summaries
//! - `record`: JSON and binary `GameRecord` files
//! - `charts`: SVG charts

pub mod charts;
pub mod record;
pub mod text;

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::ReportError;
use crate::game::GameRecord;

pub use charts::{matrix_chart, round_by_round_chart, summary_chart, turn_summary_chart};
pub use text::{parse_game_log, write_console_summary, write_game_log, write_turn_log};

pub const GAME_LOG_FILE: &str = "game_log.txt";

/// Write the text log, both records and every chart into `dir`, creating
/// it if needed. Returns the files written.
pub fn write_all(dir: &Path, record: &GameRecord) -> Result<Vec<PathBuf>, ReportError> {
    fs::create_dir_all(dir)?;

    let log_path = dir.join(GAME_LOG_FILE);
    let mut out = BufWriter::new(fs::File::create(&log_path)?);
    write_game_log(&mut out, record)?;
    out.flush()?;

    record::save(dir, record)?;

    let registry = record.config.validate()?;
    let charts = [
        (charts::SUMMARY_FILE, summary_chart(&record.summary)),
        (charts::TURN_SUMMARY_FILE, turn_summary_chart(&record.log)),
        (
            charts::ROUND_BY_ROUND_FILE,
            round_by_round_chart(&record.log, &registry),
        ),
        (
            charts::MATRIX_FILE,
            matrix_chart(&record.log.action_states(), &registry),
        ),
    ];

    let mut written = vec![log_path, dir.join(record::JSON_FILE), dir.join(record::BINARY_FILE)];
    for (name, svg) in charts {
        let path = dir.join(name);
        fs::write(&path, svg)?;
        written.push(path);
    }
    tracing::info!(dir = %dir.display(), files = written.len(), "reports written");
    Ok(written)
}
