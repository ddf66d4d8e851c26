//! Debug dumps: extracted text and per-month movements of each statement.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use resumen_core::models::statement::{Movement, StatementPeriod};
use resumen_core::statement::DebugSink;

use crate::output::MovementWriter;

/// Writes `<statement>.txt` with the extracted lines and
/// `<statement>.<YYYY-MM>.csv` with the movements of each month.
pub struct FileDebugSink {
    dir: PathBuf,
}

impl FileDebugSink {
    pub fn new(dir: &Path) -> anyhow::Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn path_for(&self, filename: &str, suffix: &str) -> PathBuf {
        let name = Path::new(filename)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(filename);
        self.dir.join(format!("{}.{}", name, suffix))
    }

    fn write_month(&self, path: &Path, filename: &str, movements: &[&Movement]) -> anyhow::Result<()> {
        let mut wtr = MovementWriter::new(fs::File::create(path)?)?;
        for movement in movements {
            wtr.write_movement("", filename, movement)?;
        }
        wtr.into_inner()?;
        Ok(())
    }
}

impl DebugSink for FileDebugSink {
    fn on_text(&mut self, filename: &str, lines: &[String]) {
        let path = self.path_for(filename, "txt");
        match fs::write(&path, lines.join("\n")) {
            Ok(()) => debug!("Wrote extracted text to {}", path.display()),
            Err(e) => warn!("Cannot write debug text {}: {}", path.display(), e),
        }
    }

    fn on_months(&mut self, filename: &str, months: &BTreeMap<StatementPeriod, Vec<&Movement>>) {
        for (period, movements) in months {
            let path = self.path_for(filename, &format!("{}.csv", period));
            match self.write_month(&path, filename, movements) {
                Ok(()) => debug!("Wrote {} movements to {}", movements.len(), path.display()),
                Err(e) => warn!("Cannot write debug movements {}: {}", path.display(), e),
            }
        }
    }
}
