use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("failed to render chart: {0}")]
    Render(String),
    #[error("nothing to chart: {0}")]
    EmptyData(&'static str),
    #[error("failed to discard previous chart: {0}")]
    Discard(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewSlot {
    Histogram,
    TimeSeries,
    Comparison,
}

impl ViewSlot {
    pub fn file_suffix(&self) -> &'static str {
        match self {
            ViewSlot::Histogram => "histogram",
            ViewSlot::TimeSeries => "timeseries",
            ViewSlot::Comparison => "comparison",
        }
    }
}

/// A chart currently attached to a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartInstance {
    pub path: PathBuf,
    pub revision: u64,
}

impl ChartInstance {
    fn discard(self) -> Result<(), ChartError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ChartError::Discard(e)),
        }
    }
}

/// Owns the single live chart of one view.
///
/// Every render goes through [`ChartSlot::replace_with`], which discards the
/// previous instance before drawing, so a slot never holds two charts.
#[derive(Debug)]
pub struct ChartSlot {
    slot: ViewSlot,
    path: PathBuf,
    live: Option<ChartInstance>,
    revision: u64,
}

impl ChartSlot {
    /// Creates the slot for `{prefix}.{slot}.png`.
    pub fn new(slot: ViewSlot, output_prefix: &str) -> Self {
        Self {
            slot,
            path: PathBuf::from(format!("{output_prefix}.{}.png", slot.file_suffix())),
            live: None,
            revision: 0,
        }
    }

    #[cfg(test)]
    pub fn slot(&self) -> ViewSlot {
        self.slot
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(test)]
    pub fn current(&self) -> Option<&ChartInstance> {
        self.live.as_ref()
    }

    pub fn live_instances(&self) -> usize {
        usize::from(self.live.is_some())
    }

    /// Discards the live chart, leaving the slot empty.
    pub fn clear(&mut self) -> Result<(), ChartError> {
        if let Some(previous) = self.live.take() {
            debug!(slot = ?self.slot, revision = previous.revision, "clearing chart");
            previous.discard()?;
        }
        Ok(())
    }

    pub fn replace_with<F>(&mut self, draw: F) -> Result<&ChartInstance, ChartError>
    where
        F: FnOnce(&Path) -> Result<(), ChartError>,
    {
        self.clear()?;

        draw(&self.path)?;
        self.revision += 1;
        debug!(slot = ?self.slot, revision = self.revision, path = %self.path.display(), "chart rendered");
        Ok(self.live.insert(ChartInstance {
            path: self.path.clone(),
            revision: self.revision,
        }))
    }
}
