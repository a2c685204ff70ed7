use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use log::{info, warn};

use crate::config::Config;
use crate::continuum::remove_continuum;
use crate::data::model::ContinuumRemovedSeries;
use crate::data::{loader, writer};

// ---------------------------------------------------------------------------
// One load → remove → write run
// ---------------------------------------------------------------------------

pub struct ContinuumApp {
    pub config: Config,
}

impl ContinuumApp {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Load `input`, remove its continuum and write the result to `output`.
    pub fn run(&self, input: &Path, output: &Path) -> Result<ContinuumRemovedSeries> {
        let points = loader::load_file(input, &self.config)
            .with_context(|| format!("loading {}", input.display()))?;

        let series = remove_continuum(&points).map_err(|err| {
            let action = if err.is_invalid_input() {
                "rejected input"
            } else {
                "could not remove continuum from"
            };
            anyhow::Error::new(err).context(format!("{action} {}", input.display()))
        })?;

        if let Some(first) = series.flagged().next() {
            if self.config.strict {
                bail!(
                    "{} sample(s) have no usable continuum (first at x = {}: {})",
                    series.flagged_count(),
                    first.x,
                    first.quality
                );
            }
            warn!("{} flagged sample(s) written as NaN", series.flagged_count());
        }

        writer::write_file(output, &series)
            .with_context(|| format!("writing {}", output.display()))?;
        info!("{} → {}", input.display(), output.display());
        Ok(series)
    }
}

/// Output path used when none is given.
pub fn default_output() -> PathBuf {
    PathBuf::from("cr_output.dat")
}
