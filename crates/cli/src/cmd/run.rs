//! Run a single merge pass

use crate::settings::Settings;
use crate::util;
use anyhow::{Context, Result};
use lm_core::Merger;

pub async fn run(settings: Settings) -> Result<()> {
    let merger = Merger::new(settings.merge).context("Invalid configuration")?;

    let report = merger.merge().context("Merge failed")?;
    util::print_report(&report);

    Ok(())
}
