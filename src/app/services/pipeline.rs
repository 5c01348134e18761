//! End-to-end runs over files
//!
//! Each function here is one stage of the processing chain as the command
//! line exposes it: raw logs to canonical records, canonical records through
//! quality control, and canonical records to an assessment report.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::app::services::canonical::{CanonicalReader, CanonicalWriter};
use crate::app::services::disambiguator::{DisambiguationStats, Disambiguator};
use crate::app::services::format_adapters::{AdapterStats, RawLogReader};
use crate::app::services::quality_assessment::{QaReport, QualityAssessor};
use crate::app::services::quality_control::{QcStats, QualityControlEngine};
use crate::config::NavConfig;
use crate::{Error, Result};

/// Outcome of converting raw logs to canonical records
#[derive(Debug, Clone, Serialize)]
pub struct ConvertSummary {
    pub files: usize,
    pub records_written: usize,
    pub reading: AdapterStats,
    pub dating: DisambiguationStats,
}

/// Resolve the ordered input file list
///
/// Explicit names are taken in the order given, relative to `input_dir`.
/// Otherwise every file in `input_dir` matching `pattern` is used, sorted by
/// name.
pub fn list_input_files(
    input_dir: &Path,
    names: Option<&[String]>,
    pattern: &str,
) -> Result<Vec<PathBuf>> {
    if let Some(names) = names {
        return Ok(names.iter().map(|name| input_dir.join(name)).collect());
    }

    if !input_dir.is_dir() {
        return Err(Error::file_not_found(input_dir.display().to_string()));
    }

    let full_pattern = input_dir.join(pattern);
    let mut files = Vec::new();
    for entry in glob::glob(&full_pattern.to_string_lossy())
        .map_err(|e| Error::pattern(format!("Invalid pattern '{}'", pattern), e))?
    {
        let path = entry.map_err(|e| Error::io("Failed to list input directory", e.into_error()))?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    debug!(
        "Matched {} files with '{}' in {}",
        files.len(),
        pattern,
        input_dir.display()
    );
    Ok(files)
}

/// Convert raw logs to a canonical file
pub fn convert(
    config: &NavConfig,
    files: &[PathBuf],
    output: &Path,
    show_progress: bool,
) -> Result<ConvertSummary> {
    config.validate()?;
    if files.is_empty() {
        warn!("No input files to convert");
    }
    info!(
        "Converting {} {} files to {}",
        files.len(),
        config.format,
        output.display()
    );

    let mut reader = RawLogReader::new(config.format).with_progress(show_progress);
    let mut disambiguator = Disambiguator::new(config.buffer_capacity);
    let mut writer = CanonicalWriter::create(output, false)?;

    reader.read_files(files, |event| {
        for fix in disambiguator.push_event(event)? {
            writer.write_fix(&fix)?;
        }
        Ok(())
    })?;
    for fix in disambiguator.finish()? {
        writer.write_fix(&fix)?;
    }

    let records_written = writer.records_written();
    writer.finish()?;

    let reading = reader.into_stats();
    info!("{}", reading.summary());

    Ok(ConvertSummary {
        files: files.len(),
        records_written,
        reading,
        dating: disambiguator.into_stats(),
    })
}

/// Run quality control over a canonical file
pub fn run_qc(
    config: &NavConfig,
    input: &Path,
    output: &Path,
    flag_log: Option<&Path>,
) -> Result<QcStats> {
    config.qc.validate()?;
    info!("Quality control: {} -> {}", input.display(), output.display());

    let reader = CanonicalReader::open(input)?;
    let mut writer = CanonicalWriter::create(output, config.qc.augment)?;
    let mut log = match flag_log {
        Some(path) => Some(BufWriter::new(File::create(path).map_err(|e| {
            Error::io(format!("Failed to create flag log {}", path.display()), e)
        })?)),
        None => None,
    };

    let mut engine = QualityControlEngine::new(config.qc.clone());
    let stats = engine.process(
        reader,
        &mut writer,
        log.as_mut().map(|w| w as &mut dyn Write),
    )?;
    writer.finish()?;

    if let Some(mut log) = log {
        log.flush()
            .map_err(|e| Error::io("Failed to flush flag log", e))?;
    }
    Ok(stats)
}

/// Assess a canonical file
pub fn run_qa(config: &NavConfig, input: &Path) -> Result<QaReport> {
    config.qa.validate()?;
    info!("Quality assessment of {}", input.display());

    let reader = CanonicalReader::open(input)?;
    let report = QualityAssessor::new(config.qa.clone(), &config.qc).assess(reader)?;

    info!(
        "Assessed {} epochs",
        report.duration_and_range_of_values.actual_number_of_epochs
    );
    Ok(report)
}
