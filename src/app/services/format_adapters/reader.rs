//! Ordered multi-file reader for raw navigation logs
//!
//! Files are processed in the order given, and adapter state (hemisphere
//! memory, duplicate suppression) carries across file boundaries unless the
//! adapter resets it in [`FormatAdapter::begin_file`].

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use super::common::LineLocation;
use super::stats::AdapterStats;
use super::{FormatAdapter, NavEvent, RawFormat, create_adapter};
use crate::{Error, Result};

/// Drives one format adapter across an ordered list of raw files
pub struct RawLogReader {
    adapter: Box<dyn FormatAdapter>,
    stats: AdapterStats,
    show_progress: bool,
}

impl RawLogReader {
    /// Create a reader for the given format
    pub fn new(format: RawFormat) -> Self {
        Self::with_adapter(create_adapter(format))
    }

    /// Create a reader around an existing adapter
    pub fn with_adapter(adapter: Box<dyn FormatAdapter>) -> Self {
        Self {
            adapter,
            stats: AdapterStats::new(),
            show_progress: false,
        }
    }

    /// Show a spinner on stderr while reading
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn format(&self) -> RawFormat {
        self.adapter.format()
    }

    pub fn stats(&self) -> &AdapterStats {
        &self.stats
    }

    pub fn into_stats(self) -> AdapterStats {
        self.stats
    }

    /// Read every file in order, handing each event to `sink`
    ///
    /// Stops at the first fatal error from the adapter or the sink.
    pub fn read_files<F>(&mut self, files: &[PathBuf], mut sink: F) -> Result<()>
    where
        F: FnMut(NavEvent) -> Result<()>,
    {
        let progress = self.create_progress();

        for path in files {
            if let Some(pb) = &progress {
                pb.set_message(format!("{}", path.display()));
            }
            self.read_file(path, &mut sink, progress.as_ref())?;
        }

        if let Some(pb) = progress {
            pb.finish_with_message(format!("{} fixes read", self.stats.fixes));
        }
        Ok(())
    }

    /// Read every file and collect the events
    pub fn read_all(&mut self, files: &[PathBuf]) -> Result<Vec<NavEvent>> {
        let mut events = Vec::new();
        self.read_files(files, |event| {
            events.push(event);
            Ok(())
        })?;
        Ok(events)
    }

    fn read_file<F>(&mut self, path: &Path, sink: &mut F, progress: Option<&ProgressBar>) -> Result<()>
    where
        F: FnMut(NavEvent) -> Result<()>,
    {
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }
        info!(
            "Reading {} log: {}",
            self.adapter.format(),
            path.display()
        );

        let file = File::open(path)
            .map_err(|e| Error::io(format!("Failed to open {}", path.display()), e))?;
        let mut reader = BufReader::new(file);

        self.adapter.begin_file(path);
        self.stats.files_read += 1;

        let file_name = path.display().to_string();
        let mut buffer = Vec::new();
        let mut line_number = 0usize;

        loop {
            buffer.clear();
            let read = reader
                .read_until(b'\n', &mut buffer)
                .map_err(|e| Error::io(format!("Failed to read {}", file_name), e))?;
            if read == 0 {
                break;
            }
            line_number += 1;
            self.stats.lines_read += 1;

            let text = String::from_utf8_lossy(&buffer);
            let line = text.trim_end_matches(['\n', '\r']);
            if line.trim().is_empty() {
                continue;
            }

            let location = LineLocation::new(file_name.as_str(), line_number);
            let events = self.adapter.decode_line(line, &location, &mut self.stats)?;
            for event in events {
                match &event {
                    NavEvent::Fix(_) => self.stats.fixes += 1,
                    NavEvent::Anchor(_) => self.stats.anchors += 1,
                }
                sink(event)?;
            }

            if let Some(pb) = progress {
                pb.tick();
            }
        }

        debug!("Finished {} after {} lines", file_name, line_number);
        Ok(())
    }

    fn create_progress(&self) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
            pb.set_style(style);
        }
        Some(pb)
    }
}
