//! File rotation for the rotating log writer

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use jiff::Zoned;
use jiff::civil::Date;

use super::compression::gzip_file;
use super::config::{RotationConfig, RotationStrategy};
use super::error::LoggerError;

/// Calendar slot a log file belongs to under a time-based strategy.
type Period = (Date, i8);

fn period_of(strategy: RotationStrategy, now: &Zoned) -> Option<Period> {
    match strategy {
        RotationStrategy::Size => None,
        RotationStrategy::Daily | RotationStrategy::Combined => Some((now.date(), 0)),
        RotationStrategy::Hourly => Some((now.date(), now.hour())),
    }
}

/// Decides when the active log file is rotated and performs the rotation.
#[derive(Debug)]
pub struct RotationManager {
    config: RotationConfig,
    period: Option<Period>,
}

impl RotationManager {
    pub fn new(config: RotationConfig) -> Self {
        Self::starting_at(config, &Zoned::now())
    }

    /// Manager whose current file was opened at `now`.
    pub fn starting_at(config: RotationConfig, now: &Zoned) -> Self {
        let period = period_of(config.strategy, now);
        Self { config, period }
    }

    pub fn should_rotate(&self, current_size: u64) -> bool {
        self.should_rotate_at(current_size, &Zoned::now())
    }

    pub fn should_rotate_at(&self, current_size: u64, now: &Zoned) -> bool {
        let size_reached = current_size >= self.config.max_size;
        let period_changed = period_of(self.config.strategy, now) != self.period;

        match self.config.strategy {
            RotationStrategy::Size => size_reached,
            RotationStrategy::Daily | RotationStrategy::Hourly => period_changed,
            RotationStrategy::Combined => size_reached || period_changed,
        }
    }

    /// Move the active file aside and prune old rotations.
    ///
    /// An empty active file is left in place. Returns the path of the
    /// rotated file, if one was produced.
    pub fn rotate(&mut self, current_path: &Path, now: &Zoned) -> Result<Option<PathBuf>, LoggerError> {
        self.period = period_of(self.config.strategy, now);

        let has_content = fs::metadata(current_path)
            .map(|m| m.len() > 0)
            .unwrap_or(false);
        if !has_content {
            return Ok(None);
        }

        let mut rotated = rotated_path(current_path, now)?;
        fs::rename(current_path, &rotated)?;
        if self.config.compress {
            rotated = gzip_file(&rotated)?;
        }

        self.cleanup(current_path)?;
        Ok(Some(rotated))
    }

    /// Delete the oldest rotated files beyond `max_files`.
    pub fn cleanup(&self, current_path: &Path) -> Result<(), LoggerError> {
        let mut rotated = rotated_files(current_path)?;
        if rotated.len() <= self.config.max_files {
            return Ok(());
        }

        rotated.sort_by(|a, b| match a.1.cmp(&b.1) {
            Ordering::Equal => a.0.cmp(&b.0),
            other => other,
        });

        let excess = rotated.len() - self.config.max_files;
        for (path, _) in rotated.into_iter().take(excess) {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// `<stem>.<YYYYmmdd_HHMMSS>[-n].<ext>` next to `base`.
fn rotated_path(base: &Path, now: &Zoned) -> Result<PathBuf, LoggerError> {
    let stem = base
        .file_stem()
        .ok_or_else(|| LoggerError::rotation(format!("'{}' has no file name", base.display())))?
        .to_string_lossy();
    let ext = base
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let timestamp = now.strftime("%Y%m%d_%H%M%S").to_string();

    let mut candidate = base.with_file_name(format!("{}.{}{}", stem, timestamp, ext));
    let mut n = 1;
    while candidate.exists() || gz_sibling(&candidate).exists() {
        candidate = base.with_file_name(format!("{}.{}-{}{}", stem, timestamp, n, ext));
        n += 1;
    }
    Ok(candidate)
}

fn gz_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".gz");
    path.with_file_name(name)
}

/// Rotated siblings of `base` with their modification times.
fn rotated_files(base: &Path) -> Result<Vec<(PathBuf, Option<std::time::SystemTime>)>, LoggerError> {
    let parent = match base.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let prefix = format!(
        "{}.",
        base.file_stem().unwrap_or_default().to_string_lossy()
    );
    let active = base.file_name().unwrap_or_default();

    let files = fs::read_dir(parent)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            let name = entry.file_name();
            name.as_os_str() != active && name.to_string_lossy().starts_with(&prefix)
        })
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|entry| {
            let modified = entry.metadata().and_then(|m| m.modified()).ok();
            (entry.path(), modified)
        })
        .collect();
    Ok(files)
}
