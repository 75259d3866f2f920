//! Rotating file writer
//!
//! Implements [`MakeWriter`] so it can back a `tracing_subscriber::fmt`
//! layer. Once a write or rotation fails the writer switches to stderr for
//! the rest of the process.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use jiff::Zoned;
use tracing_subscriber::fmt::MakeWriter;

use super::config::FileConfig;
use super::error::LoggerError;
use super::rotation::RotationManager;

#[derive(Clone)]
pub struct RotatingFileWriter {
    state: Arc<Mutex<WriterState>>,
}

struct WriterState {
    path: PathBuf,
    /// `None` once the writer has fallen back to stderr
    file: Option<BufWriter<File>>,
    current_size: u64,
    rotation: RotationManager,
}

impl RotatingFileWriter {
    pub fn new(config: &FileConfig) -> Result<Self, LoggerError> {
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = open_log_file(&config.path, config.append)?;
        let current_size = if config.append {
            std::fs::metadata(&config.path).map(|m| m.len()).unwrap_or(0)
        } else {
            0
        };

        Ok(Self {
            state: Arc::new(Mutex::new(WriterState {
                path: config.path.clone(),
                file: Some(file),
                current_size,
                rotation: RotationManager::new(config.rotation.clone()),
            })),
        })
    }

    pub fn is_in_fallback_mode(&self) -> bool {
        self.state.lock().map(|s| s.file.is_none()).unwrap_or(true)
    }

    fn lock(&self) -> io::Result<MutexGuard<'_, WriterState>> {
        self.state
            .lock()
            .map_err(|_| io::Error::other("log writer lock poisoned"))
    }
}

impl<'a> MakeWriter<'a> for RotatingFileWriter {
    type Writer = RotatingFileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

impl WriterState {
    fn rotate_if_needed(&mut self) -> Result<(), LoggerError> {
        if !self.rotation.should_rotate(self.current_size) {
            return Ok(());
        }

        if let Some(file) = self.file.as_mut() {
            file.flush()?;
        }
        self.rotation.rotate(&self.path, &Zoned::now())?;
        self.file = Some(open_log_file(&self.path, false)?);
        self.current_size = 0;
        Ok(())
    }

    fn fall_back(&mut self, error: &dyn std::fmt::Display) {
        eprintln!(
            "[logger] writing to {} failed, falling back to stderr: {}",
            self.path.display(),
            error
        );
        self.file = None;
    }
}

impl Write for RotatingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.lock()?;

        if state.file.is_some() {
            if let Err(e) = state.rotate_if_needed() {
                state.fall_back(&e);
            }
        }

        let result = match state.file.as_mut() {
            // Events end with a newline; flush there so lines reach disk promptly
            Some(file) if buf.ends_with(b"\n") => {
                file.write_all(buf).and_then(|()| file.flush()).map(|()| buf.len())
            }
            Some(file) => file.write(buf),
            None => return io::stderr().write(buf),
        };

        match result {
            Ok(written) => {
                state.current_size += written as u64;
                Ok(written)
            }
            Err(e) => {
                state.fall_back(&e);
                io::stderr().write(buf)
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self.lock()?;
        match state.file.as_mut() {
            Some(file) => file.flush(),
            None => io::stderr().flush(),
        }
    }
}

fn open_log_file(path: &Path, append: bool) -> io::Result<BufWriter<File>> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)?;

    Ok(BufWriter::new(file))
}
