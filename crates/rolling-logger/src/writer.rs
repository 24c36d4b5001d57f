//! Daily Rolling File Writer
//!
//! Appends formatted log output to `<prefix>-YYYY-MM-DD.log` inside the log
//! directory, switching files when the local date changes and pruning the
//! oldest files beyond `max_files`. Every line is mirrored into a
//! [`RingBuffer`] so the app can show recent logs without touching disk.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDate;
use tracing_subscriber::fmt::MakeWriter;

use crate::buffer::RingBuffer;

struct WriterState {
    dir: PathBuf,
    prefix: String,
    max_files: usize,
    current: Option<(NaiveDate, File)>,
    ring: RingBuffer,
}

/// Cloneable handle to a shared rolling log file
#[derive(Clone)]
pub struct RollingFileWriter {
    state: Arc<Mutex<WriterState>>,
}

impl RollingFileWriter {
    pub fn new(dir: impl Into<PathBuf>, prefix: &str, max_files: usize, buffer_lines: usize) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            state: Arc::new(Mutex::new(WriterState {
                dir,
                prefix: prefix.to_string(),
                max_files: max_files.max(1),
                current: None,
                ring: RingBuffer::new(buffer_lines),
            })),
        })
    }

    /// Most recent lines, oldest first
    pub fn recent_lines(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .ring
            .lines()
    }

    /// Path of the file written for `date`
    pub fn file_path(&self, date: NaiveDate) -> PathBuf {
        let state = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        file_name(&state.dir, &state.prefix, date)
    }

    pub(crate) fn append(&self, date: NaiveDate, bytes: &[u8]) -> io::Result<()> {
        let mut state = self.lock()?;

        let needs_roll = !matches!(&state.current, Some((current, _)) if *current == date);
        if needs_roll {
            let path = file_name(&state.dir, &state.prefix, date);
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            state.current = Some((date, file));
            prune_old_files(&state.dir, &state.prefix, state.max_files)?;
        }

        if let Some((_, file)) = state.current.as_mut() {
            file.write_all(bytes)?;
        }

        for line in String::from_utf8_lossy(bytes).lines() {
            if !line.trim().is_empty() {
                state.ring.push(line.to_string());
            }
        }
        Ok(())
    }

    fn lock(&self) -> io::Result<MutexGuard<'_, WriterState>> {
        self.state
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer lock poisoned"))
    }
}

impl Write for RollingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let today = chrono::Local::now().date_naive();
        self.append(today, buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self.lock()?;
        match state.current.as_mut() {
            Some((_, file)) => file.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for RollingFileWriter {
    type Writer = RollingFileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn file_name(dir: &Path, prefix: &str, date: NaiveDate) -> PathBuf {
    dir.join(format!("{}-{}.log", prefix, date.format("%Y-%m-%d")))
}

/// Date of a `<prefix>-YYYY-MM-DD.log` file name, `None` for anything else
fn log_file_date(name: &str, prefix: &str) -> Option<NaiveDate> {
    let date = name
        .strip_prefix(prefix)?
        .strip_prefix('-')?
        .strip_suffix(".log")?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Remove the oldest `<prefix>-YYYY-MM-DD.log` files so at most `max_files` remain
fn prune_old_files(dir: &Path, prefix: &str, max_files: usize) -> io::Result<()> {
    let mut logs: Vec<(NaiveDate, PathBuf)> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter_map(|path| {
            let date = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| log_file_date(name, prefix))?;
            Some((date, path))
        })
        .collect();

    if logs.len() <= max_files {
        return Ok(());
    }

    logs.sort();
    let excess = logs.len() - max_files;
    for (_, path) in logs.into_iter().take(excess) {
        fs::remove_file(path)?;
    }
    Ok(())
}
