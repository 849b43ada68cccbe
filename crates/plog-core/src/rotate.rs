//! Size-bounded rotating log file.
//!
//! [`RotatingFile`] follows the lumberjack conventions, so tooling written
//! around those files keeps working:
//!
//! - the file is opened lazily, on the first write;
//! - an existing file is appended to as long as the write fits;
//! - when a write would overflow the limit, the current file is renamed to
//!   `<stem>-<YYYY-MM-DDTHH-MM-SS.mmm><ext>` and a fresh file is created;
//! - after each rotation, backups beyond `max_backups` or older than
//!   `max_age_days` are removed, and the rest are gzipped if `compress` is
//!   set.
//!
//! Backup cleanup runs inline on the writing thread, under the logger's
//! output lock.

use crate::zone;
use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, TimeZone, Utc};
use flate2::write::GzEncoder;
use flate2::Compression;
use plog_types::LogConfig;
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::RollingFileAppender;

const MEGABYTE: u64 = 1024 * 1024;
const DEFAULT_MAX_SIZE_MB: u64 = 100;
const BACKUP_TIMESTAMP: &str = "%Y-%m-%dT%H-%M-%S%.3f";
const COMPRESS_SUFFIX: &str = ".gz";
const MAX_AGE_DAYS: u64 = 365_000;

/// A log file that rolls over once it reaches a size limit.
#[derive(Debug)]
pub struct RotatingFile {
    config: LogConfig,
    path: PathBuf,
    max_size: u64,
    file: Option<File>,
    size: u64,
    last_backup: Option<DateTime<FixedOffset>>,
}

#[derive(Debug)]
struct Backup {
    path: PathBuf,
    timestamp: DateTime<Utc>,
    compressed: bool,
}

impl RotatingFile {
    /// Describe a rotating file. Nothing is touched on disk until the first
    /// write.
    pub fn new(config: LogConfig) -> Self {
        let path = if config.path.as_os_str().is_empty() {
            default_path()
        } else {
            config.path.clone()
        };
        let max_size_mb = match config.max_size_mb {
            0 => DEFAULT_MAX_SIZE_MB,
            mb => mb,
        };

        Self {
            max_size: max_size_mb.saturating_mul(MEGABYTE),
            path,
            config,
            file: None,
            size: 0,
            last_backup: None,
        }
    }

    /// Override the rotation threshold with an exact byte count.
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_size = max_bytes;
        self
    }

    /// Path of the live log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rotation threshold in bytes.
    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    /// Bytes in the live file, as far as this writer knows.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Close the live file, move it aside as a backup, start a new one and
    /// clean up old backups.
    pub fn rotate(&mut self) -> io::Result<()> {
        self.file = None;
        self.open_new()?;
        self.mill();
        Ok(())
    }

    fn open_existing_or_new(&mut self, write_len: u64) -> io::Result<()> {
        self.mill();

        let metadata = match fs::metadata(&self.path) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return self.open_new(),
            Err(err) => return Err(err),
        };

        if metadata.len() + write_len >= self.max_size {
            return self.rotate();
        }

        match OpenOptions::new().append(true).open(&self.path) {
            Ok(file) => {
                self.file = Some(file);
                self.size = metadata.len();
                Ok(())
            }
            Err(err) => {
                tracing::debug!(
                    "cannot reopen {}, starting a new file: {}",
                    self.path.display(),
                    err
                );
                self.open_new()
            }
        }
    }

    fn open_new(&mut self) -> io::Result<()> {
        let dir = self.dir().to_path_buf();
        fs::create_dir_all(&dir)?;

        let mut permissions = None;
        if let Ok(metadata) = fs::metadata(&self.path) {
            permissions = Some(metadata.permissions());
            let backup = self.next_backup_path();
            fs::rename(&self.path, &backup)?;
            tracing::debug!("rotated {} to {}", self.path.display(), backup.display());
        }

        let mut options = OpenOptions::new();
        options.create(true).write(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let file = options.open(&self.path)?;
        if let Some(permissions) = permissions {
            file.set_permissions(permissions)?;
        }

        self.file = Some(file);
        self.size = 0;
        Ok(())
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }

    /// File name split into (stem, extension with its dot).
    fn name_parts(&self) -> (String, String) {
        let name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        match self.path.extension() {
            Some(ext) => {
                let ext = format!(".{}", ext.to_string_lossy());
                let stem = name[..name.len() - ext.len()].to_string();
                (stem, ext)
            }
            None => (name, String::new()),
        }
    }

    fn now(&self) -> DateTime<FixedOffset> {
        if self.config.local_time {
            zone::now()
        } else {
            Utc::now().fixed_offset()
        }
    }

    fn next_backup_path(&mut self) -> PathBuf {
        let (stem, ext) = self.name_parts();
        let mut at = self.now();
        if let Some(last) = self.last_backup {
            if at <= last {
                at = last + Duration::milliseconds(1);
            }
        }

        loop {
            let name = format!("{}-{}{}", stem, at.format(BACKUP_TIMESTAMP), ext);
            let candidate = self.dir().join(&name);
            let compressed = self.dir().join(format!("{}{}", name, COMPRESS_SUFFIX));
            if !candidate.exists() && !compressed.exists() {
                self.last_backup = Some(at);
                return candidate;
            }
            at += Duration::milliseconds(1);
        }
    }

    fn parse_backup_time(&self, name: &str, prefix: &str, ext: &str) -> Option<DateTime<Utc>> {
        let name = name.strip_suffix(COMPRESS_SUFFIX).unwrap_or(name);
        let stamp = name.strip_prefix(prefix)?.strip_suffix(ext)?;
        let naive = NaiveDateTime::parse_from_str(stamp, BACKUP_TIMESTAMP).ok()?;
        if self.config.local_time {
            let local = zone::CST.from_local_datetime(&naive).single()?;
            Some(local.with_timezone(&Utc))
        } else {
            Some(Utc.from_utc_datetime(&naive))
        }
    }

    /// Backups of this file, newest first.
    fn backups(&self) -> io::Result<Vec<Backup>> {
        let (stem, ext) = self.name_parts();
        let prefix = format!("{}-", stem);
        let mut backups = Vec::new();

        for entry in fs::read_dir(self.dir())? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if let Some(timestamp) = self.parse_backup_time(name, &prefix, &ext) {
                backups.push(Backup {
                    path: entry.path(),
                    timestamp,
                    compressed: name.ends_with(COMPRESS_SUFFIX),
                });
            }
        }

        backups.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(backups)
    }

    fn mill(&self) {
        if let Err(err) = self.mill_once() {
            tracing::warn!("failed to clean up backups of {}: {}", self.path.display(), err);
        }
    }

    fn mill_once(&self) -> io::Result<()> {
        let config = &self.config;
        if config.max_backups == 0 && config.max_age_days == 0 && !config.compress {
            return Ok(());
        }

        let mut backups = self.backups()?;
        let mut remove = Vec::new();

        if config.max_backups > 0 && config.max_backups < backups.len() {
            let mut preserved = HashSet::new();
            let mut remaining = Vec::new();
            for backup in backups {
                preserved.insert(strip_compress_suffix(&backup.path));
                if preserved.len() > config.max_backups {
                    remove.push(backup);
                } else {
                    remaining.push(backup);
                }
            }
            backups = remaining;
        }

        if config.max_age_days > 0 {
            let days = i64::try_from(config.max_age_days.min(MAX_AGE_DAYS)).unwrap_or(0);
            let cutoff = Utc::now() - Duration::days(days);
            let (expired, kept): (Vec<_>, Vec<_>) =
                backups.into_iter().partition(|backup| backup.timestamp < cutoff);
            remove.extend(expired);
            backups = kept;
        }

        for backup in &remove {
            if let Err(err) = fs::remove_file(&backup.path) {
                tracing::warn!("failed to remove old log {}: {}", backup.path.display(), err);
            }
        }

        if config.compress {
            for backup in backups.iter().filter(|backup| !backup.compressed) {
                if let Err(err) = compress_file(&backup.path) {
                    tracing::warn!("failed to compress {}: {}", backup.path.display(), err);
                }
            }
        }

        Ok(())
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let len = buf.len() as u64;
        if len > self.max_size {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("write length {} exceeds maximum file size {}", len, self.max_size),
            ));
        }

        if self.file.is_none() {
            self.open_existing_or_new(len)?;
        }
        if self.size + len > self.max_size {
            self.rotate()?;
        }

        let file = self
            .file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "log file is not open"))?;
        file.write_all(buf)?;
        self.size += len;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

/// A log file in `dir` that starts a new `<prefix>.YYYY-MM-DD` file each day.
pub fn daily(dir: impl AsRef<Path>, prefix: impl AsRef<Path>) -> RollingFileAppender {
    tracing_appender::rolling::daily(dir, prefix)
}

fn default_path() -> PathBuf {
    let name = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "plog".to_string());
    std::env::temp_dir().join(format!("{}-plog.log", name))
}

fn strip_compress_suffix(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(raw.strip_suffix(COMPRESS_SUFFIX).unwrap_or(&raw))
}

fn compress_file(src: &Path) -> io::Result<()> {
    let mut dst = src.as_os_str().to_owned();
    dst.push(COMPRESS_SUFFIX);
    let dst = PathBuf::from(dst);

    if let Err(err) = gzip_into(src, &dst) {
        let _ = fs::remove_file(&dst);
        return Err(err);
    }
    fs::remove_file(src)
}

fn gzip_into(src: &Path, dst: &Path) -> io::Result<()> {
    let mut input = File::open(src)?;
    let mut encoder = GzEncoder::new(File::create(dst)?, Compression::default());
    io::copy(&mut input, &mut encoder)?;
    encoder.finish()?.sync_all()
}
