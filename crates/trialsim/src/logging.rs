use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Maximum log file size before rotation (5 MB)
const MAX_LOG_SIZE: u64 = 5 * 1024 * 1024;
/// Size to keep after rotation (1 MB of most recent logs)
const KEEP_SIZE: u64 = 1024 * 1024;

pub(crate) const ROTATION_MARKER: &[u8] = b"--- Log rotated (older entries removed) ---\n";

/// Size-based trimming policy for a log file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LogRotation {
    pub max_size: u64,
    pub keep_size: u64,
}

impl Default for LogRotation {
    fn default() -> Self {
        Self {
            max_size: MAX_LOG_SIZE,
            keep_size: KEEP_SIZE,
        }
    }
}

impl LogRotation {
    /// Trim `log_path` to its most recent whole lines once it grows past
    /// `max_size`. Returns whether the file was rewritten.
    ///
    /// The trimmed content is written next to the log and renamed over it, so
    /// an interrupted rotation leaves the old log in place.
    pub(crate) fn apply(&self, log_path: &Path) -> io::Result<bool> {
        let len = match fs::metadata(log_path) {
            Ok(metadata) => metadata.len(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e),
        };
        if len <= self.max_size {
            return Ok(false);
        }

        let tail = read_whole_lines_from(log_path, len.saturating_sub(self.keep_size))?;

        let staging = log_path.with_extension("rotating");
        {
            let mut out = BufWriter::new(File::create(&staging)?);
            out.write_all(ROTATION_MARKER)?;
            out.write_all(&tail)?;
            out.flush()?;
        }
        fs::rename(&staging, log_path)?;
        Ok(true)
    }
}

/// Read from `offset` to the end, dropping a partial first line.
fn read_whole_lines_from(path: &Path, offset: u64) -> io::Result<Vec<u8>> {
    if offset == 0 {
        return fs::read(path);
    }

    // Start one byte early: a newline there means `offset` already begins a line
    let mut file = File::open(path)?;
    file.seek(SeekFrom::Start(offset - 1))?;
    let mut tail = Vec::new();
    file.read_to_end(&mut tail)?;

    let line_start = tail
        .iter()
        .position(|&b| b == b'\n')
        .map_or(tail.len(), |i| i + 1);
    tail.drain(..line_start);
    Ok(tail)
}

/// A writer factory that produces writers for the shared log file
#[derive(Clone)]
struct LogWriterFactory {
    file: Arc<Mutex<File>>,
}

impl LogWriterFactory {
    fn new(file: File) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
        }
    }
}

struct LogWriter {
    file: Arc<Mutex<File>>,
}

impl LogWriter {
    fn with_file<T>(&self, f: impl FnOnce(&mut File) -> io::Result<T>) -> io::Result<T> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        f(&mut file)
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.with_file(|file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.with_file(|file| file.flush())
    }
}

impl<'a> MakeWriter<'a> for LogWriterFactory {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            file: self.file.clone(),
        }
    }
}

fn open_log_file(log_path: &Path) -> color_eyre::Result<LogWriterFactory> {
    if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    if let Err(e) = LogRotation::default().apply(log_path) {
        eprintln!("Warning: Failed to rotate log file: {}", e);
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;
    Ok(LogWriterFactory::new(file))
}

/// Default filter directive for the given level
pub(crate) fn default_filter(level: &str) -> String {
    format!("trialsim={level},trialsim_core={level}")
}

/// Initialize logging.
///
/// Events go to stderr, or to `log_file` when one is given. A log file above
/// 5MB is trimmed to its last 1MB before it is opened. `RUST_LOG` takes
/// precedence over `level`.
pub fn init_logging(level: &str, log_file: Option<&Path>) -> color_eyre::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    let file_layer = match log_file {
        Some(path) => Some(
            fmt::layer()
                .with_writer(open_log_file(path)?)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false),
        ),
        None => None,
    };
    let stderr_layer = log_file
        .is_none()
        .then(|| fmt::layer().with_writer(io::stderr).with_target(false));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()?;

    match log_file {
        Some(path) => tracing::info!("Logging initialized (log_path={})", path.display()),
        None => tracing::debug!("Logging initialized on stderr"),
    }
    Ok(())
}
