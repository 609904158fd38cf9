use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Maximum log file size before rotation (5 MB)
const MAX_LOG_SIZE: u64 = 5 * 1024 * 1024;
/// Most recent bytes kept after rotation (1 MB)
const KEEP_SIZE: u64 = 1024 * 1024;

/// Trim the log file in place once it outgrows the size cap, keeping only
/// the newest `KEEP_SIZE` bytes and dropping any partial first line.
fn rotate_log_if_needed(log_path: &Path) -> std::io::Result<()> {
    if !log_path.exists() {
        return Ok(());
    }

    let size = fs::metadata(log_path)?.len();
    if size <= MAX_LOG_SIZE {
        return Ok(());
    }

    let mut file = File::open(log_path)?;
    file.seek(SeekFrom::Start(size.saturating_sub(KEEP_SIZE)))?;
    let mut tail = Vec::new();
    file.read_to_end(&mut tail)?;
    drop(file);

    // The seek almost certainly landed mid-line; resume at the next one.
    let first_newline = tail
        .iter()
        .position(|&b| b == b'\n')
        .map_or(0, |i| i + 1);

    let mut file = File::create(log_path)?;
    file.write_all(b"--- Log rotated (older entries removed) ---\n")?;
    file.write_all(&tail[first_newline..])?;
    Ok(())
}

/// Initialize file logging under the data directory.
///
/// Logs go to `{data_dir}/proforma.log` with size-based rotation: past
/// 5 MB the file is trimmed back to its most recent 1 MB. `RUST_LOG`
/// overrides the level given here.
pub fn init_logging(data_dir: &Path, level: &str) -> color_eyre::Result<()> {
    fs::create_dir_all(data_dir)?;
    let log_path = data_dir.join("proforma.log");

    if let Err(e) = rotate_log_if_needed(&log_path) {
        eprintln!("warning: failed to rotate log file: {e}");
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let default_filter = format!("proforma={level},proforma_core=warn");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    tracing::info!("logging initialized (log_path={})", log_path.display());
    Ok(())
}
