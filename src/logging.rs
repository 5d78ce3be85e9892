use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `~/.cache/blog-explorer/blog-explorer.log` (Linux) or the platform equivalent
pub fn log_path() -> Option<PathBuf> {
    let dir = dirs::cache_dir()?.join("blog-explorer");
    fs::create_dir_all(&dir).ok()?;
    Some(dir.join("blog-explorer.log"))
}

fn open_log() -> Option<File> {
    let path = log_path()?;
    OpenOptions::new().create(true).append(true).open(path).ok()
}

/// Install the global subscriber. Output goes to the log file so it never
/// draws over the alternate screen; stderr is used only when no cache
/// directory is available.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    match open_log() {
        Some(file) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init(),
        None => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}
