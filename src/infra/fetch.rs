//! Source transports: HTTP GET and local file.
//!
//! Transport failures are recoverable by design: they surface as a typed
//! error and a status message, and the caller keeps whatever record set it
//! already had. Nothing here ever panics on a bad server or a bad file.

use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use crate::cli::AppContext;
use crate::infra::config::Config;
use crate::infra::io::read_source;

/// A failure to obtain CSV text from a source.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The server answered with a non-2xx status.
    #[error("source returned HTTP {status}")]
    Status { status: u16 },
    /// The request never produced a response (DNS, TLS, connect, ...).
    #[error("request failed: {0}")]
    Transport(String),
    /// The response arrived but its body could not be read as text.
    #[error("failed to read response body: {0}")]
    Body(#[from] std::io::Error),
    /// Local file read failure.
    #[error("{0:#}")]
    File(anyhow::Error),
}

/// Where the CSV comes from for this invocation.
#[derive(Debug, Clone)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

impl Source {
    /// Resolution order: explicit `--url`, then a positional path, then
    /// the configured url/path. No source anywhere is a hard error.
    pub fn resolve(path: Option<PathBuf>, url: Option<String>, config: &Config) -> Result<Self> {
        if let Some(url) = url {
            return Ok(Self::Url(url));
        }
        if let Some(path) = path {
            let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
            return Ok(Self::File(PathBuf::from(expanded)));
        }
        if let Some(url) = &config.source.url {
            return Ok(Self::Url(url.clone()));
        }
        if let Some(path) = &config.source.path {
            return Ok(Self::File(PathBuf::from(path.clone())));
        }
        bail!("no CSV source given: pass a file path, --url, or set one in stocklens.toml");
    }

    /// Human-readable label for status lines and load tickets.
    pub fn label(&self) -> String {
        match self {
            Self::Url(url) => url.clone(),
            Self::File(path) => path.display().to_string(),
        }
    }

    /// Fetch the CSV text. HTTP fetches show a spinner unless `--quiet`.
    pub fn load(&self, ctx: &AppContext) -> Result<String, TransportError> {
        match self {
            Self::Url(url) => {
                let spinner = (!ctx.quiet).then(|| fetch_spinner(url));
                let result = fetch_url(url);
                if let Some(spinner) = spinner {
                    spinner.finish_and_clear();
                }
                result
            }
            Self::File(path) => read_source(path).map_err(TransportError::File),
        }
    }
}

/// HTTP GET returning the body as text; non-2xx is an error, not text.
pub fn fetch_url(url: &str) -> Result<String, TransportError> {
    debug!(url, "fetching csv source");
    let response = ureq::get(url).call().map_err(|err| match err {
        ureq::Error::Status(status, _) => {
            warn!(url, status, "source returned an error status");
            TransportError::Status { status }
        }
        ureq::Error::Transport(transport) => TransportError::Transport(transport.to_string()),
    })?;

    let mut body = String::new();
    response.into_reader().read_to_string(&mut body)?;
    Ok(body)
}

fn fetch_spinner(url: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Fetching {url}"));
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
