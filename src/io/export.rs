//! Spreadsheet export side channel.
//!
//! The default handler issues a GET to the configured endpoint with the
//! current grid query plus a `fields` parameter, reads the filename from
//! `Content-Disposition` and saves the body to the download directory.
//! Hosts can replace it with their own callback.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_DISPOSITION;
use tracing::{debug, info};
use url::Url;

use crate::domain::query_codec::export_query;
use crate::error::{GridError, Result};

/// Filename used when the response does not name one.
pub const DEFAULT_EXPORT_FILENAME: &str = "export.xlsx";

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

static FILENAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"filename="([^"]+)""#).expect("filename pattern is valid"));

/// What to export: the grid query at the time of the click and the visible
/// column fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub query: String,
    pub fields: Vec<String>,
}

/// Result of a finished export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    /// Where the file was saved, if the handler saved one.
    pub saved_to: Option<PathBuf>,
}

/// Host-provided export callback.
pub type ExportCallback = Arc<dyn Fn(&ExportRequest) -> anyhow::Result<()> + Send + Sync>;

/// How the toolbar's export button is served.
#[derive(Clone)]
pub enum ExportHandler {
    Http(HttpExporter),
    Custom(ExportCallback),
}

impl ExportHandler {
    pub fn custom(callback: impl Fn(&ExportRequest) -> anyhow::Result<()> + Send + Sync + 'static) -> Self {
        ExportHandler::Custom(Arc::new(callback))
    }

    /// Runs the export to completion. Blocking; call from a worker thread.
    pub fn run(&self, request: &ExportRequest) -> Result<ExportOutcome> {
        match self {
            ExportHandler::Http(exporter) => exporter.export(request),
            ExportHandler::Custom(callback) => {
                callback(request).map_err(|e| GridError::ExportHandler(format!("{:#}", e)))?;
                Ok(ExportOutcome { saved_to: None })
            }
        }
    }
}

impl fmt::Debug for ExportHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportHandler::Http(exporter) => f.debug_tuple("Http").field(exporter).finish(),
            ExportHandler::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Extracts `filename="..."` from a `Content-Disposition` header value.
///
/// Falls back to `export.xlsx` when the header is missing or malformed.
pub fn filename_from_disposition(header: Option<&str>) -> String {
    header
        .and_then(|value| FILENAME_RE.captures(value))
        .and_then(|caps| caps.get(1))
        .map(|m| sanitize_filename(m.as_str()))
        .unwrap_or_else(|| DEFAULT_EXPORT_FILENAME.to_string())
}

/// Keeps only the final path component so a server-supplied name cannot
/// escape the download directory.
pub fn sanitize_filename(name: &str) -> String {
    let normalized = name.replace('\\', "/");
    Path::new(&normalized)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_EXPORT_FILENAME.to_string())
}

/// Default export over HTTP.
#[derive(Debug, Clone)]
pub struct HttpExporter {
    base_url: Url,
    target_dir: Option<PathBuf>,
}

impl HttpExporter {
    /// Creates an exporter for an absolute endpoint URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(GridError::InvalidExportUrl(base_url.to_string()));
        }
        Ok(Self { base_url, target_dir: None })
    }

    /// Saves into `dir` instead of the user's download directory.
    pub fn with_target_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.target_dir = Some(dir.into());
        self
    }

    /// Full request URL: endpoint query, then grid query, then `fields`.
    pub fn request_url(&self, request: &ExportRequest) -> Url {
        let combined = match self.base_url.query() {
            Some(base) if !base.is_empty() => format!("{}&{}", base, request.query),
            _ => request.query.clone(),
        };
        let mut url = self.base_url.clone();
        url.set_query(Some(&export_query(&combined, &request.fields)));
        url
    }

    /// Directory exports are written to.
    pub fn target_dir(&self) -> PathBuf {
        self.target_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(std::env::temp_dir)
    }

    /// Downloads the spreadsheet.
    ///
    /// # Returns
    /// The filename announced by the server and the response body.
    pub fn download(&self, request: &ExportRequest) -> Result<(String, Vec<u8>)> {
        let url = self.request_url(request);
        debug!(%url, "export request");

        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let response = client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(GridError::ExportStatus { status: status.as_u16() });
        }

        let disposition = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let filename = filename_from_disposition(disposition.as_deref());
        let body = response.bytes()?.to_vec();
        Ok((filename, body))
    }

    /// Writes an export into the target directory.
    pub fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        let dir = self.target_dir();
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(sanitize_filename(filename));
        std::fs::write(&path, bytes)?;
        Ok(path)
    }

    /// Downloads and saves.
    pub fn export(&self, request: &ExportRequest) -> Result<ExportOutcome> {
        let (filename, bytes) = self.download(request)?;
        let path = self.save(&filename, &bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "export saved");
        Ok(ExportOutcome { saved_to: Some(path) })
    }
}
