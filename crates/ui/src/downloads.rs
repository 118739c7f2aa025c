//! Download interception and bookkeeping.
//!
//! Every download the engine starts goes through [`DownloadResolver`], which
//! picks a file name in the download directory that does not exist yet:
//! `image.png`, then `image_1.png`, `image_2.png` and so on.

use std::path::{Path, PathBuf};
use std::time::Instant;

use common::{ShellError, ShellResult};
use url::Url;

/// File name used when the URL has no usable last segment.
pub const FALLBACK_FILE_NAME: &str = "download";

/// Derive a file name from the last path segment of a URL.
///
/// Query strings and fragments are ignored, percent-escapes are decoded and
/// path separators in the decoded name are replaced.
pub fn file_name_from_url(url: &str) -> String {
    let segment = match Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .map(str::to_string),
        Err(_) => url
            .split(['?', '#'])
            .next()
            .and_then(|path| path.rsplit('/').next())
            .map(str::to_string),
    };

    let name = segment
        .map(|segment| {
            urlencoding::decode(&segment)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| segment.clone())
        })
        .unwrap_or_default()
        .replace(['/', '\\'], "_");

    match name.trim() {
        "" | "." | ".." => FALLBACK_FILE_NAME.to_string(),
        _ => name,
    }
}

/// Build the `n`th alternative of `file_name`: `base_n.ext`.
fn numbered(file_name: &str, n: u64) -> String {
    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string());

    match path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, n, ext.to_string_lossy()),
        None => format!("{}_{}", stem, n),
    }
}

/// A path that cannot be checked counts as taken.
fn is_taken(path: &Path) -> bool {
    path.try_exists().unwrap_or(true)
}

/// A download request raised by the engine.
#[derive(Clone, Debug)]
pub struct DownloadRequest {
    url: String,
    directory: Option<PathBuf>,
    file_name: Option<String>,
    accepted: bool,
}

impl DownloadRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            directory: None,
            file_name: None,
            accepted: false,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn set_file_name(&mut self, file_name: impl Into<String>) {
        self.file_name = Some(file_name.into());
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    pub fn set_directory(&mut self, directory: impl Into<PathBuf>) {
        self.directory = Some(directory.into());
    }

    /// Full destination path, once both directory and file name are set.
    pub fn destination(&self) -> Option<PathBuf> {
        match (&self.directory, &self.file_name) {
            (Some(dir), Some(name)) => Some(dir.join(name)),
            _ => None,
        }
    }

    pub fn accept(&mut self) {
        self.accepted = true;
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }
}

/// Chooses collision-free destination names in the download directory.
#[derive(Clone, Debug)]
pub struct DownloadResolver {
    directory: PathBuf,
    /// Maximum number of numbered alternatives to try. `None` probes until a
    /// free name is found.
    max_probes: Option<u32>,
}

impl DownloadResolver {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            max_probes: None,
        }
    }

    /// Limit the number of numbered alternatives.
    pub fn with_max_probes(mut self, max_probes: Option<u32>) -> Self {
        self.max_probes = max_probes;
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn max_probes(&self) -> Option<u32> {
        self.max_probes
    }

    /// Pick a file name for a download of `url` that does not exist yet.
    pub fn resolve(&self, url: &str) -> ShellResult<String> {
        let file_name = file_name_from_url(url);
        if !is_taken(&self.directory.join(&file_name)) {
            return Ok(file_name);
        }

        let mut n: u64 = 1;
        loop {
            if self.max_probes.is_some_and(|max| n > u64::from(max)) {
                return Err(ShellError::download(format!(
                    "no free name for {} in {} after {} attempts",
                    file_name,
                    self.directory.display(),
                    n - 1
                )));
            }

            let candidate = numbered(&file_name, n);
            if !is_taken(&self.directory.join(&candidate)) {
                return Ok(candidate);
            }
            n += 1;
        }
    }

    /// Resolve, assign and accept a download request.
    ///
    /// Returns the destination path.
    pub fn handle(&self, request: &mut DownloadRequest) -> ShellResult<PathBuf> {
        let file_name = self.resolve(request.url())?;
        let destination = self.directory.join(&file_name);

        request.set_directory(&self.directory);
        request.set_file_name(file_name.as_str());
        request.accept();

        tracing::info!("Downloading: {} → {}", file_name, self.directory.display());
        Ok(destination)
    }
}

/// Download manager.
pub struct DownloadManager {
    downloads: Vec<Download>,
    id_counter: u64,
}

impl DownloadManager {
    pub fn new() -> Self {
        Self {
            downloads: Vec::new(),
            id_counter: 0,
        }
    }

    /// Record an accepted download.
    pub fn start(&mut self, request: &DownloadRequest) -> u64 {
        self.id_counter += 1;
        let id = self.id_counter;

        let download = Download {
            id,
            url: request.url().to_string(),
            file_name: request.file_name().unwrap_or(FALLBACK_FILE_NAME).to_string(),
            path: request.destination(),
            state: DownloadState::InProgress,
            start_time: Instant::now(),
            end_time: None,
        };

        self.downloads.push(download);
        id
    }

    /// Record the outcome reported by the engine.
    ///
    /// The download is matched by destination when the engine reports one,
    /// otherwise by the oldest in-progress download of `url`.
    pub fn finish(&mut self, url: &str, path: Option<PathBuf>, success: bool) -> Option<&Download> {
        let in_progress = |d: &Download| d.state == DownloadState::InProgress;
        let by_path = path.as_deref().and_then(|path| {
            self.downloads
                .iter()
                .position(|d| in_progress(d) && d.path.as_deref() == Some(path))
        });
        let index = by_path.or_else(|| {
            self.downloads
                .iter()
                .position(|d| in_progress(d) && d.url == url)
        })?;
        let download = &mut self.downloads[index];

        download.state = if success {
            DownloadState::Complete
        } else {
            DownloadState::Failed
        };
        download.end_time = Some(Instant::now());
        if path.is_some() {
            download.path = path;
        }

        Some(&*download)
    }

    pub fn get(&self, id: u64) -> Option<&Download> {
        self.downloads.iter().find(|d| d.id == id)
    }

    pub fn all(&self) -> &[Download] {
        &self.downloads
    }

    pub fn in_progress_count(&self) -> usize {
        self.downloads
            .iter()
            .filter(|d| d.state == DownloadState::InProgress)
            .count()
    }
}

impl Default for DownloadManager {
    fn default() -> Self {
        Self::new()
    }
}

/// A download.
#[derive(Clone, Debug)]
pub struct Download {
    pub id: u64,
    pub url: String,
    pub file_name: String,
    pub path: Option<PathBuf>,
    pub state: DownloadState,
    pub start_time: Instant,
    pub end_time: Option<Instant>,
}

/// Download state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DownloadState {
    InProgress,
    Complete,
    Failed,
}
