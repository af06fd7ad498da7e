use std::fmt;
use std::path::{Component, Path, PathBuf};

use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex::Regex;
use url::Url;

// Two characters at least: a single letter before `:` is a drive letter.
static SCHEME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]+:").unwrap());

/// Where something lives: a path on the local filesystem, or a remote
/// address.
///
/// The distinction decides how a caller should read it, e.g. with an HTTP
/// client or directly from disk. Local paths are always absolute and
/// lexically normalized. Remote addresses never carry a fragment, and are
/// kept in URL-serialized form when they parse as a URL, or verbatim when
/// they don't.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    Local(PathBuf),
    Remote(String),
}

impl Location {
    /// Interprets a configuration string or resolved link.
    ///
    /// Strings without a scheme, or with a single-letter one (a Windows
    /// drive letter), are paths. `file:` URLs are decoded into paths,
    /// keeping a host as a UNC prefix. Everything else is remote, stripped
    /// of its fragment, even when it is not a well-formed URL.
    pub fn from_external(address: &str) -> Self {
        let scheme = match SCHEME_RE.find(address) {
            Some(scheme) => scheme.as_str(),
            None => return Self::from_path(address),
        };
        if scheme.eq_ignore_ascii_case("file:") {
            return match Url::parse(address) {
                Ok(url) => Self::from_file_url(&url),
                Err(_) => {
                    let path = address[scheme.len()..].trim_start_matches('/');
                    Self::from_path(format!("/{}", percent_decode_str(path).decode_utf8_lossy()))
                }
            };
        }
        match Url::parse(address) {
            Ok(mut url) => {
                url.set_fragment(None);
                Location::Remote(url.into())
            }
            Err(_) => {
                let defragged = address.split('#').next().unwrap_or(address);
                Location::Remote(defragged.into())
            }
        }
    }

    /// Wraps a filesystem path, making it absolute against the current
    /// directory and resolving `.` and `..` components.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Location::Local(normalize_path(path.as_ref()))
    }

    /// The address form of this location: the remote address itself, or a
    /// `file:` URL for local paths.
    pub fn to_external(&self) -> String {
        match self {
            Location::Remote(address) => address.clone(),
            Location::Local(path) => Url::from_file_path(path)
                .map(String::from)
                .unwrap_or_else(|()| format!("file:{}", path.display())),
        }
    }

    /// [`Location::to_external`], parsed into a [`Url`]. Fails for remote
    /// addresses that are not well-formed URLs.
    pub fn to_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.to_external())
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Location::Local(_))
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Location::Local(path) => Some(path),
            Location::Remote(_) => None,
        }
    }

    pub fn as_remote(&self) -> Option<&str> {
        match self {
            Location::Remote(address) => Some(address),
            Location::Local(_) => None,
        }
    }

    /// Appends a directory segment, keeping the trailing separator on
    /// remote addresses so relative links resolve inside it.
    pub(crate) fn join_dir(&self, segment: &str) -> Location {
        match self {
            Location::Local(path) => Location::Local(path.join(segment)),
            Location::Remote(address) => match Url::parse(address) {
                Ok(mut url) => {
                    if let Ok(mut segments) = url.path_segments_mut() {
                        segments.pop_if_empty().push(segment).push("");
                    }
                    Location::Remote(url.into())
                }
                Err(_) => Location::Remote(format!("{}/{}/", address.trim_end_matches('/'), segment)),
            },
        }
    }

    fn from_file_url(url: &Url) -> Self {
        if let Ok(path) = url.to_file_path() {
            return Self::from_path(path);
        }
        let path = percent_decode_str(url.path()).decode_utf8_lossy();
        match url.host_str() {
            Some(host) if !host.is_empty() => {
                Location::Local(PathBuf::from(format!(r"\\{}{}", host, path)))
            }
            _ => Self::from_path(path.as_ref()),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Local(path) => write!(f, "{}", path.display()),
            Location::Remote(address) => write!(f, "{}", address),
        }
    }
}

impl From<Url> for Location {
    fn from(url: Url) -> Self {
        Location::from_external(url.as_str())
    }
}

impl From<&Path> for Location {
    fn from(path: &Path) -> Self {
        Location::from_path(path)
    }
}

fn normalize_path(path: &Path) -> PathBuf {
    let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}
