use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use packaging_spec::FilenameError;
use pep440_rs::{Version, VersionSpecifiers, VersionSpecifiersParseError};
use thiserror::Error;

use crate::location::Location;

/// Advertised digests of an artifact, keyed by algorithm name.
pub type Hashes = BTreeMap<String, String>;

/// A downloadable thing in a repository: an anchor tag in an HTML listing,
/// or a file in a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Name of the project, as spelled by the page or filename. Compare it
    /// with [`packaging_spec::names_match`], not `==`.
    pub name: String,
    pub version: Version,
    /// Where to get the file. Never carries a fragment.
    pub location: Location,
    pub hashes: Hashes,
    pub requires_python: RequiresPython,
    /// Empty when the listing does not advertise a signature.
    pub gpg_sig: String,
}

/// The Python versions an artifact supports. The default is unrestricted
/// and contains every version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiresPython(Option<VersionSpecifiers>);

impl RequiresPython {
    pub fn any() -> Self {
        RequiresPython(None)
    }

    pub fn new(specifiers: VersionSpecifiers) -> Self {
        RequiresPython(Some(specifiers))
    }

    pub fn specifiers(&self) -> Option<&VersionSpecifiers> {
        self.0.as_ref()
    }

    pub fn is_unrestricted(&self) -> bool {
        self.0.is_none()
    }

    pub fn contains(&self, version: &Version) -> bool {
        self.0
            .as_ref()
            .map_or(true, |specifiers| specifiers.contains(version))
    }
}

impl FromStr for RequiresPython {
    type Err = VersionSpecifiersParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            Ok(RequiresPython::any())
        } else {
            Ok(RequiresPython::new(s.parse()?))
        }
    }
}

impl fmt::Display for RequiresPython {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(specifiers) => write!(f, "{}", specifiers),
            None => Ok(()),
        }
    }
}

/// Why a link or file did not become an [`Entry`]. These are routine on
/// real-world listings and are skipped, not reported as errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("link has no href")]
    MissingHref,

    #[error("cannot resolve `{href}` against `{base}`")]
    InvalidUrl { href: String, base: String },

    #[error(transparent)]
    Filename(#[from] FilenameError),
}
