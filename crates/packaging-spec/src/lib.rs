//! Parsing for the small pieces of Python packaging metadata a repository
//! client needs: project names, requirements, and distribution filenames.

use std::fmt;
use std::str::FromStr;

use nom::combinator::all_consuming;
use nom::error::convert_error;
use nom::Err;

pub use pep440_rs::{Version, VersionSpecifiers};

pub use crate::error::{FilenameError, PackageSpecError};
pub use crate::filename::*;
pub use crate::name::*;

mod error;
mod filename;
mod name;
mod parsers;

/// A project name, optionally narrowed by extras and version specifiers,
/// e.g. `pip`, `requests[socks]` or `pip>=9,<10`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub name: String,
    pub extras: Vec<String>,
    pub specifiers: Option<VersionSpecifiers>,
}

impl Requirement {
    /// A requirement for any version of `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Requirement {
            name: name.into(),
            extras: Vec::new(),
            specifiers: None,
        }
    }

    /// The project name in canonical form.
    pub fn canonical_name(&self) -> String {
        canonicalize_name(&self.name)
    }

    /// Whether `name` refers to the same project as this requirement.
    pub fn matches_name(&self, name: impl AsRef<str>) -> bool {
        names_match(&self.name, name)
    }

    /// Whether `version` satisfies this requirement's specifiers. A
    /// requirement without specifiers accepts every version.
    pub fn contains(&self, version: &Version) -> bool {
        self.specifiers
            .as_ref()
            .map_or(true, |specifiers| specifiers.contains(version))
    }
}

impl FromStr for Requirement {
    type Err = PackageSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_requirement(s)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.extras.is_empty() {
            write!(f, "[{}]", self.extras.join(","))?;
        }
        if let Some(specifiers) = &self.specifiers {
            write!(f, "{}", specifiers)?;
        }
        Ok(())
    }
}

/// Parses a requirement string. Environment markers are rejected.
pub fn parse_requirement<I>(input: I) -> Result<Requirement, PackageSpecError>
where
    I: AsRef<str>,
{
    let input = input.as_ref();
    if let Some((_, marker)) = input.split_once(';') {
        return Err(PackageSpecError::UnsupportedMarker {
            input: input.into(),
            marker: marker.trim().into(),
        });
    }
    match all_consuming(parsers::requirement::requirement)(input) {
        Ok((_, requirement)) => Ok(requirement),
        Err(err) => Err(PackageSpecError::ParseError {
            input: input.into(),
            msg: match err {
                Err::Error(e) => convert_error(input, e),
                Err::Failure(e) => convert_error(input, e),
                Err::Incomplete(_) => "More data was needed".into(),
            },
        }),
    }
}
