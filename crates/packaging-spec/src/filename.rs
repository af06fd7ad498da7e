use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use pep440_rs::Version;
use regex::Regex;

use crate::error::FilenameError;
use crate::name::names_match;

/// Extension that selects the wheel filename grammar.
pub const WHEEL_EXTENSION: &str = ".whl";

static EGG_INFO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([a-z0-9_.]+)-([a-z0-9_.!+-]+)").unwrap());

/// Project name and version recovered from a distribution filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactName {
    pub name: String,
    pub version: Version,
}

/// A parsed wheel filename:
/// `{name}-{version}(-{build})?-{python tag}-{abi tag}-{platform tag}.whl`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelFilename {
    pub name: String,
    pub version: Version,
    pub build: Option<String>,
    pub python_tag: String,
    pub abi_tag: String,
    pub platform_tag: String,
}

impl FromStr for WheelFilename {
    type Err = FilenameError;

    fn from_str(filename: &str) -> Result<Self, Self::Err> {
        let parts = filename
            .strip_suffix(WHEEL_EXTENSION)
            .and_then(WheelParts::split)
            .ok_or_else(|| FilenameError::NotAnArtifact(filename.into()))?;
        Ok(WheelFilename {
            name: parts.name.into(),
            version: parse_version(filename, parts.version)?,
            build: parts.build.map(String::from),
            python_tag: parts.python_tag.into(),
            abi_tag: parts.abi_tag.into(),
            platform_tag: parts.platform_tag.into(),
        })
    }
}

impl fmt::Display for WheelFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.name, self.version)?;
        if let Some(build) = &self.build {
            write!(f, "-{}", build)?;
        }
        write!(
            f,
            "-{}-{}-{}{}",
            self.python_tag, self.abi_tag, self.platform_tag, WHEEL_EXTENSION
        )
    }
}

/// Borrowed fields of a wheel filename stem, before version parsing.
struct WheelParts<'a> {
    name: &'a str,
    version: &'a str,
    build: Option<&'a str>,
    python_tag: &'a str,
    abi_tag: &'a str,
    platform_tag: &'a str,
}

impl<'a> WheelParts<'a> {
    /// Name and version are the first two fields. A build tag is only
    /// recognized when it starts with a digit and there are enough fields
    /// left for all three tags; the platform tag takes whatever remains.
    fn split(stem: &'a str) -> Option<Self> {
        let mut fields = stem.splitn(3, '-');
        let name = fields.next().filter(|s| !s.is_empty())?;
        let version = fields.next().filter(|s| !s.is_empty())?;
        let mut tail = fields.next()?;
        let mut build = None;
        if tail.split('-').count() >= 4 && tail.starts_with(|c: char| c.is_ascii_digit()) {
            let (tag, rest) = tail.split_once('-')?;
            build = Some(tag);
            tail = rest;
        }
        let mut tags = tail.splitn(3, '-');
        let python_tag = tags.next().filter(|s| !s.is_empty())?;
        let abi_tag = tags.next().filter(|s| !s.is_empty())?;
        let platform_tag = tags.next().filter(|s| !s.is_empty())?;
        Some(WheelParts {
            name,
            version,
            build,
            python_tag,
            abi_tag,
            platform_tag,
        })
    }
}

/// Recovers a project name and version from a distribution filename.
///
/// Wheels (`.whl`) use the strict wheel grammar; when `expected` is given,
/// the embedded name must be equivalent to it or
/// [`FilenameError::NameMismatch`] is returned. Everything else uses the
/// loose `name-version` grammar of source archives. When `expected` is
/// given, it is returned as the name instead of the spelling found in the
/// filename.
///
/// Without an expected name, the loose grammar splits at the first `-`
/// followed by a digit, falling back to the last `-`. This is a heuristic:
/// `foo-2-2` yields `foo` and `2-2`.
pub fn parse_artifact_name(
    filename: &str,
    expected: Option<&str>,
) -> Result<ArtifactName, FilenameError> {
    let filename = filename
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(filename);
    if filename.ends_with(WHEEL_EXTENSION) {
        parse_wheel_name(filename, expected)
    } else {
        parse_archive_name(filename, expected)
    }
}

fn parse_wheel_name(filename: &str, expected: Option<&str>) -> Result<ArtifactName, FilenameError> {
    let parts = filename
        .strip_suffix(WHEEL_EXTENSION)
        .and_then(WheelParts::split)
        .ok_or_else(|| FilenameError::NotAnArtifact(filename.into()))?;
    let name = match expected {
        Some(expected) if !names_match(expected, parts.name) => {
            return Err(FilenameError::NameMismatch {
                filename: filename.into(),
                expected: expected.into(),
                found: parts.name.into(),
            });
        }
        Some(expected) => expected,
        None => parts.name,
    };
    Ok(ArtifactName {
        name: name.into(),
        version: parse_version(filename, parts.version)?,
    })
}

fn parse_archive_name(
    filename: &str,
    expected: Option<&str>,
) -> Result<ArtifactName, FilenameError> {
    let (stem, _) = split_ext(filename);
    let (name, version) = match expected {
        Some(expected) => (expected, match_egg_info_version(stem, expected)),
        None => match split_egg_info(stem) {
            Some((name, version)) => (name, Some(version)),
            None => ("", None),
        },
    };
    let version = version.ok_or_else(|| FilenameError::NotAnArtifact(filename.into()))?;
    Ok(ArtifactName {
        name: name.into(),
        version: parse_version(filename, version)?,
    })
}

/// Pulls the version out of an egg-info style `name-version` string, given
/// the name of the project it should belong to. Comparison is
/// case-insensitive and treats `_` like `-`.
pub fn match_egg_info_version<'a>(egg_info: &'a str, search_name: &str) -> Option<&'a str> {
    let matched = EGG_INFO_RE.find(egg_info)?.as_str();
    let name = matched.to_ascii_lowercase().replace('_', "-");
    let look_for = format!("{}-", search_name.to_ascii_lowercase().replace('_', "-"));
    if name.starts_with(&look_for) {
        matched.get(look_for.len()..)
    } else {
        None
    }
}

fn split_egg_info(egg_info: &str) -> Option<(&str, &str)> {
    let matched = EGG_INFO_RE.find(egg_info)?.as_str();
    let bytes = matched.as_bytes();
    let sep = (0..bytes.len())
        .find(|&i| bytes[i] == b'-' && bytes.get(i + 1).map_or(false, u8::is_ascii_digit))
        .or_else(|| matched.rfind('-'))?;
    Some((&matched[..sep], &matched[sep + 1..]))
}

/// Like a plain extension split, but keeps `.tar` together with the final
/// extension, so `foo-1.0.tar.gz` splits into `foo-1.0` and `.tar.gz`.
/// Leading dots of the last path component never start an extension.
pub fn split_ext(path: &str) -> (&str, &str) {
    let file_start = path.rfind('/').map_or(0, |i| i + 1);
    let file_name = &path[file_start..];
    let dot = match file_name.rfind('.') {
        Some(i) if file_name[..i].chars().any(|c| c != '.') => file_start + i,
        _ => return (path, ""),
    };
    let (base, ext) = path.split_at(dot);
    match base
        .len()
        .checked_sub(4)
        .and_then(|i| base.get(i..).map(|tail| (i, tail)))
    {
        Some((i, tail)) if tail.eq_ignore_ascii_case(".tar") => path.split_at(i),
        _ => (base, ext),
    }
}

fn parse_version(filename: &str, version: &str) -> Result<Version, FilenameError> {
    version
        .parse()
        .map_err(|_| FilenameError::InvalidVersion {
            filename: filename.into(),
            version: version.into(),
        })
}
