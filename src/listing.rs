use std::path::Path;

use packaging_spec::{parse_artifact_name, ArtifactName};
use tracing::trace;

use crate::entry::{Entry, Hashes, RequiresPython, SkipReason};
use crate::location::Location;

/// Turns the files of a directory into entries, skipping anything that is
/// not a distribution. `names` may be relative to `dir` or absolute. Output
/// keeps input order.
pub fn list_from_paths<P: AsRef<Path>>(dir: &Path, names: &[P]) -> Vec<Entry> {
    scan_paths(dir, names)
        .filter_map(|parsed| {
            parsed
                .map_err(|reason| trace!(%reason, "skipping file"))
                .ok()
        })
        .collect()
}

/// Like [`list_from_paths`], but reports skipped files and why.
pub fn scan_paths<'a, P: AsRef<Path>>(
    dir: &'a Path,
    names: &'a [P],
) -> impl Iterator<Item = Result<Entry, SkipReason>> + 'a {
    names.iter().map(move |name| -> Result<Entry, SkipReason> {
        let path = dir.join(name);
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();
        let ArtifactName { name, version } = parse_artifact_name(&filename, None)?;
        Ok(Entry {
            name,
            version,
            location: Location::from_path(&path),
            hashes: Hashes::new(),
            requires_python: RequiresPython::any(),
            gpg_sig: String::new(),
        })
    })
}
