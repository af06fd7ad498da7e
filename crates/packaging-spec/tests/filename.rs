use std::str::FromStr;

use packaging_spec::{
    match_egg_info_version, parse_artifact_name, split_ext, ArtifactName, FilenameError, Version,
    WheelFilename,
};
use pretty_assertions::assert_eq;
use test_case::test_case;

fn artifact(name: &str, version: &str) -> ArtifactName {
    ArtifactName {
        name: name.into(),
        version: Version::from_str(version).unwrap(),
    }
}

#[test_case("Jinja2-2.10-py2.py3-none-any.whl", "Jinja2", "2.10"; "universal wheel")]
#[test_case("numpy-1.26.4-cp312-cp312-manylinux_2_17_x86_64.whl", "numpy", "1.26.4"; "platform wheel")]
#[test_case("foo-1.0-1-py3-none-any.whl", "foo", "1.0"; "build tag")]
#[test_case("some/dir/pip-9.0.1-py2.py3-none-any.whl", "pip", "9.0.1"; "with directory")]
fn wheel_without_expected_name(filename: &str, name: &str, version: &str) {
    assert_eq!(
        parse_artifact_name(filename, None).unwrap(),
        artifact(name, version)
    );
}

#[test_case("jinja2"; "lowercase")]
#[test_case("JINJA2"; "uppercase")]
#[test_case("Jinja_2"; "extra separator is not equivalent")]
fn wheel_with_expected_name(expected: &str) {
    let res = parse_artifact_name("Jinja2-2.10-py2.py3-none-any.whl", Some(expected));
    if expected == "Jinja_2" {
        assert!(res.unwrap_err().is_name_mismatch());
    } else {
        assert_eq!(res.unwrap(), artifact(expected, "2.10"));
    }
}

#[test]
fn wheel_separator_variants_are_equivalent() {
    let res = parse_artifact_name(
        "typing_extensions-4.9.0-py3-none-any.whl",
        Some("Typing.Extensions"),
    );
    assert_eq!(res.unwrap(), artifact("Typing.Extensions", "4.9.0"));
}

#[test]
fn wheel_name_mismatch_is_distinct() {
    let err = parse_artifact_name("pip-9.0.1-py2.py3-none-any.whl", Some("setuptools")).unwrap_err();
    assert_eq!(
        err,
        FilenameError::NameMismatch {
            filename: "pip-9.0.1-py2.py3-none-any.whl".into(),
            expected: "setuptools".into(),
            found: "pip".into(),
        }
    );
}

#[test_case("pip-9.0.1.whl"; "missing tags")]
#[test_case("pip-9.0.1-py3-none.whl"; "missing platform")]
fn malformed_wheels_are_not_artifacts(filename: &str) {
    assert_eq!(
        parse_artifact_name(filename, None),
        Err(FilenameError::NotAnArtifact(filename.into()))
    );
}

#[test]
fn wheel_with_invalid_version() {
    let res = parse_artifact_name("pip-banana-py3-none-any.whl", None);
    assert!(matches!(res, Err(FilenameError::InvalidVersion { .. })));
}

#[test]
fn wheel_filename_fields() {
    let wheel = WheelFilename::from_str("foo_bar-2.0-3-cp311-abi3-linux_x86_64.whl").unwrap();
    assert_eq!(wheel.name, "foo_bar");
    assert_eq!(wheel.version, Version::from_str("2.0").unwrap());
    assert_eq!(wheel.build.as_deref(), Some("3"));
    assert_eq!(wheel.python_tag, "cp311");
    assert_eq!(wheel.abi_tag, "abi3");
    assert_eq!(wheel.platform_tag, "linux_x86_64");
    assert_eq!(
        wheel.to_string(),
        "foo_bar-2.0-3-cp311-abi3-linux_x86_64.whl"
    );
}

#[test_case("pip-9.0.1.tar.gz", "pip", "9.0.1"; "tarball")]
#[test_case("Django-4.2.zip", "Django", "4.2"; "zip")]
#[test_case("foo-bar-1.0.tgz", "foo-bar", "1.0"; "dashed name")]
#[test_case("foo-2-2.tar.bz2", "foo", "2-2"; "ambiguous split")]
fn archive_without_expected_name(filename: &str, name: &str, version: &str) {
    assert_eq!(
        parse_artifact_name(filename, None).unwrap(),
        artifact(name, version)
    );
}

#[test]
fn archive_with_expected_name() {
    assert_eq!(
        parse_artifact_name("foo_bar-1.0.tar.gz", Some("Foo-Bar")).unwrap(),
        artifact("Foo-Bar", "1.0")
    );
    assert_eq!(
        parse_artifact_name("foo-2-2.tar.gz", Some("foo-2")).unwrap(),
        artifact("foo-2", "2")
    );
}

#[test]
fn archive_for_another_project() {
    assert_eq!(
        parse_artifact_name("pip-9.0.1.tar.gz", Some("jinja2")),
        Err(FilenameError::NotAnArtifact("pip-9.0.1.tar.gz".into()))
    );
}

#[test_case("Download here!"; "prose")]
#[test_case("README"; "no separator")]
fn noise_is_not_an_artifact(filename: &str) {
    assert!(matches!(
        parse_artifact_name(filename, None),
        Err(FilenameError::NotAnArtifact(_))
    ));
}

#[test]
fn egg_info_version() {
    assert_eq!(match_egg_info_version("foo-2.1", "foo"), Some("2.1"));
    assert_eq!(match_egg_info_version("Foo_Bar-2.1", "foo-bar"), Some("2.1"));
    assert_eq!(match_egg_info_version("foo-2.1", "bar"), None);
    assert_eq!(match_egg_info_version("foo", "foo"), None);
}

#[test_case("foo-1.0.tar.gz", "foo-1.0", ".tar.gz"; "tar gz")]
#[test_case("foo-1.0.TAR.bz2", "foo-1.0", ".TAR.bz2"; "uppercase tar")]
#[test_case("foo-1.0.zip", "foo-1.0", ".zip"; "zip")]
#[test_case("dir.d/foo", "dir.d/foo", ""; "dot in directory")]
#[test_case(".bashrc", ".bashrc", ""; "hidden file")]
fn splits_extensions(path: &str, base: &str, ext: &str) {
    assert_eq!(split_ext(path), (base, ext));
}
