use std::str::FromStr;

use packaging_spec::{PackageSpecError, Requirement, Version, VersionSpecifiers};
use pretty_assertions::assert_eq;

type Result<T> = std::result::Result<T, PackageSpecError>;

fn parse(input: &str) -> Result<Requirement> {
    input.parse()
}

fn specifiers(input: &str) -> Option<VersionSpecifiers> {
    Some(VersionSpecifiers::from_str(input).unwrap())
}

#[test]
fn bare_name() -> Result<()> {
    let res = parse("pip")?;
    assert_eq!(res, Requirement::new("pip"));
    Ok(())
}

#[test]
fn name_with_separators() -> Result<()> {
    let res = parse("zope.interface")?;
    assert_eq!(res.name, "zope.interface");
    assert_eq!(res.canonical_name(), "zope-interface");
    Ok(())
}

#[test]
fn name_and_specifiers() -> Result<()> {
    let res = parse("pip>=9,<10")?;
    assert_eq!(
        res,
        Requirement {
            name: "pip".into(),
            extras: vec![],
            specifiers: specifiers(">=9,<10"),
        }
    );
    Ok(())
}

#[test]
fn parenthesized_specifiers() -> Result<()> {
    let res = parse("pip (>=9, <10)")?;
    assert_eq!(res.specifiers, specifiers(">=9,<10"));
    Ok(())
}

#[test]
fn extras() -> Result<()> {
    let res = parse("requests[socks, security] ~=2.0")?;
    assert_eq!(res.name, "requests");
    assert_eq!(res.extras, vec!["socks".to_string(), "security".to_string()]);
    assert_eq!(res.specifiers, specifiers("~=2.0"));
    Ok(())
}

#[test]
fn empty_extras() -> Result<()> {
    let res = parse("requests[ ]")?;
    assert!(res.extras.is_empty());
    Ok(())
}

#[test]
fn surrounding_whitespace() -> Result<()> {
    let res = parse("  pip  ")?;
    assert_eq!(res, Requirement::new("pip"));
    Ok(())
}

#[test]
fn display_round_trips() -> Result<()> {
    let res = parse("requests[socks]>=2,<3")?;
    assert_eq!(parse(&res.to_string())?, res);
    Ok(())
}

#[test]
fn contains_checks_specifiers() -> Result<()> {
    let res = parse("pip>=9,<10")?;
    assert!(res.contains(&Version::from_str("9.0.3").unwrap()));
    assert!(!res.contains(&Version::from_str("10.0").unwrap()));
    assert!(Requirement::new("pip").contains(&Version::from_str("0.1").unwrap()));
    Ok(())
}

#[test]
fn matches_equivalent_names() -> Result<()> {
    let res = parse("Typing_Extensions")?;
    assert!(res.matches_name("typing-extensions"));
    assert!(!res.matches_name("typing"));
    Ok(())
}

#[test]
fn rejects_markers() {
    let res = parse("pip>=9; python_version < '3'");
    assert!(matches!(
        res,
        Err(PackageSpecError::UnsupportedMarker { ref marker, .. }) if marker == "python_version < '3'"
    ));
}

#[test]
fn rejects_garbage() {
    assert!(matches!(
        parse("pip >= banana"),
        Err(PackageSpecError::ParseError { .. })
    ));
    assert!(parse("").is_err());
    assert!(parse("-pip").is_err());
    assert!(parse("pip-").is_err());
    assert!(parse("pip[socks").is_err());
}
