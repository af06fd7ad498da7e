use std::str::FromStr;

use nom::branch::alt;
use nom::bytes::complete::{take_till1, take_while, take_while1};
use nom::character::complete::{char, multispace0};
use nom::combinator::{cut, map, map_res, opt, recognize, verify};
use nom::error::{context, VerboseError};
use nom::multi::separated_list0;
use nom::sequence::{delimited, pair, preceded, tuple};
use nom::IResult;
use pep440_rs::{VersionSpecifiers, VersionSpecifiersParseError};

use crate::Requirement;

type Res<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// requirement := name [ extras ] [ specifiers ]
pub(crate) fn requirement(input: &str) -> Res<'_, Requirement> {
    context(
        "requirement",
        map(
            tuple((ws(name), opt(ws(extras)), opt(ws(specifiers)))),
            |(name, extras, specifiers)| Requirement {
                name: name.into(),
                extras: extras.unwrap_or_default(),
                specifiers,
            },
        ),
    )(input)
}

/// name := alnum ( alnum | '-' | '_' | '.' )* alnum
fn name(input: &str) -> Res<'_, &str> {
    context(
        "project name",
        verify(
            recognize(pair(
                take_while1(|c: char| c.is_ascii_alphanumeric()),
                take_while(|c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')),
            )),
            |name: &str| name.ends_with(|c: char| c.is_ascii_alphanumeric()),
        ),
    )(input)
}

/// extras := '[' [ name ( ',' name )* ] ']'
fn extras(input: &str) -> Res<'_, Vec<String>> {
    context(
        "extras",
        delimited(
            char('['),
            separated_list0(char(','), map(ws(name), String::from)),
            cut(preceded(multispace0, char(']'))),
        ),
    )(input)
}

/// specifiers := '(' not(')')+ ')' | not(';')+
fn specifiers(input: &str) -> Res<'_, VersionSpecifiers> {
    context(
        "version specifiers",
        alt((
            delimited(
                char('('),
                map_res(take_till1(|c| c == ')'), parse_specifiers),
                cut(char(')')),
            ),
            map_res(take_till1(|c| c == ';'), parse_specifiers),
        )),
    )(input)
}

fn parse_specifiers(input: &str) -> Result<VersionSpecifiers, VersionSpecifiersParseError> {
    VersionSpecifiers::from_str(input.trim())
}

fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> Res<'a, O>
where
    F: FnMut(&'a str) -> Res<'a, O>,
{
    delimited(multispace0, inner, multispace0)
}
