/// The `charset` parameter of a `Content-Type` header value, if any.
///
/// Transports can use this to decode a listing page before handing it to
/// a repository. Parameter names are case-insensitive and quoted values are
/// unquoted.
pub fn guess_encoding(content_type: Option<&str>) -> Option<String> {
    content_type?
        .split(';')
        .skip(1)
        .filter_map(|param| param.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("charset"))
        .map(|(_, value)| unquote(value.trim()).to_string())
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|value| value.strip_suffix('"'))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn charset_parameter() {
        assert_eq!(
            guess_encoding(Some("text/html; charset=ISO-8859-1")),
            Some("ISO-8859-1".into())
        );
        assert_eq!(
            guess_encoding(Some(r#"text/html;Charset="utf-8" ; level=1"#)),
            Some("utf-8".into())
        );
    }

    #[test]
    fn no_charset() {
        assert_eq!(guess_encoding(Some("text/html")), None);
        assert_eq!(guess_encoding(Some("text/html; level=1")), None);
        assert_eq!(guess_encoding(None), None);
    }
}
