/// Pull the token out of an `Authorization` header value.
///
/// Returns `None` ("no credential supplied", not an error) unless the
/// value is exactly two whitespace-separated tokens with a case-insensitive
/// `bearer` scheme. Public endpoints proceed anonymously on `None`.
pub fn parse(header: Option<&str>) -> Option<&str> {
    let mut parts = header?.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token)
}
