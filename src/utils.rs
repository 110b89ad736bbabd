// checking validity of the long url; the parser strips tabs and newlines
// but the raw string is what ends up in the Location header
pub fn valid_url(url: &str) -> bool {
    !url.chars().any(char::is_control) && url::Url::parse(url).is_ok()
}

// custom codes: 6 to 8 ascii letters or digits
pub fn valid_short_code(code: &str) -> bool {
    (6..=8).contains(&code.len()) && code.chars().all(|c| c.is_ascii_alphanumeric())
}
