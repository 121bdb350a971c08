/// Removes a surrounding markdown code fence (```` ``` ```` or ```` ```json ````)
/// from a model reply and trims the result.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut body = raw.trim_start();
    if let Some(rest) = body.strip_prefix("```") {
        body = match rest.get(..4) {
            Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
            _ => rest,
        };
    }
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}
