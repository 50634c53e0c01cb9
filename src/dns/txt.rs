//! TXT record reassembly and SPF detection.

use crate::config::SPF_VERSION;

/// Joins the character-strings of one TXT RR into a single logical string.
///
/// Follows RFC 4408 §3.1.3: adjacent character-strings concatenate with no
/// separator. The input is the presentation form (`"v=spf1 " "ip4:..." "~all"`):
/// the contents of each quoted segment are concatenated, `\"` and `\\`
/// escapes are undone, and whitespace runs collapse to one space.
///
/// Malformed quoting is returned unchanged: input not wrapped in double
/// quotes, text between segments, an unterminated segment or a dangling
/// backslash.
///
/// # Examples
///
/// ```
/// use spf_squash::dns::join_txt_strings;
///
/// assert_eq!(
///     join_txt_strings("\"v=spf1 \" \"include:_spf.example.com \" \"~all\""),
///     "v=spf1 include:_spf.example.com ~all"
/// );
/// ```
pub fn join_txt_strings(txt: &str) -> String {
    let trimmed = txt.trim();
    if trimmed.len() < 2 || !trimmed.starts_with('"') || !trimmed.ends_with('"') {
        return txt.to_string();
    }

    match concat_segments(trimmed) {
        Some(joined) => joined.split_whitespace().collect::<Vec<&str>>().join(" "),
        None => txt.to_string(),
    }
}

/// Concatenates the contents of quoted segments separated only by whitespace.
///
/// Returns `None` for text outside a segment, an unterminated segment or a
/// dangling backslash.
fn concat_segments(rdata: &str) -> Option<String> {
    let mut joined = String::with_capacity(rdata.len());
    let mut in_segment = false;
    let mut chars = rdata.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => in_segment = !in_segment,
            '\\' if in_segment => joined.push(chars.next()?),
            c if in_segment => joined.push(c),
            c if c.is_whitespace() => {}
            _ => return None,
        }
    }
    if in_segment {
        return None;
    }
    Some(joined)
}

/// Returns true when `txt` is an SPF version 1 record.
///
/// The version token is matched case-insensitively and must be followed by a
/// space or the end of the string, so `v=spf10` is not SPF.
pub fn is_spf_record(txt: &str) -> bool {
    let trimmed = txt.trim_start();
    match trimmed.get(..SPF_VERSION.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(SPF_VERSION) => {
            let rest = &trimmed[SPF_VERSION.len()..];
            rest.is_empty() || rest.starts_with(char::is_whitespace)
        }
        _ => false,
    }
}
