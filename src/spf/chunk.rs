//! Packing terms into TXT character-strings.

use log::debug;

use crate::config::{SPF_VERSION, TXT_MAX_LEN};
use crate::error_handling::SquashError;

use super::dedup::SquashedPolicy;

/// Greedily packs `terms` into character-strings of at most `max_len` bytes.
///
/// The first chunk starts with `v=spf1`. Each following chunk starts with a
/// single space and is meant to be published as an additional
/// character-string of the same TXT record, so that the concatenated strings
/// read as one space-separated policy. Terms are never split.
///
/// # Errors
///
/// Returns `SquashError::TermTooLong` if a term does not fit even in an empty
/// continuation chunk.
pub fn chunk_terms<S: AsRef<str>>(terms: &[S], max_len: usize) -> Result<Vec<String>, SquashError> {
    let mut chunks = Vec::new();
    let mut current = String::from(SPF_VERSION);

    for term in terms {
        let term = term.as_ref();
        if term.len() + 1 > max_len {
            return Err(SquashError::TermTooLong {
                term: term.to_string(),
                len: term.len(),
                max: max_len,
            });
        }

        if current.len() + 1 + term.len() <= max_len {
            current.push(' ');
            current.push_str(term);
        } else {
            debug!("Creating record with len {}: \"{}\"", current.len(), current);
            chunks.push(std::mem::replace(&mut current, format!(" {term}")));
        }
    }

    debug!("Creating record with len {}: \"{}\"", current.len(), current);
    chunks.push(current);
    Ok(chunks)
}

/// Assembles the squashed policy into 255-byte TXT character-strings.
pub fn spf_record(policy: &SquashedPolicy) -> Result<Vec<String>, SquashError> {
    chunk_terms(&policy.to_terms(), TXT_MAX_LEN)
}

/// Renders chunks as zone-file RDATA: each chunk double-quoted, space separated.
pub fn to_zone_rdata<S: AsRef<str>>(chunks: &[S]) -> String {
    chunks
        .iter()
        .map(|chunk| format!("\"{}\"", chunk.as_ref()))
        .collect::<Vec<String>>()
        .join(" ")
}
