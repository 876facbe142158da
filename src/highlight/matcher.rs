//! Matching tokens against the dictionary and rebuilding the node text
//!
//! Walks the source text once with a cursor, locating each token in the
//! unconsumed suffix with plain substring search. Everything between hits
//! is gathered into literal runs, so the segments always add back up to
//! the source text.

use crate::models::{Dictionary, Segment};

/// Build the segment sequence for `text`
///
/// Returns an empty vector when no token is in the dictionary; the caller
/// must then leave the text node alone.
pub fn build_segments<S: AsRef<str>>(text: &str, tokens: &[S], dictionary: &Dictionary) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = text;

    for token in tokens {
        let token = token.as_ref();
        if token.is_empty() {
            continue;
        }

        let Some(pos) = rest.find(token) else {
            log::debug!("Token '{}' not found in remaining text, skipping", token);
            continue;
        };
        let end = pos + token.len();

        match dictionary.lookup_key(token) {
            Some(key) => {
                literal.push_str(&rest[..pos]);
                if !literal.is_empty() {
                    segments.push(Segment::literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::highlighted(key, &rest[pos..end]));
            }
            None => literal.push_str(&rest[..end]),
        }

        rest = &rest[end..];
    }

    if segments.is_empty() {
        return segments;
    }

    literal.push_str(rest);
    segments.push(Segment::Literal { text: literal });
    segments
}
