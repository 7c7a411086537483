//! Parsing of the search box text into clauses.
//!
//! Every word of the query must match for a document to be returned, and each
//! word also matches indexed terms it is a prefix of. On top of that a word may
//! be prefixed with `-` (must not match) or `+` (accepted, same as bare),
//! restricted to a field with `title:`, `author:` or `category:`, and end in
//! `*` to match every completion at full weight.

use crate::index::Field;
use crate::tokenizer::{normalize, stem, tokenize, words};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Prohibited,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// Stemmed word. Matches itself and, at a discount, longer terms it starts.
    Word(String),
    /// Explicit wildcard: the unstemmed prefix and its stem, completions at full weight.
    Prefix { raw: String, stemmed: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub term: Term,
    pub field: Option<Field>,
    pub presence: Presence,
}

pub fn parse(query: &str) -> Vec<Clause> {
    let mut clauses = Vec::new();
    for raw in query.split_whitespace() {
        let (presence, rest) = match raw.as_bytes()[0] {
            b'+' => (Presence::Required, &raw[1..]),
            b'-' => (Presence::Prohibited, &raw[1..]),
            _ => (Presence::Required, raw),
        };
        let (field, text) = match rest.split_once(':') {
            Some((name, text)) => match Field::from_name(&normalize(name)) {
                Some(field) => (Some(field), text),
                None => (None, rest),
            },
            None => (None, rest),
        };

        if let Some(stripped) = text.strip_suffix('*') {
            let mut parts = words(stripped);
            let Some(prefix) = parts.pop() else { continue };
            for leading in parts {
                for (term, _) in tokenize(&leading) {
                    clauses.push(Clause { term: Term::Word(term), field, presence });
                }
            }
            let stemmed = stem(&prefix);
            clauses.push(Clause { term: Term::Prefix { raw: prefix, stemmed }, field, presence });
        } else {
            for (term, _) in tokenize(text) {
                clauses.push(Clause { term: Term::Word(term), field, presence });
            }
        }
    }
    clauses
}
