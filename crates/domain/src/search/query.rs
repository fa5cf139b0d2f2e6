use super::document::{tokenize, SearchDocument};
use crate::DomainError;

/// How a clause takes part in matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occur {
    Should,
    Must,
    MustNot,
}

/// One term or phrase, optionally bound to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub occur: Occur,
    pub field: Option<String>,
    /// Phrase tokens. Empty for a `*` wildcard.
    pub terms: Vec<String>,
    /// The last term matches as a prefix.
    pub prefix: bool,
}

impl Clause {
    fn parse(raw: &str) -> Option<Self> {
        let (occur, rest) = if let Some(rest) = raw.strip_prefix('+') {
            (Occur::Must, rest)
        } else if let Some(rest) = raw.strip_prefix('-') {
            (Occur::MustNot, rest)
        } else {
            (Occur::Should, raw)
        };

        let (field, value) = split_field(rest);
        let quoted = value.len() >= 2 && value.starts_with('"') && value.ends_with('"');
        let value = if quoted {
            &value[1..value.len() - 1]
        } else {
            value
        };

        if !quoted && value == "*" {
            return Some(Self {
                occur,
                field,
                terms: Vec::new(),
                prefix: false,
            });
        }

        let terms = tokenize(value);
        if terms.is_empty() {
            return None;
        }

        Some(Self {
            occur,
            field,
            terms,
            prefix: !quoted && value.ends_with('*'),
        })
    }

    pub fn matches(&self, doc: &SearchDocument) -> bool {
        match &self.field {
            Some(field) => doc.get(field).is_some_and(|text| self.matches_text(text)),
            None => doc.values().any(|text| self.matches_text(text)),
        }
    }

    fn matches_text(&self, text: &str) -> bool {
        if self.terms.is_empty() {
            return true;
        }

        let tokens = tokenize(text);
        tokens
            .windows(self.terms.len())
            .any(|window| self.matches_window(window))
    }

    fn matches_window(&self, window: &[String]) -> bool {
        let last = self.terms.len() - 1;
        self.terms
            .iter()
            .zip(window)
            .enumerate()
            .all(|(i, (term, token))| {
                if self.prefix && i == last {
                    token.starts_with(term.as_str())
                } else {
                    token == term
                }
            })
    }
}

/// A parsed query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    clauses: Vec<Clause>,
}

impl SearchQuery {
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        if input.trim().is_empty() {
            return Err(DomainError::invalid_query("query cannot be blank"));
        }

        let mut clauses: Vec<Clause> = Vec::new();
        let mut pending: Option<Occur> = None;

        for word in split_words(input)? {
            match word.as_str() {
                "OR" => {}
                "AND" => {
                    if let Some(last) = clauses.last_mut() {
                        if last.occur == Occur::Should {
                            last.occur = Occur::Must;
                        }
                    }
                    if pending != Some(Occur::MustNot) {
                        pending = Some(Occur::Must);
                    }
                }
                "NOT" => pending = Some(Occur::MustNot),
                _ => {
                    if let Some(mut clause) = Clause::parse(&word) {
                        if clause.occur == Occur::Should {
                            if let Some(occur) = pending {
                                clause.occur = occur;
                            }
                        }
                        clauses.push(clause);
                    }
                    pending = None;
                }
            }
        }

        if clauses.is_empty() {
            return Err(DomainError::invalid_query("query has no searchable terms"));
        }

        Ok(Self { clauses })
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Relevance of `doc`, or `None` when it does not match.
    ///
    /// The score counts matching optional clauses; required and excluded
    /// clauses only gate the match.
    pub fn score(&self, doc: &SearchDocument) -> Option<usize> {
        let mut optional = 0;
        let mut optional_hits = 0;
        let mut required = 0;

        for clause in &self.clauses {
            let hit = clause.matches(doc);
            match clause.occur {
                Occur::Must => {
                    if !hit {
                        return None;
                    }
                    required += 1;
                }
                Occur::MustNot => {
                    if hit {
                        return None;
                    }
                }
                Occur::Should => {
                    optional += 1;
                    if hit {
                        optional_hits += 1;
                    }
                }
            }
        }

        if optional > 0 && required == 0 && optional_hits == 0 {
            return None;
        }
        Some(optional_hits)
    }

    pub fn matches(&self, doc: &SearchDocument) -> bool {
        self.score(doc).is_some()
    }
}

/// Splits on whitespace outside double quotes.
fn split_words(input: &str) -> Result<Vec<String>, DomainError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in input.chars() {
        if c == '"' {
            in_quotes = !in_quotes;
            current.push(c);
        } else if c.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        } else {
            current.push(c);
        }
    }

    if in_quotes {
        return Err(DomainError::invalid_query("unterminated phrase"));
    }
    if !current.is_empty() {
        words.push(current);
    }
    Ok(words)
}

fn split_field(raw: &str) -> (Option<String>, &str) {
    if raw.starts_with('"') {
        return (None, raw);
    }

    match raw.split_once(':') {
        Some((field, value))
            if !field.is_empty()
                && field
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '_' || c == '.') =>
        {
            (Some(field.to_string()), value)
        }
        _ => (None, raw),
    }
}
