use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("Route pattern is empty")]
    Empty,

    #[error("Route pattern must start with '/': {0}")]
    MissingLeadingSlash(String),

    #[error("Route pattern has a parameter without a name: {0}")]
    UnnamedParameter(String),

    #[error("Route pattern wildcard must be the final token: {0}")]
    WildcardNotLast(String),
}

const WILDCARD: &str = "(.*)";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    /// One non-empty path segment.
    Param(String),
    /// Any suffix, including the empty one.
    Wildcard,
}

/// A compiled path pattern such as `/:locale/events(.*)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    source: String,
    tokens: Vec<Token>,
}

impl RoutePattern {
    pub fn compile(source: &str) -> Result<Self, PatternError> {
        if source.is_empty() {
            return Err(PatternError::Empty);
        }
        if !source.starts_with('/') {
            return Err(PatternError::MissingLeadingSlash(source.to_string()));
        }

        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut rest = source;

        while let Some(c) = rest.chars().next() {
            if let Some(after) = rest.strip_prefix(WILDCARD) {
                if !after.is_empty() {
                    return Err(PatternError::WildcardNotLast(source.to_string()));
                }
                flush_literal(&mut literal, &mut tokens);
                tokens.push(Token::Wildcard);
                rest = after;
            } else if c == ':' {
                let name_len = rest[1..]
                    .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
                    .unwrap_or(rest.len() - 1);
                if name_len == 0 {
                    return Err(PatternError::UnnamedParameter(source.to_string()));
                }
                flush_literal(&mut literal, &mut tokens);
                tokens.push(Token::Param(rest[1..=name_len].to_string()));
                rest = &rest[1 + name_len..];
            } else {
                literal.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
        flush_literal(&mut literal, &mut tokens);

        Ok(Self {
            source: source.to_string(),
            tokens,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, path: &str) -> bool {
        match_tokens(&self.tokens, path)
    }
}

fn flush_literal(literal: &mut String, tokens: &mut Vec<Token>) {
    if !literal.is_empty() {
        tokens.push(Token::Literal(std::mem::take(literal)));
    }
}

fn match_tokens(tokens: &[Token], input: &str) -> bool {
    let Some((head, tail)) = tokens.split_first() else {
        return input.is_empty();
    };

    match head {
        Token::Literal(lit) => input
            .strip_prefix(lit.as_str())
            .is_some_and(|rest| match_tokens(tail, rest)),
        Token::Wildcard => true,
        Token::Param(_) => {
            let segment_end = input.find('/').unwrap_or(input.len());
            // Shortest first so a following literal such as `events` can still
            // claim its part of the segment.
            (1..=segment_end)
                .filter(|&end| input.is_char_boundary(end))
                .any(|end| match_tokens(tail, &input[end..]))
        }
    }
}
