use super::error::RouterError;

use regex::Regex;
use smallvec::SmallVec;

pub(super) const DEFAULT_RULE: &str = "[^/]+";

const OPEN: char = '{';
const CLOSE: char = '}';
const COLON: char = ':';
const OPTIONAL: char = '?';
const SLASH: char = '/';

/// A raw piece of a route pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Token<'a> {
    Literal(&'a str),
    /// A parameter token, braces included.
    Param(&'a str),
}

/// `name[:rule][?]` split out of a parameter token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Rule<'a> {
    pub name: &'a str,
    pub rule: &'a str,
    pub optional: bool,
}

#[derive(Debug)]
pub(super) struct Param<'a> {
    pub name: &'a str,
    pub rule: &'a str,
    pub optional: bool,
    pub regex: Regex,
}

#[derive(Debug)]
pub(super) enum Part<'a> {
    Literal(&'a str),
    Param(Param<'a>),
}

#[derive(Debug)]
pub(super) struct Compiled<'a> {
    pub parts: SmallVec<[Part<'a>; 8]>,
    pub signature: String,
}

impl Compiled<'_> {
    pub fn is_static(&self) -> bool {
        self.parts.iter().all(|p| matches!(p, Part::Literal(_)))
    }
}

pub(super) fn parse_rule(token: &str) -> Rule<'_> {
    let inner = token
        .strip_prefix(OPEN)
        .and_then(|s| s.strip_suffix(CLOSE))
        .unwrap_or(token);

    let (inner, optional) = match inner.strip_suffix(OPTIONAL) {
        Some(s) => (s, true),
        None => (inner, false),
    };

    // the rule itself may contain ':'
    match inner.split_once(COLON) {
        Some((name, rule)) => Rule {
            name,
            rule,
            optional,
        },
        None => Rule {
            name: inner,
            rule: DEFAULT_RULE,
            optional,
        },
    }
}

/// Splits a pattern into alternating literal and parameter tokens.
///
/// A parameter token runs from `{` to its balancing `}`, so constraints
/// may use quantifiers such as `{id:[0-9]{4}}`. Empty or unbalanced
/// braces are literal text.
pub(super) fn tokenize(pattern: &str) -> SmallVec<[Token<'_>; 8]> {
    let mut tokens: SmallVec<[Token<'_>; 8]> = SmallVec::new();
    let mut literal_start = 0;
    let mut cursor = 0;

    while let Some(open) = pattern[cursor..].find(OPEN).map(|i| i + cursor) {
        let close = match balancing_close(&pattern[open..]) {
            Some(i) => open + i,
            None => {
                cursor = open + 1;
                continue;
            }
        };
        if close == open + 1 {
            cursor = close + 1;
            continue;
        }
        if open > literal_start {
            tokens.push(Token::Literal(&pattern[literal_start..open]));
        }
        tokens.push(Token::Param(&pattern[open..=close]));
        literal_start = close + 1;
        cursor = literal_start;
    }

    if literal_start < pattern.len() {
        tokens.push(Token::Literal(&pattern[literal_start..]));
    }
    tokens
}

/// Offset of the `}` closing the `{` that starts `s`.
fn balancing_close(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            OPEN => depth += 1,
            CLOSE => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Compiles a pattern into parts and its signature.
///
/// The signature keeps literals verbatim and replaces every parameter with
/// its rule, so patterns differing only in parameter names collide.
pub(super) fn compile(pattern: &str) -> Result<Compiled<'_>, RouterError> {
    let tokens = tokenize(pattern);

    let mut parts: SmallVec<[Part<'_>; 8]> = SmallVec::with_capacity(tokens.len());
    let mut signature = String::with_capacity(pattern.len());
    let mut last_was_param = false;

    for token in tokens {
        match token {
            Token::Literal(lit) => {
                signature.push_str(lit);
                parts.push(Part::Literal(lit));
                last_was_param = false;
            }
            Token::Param(raw) => {
                if last_was_param {
                    return Err(RouterError::AdjacentParameters {
                        pattern: pattern.into(),
                    });
                }
                let Rule {
                    name,
                    rule,
                    optional,
                } = parse_rule(raw);
                if name.is_empty() {
                    return Err(RouterError::EmptyParameterName {
                        pattern: pattern.into(),
                    });
                }
                let regex = anchored(rule).map_err(|source| RouterError::InvalidConstraint {
                    pattern: pattern.into(),
                    rule: rule.into(),
                    source,
                })?;
                signature.push_str(rule);
                parts.push(Part::Param(Param {
                    name,
                    rule,
                    optional,
                    regex,
                }));
                last_was_param = true;
            }
        }
    }

    Ok(Compiled { parts, signature })
}

fn anchored(rule: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{})$", rule))
}

/// Strips a trailing `/` unless the path is the root.
pub(crate) fn normalize(path: &str) -> &str {
    match path.strip_suffix(SLASH) {
        Some(s) if !s.is_empty() => s,
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_defaults() {
        let r = parse_rule("{name}");
        assert_eq!(r.name, "name");
        assert_eq!(r.rule, DEFAULT_RULE);
        assert!(!r.optional);

        let r = parse_rule("{id:[0-9]+?}");
        assert_eq!(r.name, "id");
        assert_eq!(r.rule, "[0-9]+");
        assert!(r.optional);

        let r = parse_rule("{level?}");
        assert_eq!(r.name, "level");
        assert_eq!(r.rule, DEFAULT_RULE);
        assert!(r.optional);
    }

    #[test]
    fn rule_keeps_colons() {
        let r = parse_rule("{time:\\d+:\\d+}");
        assert_eq!(r.name, "time");
        assert_eq!(r.rule, "\\d+:\\d+");
    }

    #[test]
    fn tokens_cover_pattern() {
        let tokens = tokenize("/books/{name}_description");
        assert_eq!(
            &*tokens,
            &[
                Token::Literal("/books/"),
                Token::Param("{name}"),
                Token::Literal("_description"),
            ]
        );

        let tokens = tokenize("{sub}.example.com");
        assert_eq!(
            &*tokens,
            &[Token::Param("{sub}"), Token::Literal(".example.com")]
        );

        assert_eq!(&*tokenize("/users"), &[Token::Literal("/users")]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn stray_braces_are_literal() {
        assert_eq!(&*tokenize("/a{}/b"), &[Token::Literal("/a{}/b")]);
        assert_eq!(
            &*tokenize("/a{{x}"),
            &[Token::Literal("/a{"), Token::Param("{x}")]
        );
        assert_eq!(&*tokenize("/a{x"), &[Token::Literal("/a{x")]);
    }

    #[test]
    fn quantifiers_stay_in_the_constraint() {
        assert_eq!(
            &*tokenize("/a/{id:[0-9]{2}}/b"),
            &[
                Token::Literal("/a/"),
                Token::Param("{id:[0-9]{2}}"),
                Token::Literal("/b"),
            ]
        );
        let r = parse_rule("{id:[0-9]{2,4}?}");
        assert_eq!(r.name, "id");
        assert_eq!(r.rule, "[0-9]{2,4}");
        assert!(r.optional);
        assert_eq!(compile("/a/{id:[0-9]{2}}").unwrap().signature, "/a/[0-9]{2}");
    }

    #[test]
    fn signature_erases_names() {
        let a = compile("/users/{name}").unwrap();
        let b = compile("/users/{id}").unwrap();
        let c = compile("/users/{name:[0-9]+}").unwrap();
        assert_eq!(a.signature, b.signature);
        assert_ne!(a.signature, c.signature);
        assert_eq!(c.signature, "/users/[0-9]+");
        assert!(!a.is_static());
        assert!(compile("/users").unwrap().is_static());
    }

    #[test]
    fn compile_rejects_bad_params() {
        assert!(matches!(
            compile("/a/{x}{y}"),
            Err(RouterError::AdjacentParameters { .. })
        ));
        assert!(matches!(
            compile("/a/{:[0-9]+}"),
            Err(RouterError::EmptyParameterName { .. })
        ));
        assert!(matches!(
            compile("/a/{x:[0-9}"),
            Err(RouterError::InvalidConstraint { .. })
        ));
    }

    #[test]
    fn normalize_trailing_slash() {
        assert_eq!(normalize("/a/"), "/a");
        assert_eq!(normalize("/a"), "/a");
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize(""), "");
    }
}
