mod captures;
mod core;
mod error;
mod imp;
mod pattern;

pub use self::captures::Captures;
pub use self::error::RouterError;

pub(crate) use self::pattern::normalize;

use std::collections::{HashMap, HashSet};

use regex::Regex;

/// A path router generic over its payload.
///
/// Literal patterns live in a hash table and are resolved first. Patterns
/// with parameters are compiled into trees keyed by the literal text that
/// precedes each parameter.
#[derive(Debug)]
pub struct Router<T> {
    exact: HashMap<Box<str>, T>,
    trees: Branches<T>,
    /// Signatures of parameterized patterns; literal ones are keyed by `exact`.
    signatures: HashSet<String>,
}

/// Literal text mapped to what may follow it, in candidate order.
type Branches<T> = Vec<(Box<str>, Tree<T>)>;

#[derive(Debug)]
struct Tree<T> {
    payload: Option<T>,
    nodes: Vec<MatchNode<T>>,
}

/// One compiled parameter occurrence.
#[derive(Debug)]
struct MatchNode<T> {
    name: Box<str>,
    optional: bool,
    rule: Box<str>,
    regex: Regex,
    /// The parameter directly follows a literal ending in `/`.
    after_slash: bool,
    payload: Option<T>,
    children: Branches<T>,
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}
