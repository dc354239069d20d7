use super::captures::Captures;
use super::error::RouterError;
use super::Router;

use std::collections::{HashMap, HashSet};

impl<T> Router<T> {
    pub fn new() -> Self {
        Self {
            exact: HashMap::new(),
            trees: Vec::new(),
            signatures: HashSet::new(),
        }
    }

    pub fn clear(&mut self) {
        self.exact.clear();
        self.trees.clear();
        self.signatures.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.signatures.is_empty()
    }

    /// Number of registered patterns.
    pub fn len(&self) -> usize {
        self.exact.len() + self.signatures.len()
    }

    /// Resolves `path` to its payload and the extracted parameters.
    ///
    /// A trailing `/` is insignificant except for the root path. Literal
    /// routes win over parameterized ones.
    pub fn find<'a>(&'a self, path: &'a str) -> Result<(&'a T, Captures<'a>), RouterError> {
        let mut captures = Captures::new();
        match self.find_route(path, &mut captures.buf) {
            Some(data) => Ok((data, captures)),
            None => Err(RouterError::NotFound),
        }
    }

    pub fn insert(&mut self, pattern: &str, data: T) -> &mut Self {
        if let Err(e) = self.add_route(pattern, data) {
            panic!("{}: pattern = {:?}", e, pattern);
        }
        self
    }

    /// Registers `pattern` and returns its signature.
    ///
    /// Fails with [`RouterError::DuplicateRoute`] when a pattern with the same
    /// signature is already registered; the table is left untouched.
    pub fn try_insert(&mut self, pattern: &str, data: T) -> Result<String, RouterError> {
        self.add_route(pattern, data)
    }

    /// Whether a pattern with this signature is registered. A literal
    /// pattern's signature is its normalized path.
    pub fn contains_signature(&self, signature: &str) -> bool {
        self.exact.contains_key(signature) || self.signatures.contains(signature)
    }

    /// Every registered payload: literal routes first, then parameterized
    /// routes in lookup order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.collect_all().into_iter()
    }
}
