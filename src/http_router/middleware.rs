use super::error::DeclareError;

use std::fmt;
use std::str::FromStr;

const COLON: char = ':';

/// A named middleware reference carried by routes.
///
/// The router never runs middleware; it only keeps the declaration so the
/// surrounding application can resolve `name` with `args`. The `alias` is
/// the declaration text, kept for route listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Middleware {
    name: String,
    args: Vec<String>,
    alias: String,
}

impl Middleware {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            alias: name.clone(),
            name,
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        let arg = arg.into();
        self.alias.push(COLON);
        self.alias.push_str(&arg);
        self.args.push(arg);
        self
    }

    /// Parses `name[:arg]*`, e.g. `auth:api`.
    pub fn parse(declaration: &str) -> Result<Self, DeclareError> {
        let mut parts = declaration.split(COLON);
        let name = parts.next().unwrap_or_default();
        let args: Vec<String> = parts.map(String::from).collect();

        if name.trim().is_empty() || args.iter().any(|a| a.is_empty()) {
            return Err(DeclareError::MiddlewareShape {
                declaration: declaration.into(),
            });
        }

        Ok(Self {
            name: name.into(),
            args,
            alias: declaration.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }
}

impl FromStr for Middleware {
    type Err = DeclareError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.alias)
    }
}
