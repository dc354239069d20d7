use super::captures::CaptureBuf;
use super::error::RouterError;
use super::pattern::{compile, normalize, Param, Part, DEFAULT_RULE};
use super::{Branches, MatchNode, Router, Tree};

const SLASH: char = '/';
const SEPARATOR: &str = "/";

impl<T> Tree<T> {
    fn new() -> Self {
        Self {
            payload: None,
            nodes: Vec::new(),
        }
    }

    /// Finds a structurally identical node or inserts a new one at its rank.
    fn node_mut(&mut self, param: Param<'_>, after_slash: bool) -> &mut MatchNode<T> {
        let idx = match self.nodes.iter().position(|n| n.is_same(&param)) {
            Some(i) => i,
            None => {
                let r = rank(param.optional, param.rule);
                let i = self
                    .nodes
                    .iter()
                    .position(|n| rank(n.optional, &n.rule) > r)
                    .unwrap_or(self.nodes.len());
                self.nodes.insert(i, MatchNode::new(param, after_slash));
                i
            }
        };
        &mut self.nodes[idx]
    }

    fn search<'a>(&'a self, value: &'a str, caps: &mut CaptureBuf<'a>) -> Option<&'a T> {
        if value.is_empty() {
            if let Some(data) = &self.payload {
                return Some(data);
            }
        }
        for node in &self.nodes {
            let mark = caps.len();
            if let Some(data) = node.search(value, caps) {
                return Some(data);
            }
            caps.truncate(mark);
        }
        None
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a T>) {
        out.extend(self.payload.as_ref());
        for node in &self.nodes {
            out.extend(node.payload.as_ref());
            collect(&node.children, out);
        }
    }
}

impl<T> MatchNode<T> {
    fn new(param: Param<'_>, after_slash: bool) -> Self {
        Self {
            name: param.name.into(),
            optional: param.optional,
            rule: param.rule.into(),
            regex: param.regex,
            after_slash,
            payload: None,
            children: Vec::new(),
        }
    }

    fn is_same(&self, param: &Param<'_>) -> bool {
        self.optional == param.optional && *self.rule == *param.rule && *self.name == *param.name
    }

    fn accepts(&self, value: &str) -> bool {
        self.regex.is_match(value) || (self.optional && value.is_empty())
    }

    fn search<'a>(&'a self, value: &'a str, caps: &mut CaptureBuf<'a>) -> Option<&'a T> {
        for (literal, tree) in &self.children {
            let mark = caps.len();
            if let Some(data) = self.search_child(literal, tree, value, caps) {
                return Some(data);
            }
            caps.truncate(mark);
        }

        let data = self.payload.as_ref()?;
        if !value.contains(SLASH) && self.accepts(value) {
            caps.push((&*self.name, value));
            return Some(data);
        }
        None
    }

    fn search_child<'a>(
        &'a self,
        literal: &'a str,
        tree: &'a Tree<T>,
        value: &'a str,
        caps: &mut CaptureBuf<'a>,
    ) -> Option<&'a T> {
        let mark = caps.len();

        if literal == SEPARATOR {
            // the parameter spans exactly one segment
            let (segment, rest) = match value.find(SLASH) {
                Some(i) => (&value[..i], &value[i + 1..]),
                None => (value, ""),
            };
            if self.accepts(segment) {
                caps.push((&*self.name, segment));
                if let Some(data) = tree.search(rest, caps) {
                    return Some(data);
                }
                caps.truncate(mark);
            }
        } else {
            if let Some(i) = value.find(literal) {
                let candidate = &value[..i];
                if !candidate.contains(SLASH) && self.accepts(candidate) {
                    caps.push((&*self.name, candidate));
                    if let Some(data) = tree.search(&value[i + literal.len()..], caps) {
                        return Some(data);
                    }
                    caps.truncate(mark);
                }
            }

            // `{x}/posts/` still applies to `x/posts`
            let trimmed = literal
                .strip_suffix(SLASH)
                .filter(|head| !head.is_empty())
                .and_then(|head| value.strip_suffix(head));
            if let Some(candidate) = trimmed {
                if !candidate.contains(SLASH) && self.accepts(candidate) {
                    caps.push((&*self.name, candidate));
                    if let Some(data) = tree.search("", caps) {
                        return Some(data);
                    }
                    caps.truncate(mark);
                }
            }
        }

        // `/a/{x?}/b` also matches `/a/b`
        if self.optional && self.after_slash {
            let rest = literal
                .strip_prefix(SLASH)
                .and_then(|tail| value.strip_prefix(tail))?;
            caps.push((&*self.name, ""));
            return tree.search(rest, caps);
        }
        None
    }
}

/// Explicit constraints first, then the default rule, then optional parameters.
fn rank(optional: bool, rule: &str) -> u8 {
    match (optional, rule == DEFAULT_RULE) {
        (false, false) => 0,
        (false, true) => 1,
        (true, _) => 2,
    }
}

/// Returns the tree for `literal`, inserting it longest-literal-first.
fn branch_mut<'a, T>(branches: &'a mut Branches<T>, literal: &str) -> &'a mut Tree<T> {
    let idx = match branches.iter().position(|(l, _)| **l == *literal) {
        Some(i) => i,
        None => {
            let i = branches
                .iter()
                .position(|(l, _)| l.len() < literal.len())
                .unwrap_or(branches.len());
            branches.insert(i, (literal.into(), Tree::new()));
            i
        }
    };
    &mut branches[idx].1
}

fn strip_literal<'a>(path: &'a str, literal: &str) -> Option<&'a str> {
    if let Some(rest) = path.strip_prefix(literal) {
        return Some(rest);
    }
    // `/archives/` still applies to `/archives`
    match literal.strip_suffix(SLASH) {
        Some(head) if head == path => Some(""),
        _ => None,
    }
}

fn search<'a, T>(branches: &'a Branches<T>, path: &'a str, caps: &mut CaptureBuf<'a>) -> Option<&'a T> {
    for (literal, tree) in branches {
        let value = match strip_literal(path, literal) {
            Some(v) => v,
            None => continue,
        };
        if let Some(data) = tree.search(value, caps) {
            return Some(data);
        }
    }
    None
}

fn collect<'a, T>(branches: &'a Branches<T>, out: &mut Vec<&'a T>) {
    for (_, tree) in branches {
        tree.collect(out);
    }
}

impl<T> Router<T> {
    pub(super) fn add_route(&mut self, pattern: &str, data: T) -> Result<String, RouterError> {
        let compiled = compile(pattern)?;

        if compiled.is_static() {
            let key = normalize(pattern);
            if self.exact.contains_key(key) {
                return Err(RouterError::DuplicateRoute {
                    signature: key.into(),
                });
            }
            self.exact.insert(key.into(), data);
            return Ok(key.into());
        }

        if self.signatures.contains(&compiled.signature) {
            return Err(RouterError::DuplicateRoute {
                signature: compiled.signature,
            });
        }

        let count = compiled.parts.len();
        let mut data = Some(data);
        let mut branches = &mut self.trees;
        let mut prefix: &str = "";

        for (i, part) in compiled.parts.into_iter().enumerate() {
            let last = i + 1 == count;
            match part {
                Part::Literal(lit) => {
                    prefix = lit;
                    if last {
                        branch_mut(branches, prefix).payload = data.take();
                        break;
                    }
                }
                Part::Param(param) => {
                    let after_slash = prefix.ends_with(SLASH);
                    let node = branch_mut(branches, prefix).node_mut(param, after_slash);
                    if last {
                        node.payload = data.take();
                        break;
                    }
                    branches = &mut node.children;
                    prefix = "";
                }
            }
        }

        self.signatures.insert(compiled.signature.clone());
        Ok(compiled.signature)
    }

    pub(super) fn find_route<'a>(
        &'a self,
        path: &'a str,
        caps: &mut CaptureBuf<'a>,
    ) -> Option<&'a T> {
        let path = normalize(path);
        if let Some(data) = self.exact.get(path) {
            return Some(data);
        }
        search(&self.trees, path, caps)
    }

    pub(super) fn collect_all(&self) -> Vec<&T> {
        let mut out: Vec<&T> = self.exact.values().collect();
        collect(&self.trees, &mut out);
        out
    }
}
