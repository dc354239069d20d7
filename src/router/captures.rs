use std::ops::Deref;
use std::str::FromStr;

use smallvec::SmallVec;

pub(super) type CaptureBuf<'a> = SmallVec<[(&'a str, &'a str); 8]>;

/// Parameter values extracted by a lookup, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captures<'a> {
    pub(super) buf: CaptureBuf<'a>,
}

impl<'a> Captures<'a> {
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.buf
            .iter()
            .find_map(|&(k, v)| if name == k { Some(v) } else { None })
    }

    pub fn parse<T: FromStr>(&self, name: &str) -> Option<Result<T, T::Err>> {
        self.get(name).map(T::from_str)
    }

    /// Appends the captures of a later lookup, e.g. path captures after host captures.
    pub fn extend(&mut self, other: Captures<'a>) {
        self.buf.extend(other.buf)
    }
}

impl<'a> Deref for Captures<'a> {
    type Target = [(&'a str, &'a str)];
    fn deref(&self) -> &Self::Target {
        &self.buf
    }
}

impl<'a> IntoIterator for Captures<'a> {
    type Item = (&'a str, &'a str);
    type IntoIter = smallvec::IntoIter<[(&'a str, &'a str); 8]>;
    fn into_iter(self) -> Self::IntoIter {
        self.buf.into_iter()
    }
}

impl Captures<'_> {
    pub(super) fn new() -> Self {
        Self {
            buf: SmallVec::new(),
        }
    }
}
