//! String metadata attached to archives, objects and properties.
//!
//! Serialized form is `key=value;key=value`, with `\`, `;` and `=` escaped by
//! a backslash.

use smallvec::SmallVec;
use std::fmt;

/// Ordered key/value string pairs. Setting an existing key replaces it in place.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MetaData {
    entries: SmallVec<[(String, String); 4]>,
}

impl MetaData {
    pub const SCHEMA_KEY: &'static str = "schema";
    pub const SCHEMA_OBJ_TITLE_KEY: &'static str = "schemaObjTitle";
    pub const INTERPRETATION_KEY: &'static str = "interpretation";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy every entry of `other` over this one.
    pub fn extend_from(&mut self, other: &MetaData) {
        for (k, v) in other.iter() {
            self.set(k, v);
        }
    }

    pub fn schema(&self) -> Option<&str> {
        self.get(Self::SCHEMA_KEY)
    }

    pub fn matches_schema(&self, title: &str) -> bool {
        self.schema() == Some(title)
    }

    pub fn interpretation(&self) -> Option<&str> {
        self.get(Self::INTERPRETATION_KEY)
    }

    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for (i, (k, v)) in self.entries.iter().enumerate() {
            if i > 0 {
                out.push(';');
            }
            push_escaped(&mut out, k);
            out.push('=');
            push_escaped(&mut out, v);
        }
        out
    }

    /// Parse the serialized form. Fragments without `=` or with an empty key
    /// are skipped.
    pub fn parse(s: &str) -> Self {
        let mut meta = Self::new();
        for pair in split_unescaped(s, ';') {
            let Some(eq) = find_unescaped(pair, '=') else {
                continue;
            };
            let key = unescape(&pair[..eq]);
            if !key.is_empty() {
                meta.set(key, unescape(&pair[eq + 1..]));
            }
        }
        meta
    }
}

impl fmt::Debug for MetaData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl fmt::Display for MetaData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MetaData {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut meta = Self::new();
        for (k, v) in iter {
            meta.set(k, v);
        }
        meta
    }
}

fn push_escaped(out: &mut String, s: &str) {
    for c in s.chars() {
        if matches!(c, '\\' | ';' | '=') {
            out.push('\\');
        }
        out.push(c);
    }
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next) => out.push(next),
                None => out.push(c),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Byte offset of the first `sep` not preceded by an escaping backslash.
fn find_unescaped(s: &str, sep: char) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == sep {
            return Some(i);
        }
    }
    None
}

fn split_unescaped(s: &str, sep: char) -> impl Iterator<Item = &str> {
    let mut rest = Some(s);
    std::iter::from_fn(move || {
        let current = rest?;
        match find_unescaped(current, sep) {
            Some(i) => {
                rest = Some(&current[i + sep.len_utf8()..]);
                Some(&current[..i])
            }
            None => {
                rest = None;
                (!current.is_empty()).then_some(current)
            }
        }
    })
}
