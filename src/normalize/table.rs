use std::collections::HashMap;

/// Ordered variant -> canonical lookup.
///
/// Keys are stored lower-cased with collapsed whitespace. Every canonical value
/// is also registered as a key of itself so that canonicalizing an already
/// canonical name is a no-op.
#[derive(Debug, Clone, Default)]
pub struct NormalizationTable {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl NormalizationTable {
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut table = Self::default();
        table.extend(pairs);
        table
    }

    pub fn extend<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut canonical_values = Vec::<String>::new();
        for (key, value) in pairs {
            let value = collapse_whitespace(value.as_ref());
            if value.is_empty() {
                continue;
            }
            self.insert(lookup_key(key.as_ref()), value.clone());
            canonical_values.push(value);
        }

        for value in canonical_values {
            let key = lookup_key(&value);
            if !self.index.contains_key(&key) {
                self.insert(key, value);
            }
        }
    }

    fn insert(&mut self, key: String, value: String) {
        if key.is_empty() {
            return;
        }

        match self.index.get(&key) {
            Some(&position) => self.entries[position].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get_exact(&self, raw: &str) -> Option<&str> {
        self.index
            .get(&lookup_key(raw))
            .map(|&position| self.entries[position].1.as_str())
    }

    /// Canonical name for `raw`, or `None` when `raw` is blank.
    ///
    /// Resolution order: exact key, then the first key (in table order) that
    /// is contained in the input or contains it, then a title-cased copy of
    /// the input.
    pub fn canonicalize(&self, raw: &str) -> Option<String> {
        let key = lookup_key(raw);
        if key.is_empty() {
            return None;
        }

        Some(
            self.resolve_key(&key)
                .map(str::to_string)
                .unwrap_or_else(|| title_case(&key)),
        )
    }

    /// Like [`canonicalize`](Self::canonicalize), but `None` when no key
    /// matches instead of the title-cased input.
    pub fn resolve(&self, raw: &str) -> Option<&str> {
        let key = lookup_key(raw);
        if key.is_empty() {
            return None;
        }
        self.resolve_key(&key)
    }

    fn resolve_key(&self, key: &str) -> Option<&str> {
        match self.index.get(key) {
            Some(&position) => Some(self.entries[position].1.as_str()),
            None => self.keyword_match(key),
        }
    }

    fn keyword_match(&self, key: &str) -> Option<&str> {
        let reverse_allowed = key.chars().count() >= MIN_REVERSE_MATCH_CHARS;
        self.entries
            .iter()
            .find(|(candidate, _)| {
                key.contains(candidate.as_str()) || (reverse_allowed && candidate.contains(key))
            })
            .map(|(_, value)| value.as_str())
    }
}

const MIN_REVERSE_MATCH_CHARS: usize = 3;

pub fn lookup_key(raw: &str) -> String {
    collapse_whitespace(raw).to_lowercase()
}

pub fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<&str>>().join(" ")
}

pub fn title_case(raw: &str) -> String {
    collapse_whitespace(raw)
        .split(' ')
        .map(|word| {
            let mut characters = word.chars();
            match characters.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(characters.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
