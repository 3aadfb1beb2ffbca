use std::collections::HashMap;

use crate::{
    path::is_blank,
    util::escape::{escape, unescape},
    Config, UrlBuilder,
};

/// A single `key=value` pair, see [`UrlBuilder::set_query_params`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryParam {
    pub key: String,
    pub value: String,
}

impl QueryParam {
    #[inline]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for QueryParam {
    #[inline]
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct QueryEntry {
    key: String,
    /// `None` for a flag-only parameter, rendered without `=`.
    values: Option<Vec<String>>,
}

/// Query entries in insertion order, one entry per key, with a lookup index
/// from key to position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct QueryParams {
    params: Vec<QueryEntry>,
    indexes: HashMap<String, usize>,
}

impl QueryParams {
    pub(crate) fn parse(query: &str, config: &Config) -> Self {
        let mut params = Self::default();

        for token in query.split('&') {
            if is_blank(token) {
                continue;
            }

            let (raw_key, raw_value) = match token.split_once('=') {
                | Some((key, value)) => (key, Some(value)),
                | None if config.keep_bare_keys => (token, None),
                | None => {
                    tracing::trace!(%token, "dropping bare query token");
                    continue;
                }
            };

            let decoded = unescape(raw_key).and_then(|key| {
                raw_value
                    .map(unescape)
                    .transpose()
                    .map(|value| (key, value))
            });

            match decoded {
                | Ok((key, Some(value))) => params.append(key, value),
                | Ok((key, None)) => params.insert_flag(key),
                | Err(err) => {
                    tracing::trace!(%token, %err, "dropping bad query token")
                }
            }
        }

        params
    }

    #[inline]
    fn get(&self, key: &str) -> Option<&QueryEntry> {
        self.indexes.get(key).map(|&index| &self.params[index])
    }

    #[inline]
    pub(crate) fn values(&self, key: &str) -> Option<&[String]> {
        self.get(key).map(|entry| entry.values.as_deref().unwrap_or_default())
    }

    /// Replaces the values of `key`, or adds a new entry at the end.
    pub(crate) fn set(&mut self, key: String, values: Option<Vec<String>>) {
        match self.indexes.get(&key) {
            | Some(&index) => self.params[index].values = values,
            | None => self.push(QueryEntry { key, values }),
        }
    }

    /// Adds `value` to the values of `key`, turning a flag into a valued
    /// entry.
    fn append(&mut self, key: String, value: String) {
        match self.indexes.get(&key) {
            | Some(&index) => self.params[index]
                .values
                .get_or_insert_with(Vec::new)
                .push(value),
            | None => self.push(QueryEntry {
                key,
                values: Some(vec![value]),
            }),
        }
    }

    /// Adds a flag-only entry unless `key` already has one.
    pub(crate) fn insert_flag(&mut self, key: String) {
        if !self.indexes.contains_key(&key) {
            self.push(QueryEntry { key, values: None });
        }
    }

    pub(crate) fn remove(&mut self, key: &str) -> bool {
        let Some(index) = self.indexes.get(key).copied() else {
            return false;
        };

        self.params.remove(index);
        self.reindex();
        true
    }

    /// Serializes the entries and recomputes the index in the same pass.
    pub(crate) fn rebuild(&mut self) -> String {
        let mut buf = String::new();
        self.indexes.clear();

        for (index, param) in self.params.iter().enumerate() {
            let key = escape(&param.key);

            match &param.values {
                | None => {
                    push_separator(&mut buf);
                    buf.push_str(&key);
                }
                | Some(values) => {
                    for value in values {
                        push_separator(&mut buf);
                        buf.push_str(&key);
                        buf.push('=');
                        buf.push_str(&escape(value));
                    }
                }
            }

            self.indexes.insert(param.key.clone(), index);
        }

        buf
    }

    fn push(&mut self, entry: QueryEntry) {
        self.indexes.insert(entry.key.clone(), self.params.len());
        self.params.push(entry);
    }

    fn reindex(&mut self) {
        self.indexes = self
            .params
            .iter()
            .enumerate()
            .map(|(index, param)| (param.key.clone(), index))
            .collect();
    }
}

#[inline]
fn push_separator(buf: &mut String) {
    if !buf.is_empty() {
        buf.push('&');
    }
}

impl UrlBuilder {
    /// Replaces the entire raw query. The string is stored as given and
    /// parsed again into query parameters.
    pub fn set_query(mut self, query: impl AsRef<str>) -> Self {
        let query = query.as_ref();
        let raw = (!query.is_empty()).then_some(query);

        if let Err(err) = self.location.set_query(raw) {
            tracing::debug!(%query, %err, "cannot set url query");
        }

        let query = self.location.query().unwrap_or_default();
        self.query_params = QueryParams::parse(query, &self.config);
        self
    }

    /// Sets `key` to the single `value`, replacing whatever it held.
    pub fn set_query_param(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.query_params.set(key.into(), Some(vec![value.into()]));
        self.rebuild_query();
        self
    }

    /// Adds a flag-only parameter, e.g. `someFlag` in `?someFlag&x=1`.
    ///
    /// Blank keys and keys that are already present are ignored.
    pub fn set_query_param_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        if is_blank(&key) {
            return self;
        }

        self.query_params.insert_flag(key);
        self.rebuild_query();
        self
    }

    /// Sets all values of `key`, e.g. `colors=red&colors=green`.
    ///
    /// An empty `values` leaves `key` as a flag-only parameter.
    pub fn set_query_param_slice<I>(
        mut self,
        key: impl Into<String>,
        values: I,
    ) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        let values = (!values.is_empty()).then_some(values);

        self.query_params.set(key.into(), values);
        self.rebuild_query();
        self
    }

    /// Sets several single-valued parameters. A later pair overwrites an
    /// earlier one with the same key.
    pub fn set_query_params<I>(mut self, params: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<QueryParam>,
    {
        for param in params {
            let QueryParam { key, value } = param.into();
            self.query_params.set(key, Some(vec![value]));
        }

        self.rebuild_query();
        self
    }

    pub fn remove_query_param(mut self, key: impl AsRef<str>) -> Self {
        if !self.query_params.remove(key.as_ref()) {
            return self;
        }

        self.rebuild_query();
        self
    }

    fn rebuild_query(&mut self) {
        let query = self.query_params.rebuild();
        let raw = (!query.is_empty()).then_some(query.as_str());

        match self.location.set_query(raw) {
            | Ok(()) => tracing::trace!(%query, "rebuilt url query"),
            | Err(err) => {
                tracing::debug!(%query, %err, "cannot rebuild url query")
            }
        }
    }
}
