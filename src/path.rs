use crate::{util::escape::escape_path, UrlBuilder};

/// Ordered `/`-separated segments of a URL path.
///
/// Empty segments stand for the leading slash and a trailing slash, so
/// `/foo/` is `["", "foo", ""]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PathParts {
    parts: Vec<String>,
}

impl PathParts {
    pub(crate) fn parse(path: &str) -> Self {
        Self {
            parts: path.split('/').map(String::from).collect(),
        }
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[String] {
        &self.parts
    }

    /// Appends a segment, replacing a trailing empty one the way
    /// [`url::PathSegmentsMut::pop_if_empty`] does.
    pub(crate) fn push(&mut self, part: &str) {
        let trailing = self.parts.last().is_some_and(String::is_empty);
        if trailing && self.parts.len() > 1 {
            self.parts.pop();
        }

        self.parts.push(part.to_owned());
    }

    /// Removes the last occurrence of `part`, returning whether it was found.
    ///
    /// Segments are held as the URL serializes them, so `part` matches
    /// either verbatim or in its percent-encoded form.
    pub(crate) fn remove(&mut self, part: &str) -> bool {
        let encoded = escape_path(part);
        let found = self
            .parts
            .iter()
            .rposition(|p| p == part || p.as_str() == encoded);

        match found {
            | Some(index) => {
                self.parts.remove(index);
                true
            }
            | None => false,
        }
    }

    #[inline]
    pub(crate) fn join(&self) -> String {
        self.parts.join("/")
    }
}

impl UrlBuilder {
    /// Replaces the whole path. Blank input is ignored.
    pub fn set_path(mut self, path: impl AsRef<str>) -> Self {
        let path = path.as_ref();
        if is_blank(path) {
            return self;
        }

        self.path_parts = PathParts::parse(path);
        self.rebuild_path();
        self
    }

    /// Appends a single segment. Blank input is ignored.
    ///
    /// Already percent-encoded segments are kept as they are.
    pub fn add_path_part(mut self, part: impl AsRef<str>) -> Self {
        let part = part.as_ref();
        if is_blank(part) {
            return self;
        }

        self.path_parts.push(part);
        self.rebuild_path();
        self
    }

    /// Appends every non-blank segment of `parts`, in order.
    pub fn add_path_parts<I>(mut self, parts: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for part in parts {
            let part = part.as_ref();
            if !is_blank(part) {
                self.path_parts.push(part);
            }
        }

        self.rebuild_path();
        self
    }

    /// Removes the last segment equal to `part`, if any.
    pub fn remove_path_part(mut self, part: impl AsRef<str>) -> Self {
        let part = part.as_ref();
        if is_blank(part) || !self.path_parts.remove(part) {
            return self;
        }

        self.rebuild_path();
        self
    }

    fn rebuild_path(&mut self) {
        let joined = self.path_parts.join();

        match self.location.set_path(&joined) {
            | Ok(()) => tracing::trace!(path = %joined, "rebuilt url path"),
            | Err(err) => {
                tracing::debug!(path = %joined, %err, "cannot rebuild url path")
            }
        }

        self.path_parts = PathParts::parse(&self.location.path());
    }
}

#[inline]
pub(crate) fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
