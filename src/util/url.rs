use std::{borrow::Cow, fmt};

use url::{Position, Url};

/// Base that relative references are resolved against so they can be held
/// in a [`Url`]. Never shows up in serialized output.
const RELATIVE_BASE: &str = "burl-relative:///";

/// The URL a builder owns: absolute, relative reference, or nothing at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Location {
    #[default]
    Empty,
    Absolute(Url),
    Relative(Reference),
}

/// A relative reference such as `/foo`, `foo/bar`, `../a` or `?x=1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    url: Url,
    /// Whether the path starts with `/` (this includes `//host/...`).
    rooted: bool,
    /// Leading `./` and `../` segments of a path that is not rooted. They
    /// cannot be held in `url`, where they would collapse into its root.
    dots: String,
}

impl Location {
    pub fn parse(raw: &str) -> crate::Result<Self> {
        if raw.trim().is_empty() {
            return Err(crate::Error::Empty);
        }

        match Url::parse(raw) {
            | Ok(url) => Ok(Self::Absolute(url)),
            | Err(url::ParseError::RelativeUrlWithoutBase) => {
                Reference::parse(raw).map(Self::Relative)
            }
            | Err(err) => Err(err.into()),
        }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    #[inline]
    pub const fn absolute(&self) -> Option<&Url> {
        match self {
            | Self::Absolute(url) => Some(url),
            | _ => None,
        }
    }

    #[inline]
    pub fn into_absolute(self) -> Option<Url> {
        match self {
            | Self::Absolute(url) => Some(url),
            | _ => None,
        }
    }

    pub fn path(&self) -> Cow<'_, str> {
        match self {
            | Self::Empty => Cow::Borrowed(""),
            | Self::Absolute(url) => Cow::Borrowed(url.path()),
            | Self::Relative(reference) => reference.path(),
        }
    }

    pub fn query(&self) -> Option<&str> {
        match self {
            | Self::Empty => None,
            | Self::Absolute(url) => url.query(),
            | Self::Relative(reference) => reference.url.query(),
        }
    }

    /// Replaces the path component with `path`.
    ///
    /// A path starting with `/` replaces the current one outright. Any other
    /// path is resolved against the directory of the current path. Query
    /// and fragment are kept either way.
    pub fn set_path(&mut self, path: &str) -> crate::Result<()> {
        if self.is_empty() && path.is_empty() {
            return Ok(());
        }

        self.promote()?;

        match self {
            | Self::Absolute(url) => set_url_path(url, path),
            | Self::Relative(reference) => reference.set_path(path),
            | Self::Empty => Err(crate::Error::Empty),
        }
    }

    pub fn set_query(&mut self, query: Option<&str>) -> crate::Result<()> {
        if self.is_empty() && query.is_none() {
            return Ok(());
        }

        self.promote()?;

        match self {
            | Self::Absolute(url) => url.set_query(query),
            | Self::Relative(reference) => reference.url.set_query(query),
            | Self::Empty => return Err(crate::Error::Empty),
        }

        Ok(())
    }

    /// Turns an empty location into an empty relative reference.
    fn promote(&mut self) -> crate::Result<()> {
        if self.is_empty() {
            *self = Self::Relative(Reference::empty()?);
        }

        Ok(())
    }
}

impl Reference {
    fn parse(raw: &str) -> crate::Result<Self> {
        let first = raw.split(['/', '?', '#']).next();
        if let Some(first) = first.filter(|s| s.contains(':')) {
            let first = first.to_owned();
            return Err(crate::Error::ColonInFirstSegment(first));
        }

        let rooted = raw.starts_with('/');
        let dots = if rooted { "" } else { leading_dots(raw) };
        let url = relative_base()?.join(&raw[dots.len()..])?;

        Ok(Self {
            url,
            rooted,
            dots: dots.to_owned(),
        })
    }

    fn empty() -> crate::Result<Self> {
        Ok(Self {
            url: relative_base()?,
            rooted: false,
            dots: String::new(),
        })
    }

    fn path(&self) -> Cow<'_, str> {
        let path = self.url.path();
        if self.rooted {
            return Cow::Borrowed(path);
        }

        let path = path.strip_prefix('/').unwrap_or(path);
        if self.dots.is_empty() {
            Cow::Borrowed(path)
        } else {
            Cow::Owned(format!("{}{path}", self.dots))
        }
    }

    /// A reference that is not rooted takes `path` as rooted, the way the
    /// result of resolving one relative path against another is.
    fn set_path(&mut self, path: &str) -> crate::Result<()> {
        if self.rooted {
            return set_url_path(&mut self.url, path);
        }

        self.dots.clear();

        if path.is_empty() {
            self.url.set_path("");
        } else if path.starts_with('/') {
            self.url.set_path(path);
            self.rooted = true;
        } else {
            self.url.set_path(&format!("/{path}"));
            self.rooted = true;
        }

        Ok(())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            | Self::Empty => Ok(()),
            | Self::Absolute(url) => f.write_str(url.as_str()),
            | Self::Relative(reference) => fmt::Display::fmt(reference, f),
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let url = &self.url;

        match url.host_str() {
            | Some(host) if !host.is_empty() => {
                let rest = &url[Position::AfterScheme..];
                f.write_str(rest.strip_prefix(':').unwrap_or(rest))
            }
            | _ if self.rooted => f.write_str(&url[Position::BeforePath..]),
            | _ => {
                let rest = &url[Position::BeforePath..];
                f.write_str(&self.dots)?;
                f.write_str(rest.strip_prefix('/').unwrap_or(rest))
            }
        }
    }
}

fn set_url_path(url: &mut Url, path: &str) -> crate::Result<()> {
    if path.is_empty() || path.starts_with('/') || url.cannot_be_a_base() {
        url.set_path(path);
        return Ok(());
    }

    let escaped = path.replace('?', "%3F").replace('#', "%23");
    let mut resolved = url.join(&format!("./{escaped}"))?;
    resolved.set_query(url.query());
    resolved.set_fragment(url.fragment());

    *url = resolved;

    Ok(())
}

/// The `./` and `../` segments `raw` starts with.
fn leading_dots(raw: &str) -> &str {
    let path = raw.split(['?', '#']).next().unwrap_or_default();
    let mut end = 0;

    for segment in path.split_inclusive('/') {
        match segment {
            | "./" | "../" => end += segment.len(),
            | "." | ".." => {
                end += segment.len();
                break;
            }
            | _ => break,
        }
    }

    &raw[..end]
}

#[inline]
fn relative_base() -> crate::Result<Url> {
    Url::parse(RELATIVE_BASE).map_err(From::from)
}
