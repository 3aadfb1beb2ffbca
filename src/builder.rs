use std::{fmt, str::FromStr};

use crate::{path::PathParts, query::QueryParams, util::Location, Config};

/// Fluent builder over a URL or relative reference.
///
/// Every mutator consumes the builder and hands it back, so calls chain:
///
/// ```
/// let url = burl_rs::UrlBuilder::from_string("http://www.test.com")
///     .add_path_parts(["api", "users"])
///     .set_query_param("page", "2")
///     .set_query_param_key("verbose");
///
/// assert_eq!(url.to_string(), "http://www.test.com/api/users?page=2&verbose");
/// ```
///
/// Mutators never fail. Blank arguments are ignored, and a builder created
/// from input that cannot be parsed starts out empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBuilder {
    pub(crate) location: Location,
    pub(crate) path_parts: PathParts,
    pub(crate) query_params: QueryParams,
    pub(crate) config: Config,
}

impl UrlBuilder {
    /// Parses `url`, falling back to an empty builder when it is blank or
    /// invalid.
    #[inline]
    pub fn from_string(url: impl AsRef<str>) -> Self {
        Self::from_string_with(url, Config::default())
    }

    pub fn from_string_with(url: impl AsRef<str>, config: Config) -> Self {
        let url = url.as_ref();

        Self::parse_with(url, config.clone()).unwrap_or_else(|err| {
            tracing::debug!(%url, %err, "falling back to an empty url");

            Self::from_location(Location::Empty, config)
        })
    }

    /// Parses `url`, reporting why it cannot be used.
    #[inline]
    pub fn parse(url: impl AsRef<str>) -> crate::Result<Self> {
        Self::parse_with(url, Config::default())
    }

    pub fn parse_with(
        url: impl AsRef<str>,
        config: Config,
    ) -> crate::Result<Self> {
        let location = Location::parse(url.as_ref())?;

        Ok(Self::from_location(location, config))
    }

    #[inline]
    pub fn from_url(url: url::Url) -> Self {
        Self::from_url_with(url, Config::default())
    }

    #[inline]
    pub fn from_url_with(url: url::Url, config: Config) -> Self {
        Self::from_location(Location::Absolute(url), config)
    }

    fn from_location(location: Location, config: Config) -> Self {
        let path_parts = PathParts::parse(&location.path());
        let query_params =
            QueryParams::parse(location.query().unwrap_or_default(), &config);

        Self {
            location,
            path_parts,
            query_params,
            config,
        }
    }

    /// `true` when the builder holds neither a URL nor a relative reference.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.location.is_empty()
    }

    /// The built URL, when it is absolute.
    #[inline]
    pub const fn as_url(&self) -> Option<&url::Url> {
        self.location.absolute()
    }

    #[inline]
    pub fn into_url(self) -> Option<url::Url> {
        self.location.into_absolute()
    }

    #[inline]
    pub fn path_parts(&self) -> &[String] {
        self.path_parts.as_slice()
    }

    /// Values of the query parameter `key`. Flag-only parameters have none.
    #[inline]
    pub fn query_values(&self, key: impl AsRef<str>) -> Option<&[String]> {
        self.query_params.values(key.as_ref())
    }

    #[inline]
    pub fn has_query_param(&self, key: impl AsRef<str>) -> bool {
        self.query_values(key).is_some()
    }

    #[inline]
    pub const fn config(&self) -> &Config {
        &self.config
    }
}

impl fmt::Display for UrlBuilder {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.location, f)
    }
}

impl FromStr for UrlBuilder {
    type Err = crate::Error;

    #[inline]
    fn from_str(s: &str) -> crate::Result<Self> {
        Self::parse(s)
    }
}

impl From<url::Url> for UrlBuilder {
    #[inline]
    fn from(url: url::Url) -> Self {
        Self::from_url(url)
    }
}
