use serde::Deserialize;

/// Parse options for [`UrlBuilder`](crate::UrlBuilder).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Parse bare query tokens (`?flag&x=1`) as flag-only parameters
    /// instead of dropping them.
    #[serde(default = "default_keep_bare_keys")]
    pub keep_bare_keys: bool,
}

impl Config {
    #[inline]
    pub const fn keep_bare_keys(mut self, keep: bool) -> Self {
        self.keep_bare_keys = keep;
        self
    }
}

#[inline]
fn default_keep_bare_keys() -> bool {
    false
}
