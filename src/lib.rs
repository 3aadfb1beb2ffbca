//! Fluent, chainable URL building.
//!
//! [`UrlBuilder`] parses a URL (or a relative reference such as `/foo/bar`)
//! into path segments and query parameters, lets them be changed through
//! chained calls and serializes the result with [`ToString`].

mod builder;
mod config;
mod error;
mod path;
mod query;
mod util;

pub use self::{
    builder::UrlBuilder,
    config::Config,
    error::{Error, Result},
    query::QueryParam,
};
