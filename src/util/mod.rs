pub mod escape;
mod url;

pub use self::url::Location;
