//! Locator recognition and local filename derivation.
//!
//! A locator is a remote SVG URL under the configured asset origin:
//! the origin prefix, then a path drawn from `[a-zA-Z0-9_./-]`, then `.svg`.

mod path;

pub use path::filename_from_locator;

use anyhow::{Context, Result};
use regex::Regex;

/// Characters allowed in the path part of a locator (after the origin prefix).
const PATH_CLASS: &str = r"[a-zA-Z0-9_./-]+";

/// Compiled matcher for locators under one origin.
#[derive(Debug, Clone)]
pub struct LocatorPattern {
    regex: Regex,
}

impl LocatorPattern {
    /// Build the matcher for `origin` (e.g. `https://www.svgrepo.com/show/`).
    /// The origin is matched literally.
    pub fn new(origin: &str) -> Result<Self> {
        let source = format!(r"{}{}\.svg", regex::escape(origin), PATH_CLASS);
        let regex = Regex::new(&source)
            .with_context(|| format!("invalid locator pattern for origin {origin:?}"))?;
        Ok(Self { regex })
    }

    /// All locator substrings in `text`, in order of appearance (may repeat).
    pub fn find_all<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.regex.find_iter(text).map(|m| m.as_str()).collect()
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}
