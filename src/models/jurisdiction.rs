//! Jurisdiction model.
//!
//! A jurisdiction is a province whose bracket table determines provincial
//! tax. Names arriving from callers are free text, so parsing is lenient
//! about case and surrounding whitespace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A recognised Canadian jurisdiction.
///
/// Recognition does not imply a bracket table exists: the built-in schedule
/// only carries tables for Alberta and British Columbia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Jurisdiction {
    /// Alberta.
    Alberta,
    /// British Columbia.
    BritishColumbia,
    /// Manitoba.
    Manitoba,
    /// Quebec.
    Quebec,
    /// Saskatchewan.
    Saskatchewan,
    /// Newfoundland.
    Newfoundland,
}

impl Jurisdiction {
    /// Every recognised jurisdiction, in declaration order.
    pub const ALL: [Jurisdiction; 6] = [
        Jurisdiction::Alberta,
        Jurisdiction::BritishColumbia,
        Jurisdiction::Manitoba,
        Jurisdiction::Quebec,
        Jurisdiction::Saskatchewan,
        Jurisdiction::Newfoundland,
    ];

    /// Returns the canonical lower-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alberta => "alberta",
            Self::BritishColumbia => "british columbia",
            Self::Manitoba => "manitoba",
            Self::Quebec => "quebec",
            Self::Saskatchewan => "saskatchewan",
            Self::Newfoundland => "newfoundland",
        }
    }

    /// Returns the snake_case identifier used in file names and references.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::BritishColumbia => "british_columbia",
            other => other.as_str(),
        }
    }

    /// Parses a jurisdiction name, ignoring case and surrounding whitespace.
    ///
    /// Returns `None` for names outside the recognised set.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::Jurisdiction;
    ///
    /// assert_eq!(Jurisdiction::parse("British Columbia"), Some(Jurisdiction::BritishColumbia));
    /// assert_eq!(Jurisdiction::parse("  ALBERTA "), Some(Jurisdiction::Alberta));
    /// assert_eq!(Jurisdiction::parse("ontario"), None);
    /// ```
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|j| j.as_str() == name)
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
