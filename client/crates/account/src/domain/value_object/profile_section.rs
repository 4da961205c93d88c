//! Profile Section Value Object
//!
//! The tabs of the profile page. Validation is scoped to the active section.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProfileSection {
    #[default]
    Basic,
    Additional,
    Spouse,
    Preferences,
}

impl ProfileSection {
    pub const ALL: [ProfileSection; 4] = [
        ProfileSection::Basic,
        ProfileSection::Additional,
        ProfileSection::Spouse,
        ProfileSection::Preferences,
    ];

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            ProfileSection::Basic => "basic",
            ProfileSection::Additional => "additional",
            ProfileSection::Spouse => "spouse",
            ProfileSection::Preferences => "preferences",
        }
    }

    /// Sidebar tab label
    #[inline]
    pub const fn label(&self) -> &'static str {
        match self {
            ProfileSection::Basic => "Basic Details",
            ProfileSection::Additional => "Additional Details",
            ProfileSection::Spouse => "Spouse Details",
            ProfileSection::Preferences => "Personal Preferences",
        }
    }
}

impl FromStr for ProfileSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|section| section.code() == code)
            .ok_or_else(|| format!("Unknown section: {s}"))
    }
}

impl fmt::Display for ProfileSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
