//! Profile Field Value Objects
//!
//! Typed addresses for every editable profile field. A [`FieldKey`] renders
//! as a dotted path (`home_address.city`) which is also what validation
//! errors are keyed by.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BasicField {
    Avatar,
    Salutation,
    FirstName,
    LastName,
    EmailAddress,
    Gender,
    DateOfBirth,
    MaritalStatus,
}

impl BasicField {
    pub const ALL: [BasicField; 8] = [
        BasicField::Avatar,
        BasicField::Salutation,
        BasicField::FirstName,
        BasicField::LastName,
        BasicField::EmailAddress,
        BasicField::Gender,
        BasicField::DateOfBirth,
        BasicField::MaritalStatus,
    ];

    pub const fn key(&self) -> &'static str {
        match self {
            BasicField::Avatar => "avatar",
            BasicField::Salutation => "salutation",
            BasicField::FirstName => "first_name",
            BasicField::LastName => "last_name",
            BasicField::EmailAddress => "email_address",
            BasicField::Gender => "gender",
            BasicField::DateOfBirth => "date_of_birth",
            BasicField::MaritalStatus => "marital_status",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            BasicField::Avatar => "Avatar",
            BasicField::Salutation => "Salutation",
            BasicField::FirstName => "First name",
            BasicField::LastName => "Last name",
            BasicField::EmailAddress => "Email address",
            BasicField::Gender => "Gender",
            BasicField::DateOfBirth => "Date of birth",
            BasicField::MaritalStatus => "Marital status",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AddressField {
    AddressLine1,
    AddressLine2,
    City,
    State,
    PostalCode,
    Country,
}

impl AddressField {
    pub const ALL: [AddressField; 6] = [
        AddressField::AddressLine1,
        AddressField::AddressLine2,
        AddressField::City,
        AddressField::State,
        AddressField::PostalCode,
        AddressField::Country,
    ];

    pub const fn key(&self) -> &'static str {
        match self {
            AddressField::AddressLine1 => "address_line_1",
            AddressField::AddressLine2 => "address_line_2",
            AddressField::City => "city",
            AddressField::State => "state",
            AddressField::PostalCode => "postal_code",
            AddressField::Country => "country",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            AddressField::AddressLine1 => "Address line 1",
            AddressField::AddressLine2 => "Address line 2",
            AddressField::City => "City",
            AddressField::State => "State",
            AddressField::PostalCode => "Postal code",
            AddressField::Country => "Country",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpouseField {
    Salutation,
    FirstName,
    LastName,
    EmailAddress,
    DateOfBirth,
}

impl SpouseField {
    pub const ALL: [SpouseField; 5] = [
        SpouseField::Salutation,
        SpouseField::FirstName,
        SpouseField::LastName,
        SpouseField::EmailAddress,
        SpouseField::DateOfBirth,
    ];

    pub const fn key(&self) -> &'static str {
        match self {
            SpouseField::Salutation => "salutation",
            SpouseField::FirstName => "first_name",
            SpouseField::LastName => "last_name",
            SpouseField::EmailAddress => "email_address",
            SpouseField::DateOfBirth => "date_of_birth",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            SpouseField::Salutation => "Salutation",
            SpouseField::FirstName => "First name",
            SpouseField::LastName => "Last name",
            SpouseField::EmailAddress => "Email address",
            SpouseField::DateOfBirth => "Date of birth",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreferenceList {
    Hobbies,
    Interests,
    Sports,
    Musics,
    Movies,
}

impl PreferenceList {
    pub const ALL: [PreferenceList; 5] = [
        PreferenceList::Hobbies,
        PreferenceList::Interests,
        PreferenceList::Sports,
        PreferenceList::Musics,
        PreferenceList::Movies,
    ];

    pub const fn key(&self) -> &'static str {
        match self {
            PreferenceList::Hobbies => "hobbies",
            PreferenceList::Interests => "interests",
            PreferenceList::Sports => "sports",
            PreferenceList::Musics => "musics",
            PreferenceList::Movies => "movies",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            PreferenceList::Hobbies => "Hobbies",
            PreferenceList::Interests => "Interests",
            PreferenceList::Sports => "Sports",
            PreferenceList::Musics => "Music",
            PreferenceList::Movies => "Movies",
        }
    }
}

/// Address of a single profile field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKey {
    Basic(BasicField),
    HomeAddress(AddressField),
    Spouse(SpouseField),
    Preference(PreferenceList),
}

impl FieldKey {
    pub const fn label(&self) -> &'static str {
        match self {
            FieldKey::Basic(field) => field.label(),
            FieldKey::HomeAddress(field) => field.label(),
            FieldKey::Spouse(field) => field.label(),
            FieldKey::Preference(list) => list.label(),
        }
    }

    /// Every addressable key, in display order
    pub fn all() -> impl Iterator<Item = FieldKey> {
        BasicField::ALL
            .into_iter()
            .map(FieldKey::Basic)
            .chain(AddressField::ALL.into_iter().map(FieldKey::HomeAddress))
            .chain(SpouseField::ALL.into_iter().map(FieldKey::Spouse))
            .chain(PreferenceList::ALL.into_iter().map(FieldKey::Preference))
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKey::Basic(field) => f.write_str(field.key()),
            FieldKey::HomeAddress(field) => write!(f, "home_address.{}", field.key()),
            FieldKey::Spouse(field) => write!(f, "spouse.{}", field.key()),
            FieldKey::Preference(list) => write!(f, "personal_preferences.{}", list.key()),
        }
    }
}

impl FromStr for FieldKey {
    type Err = String;

    /// Accepts the dotted path, plus `address.` and `preferences.` as short forms
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.trim();
        let (group, name) = match path.split_once('.') {
            Some((group, name)) => (Some(group), name),
            None => (None, path),
        };

        let found = match group {
            None => BasicField::ALL
                .into_iter()
                .find(|f| f.key() == name)
                .map(FieldKey::Basic),
            Some("home_address" | "address") => AddressField::ALL
                .into_iter()
                .find(|f| f.key() == name)
                .map(FieldKey::HomeAddress),
            Some("spouse") => SpouseField::ALL
                .into_iter()
                .find(|f| f.key() == name)
                .map(FieldKey::Spouse),
            Some("personal_preferences" | "preferences") => PreferenceList::ALL
                .into_iter()
                .find(|l| l.key() == name)
                .map(FieldKey::Preference),
            Some(_) => None,
        };

        found.ok_or_else(|| format!("Unknown profile field: {s}"))
    }
}

impl From<BasicField> for FieldKey {
    fn from(value: BasicField) -> Self {
        FieldKey::Basic(value)
    }
}

impl From<AddressField> for FieldKey {
    fn from(value: AddressField) -> Self {
        FieldKey::HomeAddress(value)
    }
}

impl From<SpouseField> for FieldKey {
    fn from(value: SpouseField) -> Self {
        FieldKey::Spouse(value)
    }
}

impl From<PreferenceList> for FieldKey {
    fn from(value: PreferenceList) -> Self {
        FieldKey::Preference(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_dotted_path() {
        assert_eq!(FieldKey::Basic(BasicField::FirstName).to_string(), "first_name");
        assert_eq!(
            FieldKey::HomeAddress(AddressField::City).to_string(),
            "home_address.city"
        );
        assert_eq!(
            FieldKey::Preference(PreferenceList::Musics).to_string(),
            "personal_preferences.musics"
        );
    }

    #[test]
    fn test_parse_every_key_from_its_display() {
        for key in FieldKey::all() {
            assert_eq!(key.to_string().parse::<FieldKey>(), Ok(key));
        }
    }

    #[test]
    fn test_parse_short_forms() {
        assert_eq!(
            "address.postal_code".parse::<FieldKey>(),
            Ok(FieldKey::HomeAddress(AddressField::PostalCode))
        );
        assert_eq!(
            "preferences.hobbies".parse::<FieldKey>(),
            Ok(FieldKey::Preference(PreferenceList::Hobbies))
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert!("nickname".parse::<FieldKey>().is_err());
        assert!("spouse.gender".parse::<FieldKey>().is_err());
        assert!("work.city".parse::<FieldKey>().is_err());
    }
}
