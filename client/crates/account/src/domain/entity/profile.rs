//! Profile Entity
//!
//! The remote user profile and the reducer that applies typed edit commands
//! to a draft copy of it.
//!
//! Every sub-record is always present: a missing or `null` value in the
//! server response deserializes to its empty default, so edits and renders
//! never meet an absent record. Fields this client does not know about are
//! kept in `extra` and sent back untouched on update.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::domain::value_object::{
    profile_command::{ListOp, ProfileCommand},
    profile_field::{AddressField, BasicField, FieldKey, PreferenceList, SpouseField},
    profile_section::ProfileSection,
    validation_errors::ValidationErrors,
};

/// `null` and missing both read as the type's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// List entries; `null` items become empty placeholders
fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items: Option<Vec<Option<String>>> = Option::deserialize(deserializer)?;
    Ok(items
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HomeAddress {
    #[serde(default, deserialize_with = "null_as_default")]
    pub address_line_1: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address_line_2: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub postal_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HomeAddress {
    pub fn get(&self, field: AddressField) -> &str {
        match field {
            AddressField::AddressLine1 => &self.address_line_1,
            AddressField::AddressLine2 => &self.address_line_2,
            AddressField::City => &self.city,
            AddressField::State => &self.state,
            AddressField::PostalCode => &self.postal_code,
            AddressField::Country => &self.country,
        }
    }

    fn slot(&mut self, field: AddressField) -> &mut String {
        match field {
            AddressField::AddressLine1 => &mut self.address_line_1,
            AddressField::AddressLine2 => &mut self.address_line_2,
            AddressField::City => &mut self.city,
            AddressField::State => &mut self.state,
            AddressField::PostalCode => &mut self.postal_code,
            AddressField::Country => &mut self.country,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spouse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub salutation: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email_address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date_of_birth: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Spouse {
    pub fn get(&self, field: SpouseField) -> &str {
        match field {
            SpouseField::Salutation => &self.salutation,
            SpouseField::FirstName => &self.first_name,
            SpouseField::LastName => &self.last_name,
            SpouseField::EmailAddress => &self.email_address,
            SpouseField::DateOfBirth => &self.date_of_birth,
        }
    }

    fn slot(&mut self, field: SpouseField) -> &mut String {
        match field {
            SpouseField::Salutation => &mut self.salutation,
            SpouseField::FirstName => &mut self.first_name,
            SpouseField::LastName => &mut self.last_name,
            SpouseField::EmailAddress => &mut self.email_address,
            SpouseField::DateOfBirth => &mut self.date_of_birth,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalPreferences {
    #[serde(default, deserialize_with = "string_list")]
    pub hobbies: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub interests: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub sports: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub musics: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub movies: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PersonalPreferences {
    pub fn get(&self, list: PreferenceList) -> &[String] {
        match list {
            PreferenceList::Hobbies => &self.hobbies,
            PreferenceList::Interests => &self.interests,
            PreferenceList::Sports => &self.sports,
            PreferenceList::Musics => &self.musics,
            PreferenceList::Movies => &self.movies,
        }
    }

    fn slot(&mut self, list: PreferenceList) -> &mut Vec<String> {
        match list {
            PreferenceList::Hobbies => &mut self.hobbies,
            PreferenceList::Interests => &mut self.interests,
            PreferenceList::Sports => &mut self.sports,
            PreferenceList::Musics => &mut self.musics,
            PreferenceList::Movies => &mut self.movies,
        }
    }
}

/// User profile as served by the profile endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub avatar: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub salutation: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email_address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gender: String,
    /// ISO date (`YYYY-MM-DD`) or empty
    #[serde(default, deserialize_with = "null_as_default")]
    pub date_of_birth: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub marital_status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub home_address: HomeAddress,
    #[serde(default, deserialize_with = "null_as_default")]
    pub spouse: Spouse,
    #[serde(default, deserialize_with = "null_as_default")]
    pub personal_preferences: PersonalPreferences,
    /// Server fields this client does not edit
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Profile {
    pub fn basic(&self, field: BasicField) -> &str {
        match field {
            BasicField::Avatar => &self.avatar,
            BasicField::Salutation => &self.salutation,
            BasicField::FirstName => &self.first_name,
            BasicField::LastName => &self.last_name,
            BasicField::EmailAddress => &self.email_address,
            BasicField::Gender => &self.gender,
            BasicField::DateOfBirth => &self.date_of_birth,
            BasicField::MaritalStatus => &self.marital_status,
        }
    }

    fn basic_slot(&mut self, field: BasicField) -> &mut String {
        match field {
            BasicField::Avatar => &mut self.avatar,
            BasicField::Salutation => &mut self.salutation,
            BasicField::FirstName => &mut self.first_name,
            BasicField::LastName => &mut self.last_name,
            BasicField::EmailAddress => &mut self.email_address,
            BasicField::Gender => &mut self.gender,
            BasicField::DateOfBirth => &mut self.date_of_birth,
            BasicField::MaritalStatus => &mut self.marital_status,
        }
    }

    /// Scalar value at `key`; lists have no scalar value
    pub fn value(&self, key: FieldKey) -> Option<&str> {
        match key {
            FieldKey::Basic(field) => Some(self.basic(field)),
            FieldKey::HomeAddress(field) => Some(self.home_address.get(field)),
            FieldKey::Spouse(field) => Some(self.spouse.get(field)),
            FieldKey::Preference(_) => None,
        }
    }

    /// The spouse sub-form is shown only for married profiles
    pub fn shows_spouse(&self) -> bool {
        self.marital_status.trim().eq_ignore_ascii_case("married")
    }

    /// Apply one edit. Returns `false` when the command addressed a list
    /// position that does not exist.
    pub fn apply(&mut self, command: &ProfileCommand) -> bool {
        match command {
            ProfileCommand::SetBasicField { field, value } => {
                *self.basic_slot(*field) = value.clone();
                true
            }
            ProfileCommand::SetHomeAddressField { field, value } => {
                *self.home_address.slot(*field) = value.clone();
                true
            }
            ProfileCommand::SetSpouseField { field, value } => {
                *self.spouse.slot(*field) = value.clone();
                true
            }
            ProfileCommand::PreferenceList { list, op } => {
                let items = self.personal_preferences.slot(*list);
                match op {
                    ListOp::Add => {
                        items.push(String::new());
                        true
                    }
                    ListOp::Remove { index } if *index < items.len() => {
                        items.remove(*index);
                        true
                    }
                    ListOp::Set { index, value } => match items.get_mut(*index) {
                        Some(item) => {
                            *item = value.clone();
                            true
                        }
                        None => false,
                    },
                    ListOp::Remove { .. } => false,
                }
            }
        }
    }

    /// Required-field rules of one section
    pub fn validate(&self, section: ProfileSection) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        let mut require = |key: FieldKey, value: &str, message: &str| {
            if value.trim().is_empty() {
                errors.insert(key, message);
            }
        };

        match section {
            ProfileSection::Basic => {
                require(
                    BasicField::Salutation.into(),
                    &self.salutation,
                    "Please select your salutation",
                );
                require(
                    BasicField::FirstName.into(),
                    &self.first_name,
                    "Please enter your first name",
                );
                require(
                    BasicField::LastName.into(),
                    &self.last_name,
                    "Please enter your last name",
                );
                require(
                    BasicField::EmailAddress.into(),
                    &self.email_address,
                    "Please enter your email address",
                );
            }
            ProfileSection::Additional => {
                require(
                    BasicField::Gender.into(),
                    &self.gender,
                    "Please select your gender",
                );
                require(
                    BasicField::DateOfBirth.into(),
                    &self.date_of_birth,
                    "Please enter your date of birth",
                );
            }
            ProfileSection::Spouse => {
                require(
                    BasicField::MaritalStatus.into(),
                    &self.marital_status,
                    "Please select your marital status",
                );
                if self.shows_spouse() {
                    require(
                        SpouseField::Salutation.into(),
                        &self.spouse.salutation,
                        "Please select your spouse's salutation",
                    );
                    require(
                        SpouseField::FirstName.into(),
                        &self.spouse.first_name,
                        "Please enter your spouse's first name",
                    );
                    require(
                        SpouseField::LastName.into(),
                        &self.spouse.last_name,
                        "Please enter your spouse's last name",
                    );
                }
            }
            ProfileSection::Preferences => {
                for list in PreferenceList::ALL {
                    let items = self.personal_preferences.get(list);
                    if !items.iter().any(|item| !item.trim().is_empty()) {
                        errors.insert(list.into(), missing_entry_message(list));
                    }
                }
            }
        }

        errors
    }
}

fn missing_entry_message(list: PreferenceList) -> &'static str {
    match list {
        PreferenceList::Hobbies => "Please add at least one hobby",
        PreferenceList::Interests => "Please add at least one interest",
        PreferenceList::Sports => "Please add at least one sport",
        PreferenceList::Musics => "Please add at least one music genre",
        PreferenceList::Movies => "Please add at least one movie",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete() -> Profile {
        serde_json::from_value(json!({
            "salutation": "mr",
            "first_name": "Ana",
            "last_name": "Silva",
            "email_address": "ana@example.com",
            "gender": "female",
            "date_of_birth": "1990-04-12",
            "marital_status": "single",
            "personal_preferences": {
                "hobbies": ["chess"],
                "interests": ["history"],
                "sports": ["tennis"],
                "musics": ["jazz"],
                "movies": ["Heat"]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_missing_sub_records_default() {
        let profile: Profile = serde_json::from_value(json!({ "first_name": "ana" })).unwrap();
        assert_eq!(profile.first_name, "ana");
        assert_eq!(profile.home_address, HomeAddress::default());
        assert_eq!(profile.spouse, Spouse::default());
        assert!(profile.personal_preferences.hobbies.is_empty());
    }

    #[test]
    fn test_null_values_default() {
        let profile: Profile = serde_json::from_value(json!({
            "gender": null,
            "home_address": null,
            "spouse": { "first_name": null },
            "personal_preferences": { "hobbies": null, "movies": ["Heat", null] }
        }))
        .unwrap();
        assert_eq!(profile.gender, "");
        assert_eq!(profile.home_address, HomeAddress::default());
        assert_eq!(profile.spouse.first_name, "");
        assert!(profile.personal_preferences.hobbies.is_empty());
        assert_eq!(profile.personal_preferences.movies, vec!["Heat", ""]);
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let source = json!({
            "user_id": 42,
            "first_name": "ana",
            "home_address": { "city": "Lisbon", "geo": { "lat": 1 } }
        });
        let profile: Profile = serde_json::from_value(source).unwrap();
        assert_eq!(profile.extra.get("user_id"), Some(&json!(42)));

        let sent = serde_json::to_value(&profile).unwrap();
        assert_eq!(sent["user_id"], json!(42));
        assert_eq!(sent["home_address"]["geo"], json!({ "lat": 1 }));
        assert_eq!(sent["spouse"]["first_name"], json!(""));
    }

    #[test]
    fn test_apply_scalar_commands() {
        let mut profile = Profile::default();
        assert!(profile.apply(&ProfileCommand::SetHomeAddressField {
            field: AddressField::City,
            value: "Porto".into(),
        }));
        assert!(profile.apply(&ProfileCommand::SetSpouseField {
            field: SpouseField::LastName,
            value: "Costa".into(),
        }));
        assert!(profile.apply(&ProfileCommand::SetBasicField {
            field: BasicField::Gender,
            value: "male".into(),
        }));
        assert_eq!(profile.home_address.city, "Porto");
        assert_eq!(profile.spouse.last_name, "Costa");
        assert_eq!(profile.gender, "male");
    }

    #[test]
    fn test_apply_list_commands() {
        let mut profile = Profile::default();
        let list = PreferenceList::Hobbies;
        let op = |op| ProfileCommand::PreferenceList { list, op };

        assert!(profile.apply(&op(ListOp::Add)));
        assert!(profile.apply(&op(ListOp::Set { index: 0, value: "chess".into() })));
        assert!(profile.apply(&op(ListOp::Add)));
        assert!(profile.apply(&op(ListOp::Set { index: 1, value: "go".into() })));
        assert!(profile.apply(&op(ListOp::Add)));
        assert_eq!(profile.personal_preferences.hobbies, vec!["chess", "go", ""]);

        assert!(profile.apply(&op(ListOp::Remove { index: 0 })));
        assert_eq!(profile.personal_preferences.hobbies, vec!["go", ""]);

        assert!(!profile.apply(&op(ListOp::Remove { index: 5 })));
        assert!(!profile.apply(&op(ListOp::Set { index: 2, value: "x".into() })));
        assert_eq!(profile.personal_preferences.hobbies, vec!["go", ""]);
    }

    #[test]
    fn test_validate_complete_profile() {
        let profile = complete();
        for section in ProfileSection::ALL {
            assert!(profile.validate(section).is_empty(), "{section}");
        }
    }

    #[test]
    fn test_validate_basic_section() {
        let mut profile = complete();
        profile.first_name = "   ".into();
        profile.email_address.clear();
        profile.gender.clear();

        let errors = profile.validate(ProfileSection::Basic);
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.get(&BasicField::FirstName.into()),
            Some("Please enter your first name")
        );
        assert!(errors.contains(&BasicField::EmailAddress.into()));
        // other sections are not checked
        assert!(!errors.contains(&BasicField::Gender.into()));
    }

    #[test]
    fn test_validate_spouse_only_when_married() {
        let mut profile = complete();
        assert!(profile.validate(ProfileSection::Spouse).is_empty());

        profile.marital_status = "Married".into();
        let errors = profile.validate(ProfileSection::Spouse);
        let keys: Vec<String> = errors.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(
            keys,
            vec!["spouse.salutation", "spouse.first_name", "spouse.last_name"]
        );

        profile.marital_status.clear();
        let errors = profile.validate(ProfileSection::Spouse);
        assert_eq!(
            errors.get(&BasicField::MaritalStatus.into()),
            Some("Please select your marital status")
        );
    }

    #[test]
    fn test_validate_preferences_needs_non_blank_entry() {
        let mut profile = complete();
        profile.personal_preferences.sports = vec!["  ".into(), String::new()];
        profile.personal_preferences.movies.clear();

        let errors = profile.validate(ProfileSection::Preferences);
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&PreferenceList::Sports.into()));
        assert!(errors.contains(&PreferenceList::Movies.into()));
    }
}
