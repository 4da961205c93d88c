//! Profile Command Value Object
//!
//! A single edit against a draft profile.

use crate::domain::value_object::profile_field::{
    AddressField, BasicField, FieldKey, PreferenceList, SpouseField,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOp {
    /// Append an empty entry
    Add,
    Remove { index: usize },
    Set { index: usize, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileCommand {
    SetBasicField { field: BasicField, value: String },
    SetHomeAddressField { field: AddressField, value: String },
    SetSpouseField { field: SpouseField, value: String },
    PreferenceList { list: PreferenceList, op: ListOp },
}

impl ProfileCommand {
    /// Scalar assignment for `key`. Preference lists are edited through
    /// [`ListOp`] and yield `None` here.
    pub fn set(key: FieldKey, value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        match key {
            FieldKey::Basic(field) => Some(ProfileCommand::SetBasicField { field, value }),
            FieldKey::HomeAddress(field) => {
                Some(ProfileCommand::SetHomeAddressField { field, value })
            }
            FieldKey::Spouse(field) => Some(ProfileCommand::SetSpouseField { field, value }),
            FieldKey::Preference(_) => None,
        }
    }

    /// The field whose validation error an edit clears
    pub fn field_key(&self) -> FieldKey {
        match self {
            ProfileCommand::SetBasicField { field, .. } => FieldKey::Basic(*field),
            ProfileCommand::SetHomeAddressField { field, .. } => FieldKey::HomeAddress(*field),
            ProfileCommand::SetSpouseField { field, .. } => FieldKey::Spouse(*field),
            ProfileCommand::PreferenceList { list, .. } => FieldKey::Preference(*list),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_scalar_keys() {
        let command = ProfileCommand::set(FieldKey::Spouse(SpouseField::FirstName), "Ana");
        assert_eq!(
            command,
            Some(ProfileCommand::SetSpouseField {
                field: SpouseField::FirstName,
                value: "Ana".to_string()
            })
        );
    }

    #[test]
    fn test_set_rejects_lists() {
        assert!(ProfileCommand::set(FieldKey::Preference(PreferenceList::Movies), "x").is_none());
    }

    #[test]
    fn test_field_key() {
        let command = ProfileCommand::PreferenceList {
            list: PreferenceList::Sports,
            op: ListOp::Remove { index: 0 },
        };
        assert_eq!(command.field_key(), FieldKey::Preference(PreferenceList::Sports));
    }
}
