//! Field Path Parsing
//!
//! Turns command-line edit arguments into typed profile commands.

use account::domain::value_object::{
    profile_command::{ListOp, ProfileCommand},
    profile_field::{FieldKey, PreferenceList},
};

/// `key=value`, where key is a dotted field path
pub fn parse_assignment(raw: &str) -> Result<ProfileCommand, String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("Expected KEY=VALUE, got {raw}"))?;
    let key: FieldKey = key.parse()?;
    ProfileCommand::set(key, value)
        .ok_or_else(|| format!("{key} is a list; use --add, --item or --remove"))
}

/// `hobbies` or `personal_preferences.hobbies`
pub fn parse_list(raw: &str) -> Result<PreferenceList, String> {
    let raw = raw.trim();
    let path = if raw.contains('.') {
        raw.to_string()
    } else {
        format!("personal_preferences.{raw}")
    };
    match path.parse::<FieldKey>() {
        Ok(FieldKey::Preference(list)) => Ok(list),
        _ => Err(format!("Unknown preference list: {raw}")),
    }
}

fn parse_position(raw: &str) -> Result<(PreferenceList, usize), String> {
    let (list, index) = raw
        .split_once(':')
        .ok_or_else(|| format!("Expected LIST:INDEX, got {raw}"))?;
    let index = index
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("Invalid index in {raw}: {e}"))?;
    Ok((parse_list(list)?, index))
}

/// `list:index`
pub fn parse_removal(raw: &str) -> Result<ProfileCommand, String> {
    let (list, index) = parse_position(raw)?;
    Ok(ProfileCommand::PreferenceList {
        list,
        op: ListOp::Remove { index },
    })
}

/// `list:index=value`
pub fn parse_item(raw: &str) -> Result<ProfileCommand, String> {
    let (position, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("Expected LIST:INDEX=VALUE, got {raw}"))?;
    let (list, index) = parse_position(position)?;
    Ok(ProfileCommand::PreferenceList {
        list,
        op: ListOp::Set {
            index,
            value: value.to_string(),
        },
    })
}

pub fn add_command(list: PreferenceList) -> ProfileCommand {
    ProfileCommand::PreferenceList {
        list,
        op: ListOp::Add,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use account::domain::value_object::profile_field::{AddressField, BasicField};

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("home_address.city=Lisbon"),
            Ok(ProfileCommand::SetHomeAddressField {
                field: AddressField::City,
                value: "Lisbon".to_string()
            })
        );
        // value may contain '='
        assert_eq!(
            parse_assignment("avatar=https://x.test/a.png?s=2"),
            Ok(ProfileCommand::SetBasicField {
                field: BasicField::Avatar,
                value: "https://x.test/a.png?s=2".to_string()
            })
        );
        assert!(parse_assignment("first_name").is_err());
        assert!(parse_assignment("nickname=x").is_err());
        assert!(parse_assignment("personal_preferences.hobbies=x").is_err());
    }

    #[test]
    fn test_parse_list_items() {
        assert_eq!(parse_list("musics"), Ok(PreferenceList::Musics));
        assert_eq!(parse_list("preferences.movies"), Ok(PreferenceList::Movies));
        assert!(parse_list("first_name").is_err());

        assert_eq!(
            parse_item("hobbies:2=go"),
            Ok(ProfileCommand::PreferenceList {
                list: PreferenceList::Hobbies,
                op: ListOp::Set {
                    index: 2,
                    value: "go".to_string()
                }
            })
        );
        assert_eq!(
            parse_removal("sports:0"),
            Ok(ProfileCommand::PreferenceList {
                list: PreferenceList::Sports,
                op: ListOp::Remove { index: 0 }
            })
        );
        assert!(parse_removal("sports:-1").is_err());
        assert!(parse_item("sports:0").is_err());
    }
}
