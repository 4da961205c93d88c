//! Section Renderer
//!
//! Pure function from the active section and the draft state to a view of
//! that section. Display mode formats values for reading; edit mode yields
//! inputs carrying the raw value and any inline error.

use std::fmt;

use chrono::{DateTime, NaiveDate};

use crate::application::profile_draft::ProfileViewState;
use crate::domain::entity::profile::Profile;
use crate::domain::value_object::{
    choice::{self, Choice, GENDERS, MARITAL_STATUSES, SALUTATIONS},
    profile_field::{AddressField, BasicField, FieldKey, PreferenceList, SpouseField},
    profile_section::ProfileSection,
};

pub const AVATAR_FALLBACK_URL: &str =
    "https://ui-avatars.com/api/?name=NA&size=200&background=333333&color=ffffff";

const NOT_SPECIFIED: &str = "Not specified";
const DATE_PLACEHOLDER: &str = "-";
const MARITAL_PLACEHOLDER: &str = "N/A";
const LOADING: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    Date,
    Url,
    Select(&'static [Choice]),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldContent {
    Loading,
    Text(String),
    Image(String),
    Input {
        kind: InputKind,
        value: String,
        error: Option<String>,
    },
    List {
        items: Vec<String>,
        error: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub key: FieldKey,
    pub label: &'static str,
    pub required: bool,
    pub content: FieldContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub section: ProfileSection,
    pub title: &'static str,
    pub editing: bool,
    pub fields: Vec<FieldView>,
}

impl SectionView {
    pub fn field(&self, key: FieldKey) -> Option<&FieldView> {
        self.fields.iter().find(|f| f.key == key)
    }
}

/// Render one section of the profile
pub fn render_section(section: ProfileSection, state: &ProfileViewState<'_>) -> SectionView {
    let empty = Profile::default();
    let profile = state.draft.unwrap_or(&empty);
    let builder = Builder { state, profile };

    let fields = match section {
        ProfileSection::Basic => vec![
            builder.basic(BasicField::Avatar, InputKind::Url, false),
            builder.basic(BasicField::Salutation, InputKind::Select(SALUTATIONS), true),
            builder.basic(BasicField::FirstName, InputKind::Text, true),
            builder.basic(BasicField::LastName, InputKind::Text, true),
            builder.basic(BasicField::EmailAddress, InputKind::Email, true),
        ],
        ProfileSection::Additional => {
            let mut fields = vec![
                builder.basic(BasicField::Gender, InputKind::Select(GENDERS), true),
                builder.basic(BasicField::DateOfBirth, InputKind::Date, true),
            ];
            fields.extend(
                AddressField::ALL
                    .into_iter()
                    .map(|field| builder.address(field)),
            );
            fields
        }
        ProfileSection::Spouse => {
            let mut fields = vec![builder.basic(
                BasicField::MaritalStatus,
                InputKind::Select(MARITAL_STATUSES),
                true,
            )];
            if profile.shows_spouse() {
                fields.extend([
                    builder.spouse(SpouseField::Salutation, InputKind::Select(SALUTATIONS), true),
                    builder.spouse(SpouseField::FirstName, InputKind::Text, true),
                    builder.spouse(SpouseField::LastName, InputKind::Text, true),
                    builder.spouse(SpouseField::EmailAddress, InputKind::Email, false),
                    builder.spouse(SpouseField::DateOfBirth, InputKind::Date, false),
                ]);
            }
            fields
        }
        ProfileSection::Preferences => PreferenceList::ALL
            .into_iter()
            .map(|list| builder.list(list))
            .collect(),
    };

    SectionView {
        section,
        title: section.label(),
        editing: state.editing,
        fields,
    }
}

struct Builder<'a> {
    state: &'a ProfileViewState<'a>,
    profile: &'a Profile,
}

impl Builder<'_> {
    fn view(&self, key: FieldKey, required: bool, content: FieldContent) -> FieldView {
        FieldView {
            key,
            label: key.label(),
            required,
            content,
        }
    }

    fn scalar(
        &self,
        key: FieldKey,
        kind: InputKind,
        required: bool,
        value: &str,
        display: impl FnOnce(&str) -> FieldContent,
    ) -> FieldView {
        let content = if self.state.loading {
            FieldContent::Loading
        } else if self.state.editing {
            FieldContent::Input {
                kind,
                value: value.to_string(),
                error: self.state.errors.get(&key).map(str::to_string),
            }
        } else {
            display(value)
        };
        self.view(key, required, content)
    }

    fn basic(&self, field: BasicField, kind: InputKind, required: bool) -> FieldView {
        let value = self.profile.basic(field);
        self.scalar(field.into(), kind, required, value, |value| match field {
            BasicField::Avatar => FieldContent::Image(avatar_url(value)),
            BasicField::Salutation => FieldContent::Text(display_salutation(value)),
            BasicField::FirstName | BasicField::LastName | BasicField::Gender => {
                FieldContent::Text(or_placeholder(capitalize(value), NOT_SPECIFIED))
            }
            BasicField::MaritalStatus => {
                FieldContent::Text(or_placeholder(capitalize(value), MARITAL_PLACEHOLDER))
            }
            BasicField::DateOfBirth => FieldContent::Text(format_date(value)),
            BasicField::EmailAddress => {
                FieldContent::Text(or_placeholder(value.trim().to_string(), NOT_SPECIFIED))
            }
        })
    }

    fn address(&self, field: AddressField) -> FieldView {
        let value = self.profile.home_address.get(field);
        self.scalar(field.into(), InputKind::Text, false, value, |value| {
            FieldContent::Text(or_placeholder(value.trim().to_string(), NOT_SPECIFIED))
        })
    }

    fn spouse(&self, field: SpouseField, kind: InputKind, required: bool) -> FieldView {
        let value = self.profile.spouse.get(field);
        self.scalar(field.into(), kind, required, value, |value| match field {
            SpouseField::Salutation => FieldContent::Text(display_salutation(value)),
            SpouseField::FirstName | SpouseField::LastName => {
                FieldContent::Text(or_placeholder(capitalize(value), NOT_SPECIFIED))
            }
            SpouseField::DateOfBirth => FieldContent::Text(format_date(value)),
            SpouseField::EmailAddress => {
                FieldContent::Text(or_placeholder(value.trim().to_string(), NOT_SPECIFIED))
            }
        })
    }

    fn list(&self, list: PreferenceList) -> FieldView {
        let key = FieldKey::from(list);
        let items = self.profile.personal_preferences.get(list);
        let content = if self.state.loading {
            FieldContent::Loading
        } else if self.state.editing {
            FieldContent::List {
                items: items.to_vec(),
                error: self.state.errors.get(&key).map(str::to_string),
            }
        } else {
            FieldContent::Text(join_list(items))
        };
        self.view(key, true, content)
    }
}

/// Upper-case the first character
pub fn capitalize(value: &str) -> String {
    let value = value.trim();
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn or_placeholder(value: String, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value
    }
}

/// `mr` reads as `Mr.`; `eng` keeps its long label
pub fn display_salutation(value: &str) -> String {
    match choice::find(SALUTATIONS, value) {
        Some(choice) => choice.label.to_string(),
        None if value.trim().is_empty() => NOT_SPECIFIED.to_string(),
        None => format!("{}.", capitalize(value)),
    }
}

/// `M/D/YYYY`, the placeholder when unset, the raw text when unparseable
pub fn format_date(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return DATE_PLACEHOLDER.to_string();
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()));
    match date {
        Some(date) => date.format("%-m/%-d/%Y").to_string(),
        None => value.to_string(),
    }
}

/// Non-blank entries joined by `", "`
pub fn join_list(items: &[String]) -> String {
    let items: Vec<&str> = items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .collect();
    if items.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        items.join(", ")
    }
}

pub fn avatar_url(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        AVATAR_FALLBACK_URL.to_string()
    } else {
        value.to_string()
    }
}

impl fmt::Display for FieldView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.required { "*" } else { "" };
        write!(f, "{}{}: ", self.label, marker)?;
        match &self.content {
            FieldContent::Loading => f.write_str(LOADING),
            FieldContent::Text(text) | FieldContent::Image(text) => f.write_str(text),
            FieldContent::Input { kind, value, error } => {
                write!(f, "[{value}]")?;
                if let InputKind::Select(choices) = kind {
                    let options: Vec<String> = choices
                        .iter()
                        .map(|c| format!("{}={}", c.value, c.label))
                        .collect();
                    write!(f, " ({})", options.join(", "))?;
                }
                if let Some(error) = error {
                    write!(f, "  ! {error}")?;
                }
                Ok(())
            }
            FieldContent::List { items, error } => {
                if let Some(error) = error {
                    write!(f, " ! {error}")?;
                }
                for (index, item) in items.iter().enumerate() {
                    write!(f, "\n    {index}: [{item}]")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for SectionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if self.editing { " (editing)" } else { "" };
        writeln!(f, "== {}{} ==", self.title, mode)?;
        for field in &self.fields {
            writeln!(f, "  {field}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::validation_errors::ValidationErrors;
    use serde_json::json;

    fn state<'a>(
        draft: Option<&'a Profile>,
        errors: &'a ValidationErrors,
        editing: bool,
    ) -> ProfileViewState<'a> {
        ProfileViewState {
            draft,
            errors,
            editing,
            loading: false,
        }
    }

    fn text(view: &SectionView, key: impl Into<FieldKey>) -> String {
        match &view.field(key.into()).unwrap().content {
            FieldContent::Text(text) | FieldContent::Image(text) => text.clone(),
            other => panic!("not display content: {other:?}"),
        }
    }

    #[test]
    fn test_display_basic_section() {
        let profile: Profile = serde_json::from_value(json!({ "first_name": "ana" })).unwrap();
        let errors = ValidationErrors::new();
        let view = render_section(ProfileSection::Basic, &state(Some(&profile), &errors, false));

        assert_eq!(view.title, "Basic Details");
        assert_eq!(text(&view, BasicField::FirstName), "Ana");
        assert_eq!(text(&view, BasicField::LastName), "Not specified");
        assert_eq!(text(&view, BasicField::Salutation), "Not specified");
        assert_eq!(text(&view, BasicField::Avatar), AVATAR_FALLBACK_URL);
    }

    #[test]
    fn test_display_additional_section() {
        let profile: Profile = serde_json::from_value(json!({
            "gender": "female",
            "date_of_birth": "1990-04-02",
            "home_address": { "city": "Lisbon" }
        }))
        .unwrap();
        let errors = ValidationErrors::new();
        let view =
            render_section(ProfileSection::Additional, &state(Some(&profile), &errors, false));

        assert_eq!(text(&view, BasicField::Gender), "Female");
        assert_eq!(text(&view, BasicField::DateOfBirth), "4/2/1990");
        assert_eq!(text(&view, AddressField::City), "Lisbon");
        assert_eq!(text(&view, AddressField::Country), "Not specified");
    }

    #[test]
    fn test_spouse_fields_follow_marital_status() {
        let mut profile = Profile::default();
        let errors = ValidationErrors::new();
        let view = render_section(ProfileSection::Spouse, &state(Some(&profile), &errors, false));
        assert_eq!(view.fields.len(), 1);
        assert_eq!(text(&view, BasicField::MaritalStatus), "N/A");

        profile.marital_status = "married".into();
        profile.spouse.salutation = "dr".into();
        let view = render_section(ProfileSection::Spouse, &state(Some(&profile), &errors, false));
        assert_eq!(view.fields.len(), 6);
        assert_eq!(text(&view, BasicField::MaritalStatus), "Married");
        assert_eq!(text(&view, SpouseField::Salutation), "Dr.");
        assert_eq!(text(&view, SpouseField::DateOfBirth), "-");
    }

    #[test]
    fn test_preferences_display() {
        let mut profile = Profile::default();
        profile.personal_preferences.hobbies = vec!["chess".into(), " ".into(), "go".into()];
        let errors = ValidationErrors::new();
        let view =
            render_section(ProfileSection::Preferences, &state(Some(&profile), &errors, false));
        assert_eq!(text(&view, PreferenceList::Hobbies), "chess, go");
        assert_eq!(text(&view, PreferenceList::Movies), "Not specified");
    }

    #[test]
    fn test_edit_mode_carries_raw_values_and_errors() {
        let mut profile = Profile::default();
        profile.salutation = "eng".into();
        let mut errors = ValidationErrors::new();
        errors.insert(BasicField::FirstName.into(), "Please enter your first name");
        let view = render_section(ProfileSection::Basic, &state(Some(&profile), &errors, true));

        assert_eq!(
            view.field(BasicField::Salutation.into()).unwrap().content,
            FieldContent::Input {
                kind: InputKind::Select(SALUTATIONS),
                value: "eng".into(),
                error: None,
            }
        );
        assert_eq!(
            view.field(BasicField::FirstName.into()).unwrap().content,
            FieldContent::Input {
                kind: InputKind::Text,
                value: String::new(),
                error: Some("Please enter your first name".into()),
            }
        );
        assert!(view.to_string().contains("! Please enter your first name"));
    }

    #[test]
    fn test_loading_placeholder() {
        let errors = ValidationErrors::new();
        let state = ProfileViewState {
            draft: None,
            errors: &errors,
            editing: true,
            loading: true,
        };
        let view = render_section(ProfileSection::Preferences, &state);
        assert!(view.fields.iter().all(|f| f.content == FieldContent::Loading));
    }

    #[test]
    fn test_formatters() {
        assert_eq!(capitalize("ana"), "Ana");
        assert_eq!(capitalize(""), "");
        assert_eq!(display_salutation("mrs"), "Mrs.");
        assert_eq!(display_salutation("sir"), "Sir.");
        assert_eq!(format_date("2001-12-25T10:00:00Z"), "12/25/2001");
        assert_eq!(format_date("sometime"), "sometime");
        assert_eq!(join_list(&[]), "Not specified");
    }
}
