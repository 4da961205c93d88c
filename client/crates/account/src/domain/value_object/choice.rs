//! Select Options
//!
//! Fixed option sets offered by the profile form's select inputs.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

impl Choice {
    const fn new(value: &'static str, label: &'static str) -> Self {
        Self { value, label }
    }
}

pub const SALUTATIONS: &[Choice] = &[
    Choice::new("mr", "Mr."),
    Choice::new("ms", "Ms."),
    Choice::new("mrs", "Mrs."),
    Choice::new("dr", "Dr."),
    Choice::new("prof", "Prof."),
    Choice::new("eng", "Engineer"),
];

pub const GENDERS: &[Choice] = &[Choice::new("male", "Male"), Choice::new("female", "Female")];

pub const MARITAL_STATUSES: &[Choice] = &[
    Choice::new("single", "Single"),
    Choice::new("married", "Married"),
    Choice::new("divorced", "Divorced"),
    Choice::new("widowed", "Widowed"),
];

/// Case-insensitive lookup of a stored value
pub fn find(choices: &'static [Choice], value: &str) -> Option<&'static Choice> {
    let value = value.trim();
    choices.iter().find(|c| c.value.eq_ignore_ascii_case(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find() {
        assert_eq!(find(SALUTATIONS, "ENG").map(|c| c.label), Some("Engineer"));
        assert_eq!(find(GENDERS, " female ").map(|c| c.value), Some("female"));
        assert!(find(MARITAL_STATUSES, "complicated").is_none());
    }
}
