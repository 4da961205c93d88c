//! Value Object Module

pub mod choice;
pub mod page;
pub mod profile_command;
pub mod profile_field;
pub mod profile_section;
pub mod validation_errors;
