//! Credentials Entity
//!
//! Sign-in and sign-up form input. Both types wipe their memory on drop and
//! never print the password.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Login form values
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    /// User ID as typed into the login field
    pub login: String,
    pub password: String,
    /// Persist the pair for the next visit
    pub remember_me: bool,
}

impl Credentials {
    pub fn new(login: impl Into<String>, password: impl Into<String>, remember_me: bool) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
            remember_me,
        }
    }

    /// Both fields are required; no trimming
    pub fn is_complete(&self) -> bool {
        !self.login.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"[REDACTED]")
            .field("remember_me", &self.remember_me)
            .finish()
    }
}

/// Registration form values
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Registration {
    pub login: String,
    pub password: String,
    pub confirm_password: String,
}

impl Registration {
    pub fn new(
        login: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    /// First failing rule, in field order
    pub fn check(&self) -> Result<(), &'static str> {
        if self.login.trim().is_empty() {
            return Err("Please enter your User ID");
        }
        if self.password.is_empty() {
            return Err("Please enter your password");
        }
        if self.confirm_password.is_empty() {
            return Err("Please confirm your password");
        }
        if self.password != self.confirm_password {
            return Err("Passwords do not match");
        }
        Ok(())
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("login", &self.login)
            .field("password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_complete() {
        assert!(Credentials::new("alice", "pw", false).is_complete());
        assert!(!Credentials::new("", "pw", false).is_complete());
        assert!(!Credentials::new("alice", "", true).is_complete());
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug = format!("{:?}", Credentials::new("alice", "hunter2", true));
        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter2"));

        let debug = format!("{:?}", Registration::new("bob", "s3cret", "s3cret"));
        assert!(!debug.contains("s3cret"));
    }

    #[test]
    fn test_registration_check() {
        assert_eq!(Registration::new("bob", "a", "a").check(), Ok(()));
        assert_eq!(
            Registration::new("  ", "a", "a").check(),
            Err("Please enter your User ID")
        );
        assert_eq!(
            Registration::new("bob", "", "").check(),
            Err("Please enter your password")
        );
        assert_eq!(
            Registration::new("bob", "a", "").check(),
            Err("Please confirm your password")
        );
        assert_eq!(
            Registration::new("bob", "a", "b").check(),
            Err("Passwords do not match")
        );
    }
}
