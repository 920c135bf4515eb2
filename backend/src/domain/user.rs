//! User identity model.

use std::fmt;

use uuid::Uuid;

/// Validation errors returned by the identity constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptySubject,
    SubjectContainsWhitespace,
    EmptyIndustry,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySubject => write!(f, "authentication subject must not be empty"),
            Self::SubjectContainsWhitespace => {
                write!(f, "authentication subject must not contain whitespace")
            }
            Self::EmptyIndustry => write!(f, "industry must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable identifier issued by the external authentication provider.
///
/// Opaque to this service: the provider guarantees uniqueness, we only
/// require it to be a non-empty token without whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthSubject(String);

impl AuthSubject {
    /// Validate and construct an [`AuthSubject`].
    pub fn new(subject: impl Into<String>) -> Result<Self, UserValidationError> {
        let subject = subject.into();
        if subject.is_empty() {
            return Err(UserValidationError::EmptySubject);
        }
        if subject.chars().any(char::is_whitespace) {
            return Err(UserValidationError::SubjectContainsWhitespace);
        }
        Ok(Self(subject))
    }
}

impl AsRef<str> for AuthSubject {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AuthSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<AuthSubject> for String {
    fn from(value: AuthSubject) -> Self {
        value.0
    }
}

/// Industry classification a user belongs to.
///
/// Doubles as the natural key of the cached insight record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Industry(String);

impl Industry {
    /// Validate and construct an [`Industry`], trimming surrounding whitespace.
    pub fn new(industry: impl Into<String>) -> Result<Self, UserValidationError> {
        let industry = industry.into();
        let trimmed = industry.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyIndustry);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Industry {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Industry> for String {
    fn from(value: Industry) -> Self {
        value.0
    }
}

/// Application user.
///
/// ## Invariants
/// - `subject` is the provider identifier the user authenticated with.
/// - `industry` is non-empty; it selects which insight record applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: Uuid,
    subject: AuthSubject,
    industry: Industry,
}

impl User {
    /// Build a [`User`] from validated components.
    pub fn new(id: Uuid, subject: AuthSubject, industry: Industry) -> Self {
        Self {
            id,
            subject,
            industry,
        }
    }

    /// Stable row identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Authentication-provider subject.
    pub fn subject(&self) -> &AuthSubject {
        &self.subject
    }

    /// Industry classification.
    pub fn industry(&self) -> &Industry {
        &self.industry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", UserValidationError::EmptySubject)]
    #[case("user 123", UserValidationError::SubjectContainsWhitespace)]
    #[case("user\t123", UserValidationError::SubjectContainsWhitespace)]
    fn auth_subject_rejects_invalid_input(
        #[case] raw: &str,
        #[case] expected: UserValidationError,
    ) {
        assert_eq!(AuthSubject::new(raw), Err(expected));
    }

    #[test]
    fn auth_subject_accepts_provider_tokens() {
        let subject = AuthSubject::new("user_2abCdEf").expect("valid subject");
        assert_eq!(subject.as_ref(), "user_2abCdEf");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn industry_rejects_blank_input(#[case] raw: &str) {
        assert_eq!(Industry::new(raw), Err(UserValidationError::EmptyIndustry));
    }

    #[test]
    fn industry_trims_surrounding_whitespace() {
        let industry = Industry::new("  software-engineering ").expect("valid industry");
        assert_eq!(industry.as_ref(), "software-engineering");
    }

    #[test]
    fn user_exposes_components() {
        let id = Uuid::new_v4();
        let user = User::new(
            id,
            AuthSubject::new("user_1").expect("subject"),
            Industry::new("finance").expect("industry"),
        );
        assert_eq!(user.id(), id);
        assert_eq!(user.subject().as_ref(), "user_1");
        assert_eq!(user.industry().as_ref(), "finance");
    }
}
