use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
}

/// Partial update. Absent fields keep their current values.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// The historical email check: an `@` must be present and the domain part
/// must contain a dot. Stricter than nothing, looser than RFC 5322.
pub fn email_is_valid(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(email_is_valid("user@example.com"));
        assert!(email_is_valid("a.b@sub.example.org"));
    }

    #[test]
    fn rejects_missing_at_or_dotless_domain() {
        assert!(!email_is_valid("userexample.com"));
        assert!(!email_is_valid("user@examplecom"));
        assert!(!email_is_valid("@example.com"));
        assert!(!email_is_valid(""));
    }
}
