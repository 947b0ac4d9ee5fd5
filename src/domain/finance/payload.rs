//! Client-submitted profile payload.
//!
//! Every field is optional. Missing or malformed scalars fall back to the
//! defaults described in [`super::lenient`]. Only a structural mismatch fails
//! deserialization: a non-array where a list is expected, or a non-object
//! where an entry or `expenses` is expected.

use serde::Deserialize;

use super::lenient;
use super::profile::{DebtEntry, Expenses, IncomeEntry, ProfileData, UserDetails};
use crate::domain::foundation::Username;

/// `userDetails` as submitted. The username may be absent here when the
/// caller is identified some other way (e.g. a bearer token).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserDetailsPayload {
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub password: String,
}

/// Body of a profile write.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePayload {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub user_details: UserDetailsPayload,
    #[serde(default, deserialize_with = "lenient::sequence")]
    pub income: Vec<IncomeEntry>,
    #[serde(default, deserialize_with = "lenient::sequence")]
    pub debt: Vec<DebtEntry>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub expenses: Expenses,
}

impl ProfilePayload {
    /// Username named in `userDetails`, if any.
    pub fn claimed_username(&self) -> Option<&str> {
        self.user_details.username.as_deref()
    }

    /// Applies defaults and binds the payload to `username`.
    pub fn into_profile_data(self, username: &Username) -> ProfileData {
        ProfileData {
            user_details: UserDetails {
                username: username.as_str().to_string(),
                password: self.user_details.password,
            },
            income: self.income,
            debt: self.debt,
            expenses: self.expenses,
        }
    }
}
