//! Financial profile aggregate.
//!
//! One `FinancialProfile` exists per username. Its mutable part is
//! [`ProfileData`], which every write replaces as a whole.

use serde::{Deserialize, Serialize};

use super::lenient;
use crate::domain::foundation::Username;

/// A single income source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeEntry {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub amount: f64,
}

impl IncomeEntry {
    pub fn new(title: impl Into<String>, amount: f64) -> Self {
        Self {
            title: title.into(),
            amount,
        }
    }
}

/// A debt being paid down.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtEntry {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub monthly_payment: f64,
    /// Annual percentage rate.
    #[serde(default, deserialize_with = "lenient::number")]
    pub apr: f64,
    /// Remaining term in months.
    #[serde(default, deserialize_with = "lenient::number")]
    pub tenure: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub remaining_balance: f64,
}

/// A recurring expense, used for both needs and wants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseItem {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub amount: f64,
}

impl ExpenseItem {
    pub fn new(title: impl Into<String>, amount: f64) -> Self {
        Self {
            title: title.into(),
            amount,
        }
    }
}

/// Expenses split into essential needs and discretionary wants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Expenses {
    #[serde(default, deserialize_with = "lenient::sequence")]
    pub needs: Vec<ExpenseItem>,
    #[serde(default, deserialize_with = "lenient::sequence")]
    pub wants: Vec<ExpenseItem>,
}

/// Account details embedded in the profile.
///
/// `password` is an opaque placeholder carried for the client; credentials
/// are verified by the external identity provider, never here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserDetails {
    #[serde(default, deserialize_with = "lenient::text")]
    pub username: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub password: String,
}

/// The replaceable part of a profile, with every default already applied.
///
/// This is also the stored document shape for the document and key-value
/// backends, so it deserializes leniently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub user_details: UserDetails,
    #[serde(default, deserialize_with = "lenient::sequence")]
    pub income: Vec<IncomeEntry>,
    #[serde(default, deserialize_with = "lenient::sequence")]
    pub debt: Vec<DebtEntry>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub expenses: Expenses,
}

/// Persisted financial record keyed by username.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialProfile {
    username: Username,
    user_details: UserDetails,
    income: Vec<IncomeEntry>,
    debt: Vec<DebtEntry>,
    expenses: Expenses,
}

impl FinancialProfile {
    /// Builds the profile for `username`.
    ///
    /// `userDetails.username` is always overwritten with the key.
    pub fn from_data(username: Username, data: ProfileData) -> Self {
        let ProfileData {
            mut user_details,
            income,
            debt,
            expenses,
        } = data;
        user_details.username = username.as_str().to_string();

        Self {
            username,
            user_details,
            income,
            debt,
            expenses,
        }
    }

    /// An empty profile with every sequence defaulted.
    pub fn empty(username: Username) -> Self {
        Self::from_data(username, ProfileData::default())
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn user_details(&self) -> &UserDetails {
        &self.user_details
    }

    pub fn income(&self) -> &[IncomeEntry] {
        &self.income
    }

    pub fn debt(&self) -> &[DebtEntry] {
        &self.debt
    }

    pub fn expenses(&self) -> &Expenses {
        &self.expenses
    }

    /// Copies out the replaceable fields.
    pub fn data(&self) -> ProfileData {
        ProfileData {
            user_details: self.user_details.clone(),
            income: self.income.clone(),
            debt: self.debt.clone(),
            expenses: self.expenses.clone(),
        }
    }

    pub fn into_data(self) -> ProfileData {
        ProfileData {
            user_details: self.user_details,
            income: self.income,
            debt: self.debt,
            expenses: self.expenses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn alice() -> Username {
        Username::new("alice").unwrap()
    }

    #[test]
    fn empty_profile_has_empty_sequences() {
        let profile = FinancialProfile::empty(alice());
        assert!(profile.income().is_empty());
        assert!(profile.debt().is_empty());
        assert!(profile.expenses().needs.is_empty());
        assert!(profile.expenses().wants.is_empty());
        assert_eq!(profile.user_details().username, "alice");
        assert_eq!(profile.user_details().password, "");
    }

    #[test]
    fn from_data_pins_user_details_username_to_key() {
        let data = ProfileData {
            user_details: UserDetails {
                username: "mallory".to_string(),
                password: "placeholder".to_string(),
            },
            ..Default::default()
        };
        let profile = FinancialProfile::from_data(alice(), data);
        assert_eq!(profile.user_details().username, "alice");
        assert_eq!(profile.user_details().password, "placeholder");
    }

    #[test]
    fn profile_serializes_with_camel_case_fields() {
        let data = ProfileData {
            debt: vec![DebtEntry {
                title: "Car".to_string(),
                monthly_payment: 300.0,
                apr: 5.5,
                tenure: 36.0,
                remaining_balance: 9000.0,
            }],
            ..Default::default()
        };
        let value = serde_json::to_value(FinancialProfile::from_data(alice(), data)).unwrap();

        assert_eq!(value["username"], json!("alice"));
        assert_eq!(value["userDetails"]["username"], json!("alice"));
        assert_eq!(value["debt"][0]["monthlyPayment"], json!(300.0));
        assert_eq!(value["debt"][0]["remainingBalance"], json!(9000.0));
        assert_eq!(value["expenses"], json!({"needs": [], "wants": []}));
    }

    #[test]
    fn debt_entry_coerces_every_numeric_field() {
        let entry: DebtEntry = serde_json::from_value(json!({
            "title": "Loan",
            "monthlyPayment": "250",
            "apr": "abc",
            "remainingBalance": null
        }))
        .unwrap();

        assert_eq!(entry.monthly_payment, 250.0);
        assert_eq!(entry.apr, 0.0);
        assert_eq!(entry.tenure, 0.0);
        assert_eq!(entry.remaining_balance, 0.0);
    }

    #[test]
    fn stored_document_round_trips() {
        let data = ProfileData {
            user_details: UserDetails {
                username: "alice".to_string(),
                password: String::new(),
            },
            income: vec![IncomeEntry::new("Job", 5000.0)],
            debt: vec![],
            expenses: Expenses {
                needs: vec![ExpenseItem::new("Rent", 1500.0)],
                wants: vec![ExpenseItem::new("Games", 60.0)],
            },
        };
        let text = serde_json::to_string(&data).unwrap();
        let back: ProfileData = serde_json::from_str(&text).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn partial_stored_document_fills_defaults() {
        let data: ProfileData = serde_json::from_value(json!({"income": null})).unwrap();
        assert_eq!(data, ProfileData::default());
    }

    #[test]
    fn into_data_returns_replaceable_fields() {
        let profile = FinancialProfile::from_data(
            alice(),
            ProfileData {
                income: vec![IncomeEntry::new("Job", 1.0)],
                ..Default::default()
            },
        );
        let copied = profile.data();
        assert_eq!(profile.into_data(), copied);
    }
}
