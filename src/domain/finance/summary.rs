//! Display totals derived from a profile.
//!
//! Computed on every read, never persisted.

use serde::Serialize;

use super::profile::{ExpenseItem, FinancialProfile};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub total_income: f64,
    pub total_debt_payments: f64,
    pub total_remaining_balance: f64,
    pub total_needs: f64,
    pub total_wants: f64,
    pub total_expenses: f64,
    /// Income minus debt payments minus expenses.
    pub net_monthly_cash_flow: f64,
}

impl FinancialSummary {
    pub fn from_profile(profile: &FinancialProfile) -> Self {
        let total_income = total(profile.income().iter().map(|i| i.amount));
        let total_debt_payments = total(profile.debt().iter().map(|d| d.monthly_payment));
        let total_remaining_balance = total(profile.debt().iter().map(|d| d.remaining_balance));
        let total_needs = sum_items(&profile.expenses().needs);
        let total_wants = sum_items(&profile.expenses().wants);
        let total_expenses = finite(total_needs + total_wants);

        Self {
            total_income,
            total_debt_payments,
            total_remaining_balance,
            total_needs,
            total_wants,
            total_expenses,
            net_monthly_cash_flow: finite(total_income - total_debt_payments - total_expenses),
        }
    }
}

fn sum_items(items: &[ExpenseItem]) -> f64 {
    total(items.iter().map(|i| i.amount))
}

// `Iterator::sum` for f64 starts at -0.0, which serializes as "-0.0".
fn total(amounts: impl Iterator<Item = f64>) -> f64 {
    finite(amounts.fold(0.0, |acc, x| acc + x))
}

/// Overflowed totals would serialize as `null`; report them as 0.
fn finite(n: f64) -> f64 {
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::finance::{DebtEntry, Expenses, IncomeEntry, ProfileData};
    use crate::domain::foundation::Username;

    #[test]
    fn empty_profile_sums_to_zero() {
        let summary =
            FinancialSummary::from_profile(&FinancialProfile::empty(Username::new("a").unwrap()));
        assert_eq!(summary.total_income, 0.0);
        assert_eq!(summary.total_expenses, 0.0);
        assert_eq!(summary.net_monthly_cash_flow, 0.0);
    }

    #[test]
    fn totals_match_sequence_sums() {
        let data = ProfileData {
            income: vec![IncomeEntry::new("Job", 5000.0), IncomeEntry::new("Side", 500.5)],
            debt: vec![
                DebtEntry {
                    title: "Car".to_string(),
                    monthly_payment: 300.0,
                    apr: 6.0,
                    tenure: 24.0,
                    remaining_balance: 7200.0,
                },
                DebtEntry {
                    title: "Card".to_string(),
                    monthly_payment: 100.0,
                    apr: 22.0,
                    tenure: 12.0,
                    remaining_balance: 1200.0,
                },
            ],
            expenses: Expenses {
                needs: vec![ExpenseItem::new("Rent", 1500.0), ExpenseItem::new("Food", 400.0)],
                wants: vec![ExpenseItem::new("Games", 60.0)],
            },
            ..Default::default()
        };
        let profile = FinancialProfile::from_data(Username::new("alice").unwrap(), data);
        let summary = FinancialSummary::from_profile(&profile);

        assert_eq!(summary.total_income, 5500.5);
        assert_eq!(summary.total_debt_payments, 400.0);
        assert_eq!(summary.total_remaining_balance, 8400.0);
        assert_eq!(summary.total_needs, 1900.0);
        assert_eq!(summary.total_wants, 60.0);
        assert_eq!(summary.total_expenses, 1960.0);
        assert_eq!(summary.net_monthly_cash_flow, 3140.5);
    }

    #[test]
    fn summary_serializes_camel_case() {
        let summary =
            FinancialSummary::from_profile(&FinancialProfile::empty(Username::new("a").unwrap()));
        let value = serde_json::to_value(summary).unwrap();
        assert!(value.get("netMonthlyCashFlow").is_some());
        assert!(value.get("totalDebtPayments").is_some());
    }

    #[test]
    fn empty_totals_serialize_as_positive_zero() {
        let summary =
            FinancialSummary::from_profile(&FinancialProfile::empty(Username::new("a").unwrap()));
        let json = serde_json::to_string(&summary).unwrap();

        assert!(json.contains(r#""totalIncome":0.0"#), "{}", json);
        assert!(json.contains(r#""totalExpenses":0.0"#), "{}", json);
        assert!(!json.contains("-0.0"), "{}", json);
    }

    #[test]
    fn overflowing_totals_never_serialize_as_null() {
        let data = ProfileData {
            income: vec![IncomeEntry::new("A", 1e308), IncomeEntry::new("B", 1e308)],
            ..Default::default()
        };
        let profile = FinancialProfile::from_data(Username::new("h").unwrap(), data);
        let value = serde_json::to_value(FinancialSummary::from_profile(&profile)).unwrap();

        assert_eq!(value["totalIncome"], 0.0);
        assert_eq!(value["netMonthlyCashFlow"], 0.0);
        assert!(value.as_object().unwrap().values().all(|v| v.is_f64()));
    }
}
