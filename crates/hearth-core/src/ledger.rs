//! Ledger aggregation for fund activity
//!
//! The cash envelope (level 1) is reconciled against the signed sum of its
//! transactions for the reporting period; level 2 funds carry an
//! authoritative `spent` field; level 3 funds are flat amounts. The period
//! filter (month, budget year) is applied by the list query, not here.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{CashTransaction, Fund, FundLevel};

/// Signed sum of a fund's transactions; can be negative when withdrawals
/// outweigh deposits.
pub fn actual_given(transactions: &[CashTransaction]) -> f64 {
    transactions.iter().map(|t| t.amount).sum()
}

/// Group a period's transactions into per-fund signed totals.
pub fn cash_totals_by_fund(transactions: &[CashTransaction]) -> HashMap<i64, f64> {
    let mut totals: HashMap<i64, f64> = HashMap::new();
    for t in transactions {
        *totals.entry(t.fund_id).or_insert(0.0) += t.amount;
    }
    totals
}

/// Computed activity for one fund in one reporting period
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FundActivity {
    /// Level 1: actual is the signed transaction sum for the period
    Cash {
        budget: f64,
        actual: f64,
        remaining: f64,
    },
    /// Level 2: actual is the fund's authoritative spent field
    Tracked {
        budget: f64,
        spent: f64,
        remaining: f64,
    },
    /// Level 3: flat amount, no actual/remaining
    Flat { amount: f64 },
}

impl FundActivity {
    /// Apply the level rule. `cash_total` is the fund's period total from
    /// the ledger; `None` (fund absent from the totals map, or the fetch
    /// failed upstream) counts as zero rather than poisoning the display.
    pub fn for_fund(fund: &Fund, cash_total: Option<f64>) -> Self {
        match fund.level {
            FundLevel::Cash => {
                let actual = cash_total.unwrap_or(0.0);
                Self::Cash {
                    budget: fund.amount,
                    actual,
                    remaining: fund.amount - actual,
                }
            }
            FundLevel::Tracked => {
                let spent = fund.spent.unwrap_or(0.0);
                Self::Tracked {
                    budget: fund.amount,
                    spent,
                    remaining: fund.amount - spent,
                }
            }
            FundLevel::Flat => Self::Flat {
                amount: fund.amount,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CashTransaction, FundType};
    use chrono::{NaiveDate, Utc};

    fn tx(fund_id: i64, amount: f64) -> CashTransaction {
        CashTransaction {
            id: 0,
            fund_id,
            budget_year_id: None,
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            amount,
            description: None,
            month: 1,
            year: 2025,
            created_at: Utc::now(),
        }
    }

    fn fund(level: FundLevel, amount: f64, spent: Option<f64>) -> Fund {
        Fund {
            id: 1,
            name: "Cash".to_string(),
            fund_type: FundType::Monthly,
            level,
            amount,
            spent,
            include_in_budget: true,
            color: None,
            categories: vec![],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_actual_given_signed_sum() {
        let txs = vec![tx(1, 200.0), tx(1, 250.0), tx(1, -50.0), tx(1, -49.0)];
        assert_eq!(actual_given(&txs), 351.0);
    }

    #[test]
    fn test_cash_fund_remaining() {
        let txs = vec![tx(1, 200.0), tx(1, 250.0), tx(1, -50.0), tx(1, -49.0)];
        let f = fund(FundLevel::Cash, 500.0, None);
        let totals = cash_totals_by_fund(&txs);
        match FundActivity::for_fund(&f, totals.get(&f.id).copied()) {
            FundActivity::Cash {
                budget,
                actual,
                remaining,
            } => {
                assert_eq!(budget, 500.0);
                assert_eq!(actual, 351.0);
                assert_eq!(remaining, 149.0);
            }
            other => panic!("expected cash activity, got {:?}", other),
        }
    }

    #[test]
    fn test_cash_fund_net_can_go_negative() {
        let txs = vec![tx(1, 20.0), tx(1, -75.0)];
        match FundActivity::for_fund(&fund(FundLevel::Cash, 100.0, None), Some(actual_given(&txs)))
        {
            FundActivity::Cash {
                actual, remaining, ..
            } => {
                assert_eq!(actual, -55.0);
                assert_eq!(remaining, 155.0);
            }
            other => panic!("expected cash activity, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_total_falls_back_to_zero() {
        match FundActivity::for_fund(&fund(FundLevel::Cash, 300.0, None), None) {
            FundActivity::Cash {
                actual, remaining, ..
            } => {
                assert_eq!(actual, 0.0);
                assert_eq!(remaining, 300.0);
            }
            other => panic!("expected cash activity, got {:?}", other),
        }
    }

    #[test]
    fn test_tracked_fund_uses_spent_field() {
        // Level 2 ignores any cash total; spent is authoritative
        match FundActivity::for_fund(&fund(FundLevel::Tracked, 1200.0, Some(450.0)), Some(999.0)) {
            FundActivity::Tracked {
                spent, remaining, ..
            } => {
                assert_eq!(spent, 450.0);
                assert_eq!(remaining, 750.0);
            }
            other => panic!("expected tracked activity, got {:?}", other),
        }
    }

    #[test]
    fn test_flat_fund_has_amount_only() {
        match FundActivity::for_fund(&fund(FundLevel::Flat, 800.0, None), Some(100.0)) {
            FundActivity::Flat { amount } => assert_eq!(amount, 800.0),
            other => panic!("expected flat activity, got {:?}", other),
        }
    }

    #[test]
    fn test_totals_group_by_fund() {
        let txs = vec![tx(1, 100.0), tx(2, 40.0), tx(1, -30.0)];
        let totals = cash_totals_by_fund(&txs);
        assert_eq!(totals.get(&1), Some(&70.0));
        assert_eq!(totals.get(&2), Some(&40.0));
        assert_eq!(totals.get(&3), None);
    }
}
