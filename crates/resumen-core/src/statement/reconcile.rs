//! Balance reconciliation.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::registry::BankConfig;
use crate::models::config::ReconciliationFormula;
use crate::models::statement::{Movement, Reconciliation, StatementBalances, Verdict};

/// Default allowed difference between computed and printed totals.
pub const DEFAULT_TOLERANCE: Decimal = Decimal::ZERO;

/// Compare the movement totals with the balances printed on the statement.
///
/// Never fails: missing balances yield [`Verdict::Indeterminate`], disagreeing
/// totals yield [`Verdict::Mismatch`].
pub fn reconcile(
    movements: &[Movement],
    balances: StatementBalances,
    config: &BankConfig,
) -> Reconciliation {
    let sum: Decimal = movements.iter().map(|m| m.amount).sum();
    let total_purchases: Decimal = movements
        .iter()
        .map(|m| m.amount)
        .filter(|a| a.is_sign_positive())
        .sum();
    let total_credits = sum - total_purchases;

    let (computed, expected) = match config.formula() {
        ReconciliationFormula::ClosingBalance => (
            balances.previous_balance + sum + balances.charges_total,
            balances.closing_balance,
        ),
        ReconciliationFormula::BalanceDelta => (
            sum + balances.charges_total,
            balances
                .closing_balance
                .filter(|_| balances.previous_balance_found)
                .map(|closing| closing - balances.previous_balance),
        ),
    };
    let expected = expected.filter(|_| config.has_balance_patterns());

    let tolerance = config.tolerance();
    let difference = expected.map(|e| computed - e);
    let verdict = match difference {
        None => Verdict::Indeterminate,
        Some(diff) if diff.abs() <= tolerance => Verdict::Matched,
        Some(_) => Verdict::Mismatch,
    };

    match verdict {
        Verdict::Mismatch => warn!(
            "{}: computed {} but statement prints {:?} (difference {:?})",
            config.name(),
            computed,
            expected,
            difference
        ),
        _ => debug!("{}: reconciliation {}", config.name(), verdict),
    }

    Reconciliation {
        verdict,
        expected,
        computed,
        difference,
        tolerance,
        balances,
        total_purchases,
        total_credits,
    }
}
