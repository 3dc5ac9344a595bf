//! Exact decimal arithmetic.
//!
//! `rust_decimal` keeps at most 28 significant digits. When a sum needs more,
//! `checked_add` still returns `Some`, holding a rounded value. Ledger code
//! must never accept that, so these helpers return `None` unless the result
//! is the exact mathematical sum.

use rust_decimal::Decimal;

/// `lhs + rhs`, or `None` if the sum overflows or would be rounded.
pub fn exact_add(lhs: Decimal, rhs: Decimal) -> Option<Decimal> {
    let sum = lhs.checked_add(rhs)?;

    // Both operands must be recoverable from the sum. A rounded sum loses the
    // smaller operand, so at least one of these differs.
    if sum.checked_sub(rhs)? != lhs || sum.checked_sub(lhs)? != rhs {
        return None;
    }

    Some(sum)
}

/// `lhs - rhs`, or `None` if the difference overflows or would be rounded.
pub fn exact_sub(lhs: Decimal, rhs: Decimal) -> Option<Decimal> {
    exact_add(lhs, -rhs)
}
