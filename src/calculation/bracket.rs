//! Marginal bracket tax calculation.
//!
//! This module implements the single generic bracket walk every tax in the
//! engine is computed with. For a table `[(b0, r0), ..., (bn, rn)]` and
//! gross income `g` in `[b_i, b_{i+1})`:
//!
//! ```text
//! tax = (g - b_i) * r_i + sum over j < i of (b_{j+1} - b_j) * r_j
//! ```
//!
//! The top bracket has no upper bound. Lower bounds are inclusive, so a
//! gross income equal to a threshold falls in the higher bracket; the result
//! is continuous either way.

use rust_decimal::Decimal;

use crate::config::Bracket;

/// The outcome of walking a bracket table for one gross income.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketTaxResult {
    /// Index of the bracket the gross income fell in.
    pub bracket_index: usize,
    /// Inclusive lower bound of that bracket.
    pub lower_bound: Decimal,
    /// Marginal rate of that bracket.
    pub marginal_rate: Decimal,
    /// Income above the lower bound, taxed at the marginal rate.
    pub taxable_in_bracket: Decimal,
    /// Tax owed on all fully-filled lower brackets.
    pub lower_brackets_tax: Decimal,
    /// Total tax, unrounded.
    pub tax: Decimal,
}

/// Returns the index of the bracket containing `gross_income`.
///
/// `None` when the income is below the first lower bound (i.e. negative) or
/// the table is empty.
pub fn locate_bracket(gross_income: Decimal, brackets: &[Bracket]) -> Option<usize> {
    brackets
        .iter()
        .rposition(|bracket| bracket.lower_bound <= gross_income)
}

/// Returns the tax owed on brackets `0..index`, each filled to its upper bound.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::cumulative_tax_below;
/// use payroll_engine::config::BRITISH_COLUMBIA_BRACKETS;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(cumulative_tax_below(BRITISH_COLUMBIA_BRACKETS, 0), dec!(0));
/// assert_eq!(cumulative_tax_below(BRITISH_COLUMBIA_BRACKETS, 1), dec!(2111.285));
/// ```
pub fn cumulative_tax_below(brackets: &[Bracket], index: usize) -> Decimal {
    brackets
        .windows(2)
        .take(index)
        .map(|pair| (pair[1].lower_bound - pair[0].lower_bound) * pair[0].rate)
        .sum()
}

/// Walks a bracket table for one gross income.
///
/// Returns `None` when no bracket applies (negative income or empty table).
pub fn compute_bracket_tax(
    gross_income: Decimal,
    brackets: &[Bracket],
) -> Option<BracketTaxResult> {
    let index = locate_bracket(gross_income, brackets)?;
    let bracket = brackets[index];

    let taxable_in_bracket = gross_income - bracket.lower_bound;
    let lower_brackets_tax = cumulative_tax_below(brackets, index);

    Some(BracketTaxResult {
        bracket_index: index,
        lower_bound: bracket.lower_bound,
        marginal_rate: bracket.rate,
        taxable_in_bracket,
        lower_brackets_tax,
        tax: taxable_in_bracket * bracket.rate + lower_brackets_tax,
    })
}

/// Returns the unrounded marginal tax on `gross_income`, or zero when no
/// bracket applies.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::marginal_tax;
/// use payroll_engine::config::ALBERTA_BRACKETS;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(marginal_tax(dec!(55000), ALBERTA_BRACKETS), dec!(5500.00));
/// ```
pub fn marginal_tax(gross_income: Decimal, brackets: &[Bracket]) -> Decimal {
    compute_bracket_tax(gross_income, brackets)
        .map(|result| result.tax)
        .unwrap_or(Decimal::ZERO)
}
