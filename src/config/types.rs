//! Configuration types for payroll tax schedules.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML schedule files, plus the validated
//! [`BracketTable`] and [`TaxSchedule`] built from them.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::Jurisdiction;

/// A single bracket: income at or above `lower_bound` (and below the next
/// bracket's lower bound) is taxed at `rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    /// Inclusive lower bound of the bracket.
    pub lower_bound: Decimal,
    /// Marginal rate as a fraction (0.105 is 10.5%).
    pub rate: Decimal,
}

/// An ordered, validated marginal-rate table.
///
/// Invariants: at least one bracket, the first lower bound is zero, lower
/// bounds strictly increase and every rate lies in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketTable {
    brackets: Vec<Bracket>,
}

impl BracketTable {
    /// Creates a bracket table, validating its ordering and rates.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSchedule`] naming `name` when any
    /// invariant is violated.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::config::{Bracket, BracketTable};
    /// use rust_decimal_macros::dec;
    ///
    /// let table = BracketTable::new(
    ///     "example",
    ///     vec![
    ///         Bracket { lower_bound: dec!(0), rate: dec!(0.10) },
    ///         Bracket { lower_bound: dec!(1000), rate: dec!(0.20) },
    ///     ],
    /// )?;
    /// assert_eq!(table.top_rate(), dec!(0.20));
    ///
    /// assert!(BracketTable::new("empty", vec![]).is_err());
    /// # Ok::<(), payroll_engine::error::EngineError>(())
    /// ```
    pub fn new(name: &str, brackets: Vec<Bracket>) -> EngineResult<Self> {
        validate_brackets(name, &brackets)?;
        Ok(Self { brackets })
    }

    /// Builds a table from compiled-in constants.
    ///
    /// Unchecked; the built-in tables are covered by tests instead.
    pub(crate) fn from_static(brackets: &[Bracket]) -> Self {
        Self {
            brackets: brackets.to_vec(),
        }
    }

    /// Returns the brackets in ascending order.
    pub fn brackets(&self) -> &[Bracket] {
        &self.brackets
    }

    /// Returns the rate of the highest bracket.
    pub fn top_rate(&self) -> Decimal {
        self.brackets
            .last()
            .map(|bracket| bracket.rate)
            .unwrap_or(Decimal::ZERO)
    }
}

fn validate_brackets(name: &str, brackets: &[Bracket]) -> EngineResult<()> {
    let invalid = |message: String| EngineError::InvalidSchedule {
        name: name.to_string(),
        message,
    };

    let first = brackets
        .first()
        .ok_or_else(|| invalid("bracket table must not be empty".to_string()))?;
    if !first.lower_bound.is_zero() {
        return Err(invalid(format!(
            "first bracket must start at 0, found {}",
            first.lower_bound
        )));
    }

    for bracket in brackets {
        if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
            return Err(invalid(format!(
                "rate {} at lower bound {} is outside [0, 1]",
                bracket.rate, bracket.lower_bound
            )));
        }
    }

    for pair in brackets.windows(2) {
        if pair[1].lower_bound <= pair[0].lower_bound {
            return Err(invalid(format!(
                "lower bounds must be strictly increasing ({} follows {})",
                pair[1].lower_bound, pair[0].lower_bound
            )));
        }
    }

    Ok(())
}

/// A flat contribution rate applied up to an earnings cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRate {
    /// Contribution rate as a fraction.
    pub rate: Decimal,
    /// Earnings above this amount attract no contribution.
    pub maximum_earnings: Decimal,
}

impl ContributionRate {
    pub(crate) fn validate(&self, name: &str) -> EngineResult<()> {
        if self.rate < Decimal::ZERO || self.rate > Decimal::ONE {
            return Err(EngineError::InvalidSchedule {
                name: name.to_string(),
                message: format!("rate {} is outside [0, 1]", self.rate),
            });
        }
        if self.maximum_earnings < Decimal::ZERO {
            return Err(EngineError::InvalidSchedule {
                name: name.to_string(),
                message: format!(
                    "maximum earnings {} must not be negative",
                    self.maximum_earnings
                ),
            });
        }
        Ok(())
    }
}

/// Metadata about a tax schedule, from `schedule.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleMetadata {
    /// Short identifier used in schedule references (e.g. "canada_2020").
    pub name: String,
    /// The tax year the rates apply to.
    pub tax_year: i32,
    /// Where the rates were published.
    pub source_url: String,
}

/// Federal table file structure (`federal.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct FederalTableConfig {
    /// Federal brackets in ascending order.
    pub brackets: Vec<Bracket>,
}

/// Provincial table file structure (`provinces/<name>.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct ProvinceTableConfig {
    /// Name of the jurisdiction the table belongs to.
    pub jurisdiction: String,
    /// Provincial brackets in ascending order.
    pub brackets: Vec<Bracket>,
}

/// Contribution file structure (`contributions.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct ContributionsConfig {
    /// Canada Pension Plan rate and maximum pensionable earnings.
    pub pension: ContributionRate,
    /// Employment Insurance rate and maximum insurable earnings.
    pub insurance: ContributionRate,
}

/// A complete tax schedule: every table and rate the engine needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxSchedule {
    metadata: ScheduleMetadata,
    federal: BracketTable,
    provinces: BTreeMap<Jurisdiction, BracketTable>,
    pension: ContributionRate,
    insurance: ContributionRate,
}

impl TaxSchedule {
    /// Creates a new TaxSchedule from its component parts.
    pub fn new(
        metadata: ScheduleMetadata,
        federal: BracketTable,
        provinces: BTreeMap<Jurisdiction, BracketTable>,
        pension: ContributionRate,
        insurance: ContributionRate,
    ) -> Self {
        Self {
            metadata,
            federal,
            provinces,
            pension,
            insurance,
        }
    }

    /// Returns the schedule metadata.
    pub fn metadata(&self) -> &ScheduleMetadata {
        &self.metadata
    }

    /// Returns the federal bracket table.
    pub fn federal(&self) -> &BracketTable {
        &self.federal
    }

    /// Returns the bracket table for a jurisdiction, if one is defined.
    pub fn provincial(&self, jurisdiction: Jurisdiction) -> Option<&BracketTable> {
        self.provinces.get(&jurisdiction)
    }

    /// Returns every jurisdiction with a bracket table.
    pub fn implemented_jurisdictions(&self) -> impl Iterator<Item = Jurisdiction> + '_ {
        self.provinces.keys().copied()
    }

    /// Returns the Canada Pension Plan contribution rate.
    pub fn pension(&self) -> &ContributionRate {
        &self.pension
    }

    /// Returns the Employment Insurance contribution rate.
    pub fn insurance(&self) -> &ContributionRate {
        &self.insurance
    }

    /// Returns the reference string for the federal table.
    pub fn federal_ref(&self) -> String {
        format!("{}/federal", self.metadata.name)
    }

    /// Returns the reference string for a provincial table.
    pub fn provincial_ref(&self, jurisdiction: Jurisdiction) -> String {
        format!("{}/provinces/{}", self.metadata.name, jurisdiction.slug())
    }

    /// Returns the reference string for the contribution rates.
    pub fn contributions_ref(&self, which: &str) -> String {
        format!("{}/contributions/{}", self.metadata.name, which)
    }
}
