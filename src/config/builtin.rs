//! Compiled-in 2020 Canadian tax schedule.
//!
//! These constants mirror `config/canada_2020/`. Only Alberta and British
//! Columbia carry provincial tables; the other recognised jurisdictions are
//! deliberately left without one.

use std::collections::BTreeMap;

use rust_decimal_macros::dec;

use crate::models::Jurisdiction;

use super::types::{Bracket, BracketTable, ContributionRate, ScheduleMetadata, TaxSchedule};

/// Name of the built-in schedule.
pub const BUILTIN_SCHEDULE_NAME: &str = "canada_2020";

/// Tax year of the built-in schedule.
pub const BUILTIN_TAX_YEAR: i32 = 2020;

const BUILTIN_SOURCE_URL: &str =
    "https://www.canada.ca/en/revenue-agency/services/tax/individuals/frequently-asked-questions-individuals/canadian-income-tax-rates-individuals-current-previous-years.html";

/// Alberta provincial brackets.
pub const ALBERTA_BRACKETS: &[Bracket] = &[
    Bracket {
        lower_bound: dec!(0),
        rate: dec!(0.10),
    },
    Bracket {
        lower_bound: dec!(131220),
        rate: dec!(0.12),
    },
    Bracket {
        lower_bound: dec!(157464),
        rate: dec!(0.13),
    },
    Bracket {
        lower_bound: dec!(209952),
        rate: dec!(0.14),
    },
    Bracket {
        lower_bound: dec!(314928),
        rate: dec!(0.15),
    },
];

/// British Columbia provincial brackets.
pub const BRITISH_COLUMBIA_BRACKETS: &[Bracket] = &[
    Bracket {
        lower_bound: dec!(0),
        rate: dec!(0.0506),
    },
    Bracket {
        lower_bound: dec!(41725),
        rate: dec!(0.0770),
    },
    Bracket {
        lower_bound: dec!(83451),
        rate: dec!(0.1050),
    },
    Bracket {
        lower_bound: dec!(95812),
        rate: dec!(0.1229),
    },
    Bracket {
        lower_bound: dec!(116344),
        rate: dec!(0.1470),
    },
    Bracket {
        lower_bound: dec!(157748),
        rate: dec!(0.1680),
    },
    Bracket {
        lower_bound: dec!(220000),
        rate: dec!(0.2050),
    },
];

/// Federal brackets.
pub const FEDERAL_BRACKETS: &[Bracket] = &[
    Bracket {
        lower_bound: dec!(0),
        rate: dec!(0.15),
    },
    Bracket {
        lower_bound: dec!(48535),
        rate: dec!(0.205),
    },
    Bracket {
        lower_bound: dec!(97069),
        rate: dec!(0.26),
    },
    Bracket {
        lower_bound: dec!(150473),
        rate: dec!(0.29),
    },
    Bracket {
        lower_bound: dec!(214368),
        rate: dec!(0.33),
    },
];

/// Canada Pension Plan rate and maximum pensionable earnings.
pub const PENSION_RATE: ContributionRate = ContributionRate {
    rate: dec!(0.0525),
    maximum_earnings: dec!(58700),
};

/// Employment Insurance rate and maximum insurable earnings.
pub const INSURANCE_RATE: ContributionRate = ContributionRate {
    rate: dec!(0.0158),
    maximum_earnings: dec!(54200),
};

/// Returns the built-in provincial brackets for a jurisdiction.
///
/// `None` means the jurisdiction is recognised but has no built-in table.
pub fn provincial_brackets(jurisdiction: Jurisdiction) -> Option<&'static [Bracket]> {
    match jurisdiction {
        Jurisdiction::Alberta => Some(ALBERTA_BRACKETS),
        Jurisdiction::BritishColumbia => Some(BRITISH_COLUMBIA_BRACKETS),
        Jurisdiction::Manitoba
        | Jurisdiction::Quebec
        | Jurisdiction::Saskatchewan
        | Jurisdiction::Newfoundland => None,
    }
}

/// Assembles the built-in schedule.
pub fn builtin_schedule() -> TaxSchedule {
    let provinces: BTreeMap<Jurisdiction, BracketTable> = Jurisdiction::ALL
        .into_iter()
        .filter_map(|jurisdiction| {
            provincial_brackets(jurisdiction)
                .map(|brackets| (jurisdiction, BracketTable::from_static(brackets)))
        })
        .collect();

    TaxSchedule::new(
        ScheduleMetadata {
            name: BUILTIN_SCHEDULE_NAME.to_string(),
            tax_year: BUILTIN_TAX_YEAR,
            source_url: BUILTIN_SOURCE_URL.to_string(),
        },
        BracketTable::from_static(FEDERAL_BRACKETS),
        provinces,
        PENSION_RATE,
        INSURANCE_RATE,
    )
}
