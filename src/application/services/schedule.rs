use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};

use crate::domain::models::{
    activation_code::ActivationCode,
    lock_date::LockDate,
    term::{TermDuration, TermSchedule},
};

/// Lock date for every term `1..=emi_term`: term `k` locks on
/// `start + k * duration`. `None` if a date leaves chrono's calendar range.
pub fn lock_dates(
    start: NaiveDate,
    duration: TermDuration,
    emi_term: u32,
) -> Option<Vec<(u32, NaiveDate)>> {
    (1..=emi_term)
        .map(|term| {
            let offset = u64::from(term) * u64::from(duration.days());
            start
                .checked_add_days(Days::new(offset))
                .map(|date| (term, date))
        })
        .collect()
}

/// Joins codes and lock dates on term number. Terms missing either side are
/// left out; the result is ordered by term.
pub fn assemble_terms(codes: &[ActivationCode], lock_dates: &[LockDate]) -> Vec<TermSchedule> {
    let dates: BTreeMap<u32, NaiveDate> = lock_dates
        .iter()
        .map(|row| (row.term_number, row.lock_date))
        .collect();

    let mut terms: Vec<TermSchedule> = codes
        .iter()
        .filter_map(|code| {
            dates
                .get(&code.term_number)
                .map(|date| TermSchedule::new(code.term_number, *date, code.code.clone()))
        })
        .collect();
    terms.sort_by_key(|term| term.term);
    terms
}
