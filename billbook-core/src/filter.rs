use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::bill::Bill;

/// Input formats a bill date is accepted in.
pub const ACCEPTED_DATE_FORMATS: [&str; 3] = ["%d-%m-%Y", "%m/%d/%Y", "%Y-%m-%d"];

/// Canonical display format.
pub const DISPLAY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a bill date in any accepted format.
pub fn parse_bill_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    ACCEPTED_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

/// Normalizes a date string to the canonical display format, None when
/// no accepted format matches.
pub fn normalize_bill_date(raw: &str) -> Option<String> {
    parse_bill_date(raw).map(|date| date.format(DISPLAY_DATE_FORMAT).to_string())
}

/// Inclusive date range; either bound is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// True when `date` falls inside the range, bounds included. A bill
    /// whose date cannot be parsed passes only when no bound is set.
    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        match date {
            Some(date) => {
                let after_from = self.from.map_or(true, |from| date >= from);
                let before_to = self.to.map_or(true, |to| date <= to);
                after_from && before_to
            }
            None => self.from.is_none() && self.to.is_none(),
        }
    }
}

/// Bills whose date falls inside the range, in list order.
pub fn filter_by_date<'a>(bills: &'a [Bill], range: &DateRange) -> Vec<&'a Bill> {
    bills
        .iter()
        .filter(|bill| range.contains(parse_bill_date(&bill.date)))
        .collect()
}

/// Sum of the parseable amounts, skipping malformed ones.
pub fn total_amount<'a, I>(bills: I) -> Decimal
where
    I: IntoIterator<Item = &'a Bill>,
{
    bills
        .into_iter()
        .filter_map(|bill| Decimal::from_str_exact(bill.amount.trim()).ok())
        .sum()
}
