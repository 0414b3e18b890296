use crate::calendar;
use crate::config::Configuration;
use crate::errors::RecordError;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

/// Days added by [`TermsRule::Df60`] when the calendar-month step lands on a
/// day the target month does not have.
const DF60_FALLBACK_DAYS: u64 = 60;

/// The payment terms the tool knows how to compute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TermsRule {
    /// Payment is due on the invoice date itself.
    Df,

    /// Payment is due on the last day of the month the invoice was issued in.
    Dffm,

    /// Payment is due two calendar months after the invoice date. When the
    /// target month is too short for the invoice's day of month, the due date
    /// is instead 60 days after the invoice date, so an invoice dated
    /// 2018-12-30 is due on 2019-02-28.
    Df60,
}

impl TermsRule {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "DF" => Some(TermsRule::Df),
            "DFFM" => Some(TermsRule::Dffm),
            "DF60" => Some(TermsRule::Df60),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            TermsRule::Df => "DF",
            TermsRule::Dffm => "DFFM",
            TermsRule::Df60 => "DF60",
        }
    }

    pub fn due_date(&self, invoice_date: NaiveDate) -> Result<NaiveDate, RecordError> {
        let due = match self {
            TermsRule::Df => Some(invoice_date),
            TermsRule::Dffm => end_of_month(invoice_date),
            TermsRule::Df60 => calendar::add_calendar_months(invoice_date, 2)
                .or_else(|| calendar::add_days(invoice_date, DF60_FALLBACK_DAYS)),
        };

        due.ok_or_else(|| RecordError::DateOutOfRange {
            date: calendar::format_date(invoice_date),
        })
    }
}

fn end_of_month(date: NaiveDate) -> Option<NaiveDate> {
    let last = calendar::last_day_of_month(date.year(), date.month())?;
    date.with_day(last)
}

/// Decides which rule, if any, applies to a record's terms code.
pub struct TermsDispatcher<'a> {
    valid_codes: &'a BTreeSet<String>,
}

impl<'a> TermsDispatcher<'a> {
    pub fn new(config: &'a Configuration) -> Self {
        Self {
            valid_codes: config.valid_terms_codes(),
        }
    }

    /// A code is only dispatched if it names a known rule and the
    /// configuration allows it.
    pub fn classify(&self, code: &str) -> Option<TermsRule> {
        TermsRule::from_code(code).filter(|_| self.valid_codes.contains(code))
    }
}
