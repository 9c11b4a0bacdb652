use jiff::Unit;
use jiff::civil::Date;

use crate::error::EngineError;

/// Day remainder at which a partial month counts as a whole one.
const ROUND_UP_DAYS: i32 = 15;

/// Completed months between two dates, rounding a remainder of 15 or more
/// days up to the next month.
///
/// The calendar difference is taken with years as the largest unit, so
/// month lengths follow the calendar rather than a fixed day count.
pub fn age_in_months(birth_date: Date, observation_date: Date) -> Result<u32, EngineError> {
    if birth_date > observation_date {
        return Err(EngineError::InvalidDateRange {
            birth: birth_date,
            observed: observation_date,
        });
    }

    let span = birth_date.until((Unit::Year, observation_date))?;
    let mut months = i64::from(span.get_years()) * 12 + i64::from(span.get_months());
    if span.get_days() >= ROUND_UP_DAYS {
        months += 1;
    }
    Ok(u32::try_from(months).unwrap_or(u32::MAX))
}
