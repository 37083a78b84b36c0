//! Conversion between calendar dates and signed day offsets.
//!
//! Dates are stored in the index as the number of whole days since 1970-01-01 so
//! that they can be filtered with numeric range queries. Dates before the epoch
//! yield negative offsets.

use chrono::{Duration, NaiveDate};

use crate::errors::ModelError;

/// The reference date offsets are counted from.
pub fn epoch() -> NaiveDate {
    // NaiveDate's default value is 1970-01-01.
    NaiveDate::default()
}

/// Convert a date into its day offset from the epoch.
///
/// `None` maps to `None`. Fails with an encoding error when the day count does not
/// fit in an `i32`.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use person_store_shared::date_offset::to_day_offset;
///
/// let date = NaiveDate::from_ymd_opt(1970, 1, 2);
/// assert_eq!(to_day_offset(date).unwrap(), Some(1));
/// assert_eq!(to_day_offset(None).unwrap(), None);
/// ```
pub fn to_day_offset(date: Option<NaiveDate>) -> Result<Option<i32>, ModelError> {
    let Some(date) = date else {
        return Ok(None);
    };

    let days = date.signed_duration_since(epoch()).num_days();
    let offset = i32::try_from(days).map_err(|_| {
        ModelError::encoding(format!("Cannot convert the date '{}' to a day offset", date))
    })?;

    Ok(Some(offset))
}

/// Convert a day offset from the epoch back into a date.
///
/// `None` maps to `None`. Fails with an encoding error when the resulting date is
/// outside the range supported by `NaiveDate`.
pub fn from_day_offset(offset: Option<i32>) -> Result<Option<NaiveDate>, ModelError> {
    let Some(offset) = offset else {
        return Ok(None);
    };

    epoch()
        .checked_add_signed(Duration::days(i64::from(offset)))
        .map(Some)
        .ok_or_else(|| {
            ModelError::encoding(format!("Day offset {} is out of the date range", offset))
        })
}
