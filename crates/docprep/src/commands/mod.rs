//! CLI command implementations.

pub mod convert;
pub mod init;
pub mod run;
pub mod stamp;

use chrono::NaiveDate;

/// Today's date in the local timezone.
pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
