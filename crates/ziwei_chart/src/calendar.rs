//! Calendar-conversion backend seam.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;
use crate::normalize::LunarDate;

/// Lunar rendering of one solar day, as produced by a calendar backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LunarDescription {
    pub lunar: LunarDate,
    /// Year stem-branch, e.g. `乙巳`.
    pub year_gan_zhi: String,
    pub month_gan_zhi: String,
    pub day_gan_zhi: String,
    /// Month in Chinese numerals, e.g. `正` or `闰六`.
    pub month_chinese: String,
    /// Day in Chinese numerals, e.g. `初一`.
    pub day_chinese: String,
}

impl LunarDescription {
    /// `乙巳年正月初一`
    pub fn display_text(&self) -> String {
        format!(
            "{}年{}月{}",
            self.year_gan_zhi, self.month_chinese, self.day_chinese
        )
    }

    /// `乙巳 丁丑 戊戌`
    pub fn pillars_text(&self) -> String {
        format!(
            "{} {} {}",
            self.year_gan_zhi, self.month_gan_zhi, self.day_gan_zhi
        )
    }
}

/// Converts between solar and lunar dates.
///
/// Implementations must be pure: converting a lunar date to solar and
/// describing that solar date yields the original lunar date.
pub trait LunarCalendar: Send + Sync {
    fn name(&self) -> &'static str;

    /// Solar date of a lunar date. Fails for dates that do not exist, such
    /// as a leap month the year does not have.
    fn lunar_to_solar(&self, date: &LunarDate) -> Result<NaiveDate, CalendarError>;

    fn describe_solar(&self, date: NaiveDate) -> Result<LunarDescription, CalendarError>;
}

impl<T: LunarCalendar + ?Sized> LunarCalendar for &T {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn lunar_to_solar(&self, date: &LunarDate) -> Result<NaiveDate, CalendarError> {
        (**self).lunar_to_solar(date)
    }

    fn describe_solar(&self, date: NaiveDate) -> Result<LunarDescription, CalendarError> {
        (**self).describe_solar(date)
    }
}
