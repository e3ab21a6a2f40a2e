//! Solar/lunar reconciliation of the birth date.

use chrono::NaiveDate;
use tracing::debug;

use crate::calendar::{LunarCalendar, LunarDescription};
use crate::error::{CalendarError, ChartError};
use crate::normalize::{BirthDate, BirthParams};

/// Birth date in both calendars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledBirth {
    /// Date passed to the placement backend.
    pub solar_date: NaiveDate,
    pub lunar: LunarDescription,
    pub is_lunar_input: bool,
}

impl ReconciledBirth {
    pub fn lunar_display(&self) -> String {
        self.lunar.display_text()
    }

    /// Four-pillar text replacing the placement backend's own, for lunar
    /// input only.
    pub fn pillars_override(&self) -> Option<String> {
        self.is_lunar_input.then(|| self.lunar.pillars_text())
    }
}

/// Resolve the birth date in both calendars.
///
/// Lunar input is converted to solar and described back; the description
/// must name the same lunar date.
pub fn reconcile(
    params: &BirthParams,
    calendar: &impl LunarCalendar,
) -> Result<ReconciledBirth, ChartError> {
    let reconciled = match params.date {
        BirthDate::Solar(solar_date) => ReconciledBirth {
            solar_date,
            lunar: calendar.describe_solar(solar_date)?,
            is_lunar_input: false,
        },
        BirthDate::Lunar(lunar_date) => {
            let solar_date = calendar.lunar_to_solar(&lunar_date)?;
            let lunar = calendar.describe_solar(solar_date)?;
            if lunar.lunar != lunar_date {
                return Err(CalendarError::NoSuchDate(format!(
                    "lunar {lunar_date} converts to {solar_date}, which is lunar {}",
                    lunar.lunar
                ))
                .into());
            }
            ReconciledBirth {
                solar_date,
                lunar,
                is_lunar_input: true,
            }
        }
    };
    debug!(
        calendar = calendar.name(),
        solar = %reconciled.solar_date,
        lunar = %reconciled.lunar.lunar,
        "birth date reconciled"
    );
    Ok(reconciled)
}
