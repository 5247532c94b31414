use chrono::Weekday;
use chrono_tz::Tz;
use log::Level;

use crate::hours::OpeningHours;
use crate::popup::machine::Timing;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Trace popup transitions while developing
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

pub struct SiteContact {
    pub phone_display: &'static str,
    pub phone_dial: &'static str,
    pub email: &'static str,
    pub time_zone: Tz,
    pub hours: &'static [OpeningHours],
}

pub const SITE_CONTACT: SiteContact = SiteContact {
    phone_display: "(855) 407-2231",
    phone_dial: "+18554072231",
    email: "help@compareproviders.net",
    time_zone: chrono_tz::America::New_York,
    hours: &[
        OpeningHours {
            label: "Mon-Fri 8am-9pm",
            days: &[Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri],
            opens_at: 8,
            closes_at: 21,
        },
        OpeningHours {
            label: "Sat-Sun 9am-6pm",
            days: &[Weekday::Sat, Weekday::Sun],
            opens_at: 9,
            closes_at: 18,
        },
    ],
};

/// Which look the call popup renders with. Both share the same timing and
/// logic; only copy and size differ.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PopupVariant {
    #[default]
    Standard,
    Compact,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PopupTuning {
    pub timing: Timing,
    pub headline: &'static str,
    pub body: &'static str,
    pub dialog_width: &'static str,
    pub badge_label: &'static str,
}

impl PopupVariant {
    pub fn tuning(self) -> PopupTuning {
        match self {
            PopupVariant::Standard => PopupTuning {
                timing: Timing::default(),
                headline: "Talk to a local plan expert",
                body: "Compare speeds, bundles and current promotions in one free call. No pressure, no commitment.",
                dialog_width: "440px",
                badge_label: "Need Help?",
            },
            PopupVariant::Compact => PopupTuning {
                timing: Timing::default(),
                headline: "Questions? Call us",
                body: "Get today's best offers in a quick free call.",
                dialog_width: "340px",
                badge_label: "Need Help?",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_variants_share_the_canonical_timing() {
        let canonical = Timing {
            initial_delay_ms: 500,
            reappear_delay_ms: 5_000,
        };
        assert_eq!(Timing::default(), canonical);
        assert_eq!(PopupVariant::Standard.tuning().timing, canonical);
        assert_eq!(PopupVariant::Compact.tuning().timing, canonical);
    }

    #[test]
    fn standard_is_the_default_variant() {
        assert_eq!(PopupVariant::default(), PopupVariant::Standard);
    }
}
