//! Locale rules for number and date text.
//!
//! Clipboard text comes from other applications that format numbers and dates
//! for the user's locale, so parsing and display both go through a `Culture`.
//! Only the handful of cultures below are built in; unknown names fall back to
//! the caller's choice (usually [`Culture::INVARIANT`]).

use chrono::NaiveDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Culture {
    /// BCP-47 style name ("en-US"). Empty for the invariant culture.
    pub name: &'static str,
    pub decimal_separator: char,
    pub group_separator: char,
    /// chrono patterns tried in order for text carrying a time part
    pub datetime_patterns: &'static [&'static str],
    /// chrono patterns tried in order for date-only text (time = midnight)
    pub date_patterns: &'static [&'static str],
    /// pattern used when a date-time is rendered back to text
    pub display_pattern: &'static str,
}

impl Culture {
    pub const INVARIANT: Culture = Culture {
        name: "",
        decimal_separator: '.',
        group_separator: ',',
        datetime_patterns: &["%m/%d/%Y %H:%M:%S", "%m/%d/%Y %H:%M"],
        date_patterns: &["%m/%d/%Y"],
        display_pattern: "%m/%d/%Y %H:%M:%S",
    };

    pub const EN_US: Culture = Culture {
        name: "en-US",
        decimal_separator: '.',
        group_separator: ',',
        datetime_patterns: &[
            "%m/%d/%Y %I:%M:%S %p",
            "%m/%d/%Y %I:%M %p",
            "%m/%d/%Y %H:%M:%S",
            "%m/%d/%Y %H:%M",
        ],
        date_patterns: &["%m/%d/%Y"],
        display_pattern: "%-m/%-d/%Y %-I:%M:%S %p",
    };

    pub const EN_GB: Culture = Culture {
        name: "en-GB",
        decimal_separator: '.',
        group_separator: ',',
        datetime_patterns: &["%d/%m/%Y %H:%M:%S", "%d/%m/%Y %H:%M"],
        date_patterns: &["%d/%m/%Y"],
        display_pattern: "%d/%m/%Y %H:%M:%S",
    };

    pub const DE_DE: Culture = Culture {
        name: "de-DE",
        decimal_separator: ',',
        group_separator: '.',
        datetime_patterns: &["%d.%m.%Y %H:%M:%S", "%d.%m.%Y %H:%M"],
        date_patterns: &["%d.%m.%Y"],
        display_pattern: "%d.%m.%Y %H:%M:%S",
    };

    pub const FR_FR: Culture = Culture {
        name: "fr-FR",
        decimal_separator: ',',
        group_separator: '\u{a0}',
        datetime_patterns: &["%d/%m/%Y %H:%M:%S", "%d/%m/%Y %H:%M"],
        date_patterns: &["%d/%m/%Y"],
        display_pattern: "%d/%m/%Y %H:%M:%S",
    };

    /// All built-in cultures.
    pub fn all() -> &'static [Culture] {
        &[
            Culture::INVARIANT,
            Culture::EN_US,
            Culture::EN_GB,
            Culture::DE_DE,
            Culture::FR_FR,
        ]
    }

    /// Look up a built-in culture by name (case-insensitive).
    /// "invariant" is accepted as an alias for the empty name.
    pub fn from_name(name: &str) -> Option<Culture> {
        let name = name.trim();
        if name.is_empty() || name.eq_ignore_ascii_case("invariant") {
            return Some(Culture::INVARIANT);
        }
        Self::all()
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .copied()
    }

    /// Display name; the invariant culture has none, so it reports "invariant".
    pub fn display_name(&self) -> &'static str {
        if self.name.is_empty() { "invariant" } else { self.name }
    }

    pub fn format_float(&self, n: f64) -> String {
        let text = n.to_string();
        if self.decimal_separator == '.' {
            text
        } else {
            text.replace('.', &self.decimal_separator.to_string())
        }
    }

    pub fn format_datetime(&self, dt: &NaiveDateTime) -> String {
        dt.format(self.display_pattern).to_string()
    }

    pub fn format_bool(&self, b: bool) -> &'static str {
        if b { "True" } else { "False" }
    }
}

impl Default for Culture {
    fn default() -> Self {
        Culture::INVARIANT
    }
}
