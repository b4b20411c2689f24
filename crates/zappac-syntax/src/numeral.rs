//! Locale-aware grouping of numeral tokens for display.
//!
//! ## Learning: `Cow<str>`
//!
//! Most numerals are displayed exactly as typed, so `format` hands back a
//! borrowed `&str` in the common case and only allocates when separators are
//! actually inserted. `Cow` ("clone on write") lets one return type cover both.

use std::borrow::Cow;

use crate::{SyntaxError, SyntaxResult};

/// Separator conventions for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumeralLocale {
    /// Inserted between digit groups (`,` in `1,234`)
    pub grouping_separator: char,
    /// Replaces the `.` of the raw numeral
    pub decimal_separator: char,
    /// Digits per group, counted from the decimal point
    pub group_size: usize,
    /// Digits that must precede the first separator for grouping to apply
    pub min_grouping_digits: usize,
}

impl NumeralLocale {
    pub const EN_US: NumeralLocale = NumeralLocale {
        grouping_separator: ',',
        decimal_separator: '.',
        group_size: 3,
        min_grouping_digits: 1,
    };

    pub const DE_DE: NumeralLocale = NumeralLocale {
        grouping_separator: '.',
        decimal_separator: ',',
        group_size: 3,
        min_grouping_digits: 1,
    };

    pub const FR_FR: NumeralLocale = NumeralLocale {
        grouping_separator: '\u{202f}',
        decimal_separator: ',',
        group_size: 3,
        min_grouping_digits: 1,
    };

    pub const ES_ES: NumeralLocale = NumeralLocale {
        grouping_separator: '.',
        decimal_separator: ',',
        group_size: 3,
        min_grouping_digits: 2,
    };

    pub const DE_CH: NumeralLocale = NumeralLocale {
        grouping_separator: '\u{2019}',
        decimal_separator: '.',
        group_size: 3,
        min_grouping_digits: 1,
    };

    /// Resolves a locale tag such as `en-US` or `de`.
    pub fn from_tag(tag: &str) -> SyntaxResult<Self> {
        match tag.to_ascii_lowercase().replace('_', "-").as_str() {
            "en" | "en-us" | "en-gb" => Ok(Self::EN_US),
            "de" | "de-de" | "de-at" => Ok(Self::DE_DE),
            "fr" | "fr-fr" => Ok(Self::FR_FR),
            "es" | "es-es" => Ok(Self::ES_ES),
            "de-ch" => Ok(Self::DE_CH),
            _ => Err(SyntaxError::UnknownLocale(tag.to_string())),
        }
    }

    /// Returns supported locale tags.
    pub fn supported_tags() -> &'static [&'static str] {
        &["en-US", "de-DE", "fr-FR", "es-ES", "de-CH"]
    }
}

impl Default for NumeralLocale {
    fn default() -> Self {
        Self::EN_US
    }
}

/// Formats numeral tokens with thousands grouping.
///
/// Built once from a locale and shared by reference; it holds no mutable
/// state, so the same input always yields the same output.
#[derive(Debug, Clone, Default)]
pub struct NumeralFormatter {
    locale: NumeralLocale,
}

impl NumeralFormatter {
    pub fn new(locale: NumeralLocale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> &NumeralLocale {
        &self.locale
    }

    /// The character grouping inserts. Absent from raw input text.
    pub fn grouping_separator(&self) -> char {
        self.locale.grouping_separator
    }

    /// Returns the display form of a raw numeral.
    ///
    /// The raw text comes back unchanged when `enabled` is false, for
    /// prefixed literals (`0x1f`, `0755`, `b0101`), and for anything that is
    /// not a plain decimal numeral.
    pub fn format<'a>(&self, raw: &'a str, enabled: bool) -> Cow<'a, str> {
        if !enabled {
            return Cow::Borrowed(raw);
        }

        if raw.len() > 1 && (raw.starts_with('0') || raw.starts_with('b')) {
            return Cow::Borrowed(raw);
        }

        match self.group(raw) {
            Some(grouped) => Cow::Owned(grouped),
            None => Cow::Borrowed(raw),
        }
    }

    /// Groups `[+-]? digits ('.' digits)?`; `None` for anything else.
    ///
    /// Whitespace trailing the numeral is carried over unchanged.
    fn group(&self, raw: &str) -> Option<String> {
        let numeral = raw.trim_end();
        let trailing = &raw[numeral.len()..];

        let (sign, unsigned) = match numeral.strip_prefix(['+', '-']) {
            Some(rest) => numeral.split_at(numeral.len() - rest.len()),
            None => ("", numeral),
        };

        let (integer, fraction) = match unsigned.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (unsigned, None),
        };

        let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if !is_digits(integer) || !fraction.is_none_or(is_digits) {
            return None;
        }

        let locale = &self.locale;
        let group_size = locale.group_size.max(1);
        let mut out = String::with_capacity(raw.len() + integer.len() / group_size * 3);
        out.push_str(sign);

        if integer.len() >= group_size + locale.min_grouping_digits {
            let lead = match integer.len() % group_size {
                0 => group_size,
                n => n,
            };
            out.push_str(&integer[..lead]);
            for group in integer.as_bytes()[lead..].chunks(group_size) {
                out.push(locale.grouping_separator);
                out.extend(group.iter().map(|&b| b as char));
            }
        } else {
            out.push_str(integer);
        }

        if let Some(fraction) = fraction {
            out.push(locale.decimal_separator);
            out.push_str(fraction);
        }

        out.push_str(trailing);
        Some(out)
    }
}
