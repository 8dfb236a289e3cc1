//! Declarative form validation.
//!
//! Each entity describes its form as a table of [`FieldSpec`]s. A single
//! pure function, [`validate`], walks the table against a draft and returns
//! the per-field error map the UI renders. Nothing here performs I/O.

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// In-progress form state: field name -> raw input value.
pub type Draft = BTreeMap<String, String>;

/// Per-field error messages, keyed by field name.
pub type FieldErrors = BTreeMap<String, String>;

/// Message for an empty must-fill field.
pub const REQUIRED_MESSAGE: &str = "Campo obligatorio";

/// Format of dates coming from `<input type="date">` and the backend.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Everything time-dependent a rule may need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    pub today: NaiveDate,
}

impl ValidationContext {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn current_year(&self) -> i32 {
        self.today.year()
    }
}

/// When a field must be filled.
#[derive(Debug, Clone, Copy)]
pub enum Requirement {
    Required,
    Optional,
    /// Required only when the predicate holds for the current draft
    RequiredWhen(fn(&Draft) -> bool),
}

/// A format or range check applied to a non-empty value.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// At most `max` characters
    MaxLen { max: usize, message: &'static str },
    /// Free-form predicate (plate pattern, email shape, ...)
    Format {
        check: fn(&str) -> bool,
        message: &'static str,
    },
    /// Integer year between `min` and the current year, inclusive
    Year { min: i32 },
    /// Number above `min` (or equal to it when `inclusive`)
    Number {
        min: f64,
        inclusive: bool,
        message: &'static str,
    },
    /// Integer without a fractional part
    WholeNumber { message: &'static str },
    /// `YYYY-MM-DD` date not later than today
    NotAfterToday { message: &'static str },
    /// Exactly `len` ASCII digits
    Digits { len: usize, message: &'static str },
}

impl Rule {
    /// Check a trimmed, non-empty value.
    pub fn check(&self, value: &str, ctx: &ValidationContext) -> Result<(), String> {
        match *self {
            Rule::MaxLen { max, message } => {
                if value.chars().count() > max {
                    return Err(message.to_string());
                }
            }
            Rule::Format { check, message } => {
                if !check(value) {
                    return Err(message.to_string());
                }
            }
            Rule::Year { min } => {
                let max = ctx.current_year();
                match value.parse::<i32>() {
                    Ok(year) if (min..=max).contains(&year) => {}
                    _ => return Err(format!("El año debe estar entre {} y {}", min, max)),
                }
            }
            Rule::Number {
                min,
                inclusive,
                message,
            } => {
                let ok = parse_number(value)
                    .map(|n| if inclusive { n >= min } else { n > min })
                    .unwrap_or(false);
                if !ok {
                    return Err(message.to_string());
                }
            }
            Rule::WholeNumber { message } => {
                if parse_whole_number(value).is_none() {
                    return Err(message.to_string());
                }
            }
            Rule::NotAfterToday { message } => match NaiveDate::parse_from_str(value, DATE_FORMAT) {
                Ok(date) if date > ctx.today => return Err(message.to_string()),
                Ok(_) => {}
                Err(_) => return Err("Fecha inválida".to_string()),
            },
            Rule::Digits { len, message } => {
                if value.len() != len || !value.chars().all(|c| c.is_ascii_digit()) {
                    return Err(message.to_string());
                }
            }
        }
        Ok(())
    }
}

/// One row of an entity's rule table.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub requirement: Requirement,
    pub rules: &'static [Rule],
}

impl FieldSpec {
    pub const fn required(name: &'static str, rules: &'static [Rule]) -> Self {
        Self {
            name,
            requirement: Requirement::Required,
            rules,
        }
    }

    pub const fn optional(name: &'static str, rules: &'static [Rule]) -> Self {
        Self {
            name,
            requirement: Requirement::Optional,
            rules,
        }
    }

    pub const fn required_when(
        name: &'static str,
        when: fn(&Draft) -> bool,
        rules: &'static [Rule],
    ) -> Self {
        Self {
            name,
            requirement: Requirement::RequiredWhen(when),
            rules,
        }
    }

    fn is_required(&self, draft: &Draft) -> bool {
        match self.requirement {
            Requirement::Required => true,
            Requirement::Optional => false,
            Requirement::RequiredWhen(when) => when(draft),
        }
    }
}

/// Trimmed value of a draft field, empty when absent.
pub fn field_value<'a>(draft: &'a Draft, name: &str) -> &'a str {
    draft.get(name).map(|v| v.trim()).unwrap_or("")
}

/// Whether a checkbox-like draft field is on.
pub fn is_checked(draft: &Draft, name: &str) -> bool {
    field_value(draft, name) == "true"
}

/// Parse a user-entered number, accepting a decimal comma.
pub fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// Parse a user-entered integer; `1500,5` and `1500.5` are rejected.
pub fn parse_whole_number(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

/// Single-entry error map.
pub fn field_error(name: &str, message: impl Into<String>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.insert(name.to_string(), message.into());
    errors
}

/// Evaluate a rule table against a draft.
///
/// Empty required fields get [`REQUIRED_MESSAGE`]; empty optional fields are
/// skipped; otherwise the first failing rule of a field wins.
pub fn validate(table: &[FieldSpec], draft: &Draft, ctx: &ValidationContext) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for spec in table {
        let value = field_value(draft, spec.name);
        if value.is_empty() {
            if spec.is_required(draft) {
                errors.insert(spec.name.to_string(), REQUIRED_MESSAGE.to_string());
            }
            continue;
        }
        if let Some(message) = spec
            .rules
            .iter()
            .find_map(|rule| rule.check(value, ctx).err())
        {
            errors.insert(spec.name.to_string(), message);
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> ValidationContext {
        ValidationContext::new(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
    }

    fn draft(pairs: &[(&str, &str)]) -> Draft {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn wants_extra(d: &Draft) -> bool {
        is_checked(d, "extra")
    }

    const TABLE: &[FieldSpec] = &[
        FieldSpec::required("name", &[Rule::MaxLen { max: 5, message: "too long" }]),
        FieldSpec::optional("note", &[Rule::MaxLen { max: 3, message: "note too long" }]),
        FieldSpec::required_when("extra_value", wants_extra, &[]),
        FieldSpec::optional("year", &[Rule::Year { min: 1950 }]),
        FieldSpec::optional(
            "amount",
            &[Rule::Number { min: 0.0, inclusive: false, message: "positive" }],
        ),
        FieldSpec::optional("date", &[Rule::NotAfterToday { message: "future" }]),
        FieldSpec::optional("digits", &[Rule::Digits { len: 3, message: "three digits" }]),
        FieldSpec::optional("count", &[Rule::WholeNumber { message: "whole" }]),
    ];

    #[test]
    fn test_required_fields_report_generic_message() {
        let errors = validate(TABLE, &draft(&[("name", "   ")]), &ctx());
        assert_eq!(errors.get("name").map(String::as_str), Some(REQUIRED_MESSAGE));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_conditional_requirement_follows_draft() {
        let off = validate(TABLE, &draft(&[("name", "ok")]), &ctx());
        assert!(off.is_empty());

        let on = validate(TABLE, &draft(&[("name", "ok"), ("extra", "true")]), &ctx());
        assert_eq!(on.get("extra_value").map(String::as_str), Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn test_year_range_uses_current_year() {
        let errors = validate(TABLE, &draft(&[("name", "ok"), ("year", "2025")]), &ctx());
        assert_eq!(errors["year"], "El año debe estar entre 1950 y 2024");

        let errors = validate(TABLE, &draft(&[("name", "ok"), ("year", "2024")]), &ctx());
        assert!(errors.is_empty());

        let errors = validate(TABLE, &draft(&[("name", "ok"), ("year", "1949")]), &ctx());
        assert!(errors.contains_key("year"));
    }

    #[test]
    fn test_number_rule_rejects_zero_and_garbage() {
        for bad in ["0", "-3", "abc", "NaN"] {
            let errors = validate(TABLE, &draft(&[("name", "ok"), ("amount", bad)]), &ctx());
            assert_eq!(errors["amount"], "positive", "value {bad}");
        }
        let errors = validate(TABLE, &draft(&[("name", "ok"), ("amount", "12,5")]), &ctx());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_future_dates_are_rejected() {
        let errors = validate(TABLE, &draft(&[("name", "ok"), ("date", "2024-06-16")]), &ctx());
        assert_eq!(errors["date"], "future");

        let errors = validate(TABLE, &draft(&[("name", "ok"), ("date", "2024-06-15")]), &ctx());
        assert!(errors.is_empty());

        let errors = validate(TABLE, &draft(&[("name", "ok"), ("date", "15.06.2024")]), &ctx());
        assert_eq!(errors["date"], "Fecha inválida");
    }

    #[test]
    fn test_first_failing_rule_wins_and_digits_are_exact() {
        let errors = validate(
            TABLE,
            &draft(&[("name", "toolongname"), ("digits", "12a")]),
            &ctx(),
        );
        assert_eq!(errors["name"], "too long");
        assert_eq!(errors["digits"], "three digits");
    }

    #[test]
    fn test_whole_number_rejects_fractions() {
        assert!(validate(TABLE, &draft(&[("name", "ok"), ("count", "1500")]), &ctx()).is_empty());
        for fraction in ["1500,5", "1500.5", "abc"] {
            let errors = validate(TABLE, &draft(&[("name", "ok"), ("count", fraction)]), &ctx());
            assert_eq!(errors.get("count").map(String::as_str), Some("whole"));
        }
        assert_eq!(parse_whole_number(" 42 "), Some(42));
    }
}
