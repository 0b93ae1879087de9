//! Input validation for the custom prediction form.
//!
//! Every predicate takes the raw field text (empty means missing) and
//! returns a plain verdict. None of them panic on malformed input.
//!
//! Fields are tied to their predicate through [`FormField::validator`],
//! a static table consulted when the form is submitted.

use std::sync::OnceLock;

use regex::Regex;

use super::employee::{EmployeeProfile, FormValues, SalaryTier};

/// Shape accepted for the satisfaction level: "0." and one or two digits.
static SATISFACTION_PATTERN: OnceLock<Regex> = OnceLock::new();

fn satisfaction_pattern() -> &'static Regex {
    SATISFACTION_PATTERN.get_or_init(|| Regex::new(r"^0\.[0-9]{1,2}$").expect("Valid regex"))
}

/// Validate a satisfaction-level style decimal.
///
/// Accepts "0.x" or "0.xx" only. This deliberately rejects "1.00" even
/// though the form advertises 1.00 as its maximum, and accepts "0.0".
#[must_use]
pub fn validate_float(value: &str) -> bool {
    value.len() <= 4 && satisfaction_pattern().is_match(value) && value.parse::<f64>().is_ok()
}

/// Validate an integer in [1, 10] (number of projects).
#[must_use]
pub fn validate_integer(value: &str) -> bool {
    integer_in_range(value, 1, 10)
}

/// Validate a number in [1, 310] (average monthly hours).
///
/// Integer-valued decimals such as "157.0" are accepted.
#[must_use]
pub fn validate_float_range(value: &str) -> bool {
    match value.trim().parse::<f64>() {
        Ok(v) => (1.0..=310.0).contains(&v),
        Err(_) => false,
    }
}

/// Validate an integer in [1, 10] (years spent in the company).
#[must_use]
pub fn validate_integer_range(value: &str) -> bool {
    integer_in_range(value, 1, 10)
}

fn integer_in_range(value: &str, min: i64, max: i64) -> bool {
    match value.trim().parse::<i64>() {
        Ok(v) => (min..=max).contains(&v),
        Err(_) => false,
    }
}

/// Signature shared by all field predicates.
pub type Validator = fn(&str) -> bool;

/// Fields of the custom prediction form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    SatisfactionLevel,
    NumberProject,
    AverageMonthlyHours,
    TimeSpendCompany,
    Salary,
    Department,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        Self::SatisfactionLevel,
        Self::NumberProject,
        Self::AverageMonthlyHours,
        Self::TimeSpendCompany,
        Self::Salary,
        Self::Department,
    ];

    /// Predicate guarding this field.
    ///
    /// Salary and department are selections: salary is checked when its
    /// code is parsed, department by the feature encoder.
    #[must_use]
    pub fn validator(&self) -> Option<Validator> {
        match self {
            Self::SatisfactionLevel => Some(validate_float),
            Self::NumberProject => Some(validate_integer),
            Self::AverageMonthlyHours => Some(validate_float_range),
            Self::TimeSpendCompany => Some(validate_integer_range),
            Self::Salary | Self::Department => None,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::SatisfactionLevel => "Satisfaction Level",
            Self::NumberProject => "Number of Projects",
            Self::AverageMonthlyHours => "Average Monthly Hours",
            Self::TimeSpendCompany => "Time Spent in Company",
            Self::Salary => "Salary",
            Self::Department => "Department",
        }
    }

    /// Placeholder shown while the field is empty.
    #[must_use]
    pub fn hint(&self) -> &'static str {
        match self {
            Self::SatisfactionLevel => "float between 0.01 and 1.00",
            Self::NumberProject => "integer between 1 and 10",
            Self::AverageMonthlyHours => "integer between 1 and 310",
            Self::TimeSpendCompany => "integer between 1 and 10",
            Self::Salary => "[←/→] low, medium, high",
            Self::Department => "[←/→] select department",
        }
    }

    /// Message shown when the field is rejected.
    #[must_use]
    pub fn invalid_feedback(&self) -> &'static str {
        match self {
            Self::SatisfactionLevel => "Please toggle a float number between 0.01 and 0.99.",
            Self::NumberProject => "Please toggle or input an integer between 1 and 10.",
            Self::AverageMonthlyHours => "Please toggle an integer number between 1 and 310.",
            Self::TimeSpendCompany => {
                "Please toggle or input an integer number between 1 and 10."
            }
            Self::Salary => "Please select a salary tier (low, medium or high).",
            Self::Department => "Please select a department.",
        }
    }
}

/// A form field failed its validation rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}: {}", .field.label(), .field.invalid_feedback())]
pub struct ValidationError {
    /// The offending field
    pub field: FormField,
    /// Raw value that was rejected
    pub value: String,
}

impl ValidationError {
    fn new(field: FormField, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

/// Validate every field of the form and convert it to a typed profile.
///
/// Fields are checked in display order; the first failure is returned.
///
/// # Errors
/// Returns `ValidationError` naming the first field that does not pass.
pub fn validate_submission(form: &FormValues) -> Result<EmployeeProfile, ValidationError> {
    for field in FormField::ALL {
        if let Some(validate) = field.validator() {
            let raw = form.get(field);
            if !validate(raw) {
                tracing::debug!(field = field.label(), "Form field rejected");
                return Err(ValidationError::new(field, raw));
            }
        }
    }

    let parse_f64 = |field: FormField| {
        let raw = form.get(field);
        raw.trim()
            .parse::<f64>()
            .map_err(|_| ValidationError::new(field, raw))
    };
    let parse_u32 = |field: FormField| {
        let raw = form.get(field);
        raw.trim()
            .parse::<u32>()
            .map_err(|_| ValidationError::new(field, raw))
    };

    let salary = SalaryTier::from_code(&form.salary)
        .ok_or_else(|| ValidationError::new(FormField::Salary, &form.salary))?;

    Ok(EmployeeProfile {
        satisfaction_level: parse_f64(FormField::SatisfactionLevel)?,
        number_project: parse_u32(FormField::NumberProject)?,
        average_monthly_hours: parse_f64(FormField::AverageMonthlyHours)?,
        time_spend_company: parse_u32(FormField::TimeSpendCompany)?,
        salary,
        department: form.department.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_form() -> FormValues {
        FormValues {
            satisfaction_level: "0.38".into(),
            number_project: "2".into(),
            average_monthly_hours: "157".into(),
            time_spend_company: "3".into(),
            salary: "1".into(),
            department: "sales".into(),
        }
    }

    #[test]
    fn test_validate_float() {
        assert!(validate_float("0.45"));
        assert!(validate_float("0.5"));
        assert!(validate_float("0.99"));
        assert!(!validate_float("1.00"));
        assert!(!validate_float("0.456"));
        assert!(!validate_float(""));
        assert!(!validate_float("abc"));
        assert!(!validate_float(".45"));
        assert!(!validate_float("0."));
        assert!(!validate_float(" 0.45"));
    }

    #[test]
    fn test_validate_float_accepts_zero_shapes() {
        // The pattern only checks shape, so zero passes.
        assert!(validate_float("0.0"));
        assert!(validate_float("0.00"));
    }

    #[test]
    fn test_validate_integer() {
        assert!(!validate_integer("0"));
        assert!(validate_integer("1"));
        assert!(validate_integer("10"));
        assert!(!validate_integer("11"));
        assert!(!validate_integer(""));
        assert!(!validate_integer("abc"));
        assert!(!validate_integer("2.5"));
        assert!(!validate_integer("-3"));
    }

    #[test]
    fn test_validate_float_range() {
        assert!(!validate_float_range("0.5"));
        assert!(validate_float_range("1"));
        assert!(validate_float_range("157.0"));
        assert!(validate_float_range("310"));
        assert!(!validate_float_range("311"));
        assert!(!validate_float_range("310.5"));
        assert!(!validate_float_range(""));
        assert!(!validate_float_range("NaN"));
        assert!(!validate_float_range("many"));
    }

    #[test]
    fn test_validate_integer_range() {
        assert!(!validate_integer_range("0"));
        assert!(validate_integer_range("5"));
        assert!(validate_integer_range("10"));
        assert!(!validate_integer_range("11"));
        assert!(!validate_integer_range(""));
    }

    #[test]
    fn test_numeric_predicates_trim_whitespace() {
        assert!(validate_integer(" 5 "));
        assert!(validate_integer_range("\t3"));
        assert!(validate_integer_range("10\n"));
        assert!(validate_float_range(" 157 "));
        assert!(validate_float_range("\t310.0 "));
        // Trimming never widens the range.
        assert!(!validate_integer(" 11 "));
        assert!(!validate_float_range(" 311 "));
        assert!(!validate_integer("   "));
    }

    #[test]
    fn test_validator_mapping() {
        assert!(FormField::SatisfactionLevel.validator().is_some());
        assert!(FormField::NumberProject.validator().is_some());
        assert!(FormField::AverageMonthlyHours.validator().is_some());
        assert!(FormField::TimeSpendCompany.validator().is_some());
        assert!(FormField::Salary.validator().is_none());
        assert!(FormField::Department.validator().is_none());

        let hours = FormField::AverageMonthlyHours
            .validator()
            .expect("Should have validator");
        assert!(hours("200"));
        assert!(!hours("400"));
    }

    #[test]
    fn test_submission_converts_to_profile() {
        let profile = validate_submission(&sample_form()).expect("Should validate");
        assert!((profile.satisfaction_level - 0.38).abs() < f64::EPSILON);
        assert_eq!(profile.number_project, 2);
        assert!((profile.average_monthly_hours - 157.0).abs() < f64::EPSILON);
        assert_eq!(profile.time_spend_company, 3);
        assert_eq!(profile.salary, SalaryTier::Low);
        assert_eq!(profile.department, "sales");
    }

    #[test]
    fn test_submission_reports_first_bad_field() {
        let mut form = sample_form();
        form.number_project = "12".into();
        form.time_spend_company = "0".into();

        let err = validate_submission(&form).expect_err("Should reject");
        assert_eq!(err.field, FormField::NumberProject);
        assert_eq!(err.value, "12");
        assert!(err.to_string().contains("Number of Projects"));
    }

    #[test]
    fn test_submission_rejects_missing_salary() {
        let mut form = sample_form();
        form.salary.clear();

        let err = validate_submission(&form).expect_err("Should reject");
        assert_eq!(err.field, FormField::Salary);
    }

    #[test]
    fn test_submission_leaves_department_to_encoder() {
        let mut form = sample_form();
        form.department = "engineering".into();

        let profile = validate_submission(&form).expect("Should validate");
        assert_eq!(profile.department, "engineering");
    }
}
