//! Employee data types for attrition prediction.
//!
//! Column names follow the HR_comma_sep.csv dataset the classifier was
//! trained on, including its `average_montly_hours` spelling.

use serde::{Deserialize, Serialize};

use super::encoding::EncodingError;
use super::validation::FormField;

/// Department categories present in the training data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Department {
    It,
    RandD,
    Accounting,
    Hr,
    Management,
    Marketing,
    ProductMng,
    Sales,
    Support,
    Technical,
}

/// All departments, in the order the dataset's dummy columns sort.
pub const DEPARTMENTS: [Department; 10] = [
    Department::It,
    Department::RandD,
    Department::Accounting,
    Department::Hr,
    Department::Management,
    Department::Marketing,
    Department::ProductMng,
    Department::Sales,
    Department::Support,
    Department::Technical,
];

impl Department {
    /// Value as it appears in the dataset and in the model's column names.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::It => "IT",
            Self::RandD => "RandD",
            Self::Accounting => "accounting",
            Self::Hr => "hr",
            Self::Management => "management",
            Self::Marketing => "marketing",
            Self::ProductMng => "product_mng",
            Self::Sales => "sales",
            Self::Support => "support",
            Self::Technical => "technical",
        }
    }

    /// Human-readable label for the form selector.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::It => "IT",
            Self::RandD => "Research & Development",
            Self::Accounting => "Accounting",
            Self::Hr => "HR",
            Self::Management => "Management",
            Self::Marketing => "Marketing",
            Self::ProductMng => "Product Management",
            Self::Sales => "Sales",
            Self::Support => "Support",
            Self::Technical => "Technical",
        }
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Department {
    type Err = EncodingError;

    /// Exact, case-sensitive match against the dataset values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DEPARTMENTS
            .iter()
            .copied()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| EncodingError::UnknownDepartment(s.to_string()))
    }
}

/// Salary tier, ordinal-encoded as 1/2/3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SalaryTier {
    Low,
    Medium,
    High,
}

impl SalaryTier {
    pub const ALL: [SalaryTier; 3] = [Self::Low, Self::Medium, Self::High];

    /// Numeric code used in the feature vector.
    #[must_use]
    pub fn code(&self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    /// Parse the form's code ("1", "2" or "3").
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "1" => Some(Self::Low),
            "2" => Some(Self::Medium),
            "3" => Some(Self::High),
            _ => None,
        }
    }

    /// Parse the dataset's label ("low", "medium" or "high").
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Raw values of the custom prediction form, exactly as typed or selected.
///
/// An empty string stands for a missing value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub satisfaction_level: String,
    pub number_project: String,
    pub average_monthly_hours: String,
    pub time_spend_company: String,
    /// Salary code: "1" (low), "2" (medium) or "3" (high)
    pub salary: String,
    pub department: String,
}

impl FormValues {
    /// Raw value of a field.
    #[must_use]
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::SatisfactionLevel => &self.satisfaction_level,
            FormField::NumberProject => &self.number_project,
            FormField::AverageMonthlyHours => &self.average_monthly_hours,
            FormField::TimeSpendCompany => &self.time_spend_company,
            FormField::Salary => &self.salary,
            FormField::Department => &self.department,
        }
    }

    /// Mutable buffer of a field.
    pub fn get_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::SatisfactionLevel => &mut self.satisfaction_level,
            FormField::NumberProject => &mut self.number_project,
            FormField::AverageMonthlyHours => &mut self.average_monthly_hours,
            FormField::TimeSpendCompany => &mut self.time_spend_company,
            FormField::Salary => &mut self.salary,
            FormField::Department => &mut self.department,
        }
    }
}

/// Validated employee profile ready for encoding.
///
/// The department is kept as the raw string: membership in the known
/// categories is the encoder's contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    pub satisfaction_level: f64,
    pub number_project: u32,
    pub average_monthly_hours: f64,
    pub time_spend_company: u32,
    pub salary: SalaryTier,
    pub department: String,
}

/// One row of the HR dataset. Columns not listed here are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub satisfaction_level: f64,
    pub last_evaluation: f64,
    pub number_project: u32,
    #[serde(rename = "average_montly_hours")]
    pub average_monthly_hours: f64,
    pub time_spend_company: u32,
    /// 1 if the employee left, 0 if retained
    pub left: u8,
    #[serde(rename = "Department")]
    pub department: String,
    pub salary: String,
}

impl EmployeeRecord {
    #[must_use]
    pub fn has_left(&self) -> bool {
        self.left == 1
    }

    /// Profile view of this record, for feeding the same encoder the form uses.
    ///
    /// Returns `None` if the salary label is not one of low/medium/high.
    #[must_use]
    pub fn to_profile(&self) -> Option<EmployeeProfile> {
        Some(EmployeeProfile {
            satisfaction_level: self.satisfaction_level,
            number_project: self.number_project,
            average_monthly_hours: self.average_monthly_hours,
            time_spend_company: self.time_spend_company,
            salary: SalaryTier::from_label(&self.salary)?,
            department: self.department.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_round_trip_names() {
        for dept in DEPARTMENTS {
            let parsed: Department = dept.as_str().parse().expect("Should parse");
            assert_eq!(parsed, dept);
        }
    }

    #[test]
    fn test_department_is_case_sensitive() {
        assert!("Sales".parse::<Department>().is_err());
        assert!("it".parse::<Department>().is_err());
        assert!("engineering".parse::<Department>().is_err());
    }

    #[test]
    fn test_salary_codes() {
        assert_eq!(SalaryTier::from_code("1"), Some(SalaryTier::Low));
        assert_eq!(SalaryTier::from_code("3"), Some(SalaryTier::High));
        assert_eq!(SalaryTier::from_code("4"), None);
        assert_eq!(SalaryTier::from_code(""), None);
        assert_eq!(SalaryTier::from_label("medium").map(|t| t.code()), Some(2));
        assert_eq!(SalaryTier::from_label("Medium"), None);
    }

    #[test]
    fn test_record_to_profile() {
        let record = EmployeeRecord {
            satisfaction_level: 0.38,
            last_evaluation: 0.53,
            number_project: 2,
            average_monthly_hours: 157.0,
            time_spend_company: 3,
            left: 1,
            department: "sales".into(),
            salary: "low".into(),
        };
        let profile = record.to_profile().expect("Should convert");
        assert_eq!(profile.salary, SalaryTier::Low);
        assert_eq!(profile.department, "sales");
        assert!(record.has_left());

        let bad = EmployeeRecord {
            salary: "enormous".into(),
            ..record
        };
        assert!(bad.to_profile().is_none());
    }
}
