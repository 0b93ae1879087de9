//! Analytics service: Descriptive statistics behind the dashboard charts.
//!
//! Computes, over the full dataset:
//! - Retained/left counts per salary tier and per department
//! - Lower-triangle correlation matrix of the encoded features and label
//! - Kernel density curves of the numeric columns
//! - Box-plot summaries of the numeric columns, retained vs left

use std::collections::BTreeMap;

use crate::domain::{Department, EmployeeRecord, SalaryTier, DEPARTMENTS};
use crate::ports::DatasetSource;

/// Numeric dataset columns shown in the distribution views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericColumn {
    SatisfactionLevel,
    LastEvaluation,
    NumberProject,
    AverageMonthlyHours,
    TimeSpendCompany,
}

impl NumericColumn {
    pub const ALL: [NumericColumn; 5] = [
        Self::SatisfactionLevel,
        Self::LastEvaluation,
        Self::NumberProject,
        Self::AverageMonthlyHours,
        Self::TimeSpendCompany,
    ];

    /// Column name in the dataset.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::SatisfactionLevel => "satisfaction_level",
            Self::LastEvaluation => "last_evaluation",
            Self::NumberProject => "number_project",
            Self::AverageMonthlyHours => "average_montly_hours",
            Self::TimeSpendCompany => "time_spend_company",
        }
    }

    #[must_use]
    pub fn value(&self, record: &EmployeeRecord) -> f64 {
        match self {
            Self::SatisfactionLevel => record.satisfaction_level,
            Self::LastEvaluation => record.last_evaluation,
            Self::NumberProject => f64::from(record.number_project),
            Self::AverageMonthlyHours => record.average_monthly_hours,
            Self::TimeSpendCompany => f64::from(record.time_spend_company),
        }
    }
}

/// Retained and left counts for one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCount {
    pub key: String,
    pub retained: u64,
    pub left: u64,
}

/// Pearson correlations with the upper triangle (and diagonal) masked.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// `values[i][j]` is `Some` only for `j < i` with non-constant columns
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    #[must_use]
    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == row)?;
        let j = self.columns.iter().position(|c| c == col)?;
        self.values[i][j]
    }
}

/// Gaussian kernel density estimate sampled on an even grid.
#[derive(Debug, Clone)]
pub struct DensityCurve {
    pub column: NumericColumn,
    pub bandwidth: f64,
    /// (x, density) pairs from the column minimum to maximum
    pub points: Vec<(f64, f64)>,
}

/// Five-number summary with Tukey whiskers.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: usize,
}

/// Box summaries of one column split by outcome.
#[derive(Debug, Clone)]
pub struct GroupedBoxSummary {
    pub column: NumericColumn,
    pub retained: Option<BoxSummary>,
    pub left: Option<BoxSummary>,
}

/// Default number of grid points for density curves.
pub const DENSITY_POINTS: usize = 100;

/// Service computing the dashboard statistics.
pub struct AnalyticsService {
    records: Vec<EmployeeRecord>,
}

impl AnalyticsService {
    /// Create a service over already loaded records.
    #[must_use]
    pub fn new(records: Vec<EmployeeRecord>) -> Self {
        Self { records }
    }

    /// Load every record of the source.
    ///
    /// # Errors
    /// Returns the source error if loading fails.
    pub fn from_source<D: DatasetSource>(source: &D) -> Result<Self, D::Error> {
        Ok(Self::new(source.load_records()?))
    }

    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Share of employees who left.
    #[must_use]
    pub fn attrition_rate(&self) -> Option<f64> {
        if self.records.is_empty() {
            return None;
        }
        let left = self.records.iter().filter(|r| r.has_left()).count();
        Some(left as f64 / self.records.len() as f64)
    }

    /// Retained/left counts per salary label, sorted by label.
    #[must_use]
    pub fn salary_counts(&self) -> Vec<GroupCount> {
        self.group_counts(|r| r.salary.clone())
    }

    /// Retained/left counts per department, sorted by name.
    #[must_use]
    pub fn department_counts(&self) -> Vec<GroupCount> {
        self.group_counts(|r| r.department.clone())
    }

    fn group_counts<F>(&self, key: F) -> Vec<GroupCount>
    where
        F: Fn(&EmployeeRecord) -> String,
    {
        let mut groups: BTreeMap<String, (u64, u64)> = BTreeMap::new();
        for record in &self.records {
            let entry = groups.entry(key(record)).or_default();
            if record.has_left() {
                entry.1 += 1;
            } else {
                entry.0 += 1;
            }
        }

        groups
            .into_iter()
            .map(|(key, (retained, left))| GroupCount {
                key,
                retained,
                left,
            })
            .collect()
    }

    /// Correlation matrix over the encoded features and the label.
    ///
    /// All ten department dummies are included here, unlike the model's
    /// feature vector which drops `technical`.
    #[must_use]
    pub fn correlation_matrix(&self) -> CorrelationMatrix {
        let mut columns: Vec<String> = [
            "satisfaction_level",
            "number_project",
            "average_montly_hours",
            "time_spend_company",
            "salary",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        columns.extend(DEPARTMENTS.iter().map(|d| d.as_str().to_string()));
        columns.push("left".to_string());

        let mut data: Vec<Vec<f64>> = vec![Vec::with_capacity(self.records.len()); columns.len()];
        for r in &self.records {
            let salary = SalaryTier::from_label(&r.salary).map_or(f64::NAN, |t| f64::from(t.code()));
            let department = r.department.parse::<Department>().ok();

            data[0].push(r.satisfaction_level);
            data[1].push(f64::from(r.number_project));
            data[2].push(r.average_monthly_hours);
            data[3].push(f64::from(r.time_spend_company));
            data[4].push(salary);
            for (k, d) in DEPARTMENTS.iter().enumerate() {
                data[5 + k].push(if department == Some(*d) { 1.0 } else { 0.0 });
            }
            data[5 + DEPARTMENTS.len()].push(f64::from(r.left));
        }

        let n = columns.len();
        let mut values = vec![vec![None; n]; n];
        for i in 0..n {
            for j in 0..i {
                values[i][j] = pearson(&data[i], &data[j]);
            }
        }

        CorrelationMatrix { columns, values }
    }

    /// Kernel density curve of a column with `points` grid samples.
    ///
    /// Returns `None` with fewer than two records or a constant column.
    #[must_use]
    pub fn density(&self, column: NumericColumn, points: usize) -> Option<DensityCurve> {
        let values: Vec<f64> = self.records.iter().map(|r| column.value(r)).collect();
        let curve = gaussian_kde(&values, points)?;
        Some(DensityCurve {
            column,
            bandwidth: curve.0,
            points: curve.1,
        })
    }

    /// Box summaries of a column for retained and left employees.
    #[must_use]
    pub fn box_summary(&self, column: NumericColumn) -> GroupedBoxSummary {
        let (left, retained): (Vec<&EmployeeRecord>, Vec<&EmployeeRecord>) =
            self.records.iter().partition(|r| r.has_left());

        let summarize = |group: Vec<&EmployeeRecord>| {
            let values: Vec<f64> = group.iter().map(|r| column.value(r)).collect();
            box_summary(&values)
        };

        GroupedBoxSummary {
            column,
            retained: summarize(retained),
            left: summarize(left),
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Pearson correlation; `None` when undefined.
fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let (mx, my) = (mean(x), mean(y));
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (a, b) in x.iter().zip(y) {
        let (dx, dy) = (a - mx, b - my);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    let r = sxy / (sxx * syy).sqrt();
    r.is_finite().then_some(r.clamp(-1.0, 1.0))
}

/// Gaussian KDE with Scott's rule; returns (bandwidth, samples).
fn gaussian_kde(values: &[f64], points: usize) -> Option<(f64, Vec<(f64, f64)>)> {
    let n = values.len();
    if n < 2 || points < 2 {
        return None;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1) as f64;
    let std = variance.sqrt();
    if !(std.is_finite() && std > 0.0) {
        return None;
    }

    let bandwidth = std * (n as f64).powf(-0.2);
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let step = (hi - lo) / (points - 1) as f64;
    let norm = 1.0 / (n as f64 * bandwidth * (2.0 * std::f64::consts::PI).sqrt());

    let samples = (0..points)
        .map(|k| {
            let x = lo + step * k as f64;
            let density: f64 = values
                .iter()
                .map(|v| (-0.5 * ((x - v) / bandwidth).powi(2)).exp())
                .sum();
            (x, density * norm)
        })
        .collect();

    Some((bandwidth, samples))
}

/// Quantile with linear interpolation between closest ranks.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

fn box_summary(values: &[f64]) -> Option<BoxSummary> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let q1 = quantile(&sorted, 0.25);
    let median = quantile(&sorted, 0.5);
    let q3 = quantile(&sorted, 0.75);
    let iqr = q3 - q1;
    let (low_fence, high_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

    let inside = sorted
        .iter()
        .copied()
        .filter(|v| (low_fence..=high_fence).contains(v));
    let lower_whisker = inside.clone().fold(f64::INFINITY, f64::min);
    let upper_whisker = inside.fold(f64::NEG_INFINITY, f64::max);
    let outliers = sorted
        .iter()
        .filter(|v| !(low_fence..=high_fence).contains(*v))
        .count();

    Some(BoxSummary {
        count: sorted.len(),
        min: sorted[0],
        q1,
        median,
        q3,
        max: sorted[sorted.len() - 1],
        lower_whisker,
        upper_whisker,
        outliers,
    })
}
