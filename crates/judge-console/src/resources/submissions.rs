//! Submission monitoring list.

use chrono::{DateTime, Days, NaiveDate, Utc};
use judge_console_net::HttpMethod;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::{Resource, RestListSource, sort_fields};
use crate::error::FilterError;
use crate::list::{ListController, ListFilters, SortOrder};

/// Judge verdict of a submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Pending,
    Running,
    Accepted,
    WrongAnswer,
    TimeLimitExceeded,
    MemoryLimitExceeded,
    RuntimeError,
    CompilationError,
}

impl Verdict {
    /// Whether judging has finished.
    pub fn is_final(self) -> bool {
        !matches!(self, Verdict::Pending | Verdict::Running)
    }
}

/// A submission row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: u64,
    pub problem_id: u64,
    pub user_id: u64,
    #[serde(default)]
    pub contest_id: Option<u64>,
    pub language_id: u64,
    pub status: Verdict,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub execution_time_ms: Option<u32>,
    #[serde(default)]
    pub memory_kb: Option<u32>,
    pub submitted_at: DateTime<Utc>,
}

/// Submission date filter.
///
/// Presets are resolved against the current UTC date when the request is
/// encoded and sent as `fromDate` / `toDate`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DateRange {
    #[default]
    Any,
    Today,
    Last7Days,
    Last30Days,
    Custom {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
}

impl DateRange {
    /// Both-bounds custom range.
    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        DateRange::Custom {
            from: Some(from),
            to: Some(to),
        }
    }

    /// The inclusive `(from, to)` bounds relative to `today`.
    pub fn bounds(&self, today: NaiveDate) -> (Option<NaiveDate>, Option<NaiveDate>) {
        let days_back = |days: u64| today.checked_sub_days(Days::new(days));
        match *self {
            DateRange::Any => (None, None),
            DateRange::Today => (Some(today), Some(today)),
            DateRange::Last7Days => (days_back(6), Some(today)),
            DateRange::Last30Days => (days_back(29), Some(today)),
            DateRange::Custom { from, to } => (from, to),
        }
    }

    /// Custom ranges need both ends, in order.
    pub fn validate(&self) -> Result<(), FilterError> {
        match *self {
            DateRange::Custom {
                from: Some(from),
                to: Some(to),
            } if from > to => Err(FilterError::InvertedDateRange { from, to }),
            DateRange::Custom {
                from: Some(_),
                to: Some(_),
            } => Ok(()),
            DateRange::Custom { .. } => Err(FilterError::MissingDateBound),
            _ => Ok(()),
        }
    }
}

impl Serialize for DateRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (from, to) = self.bounds(Utc::now().date_naive());
        let mut map = serializer.serialize_map(None)?;
        if let Some(from) = from {
            map.serialize_entry("fromDate", &from)?;
        }
        if let Some(to) = to {
            map.serialize_entry("toDate", &to)?;
        }
        map.end()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Verdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contest_id: Option<u64>,
    #[serde(flatten)]
    pub date_range: DateRange,
}

impl ListFilters for SubmissionFilters {
    fn validate(&self) -> Result<(), FilterError> {
        self.date_range.validate()
    }
}

sort_fields! {
    pub enum SubmissionSortField {
        SubmittedAt => "submittedAt",
        ExecutionTime => "executionTime",
        Memory => "memory",
        Score => "score",
    }
}

/// `POST /submissions/search`
pub struct Submissions;

impl Resource for Submissions {
    type Item = Submission;
    type Filters = SubmissionFilters;
    type SortField = SubmissionSortField;

    const NAME: &'static str = "submissions";
    const PATH: &'static str = "/submissions/search";
    const METHOD: HttpMethod = HttpMethod::Post;
    const DEFAULT_SORT: (SubmissionSortField, SortOrder) =
        (SubmissionSortField::SubmittedAt, SortOrder::Desc);
    const ERROR_MESSAGE: &'static str = "Failed to load submissions";
}

pub type SubmissionList = ListController<RestListSource<Submissions>>;
