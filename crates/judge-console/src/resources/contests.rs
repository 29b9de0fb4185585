//! Contest management list.

use chrono::{DateTime, Utc};
use judge_console_net::HttpMethod;
use serde::{Deserialize, Serialize};

use super::{Resource, RestListSource, sort_fields};
use crate::list::{ListController, ListFilters, SortOrder};

/// Contest lifecycle phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContestStatus {
    Upcoming,
    Running,
    Ended,
}

/// A contest row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contest {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    pub status: ContestStatus,
    pub is_public: bool,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub participant_count: u32,
}

impl Contest {
    /// Scheduled length of the contest.
    pub fn duration(&self) -> chrono::Duration {
        self.end_time - self.start_time
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ContestStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

impl ListFilters for ContestFilters {}

sort_fields! {
    pub enum ContestSortField {
        StartTime => "startTime",
        EndTime => "endTime",
        Title => "title",
        CreatedAt => "createdAt",
    }
}

/// `GET /contests`
pub struct Contests;

impl Resource for Contests {
    type Item = Contest;
    type Filters = ContestFilters;
    type SortField = ContestSortField;

    const NAME: &'static str = "contests";
    const PATH: &'static str = "/contests";
    const METHOD: HttpMethod = HttpMethod::Get;
    const DEFAULT_SORT: (ContestSortField, SortOrder) = (ContestSortField::StartTime, SortOrder::Desc);
    const ERROR_MESSAGE: &'static str = "Failed to load contests";
}

pub type ContestList = ListController<RestListSource<Contests>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contest_deserialize() {
        let contest: Contest = serde_json::from_value(serde_json::json!({
            "id": 12,
            "title": "Weekly Round 42",
            "status": "running",
            "isPublic": true,
            "startTime": "2024-05-01T10:00:00Z",
            "endTime": "2024-05-01T12:30:00Z"
        }))
        .unwrap();

        assert_eq!(contest.status, ContestStatus::Running);
        assert_eq!(contest.participant_count, 0);
        assert_eq!(contest.duration(), chrono::Duration::minutes(150));
    }

    #[test]
    fn test_filters_serialize() {
        let filters = ContestFilters {
            status: Some(ContestStatus::Upcoming),
            is_public: None,
        };
        assert_eq!(
            serde_json::to_value(&filters).unwrap(),
            serde_json::json!({ "status": "upcoming" })
        );
    }
}
