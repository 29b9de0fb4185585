//! Problem bank list.

use chrono::{DateTime, Utc};
use judge_console_net::HttpMethod;
use serde::{Deserialize, Serialize};

use super::{Resource, RestListSource, Tag, Topic, sort_fields};
use crate::list::{ListController, ListFilters, SortOrder};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A problem row, with its tags and topics inlined.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    pub difficulty: Difficulty,
    pub is_public: bool,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub topics: Vec<Topic>,
    /// Share of accepted submissions, in percent.
    #[serde(default)]
    pub acceptance_rate: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tag_ids: Vec<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub topic_ids: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

impl ListFilters for ProblemFilters {}

sort_fields! {
    pub enum ProblemSortField {
        CreatedAt => "createdAt",
        Title => "title",
        Difficulty => "difficulty",
        AcceptanceRate => "acceptanceRate",
    }
}

/// `POST /problems/search`
pub struct Problems;

impl Resource for Problems {
    type Item = Problem;
    type Filters = ProblemFilters;
    type SortField = ProblemSortField;

    const NAME: &'static str = "problems";
    const PATH: &'static str = "/problems/search";
    const METHOD: HttpMethod = HttpMethod::Post;
    const DEFAULT_SORT: (ProblemSortField, SortOrder) = (ProblemSortField::CreatedAt, SortOrder::Desc);
    const ERROR_MESSAGE: &'static str = "Failed to load problems";
}

pub type ProblemList = ListController<RestListSource<Problems>>;
