//! Topic administration list.

use judge_console_net::HttpMethod;
use serde::{Deserialize, Serialize};

use super::{NoFilters, Resource, RestListSource, sort_fields};
use crate::list::{ListController, SortOrder};

/// A problem topic, e.g. "Dynamic Programming".
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

sort_fields! {
    pub enum TopicSortField {
        Name => "name",
        CreatedAt => "createdAt",
    }
}

/// `GET /topics`
pub struct Topics;

impl Resource for Topics {
    type Item = Topic;
    type Filters = NoFilters;
    type SortField = TopicSortField;

    const NAME: &'static str = "topics";
    const PATH: &'static str = "/topics";
    const METHOD: HttpMethod = HttpMethod::Get;
    const DEFAULT_SORT: (TopicSortField, SortOrder) = (TopicSortField::Name, SortOrder::Asc);
    const ERROR_MESSAGE: &'static str = "Failed to load topics";
}

pub type TopicList = ListController<RestListSource<Topics>>;
