//! Tag administration list.

use judge_console_net::HttpMethod;
use serde::{Deserialize, Serialize};

use super::{NoFilters, Resource, RestListSource, sort_fields};
use crate::list::{ListController, SortOrder};

/// A problem tag.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub problem_count: u32,
}

sort_fields! {
    pub enum TagSortField {
        Name => "name",
        CreatedAt => "createdAt",
        ProblemCount => "problemCount",
    }
}

/// `GET /tags`
pub struct Tags;

impl Resource for Tags {
    type Item = Tag;
    type Filters = NoFilters;
    type SortField = TagSortField;

    const NAME: &'static str = "tags";
    const PATH: &'static str = "/tags";
    const METHOD: HttpMethod = HttpMethod::Get;
    const DEFAULT_SORT: (TagSortField, SortOrder) = (TagSortField::Name, SortOrder::Asc);
    const ERROR_MESSAGE: &'static str = "Failed to load tags";
}

pub type TagList = ListController<RestListSource<Tags>>;
