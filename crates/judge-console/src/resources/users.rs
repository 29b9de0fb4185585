//! User administration list.

use chrono::{DateTime, Utc};
use judge_console_net::HttpMethod;
use serde::{Deserialize, Serialize};

use super::{Resource, RestListSource, sort_fields};
use crate::list::{ListController, ListFilters, SortOrder};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Moderator,
    User,
}

/// A user account row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl ListFilters for UserFilters {}

sort_fields! {
    pub enum UserSortField {
        CreatedAt => "createdAt",
        Username => "username",
        Email => "email",
    }
}

/// `GET /users`
pub struct Users;

impl Resource for Users {
    type Item = User;
    type Filters = UserFilters;
    type SortField = UserSortField;

    const NAME: &'static str = "users";
    const PATH: &'static str = "/users";
    const METHOD: HttpMethod = HttpMethod::Get;
    const DEFAULT_SORT: (UserSortField, SortOrder) = (UserSortField::CreatedAt, SortOrder::Desc);
    const ERROR_MESSAGE: &'static str = "Failed to load users";
}

pub type UserList = ListController<RestListSource<Users>>;
