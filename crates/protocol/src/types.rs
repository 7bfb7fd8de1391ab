//! RPC Parameter/Result Types
//!
//! One params/result pair per API method. Field names and shapes follow the
//! server's contract exactly; optional params are omitted from the wire
//! rather than sent as null.

use serde::{Deserialize, Serialize};

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    10
}

/// user.register - Create an account and start a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterParams {
    pub username: String,
    pub password: String,
    pub name: String,
    pub service_type: String,
    pub experience: i64,
    pub price: i64,
    #[serde(default)]
    pub about: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterResult {
    pub success: bool,
    pub user_id: i64,
}

/// user.login - Authenticate and start a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginParams {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResult {
    pub success: bool,
    pub user_id: i64,
}

/// Bare `{"success": true}` result shared by logout, profile update,
/// account/user deletion and admin update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AckResult {
    pub success: bool,
}

/// user.get_profile - Fetch a profile
///
/// With `user_id` absent the server returns the caller's own profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetProfileParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub service_type: String,
    pub experience: i64,
    pub price: i64,
    #[serde(default)]
    pub about: Option<String>,
    pub is_hidden: bool,
    pub is_admin: bool,
}

/// user.update_profile - Partially update the caller's profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateProfileParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
}

/// user.hide_profile - Toggle listing visibility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HideProfileParams {
    pub hide: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HideProfileResult {
    pub success: bool,
    pub is_hidden: bool,
}

/// search - Paginated provider search
///
/// Empty filter strings match everything; absent range bounds are open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub service_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_max: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_max: Option<i64>,
    #[serde(default = "default_page")]
    pub page: i64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            name: String::new(),
            service_type: String::new(),
            experience_min: None,
            experience_max: None,
            price_min: None,
            price_max: None,
            page: default_page(),
        }
    }
}

/// One row of a search result page. `about` arrives truncated server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCard {
    pub id: i64,
    pub name: String,
    pub service_type: String,
    pub experience: i64,
    pub price: i64,
    #[serde(default)]
    pub about: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub users: Vec<SearchCard>,
    pub page: i64,
    pub total_pages: i64,
    #[serde(default)]
    pub total_users: i64,
}

impl SearchResult {
    pub fn has_prev_page(&self) -> bool {
        self.page > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }
}

/// admin.get_all_users - Paginated listing of every account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminListParams {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

impl Default for AdminListParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUserRow {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub service_type: String,
    pub is_hidden: bool,
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminListResult {
    pub users: Vec<AdminUserRow>,
    pub page: i64,
    pub total_pages: i64,
    #[serde(default)]
    pub total_users: i64,
}

/// admin.update_user - Partially update any account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUpdateUserParams {
    pub user_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
}

impl AdminUpdateUserParams {
    pub fn for_user(user_id: i64) -> Self {
        Self {
            user_id,
            name: None,
            service_type: None,
            experience: None,
            price: None,
            about: None,
            is_hidden: None,
            is_admin: None,
        }
    }
}

/// admin.delete_user - Remove an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminDeleteUserParams {
    pub user_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn search_params_omit_unset_range_bounds() {
        let params = SearchParams {
            name: "Ivan".to_string(),
            experience_min: Some(3),
            page: 2,
            ..Default::default()
        };
        let wire = serde_json::to_value(&params).unwrap();

        assert_eq!(
            wire,
            json!({
                "name": "Ivan",
                "service_type": "",
                "experience_min": 3,
                "page": 2,
            })
        );
    }

    #[test]
    fn search_result_decodes_without_total_users() {
        // The server omits total_users on some code paths; the client must
        // still accept the page.
        let result: SearchResult =
            serde_json::from_value(json!({"users": [], "page": 1, "total_pages": 1})).unwrap();
        assert!(result.users.is_empty());
        assert!(!result.has_prev_page());
        assert!(!result.has_next_page());
        assert_eq!(result.total_users, 0);
    }

    #[test]
    fn search_result_pagination_flags() {
        let result: SearchResult = serde_json::from_value(json!({
            "users": [],
            "page": 2,
            "total_pages": 5,
            "total_users": 23,
        }))
        .unwrap();
        assert!(result.has_prev_page());
        assert!(result.has_next_page());
    }

    #[test]
    fn profile_decodes_null_about() {
        let profile: Profile = serde_json::from_value(json!({
            "id": 4,
            "username": "user4",
            "name": "Anna",
            "service_type": "Designer",
            "experience": 6,
            "price": 2500,
            "about": null,
            "is_hidden": false,
            "is_admin": false,
        }))
        .unwrap();
        assert_eq!(profile.about, None);
        assert!(!profile.is_admin);
    }

    #[test]
    fn update_params_serialize_only_changed_fields() {
        let params = UpdateProfileParams {
            price: Some(3000),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&params).unwrap(), json!({"price": 3000}));
    }

    #[test]
    fn admin_update_for_user_carries_only_the_id() {
        let params = AdminUpdateUserParams {
            is_admin: Some(true),
            ..AdminUpdateUserParams::for_user(9)
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"user_id": 9, "is_admin": true})
        );
    }
}
