//! Method names exposed by the marketplace API.

pub const USER_REGISTER: &str = "user.register";
pub const USER_LOGIN: &str = "user.login";
pub const USER_LOGOUT: &str = "user.logout";
pub const USER_GET_PROFILE: &str = "user.get_profile";
pub const USER_UPDATE_PROFILE: &str = "user.update_profile";
pub const USER_HIDE_PROFILE: &str = "user.hide_profile";
pub const USER_DELETE_ACCOUNT: &str = "user.delete_account";
pub const SEARCH: &str = "search";
pub const ADMIN_GET_ALL_USERS: &str = "admin.get_all_users";
pub const ADMIN_UPDATE_USER: &str = "admin.update_user";
pub const ADMIN_DELETE_USER: &str = "admin.delete_user";
