use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub user_id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub profile_image: String,
}

/// Per-user usage counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserActivity {
    pub id: i64,
    pub user_id: String,
    #[serde(default)]
    pub resume_count: u32,
    #[serde(default)]
    pub ats_check_count: u32,
    #[serde(default)]
    pub last_active: String,
}
