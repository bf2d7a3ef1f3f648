use serde::{Deserialize, Serialize};

use crate::backend::{BackendApi, FileRef};

/// The canonical resume record edited by the user and fed to every renderer.
///
/// Wire names stay camelCase so serialized content blobs written by earlier
/// clients keep decoding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<ProfileImage>,
}

/// Profile picture: either inline image data or a backend storage reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileImage {
    Stored(FileRef),
    Inline(String),
}

impl ProfileImage {
    /// Parses the stringly form the editor stores: a numeric file id or a data URI.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match raw.parse::<i64>() {
            Ok(id) => Some(ProfileImage::Stored(FileRef(id))),
            Err(_) => Some(ProfileImage::Inline(raw.to_string())),
        }
    }

    /// The `src` to embed: inline data as-is, stored files via their download URL.
    pub fn src(&self, backend: Option<&dyn BackendApi>) -> Option<String> {
        match self {
            ProfileImage::Inline(data) if !data.trim().is_empty() => Some(data.clone()),
            ProfileImage::Inline(_) => None,
            ProfileImage::Stored(file) => backend.map(|b| b.file_url(*file)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: String,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub date: String,
}

/// Persisted resume row. `content` is the JSON-serialized `ResumeData`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub id: i64,
    pub user_id: String,
    pub title: String,
    pub template: String,
    pub content: String,
    pub last_modified: String,
    #[serde(default)]
    pub thumbnail: String,
}

impl ResumeRecord {
    pub fn resume_data(&self) -> Result<ResumeData, serde_json::Error> {
        serde_json::from_str(&self.content)
    }
}

/// Persisted ATS check row. `feedback` is the JSON-serialized `ScoringResult`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsCheckRecord {
    pub id: i64,
    pub user_id: String,
    #[serde(default)]
    pub resume_id: String,
    pub job_description: String,
    pub score: u32,
    pub feedback: String,
    pub check_date: String,
}
