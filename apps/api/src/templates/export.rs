//! Export: the full-size document handed to an external rasterizer, and the
//! per-user busy flag that blocks a second export while one is running.

use std::sync::Arc;

use dashmap::DashSet;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Png,
    Jpg,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Png => "png",
            ExportFormat::Jpg => "jpg",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Png => "image/png",
            ExportFormat::Jpg => "image/jpeg",
        }
    }
}

/// `jane-doe-resume.pdf`; falls back to `resume.pdf` when the name has no
/// alphanumeric characters.
pub fn export_filename(name: &str, format: ExportFormat) -> String {
    let slug = name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        format!("resume.{}", format.extension())
    } else {
        format!("{slug}-resume.{}", format.extension())
    }
}

/// Users with an export in flight.
#[derive(Clone, Default)]
pub struct ExportGuard {
    busy: Arc<DashSet<String>>,
}

impl ExportGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `user_id` busy until the returned ticket is dropped.
    pub fn acquire(&self, user_id: &str) -> Result<ExportTicket, AppError> {
        if !self.busy.insert(user_id.to_string()) {
            return Err(AppError::Conflict(format!(
                "An export is already running for user {user_id}"
            )));
        }
        Ok(ExportTicket {
            busy: Arc::clone(&self.busy),
            user_id: user_id.to_string(),
        })
    }

    #[cfg(test)]
    pub fn is_busy(&self, user_id: &str) -> bool {
        self.busy.contains(user_id)
    }
}

pub struct ExportTicket {
    busy: Arc<DashSet<String>>,
    user_id: String,
}

impl Drop for ExportTicket {
    fn drop(&mut self) {
        self.busy.remove(&self.user_id);
    }
}
