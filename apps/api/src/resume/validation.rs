use std::collections::HashSet;

use crate::errors::AppError;
use crate::models::resume::ResumeData;

/// Checks the structural invariants of a resume before it is persisted:
/// entry ids are non-empty and unique within their list, and no skill is blank.
pub fn validate_resume(data: &ResumeData) -> Result<(), AppError> {
    check_ids("experience", data.experience.iter().map(|e| e.id.as_str()))?;
    check_ids("education", data.education.iter().map(|e| e.id.as_str()))?;

    if let Some(pos) = data.skills.iter().position(|s| s.trim().is_empty()) {
        return Err(AppError::Validation(format!("skill {pos} is empty")));
    }
    Ok(())
}

fn check_ids<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(AppError::Validation(format!("{kind} entry has an empty id")));
        }
        if !seen.insert(id) {
            return Err(AppError::Validation(format!(
                "duplicate {kind} id '{id}'"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::defaults::default_resume;

    #[test]
    fn test_duplicate_experience_id_rejected() {
        let mut data = default_resume();
        data.experience[1].id = data.experience[0].id.clone();
        let err = validate_resume(&data).unwrap_err();
        assert!(err.to_string().contains("duplicate experience id 'exp1'"));
    }

    #[test]
    fn test_same_id_across_lists_is_fine() {
        let mut data = default_resume();
        data.education[0].id = "exp1".to_string();
        assert!(validate_resume(&data).is_ok());
    }

    #[test]
    fn test_blank_skill_rejected() {
        let mut data = default_resume();
        data.skills.push("   ".to_string());
        assert!(matches!(validate_resume(&data), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_empty_id_rejected() {
        let mut data = default_resume();
        data.education[1].id.clear();
        assert!(validate_resume(&data).is_err());
    }
}
