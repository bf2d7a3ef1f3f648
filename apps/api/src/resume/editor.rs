//! Editor operations on `ResumeData`.
//!
//! Every operation mutates the record in place. Index-based operations reject
//! out-of-range indices with `AppError::Validation` rather than guessing.

use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{Education, Experience, PersonalInfo, ProfileImage, ResumeData};

/// Partial update: each present field replaces the old value wholesale.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeUpdate {
    pub personal_info: Option<PersonalInfo>,
    pub experience: Option<Vec<Experience>>,
    pub education: Option<Vec<Education>>,
    pub skills: Option<Vec<String>>,
}

pub fn apply_update(data: &mut ResumeData, update: ResumeUpdate) {
    if let Some(personal_info) = update.personal_info {
        data.personal_info = personal_info;
    }
    if let Some(experience) = update.experience {
        data.experience = experience;
    }
    if let Some(education) = update.education {
        data.education = education;
    }
    if let Some(skills) = update.skills {
        data.skills = skills;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonalField {
    Name,
    Email,
    Phone,
    Address,
    Title,
    Summary,
    ProfileImage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExperienceField {
    Company,
    Position,
    StartDate,
    EndDate,
    Description,
    Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EducationField {
    School,
    Degree,
    Date,
}

/// Blank text clears an optional field.
fn optional(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

pub fn update_personal(data: &mut ResumeData, field: PersonalField, value: String) {
    let info = &mut data.personal_info;
    match field {
        PersonalField::Name => info.name = value,
        PersonalField::Email => info.email = value,
        PersonalField::Phone => info.phone = value,
        PersonalField::Address => info.address = optional(value),
        PersonalField::Title => info.title = value,
        PersonalField::Summary => info.summary = value,
        PersonalField::ProfileImage => info.profile_image = ProfileImage::parse(&value),
    }
}

fn out_of_range(kind: &str, index: usize, len: usize) -> AppError {
    AppError::Validation(format!(
        "{kind} index {index} is out of range (have {len})"
    ))
}

/// Appends a blank experience entry and returns its id.
pub fn add_experience(data: &mut ResumeData) -> String {
    let id = format!("exp-{}", Uuid::new_v4());
    data.experience.push(Experience {
        id: id.clone(),
        ..Default::default()
    });
    id
}

pub fn update_experience(
    data: &mut ResumeData,
    index: usize,
    field: ExperienceField,
    value: String,
) -> Result<(), AppError> {
    let len = data.experience.len();
    let entry = data
        .experience
        .get_mut(index)
        .ok_or_else(|| out_of_range("experience", index, len))?;

    match field {
        ExperienceField::Company => entry.company = value,
        ExperienceField::Position => entry.position = value,
        ExperienceField::StartDate => entry.start_date = value,
        ExperienceField::EndDate => entry.end_date = value,
        ExperienceField::Description => entry.description = value,
        ExperienceField::Location => entry.location = optional(value),
    }
    Ok(())
}

pub fn remove_experience(data: &mut ResumeData, index: usize) -> Result<Experience, AppError> {
    if index >= data.experience.len() {
        return Err(out_of_range("experience", index, data.experience.len()));
    }
    Ok(data.experience.remove(index))
}

/// Appends a blank education entry and returns its id.
pub fn add_education(data: &mut ResumeData) -> String {
    let id = format!("edu-{}", Uuid::new_v4());
    data.education.push(Education {
        id: id.clone(),
        ..Default::default()
    });
    id
}

pub fn update_education(
    data: &mut ResumeData,
    index: usize,
    field: EducationField,
    value: String,
) -> Result<(), AppError> {
    let len = data.education.len();
    let entry = data
        .education
        .get_mut(index)
        .ok_or_else(|| out_of_range("education", index, len))?;

    match field {
        EducationField::School => entry.school = value,
        EducationField::Degree => entry.degree = value,
        EducationField::Date => entry.date = value,
    }
    Ok(())
}

pub fn remove_education(data: &mut ResumeData, index: usize) -> Result<Education, AppError> {
    if index >= data.education.len() {
        return Err(out_of_range("education", index, data.education.len()));
    }
    Ok(data.education.remove(index))
}

/// Splits comma-separated skills, trimming each and dropping empties.
pub fn parse_skills(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Inverse of `parse_skills`, for prefilling the skills text box.
pub fn format_skills(skills: &[String]) -> String {
    skills.join(", ")
}

/// One editor operation, as sent over the wire: `{"op": "add_experience"}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditCommand {
    Update {
        update: ResumeUpdate,
    },
    UpdatePersonal {
        field: PersonalField,
        value: String,
    },
    AddExperience,
    UpdateExperience {
        index: usize,
        field: ExperienceField,
        value: String,
    },
    RemoveExperience {
        index: usize,
    },
    AddEducation,
    UpdateEducation {
        index: usize,
        field: EducationField,
        value: String,
    },
    RemoveEducation {
        index: usize,
    },
    /// Replaces the skills list from the comma-separated editor text.
    SetSkills {
        text: String,
    },
}

pub fn apply_command(data: &mut ResumeData, command: EditCommand) -> Result<(), AppError> {
    match command {
        EditCommand::Update { update } => apply_update(data, update),
        EditCommand::UpdatePersonal { field, value } => update_personal(data, field, value),
        EditCommand::AddExperience => {
            add_experience(data);
        }
        EditCommand::UpdateExperience {
            index,
            field,
            value,
        } => update_experience(data, index, field, value)?,
        EditCommand::RemoveExperience { index } => {
            remove_experience(data, index)?;
        }
        EditCommand::AddEducation => {
            add_education(data);
        }
        EditCommand::UpdateEducation {
            index,
            field,
            value,
        } => update_education(data, index, field, value)?,
        EditCommand::RemoveEducation { index } => {
            remove_education(data, index)?;
        }
        EditCommand::SetSkills { text } => data.skills = parse_skills(&text),
    }
    Ok(())
}
