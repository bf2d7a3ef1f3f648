//! Multipart upload handling shared by the image and PDF endpoints.

use axum::extract::Multipart;
use bytes::Bytes;

use crate::backend::UploadFile;
use crate::errors::AppError;

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// The file part of a multipart upload.
#[derive(Debug)]
pub struct Upload {
    pub file: UploadFile,
}

/// Reads every part and keeps the one named `file_field`; other parts are ignored.
pub async fn read_upload(mut multipart: Multipart, file_field: &str) -> Result<Upload, AppError> {
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == file_field {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Invalid file: {e}")))?;
            file = Some(UploadFile {
                filename,
                content_type,
                bytes,
            });
        }
    }

    let file = file.ok_or_else(|| AppError::Validation(format!("No '{file_field}' file provided")))?;
    Ok(Upload { file })
}

/// Images only, at most 5 MB.
pub fn validate_image(file: &UploadFile) -> Result<(), AppError> {
    if !file.content_type.starts_with("image/") {
        return Err(AppError::Validation(
            "Please upload an image file (JPEG, PNG, etc.)".to_string(),
        ));
    }
    check_size(&file.bytes, MAX_IMAGE_BYTES, "Image size should be less than 5MB")
}

pub fn check_size(bytes: &Bytes, max: usize, message: &str) -> Result<(), AppError> {
    if bytes.len() > max {
        return Err(AppError::Validation(message.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(content_type: &str, len: usize) -> UploadFile {
        UploadFile {
            filename: "x".to_string(),
            content_type: content_type.to_string(),
            bytes: Bytes::from(vec![0u8; len]),
        }
    }

    #[test]
    fn test_image_type_required() {
        assert!(validate_image(&file("image/png", 10)).is_ok());
        assert!(matches!(
            validate_image(&file("application/pdf", 10)),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_image_size_limit_is_inclusive() {
        assert!(validate_image(&file("image/jpeg", MAX_IMAGE_BYTES)).is_ok());
        assert!(validate_image(&file("image/jpeg", MAX_IMAGE_BYTES + 1)).is_err());
    }
}
