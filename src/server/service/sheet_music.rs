use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::{
    model::lesson::SheetMusicUploadDto,
    server::{error::AppError, service::lesson::SHEET_MUSIC_PUBLIC_PREFIX},
};

pub const MAX_SHEET_MUSIC_BYTES: usize = 10 * 1024 * 1024;
const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png", "gif"];
const SHEET_MUSIC_DIR: &str = "sheet-music";

/// A stored upload: the public path to reference it and the name the client sent.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetMusicUpload {
    pub file_path: String,
    pub file_name: String,
}

impl SheetMusicUpload {
    pub fn into_dto(self) -> SheetMusicUploadDto {
        SheetMusicUploadDto {
            file_path: self.file_path,
            file_name: self.file_name,
        }
    }
}

/// Lower-cased extension of an allowed sheet music file name.
fn allowed_extension(file_name: &str) -> Option<String> {
    let extension = Path::new(file_name)
        .extension()?
        .to_str()?
        .to_ascii_lowercase();

    ALLOWED_EXTENSIONS
        .contains(&extension.as_str())
        .then_some(extension)
}

pub struct SheetMusicService {
    uploads_dir: PathBuf,
}

impl SheetMusicService {
    pub fn new(uploads_dir: impl Into<PathBuf>) -> Self {
        Self {
            uploads_dir: uploads_dir.into(),
        }
    }

    /// Stores an uploaded file under a random name.
    ///
    /// # Returns
    /// - `Ok(SheetMusicUpload)` - File written to `<uploads>/sheet-music/<uuid>.<ext>`
    /// - `Err(AppError::BadRequest)` - Empty, too large, or not a PDF or image
    pub async fn store(&self, file_name: &str, bytes: &[u8]) -> Result<SheetMusicUpload, AppError> {
        if bytes.is_empty() {
            return Err(AppError::BadRequest("No file uploaded".to_string()));
        }
        if bytes.len() > MAX_SHEET_MUSIC_BYTES {
            return Err(AppError::BadRequest(
                "File size must be less than 10MB".to_string(),
            ));
        }

        let extension = allowed_extension(file_name).ok_or_else(|| {
            AppError::BadRequest(
                "Invalid file type. Only PDF and image files are allowed".to_string(),
            )
        })?;

        let dir = self.uploads_dir.join(SHEET_MUSIC_DIR);
        tokio::fs::create_dir_all(&dir).await?;

        let stored_name = format!("{}.{}", Uuid::new_v4(), extension);
        tokio::fs::write(dir.join(&stored_name), bytes).await?;

        tracing::info!(file = %stored_name, size = bytes.len(), "Stored sheet music");

        Ok(SheetMusicUpload {
            file_path: format!("{}{}", SHEET_MUSIC_PUBLIC_PREFIX, stored_name),
            file_name: file_name.to_string(),
        })
    }
}
