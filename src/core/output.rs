use image::{ImageFormat, RgbImage};
use std::path::{Path, PathBuf};

use super::error::ExtractError;
use crate::shared::constants;
use crate::utils::{file_utils, logger};

/// `frame_000042.png` for index 42.
pub fn frame_file_name(index: u64) -> String {
    format!(
        "{}{:0width$}.{}",
        constants::FRAME_FILE_PREFIX,
        index,
        constants::FRAME_FILE_EXTENSION,
        width = constants::FRAME_INDEX_WIDTH
    )
}

/// Directory receiving the numbered PNG files.
pub struct OutputSink {
    dir: PathBuf,
}

impl OutputSink {
    pub fn prepare(dir: &Path) -> Result<Self, ExtractError> {
        let created =
            file_utils::ensure_dir(dir).map_err(|source| ExtractError::DirectoryCreation {
                path: dir.to_path_buf(),
                source,
            })?;
        if created {
            logger::info(&format!("Created output directory {}", dir.display()));
            println!("Created folder: '{}'", dir.display());
        }
        Ok(Self { dir: dir.to_path_buf() })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn frame_path(&self, index: u64) -> Result<PathBuf, ExtractError> {
        if index >= constants::FRAME_INDEX_LIMIT {
            return Err(ExtractError::IndexExhausted { index });
        }
        Ok(self.dir.join(frame_file_name(index)))
    }

    /// Encodes `image` as PNG under `index`.
    pub fn write(&self, index: u64, image: &RgbImage) -> Result<PathBuf, ExtractError> {
        let path = self.frame_path(index)?;

        image
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|source| ExtractError::Write { path: path.clone(), source })?;

        Ok(path)
    }
}
