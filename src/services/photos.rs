//! Student photo URL resolution

use crate::{config::PhotosConfig, models::fields::present};

#[derive(Debug, Clone)]
pub struct PhotoResolver {
    config: PhotosConfig,
}

impl PhotoResolver {
    pub fn new(config: PhotosConfig) -> Self {
        Self { config }
    }

    /// Display URL for a student.
    ///
    /// Absolute URLs and root-relative paths are used as stored, bare file
    /// names are placed under `base_url`, and students without an image get
    /// a placeholder chosen by gender.
    pub fn resolve(&self, image: Option<&str>, gender: Option<&str>) -> String {
        if let Some(image) = present(image).map(str::trim) {
            if image.starts_with("http://") || image.starts_with("https://") || image.starts_with('/')
            {
                return image.to_string();
            }
            return format!("{}/{}", self.config.base_url.trim_end_matches('/'), image);
        }

        let gender = present(gender).map(|g| g.trim().to_ascii_lowercase());
        match gender.as_deref() {
            Some("male") | Some("m") => self.config.male_placeholder.clone(),
            Some("female") | Some("f") => self.config.female_placeholder.clone(),
            _ => self.config.default_placeholder.clone(),
        }
    }
}
