use eframe::egui;

use crate::error::{ImageLoadError, ImageLoadResult};

/// A dropped image file, read into memory
#[derive(Debug, Clone)]
pub struct DroppedImage {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Picks up image files dropped onto the window
#[derive(Debug, Default)]
pub struct FileDropHandler;

impl FileDropHandler {
    pub fn new() -> Self {
        Self
    }

    /// Take this frame's dropped files and return the images among them
    pub fn take_dropped_images(&mut self, ctx: &egui::Context) -> Vec<DroppedImage> {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());

        dropped
            .iter()
            .filter_map(|file| {
                let name = Self::display_name(file);
                if !Self::is_image_file(file) {
                    log::warn!("Dropped file is not a supported type: {}", name);
                    return None;
                }

                match Self::read_bytes(file) {
                    Ok(bytes) => {
                        log::info!("Processing dropped image: {} ({} bytes)", name, bytes.len());
                        Some(DroppedImage { name, bytes })
                    }
                    Err(err) => {
                        log::error!("Failed to read dropped file {}: {}", name, err);
                        None
                    }
                }
            })
            .collect()
    }

    fn display_name(file: &egui::DroppedFile) -> String {
        if let Some(path) = &file.path {
            path.display().to_string()
        } else if !file.name.is_empty() {
            file.name.clone()
        } else {
            "unknown".to_owned()
        }
    }

    /// Check if a file is an image based on MIME type or extension
    pub fn is_image_file(file: &egui::DroppedFile) -> bool {
        if !file.mime.is_empty() {
            return file.mime.starts_with("image/");
        }

        let extension = file
            .path
            .as_ref()
            .and_then(|path| path.extension())
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .or_else(|| {
                file.name
                    .rsplit_once('.')
                    .map(|(_, ext)| ext.to_lowercase())
            });

        matches!(
            extension.as_deref(),
            Some("png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp")
        )
    }

    fn read_bytes(file: &egui::DroppedFile) -> ImageLoadResult<Vec<u8>> {
        if let Some(bytes) = &file.bytes {
            return Ok(bytes.to_vec());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(path) = &file.path {
            return Ok(std::fs::read(path)?);
        }

        Err(ImageLoadError::Empty)
    }

    /// Preview files being dragged over the application
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, FontId, Id, LayerId, Order};

        let hovered = ctx.input(|i| i.raw.hovered_files.clone());
        if hovered.is_empty() {
            return;
        }

        let mut text = "Dropping files:\n".to_owned();
        for file in &hovered {
            if let Some(path) = &file.path {
                text += &format!("\n{}", path.display());
            } else if !file.mime.is_empty() {
                text += &format!("\n{}", file.mime);
            } else {
                text += "\n(Path not available)";
            }
        }

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(20.0),
            Color32::WHITE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;

    #[test]
    fn test_image_detection_by_mime() {
        let file = egui::DroppedFile {
            mime: "image/png".to_owned(),
            ..Default::default()
        };
        assert!(FileDropHandler::is_image_file(&file));

        let file = egui::DroppedFile {
            mime: "text/plain".to_owned(),
            path: Some(PathBuf::from("looks_like.png")),
            ..Default::default()
        };
        assert!(!FileDropHandler::is_image_file(&file));
    }

    #[test]
    fn test_image_detection_by_extension() {
        let file = egui::DroppedFile {
            path: Some(PathBuf::from("/tmp/Photo.JPG")),
            ..Default::default()
        };
        assert!(FileDropHandler::is_image_file(&file));

        let file = egui::DroppedFile {
            name: "notes.txt".to_owned(),
            ..Default::default()
        };
        assert!(!FileDropHandler::is_image_file(&file));
    }

    #[test]
    fn test_in_memory_bytes_are_preferred() {
        let file = egui::DroppedFile {
            name: "a.png".to_owned(),
            bytes: Some(Arc::from(vec![1u8, 2, 3])),
            ..Default::default()
        };
        assert_eq!(FileDropHandler::read_bytes(&file).unwrap(), vec![1, 2, 3]);

        let empty = egui::DroppedFile::default();
        assert!(matches!(FileDropHandler::read_bytes(&empty), Err(ImageLoadError::Empty)));
    }
}
