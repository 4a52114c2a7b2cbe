use egui::{Color32, ColorImage, Context, Painter, Pos2, Rect, TextureHandle, TextureOptions, Vec2};
use ::image::imageops::{self, FilterType};
use ::image::RgbaImage;
use log::{debug, warn};

use super::{Element, ElementId};
use crate::image_import::DecodedImage;

/// Bitmap placed on the surface, drawn at a uniform scale
#[derive(Clone)]
pub struct Image {
    id: ElementId,
    pixels: DecodedImage,
    position: Pos2,
    scale: f32,

    // Uploaded lazily on the first paint
    texture: Option<TextureHandle>,
}

// TextureHandle carries GPU state, so only report its presence
impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("id", &self.id)
            .field("source_size", &self.pixels.size)
            .field("position", &self.position)
            .field("scale", &self.scale)
            .field("has_texture", &self.texture.is_some())
            .finish()
    }
}

impl Image {
    pub fn new(id: ElementId, pixels: DecodedImage, position: Pos2) -> Self {
        Self {
            id,
            pixels,
            position,
            scale: 1.0,
            texture: None,
        }
    }

    /// Size of the decoded bitmap
    pub fn source_size(&self) -> Vec2 {
        let [width, height] = self.pixels.size;
        Vec2::new(width as f32, height as f32)
    }

    /// Displayed size
    pub fn size(&self) -> Vec2 {
        self.source_size() * self.scale
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    /// Scale uniformly so the displayed width equals `width`
    pub fn scale_to_width(&mut self, width: f32) {
        let source_width = self.source_size().x;
        if source_width > 0.0 {
            self.scale = width / source_width;
        }
    }

    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }

    /// Upload the pixels to the GPU if that has not happened yet
    pub fn ensure_texture(&mut self, ctx: &Context) {
        if self.texture.is_some() {
            return;
        }

        let max_side = ctx.input(|i| i.max_texture_side);
        let color_image = self.texture_pixels(max_side);
        debug!(
            "Uploading texture for image {}: {:?} as {:?}",
            self.id, self.pixels.size, color_image.size
        );
        self.texture = Some(ctx.load_texture(
            format!("image-{}", self.id),
            color_image,
            TextureOptions::LINEAR,
        ));
    }

    /// Pixels for the GPU, downscaled so neither side exceeds `max_side`.
    ///
    /// The displayed size still comes from the source size and the scale.
    fn texture_pixels(&self, max_side: usize) -> ColorImage {
        let [width, height] = self.pixels.size;
        let longest = width.max(height);
        if longest <= max_side {
            return ColorImage::from_rgba_unmultiplied(self.pixels.size, &self.pixels.rgba);
        }

        let factor = max_side as f32 / longest as f32;
        let target_width = ((width as f32 * factor).round() as u32).clamp(1, max_side as u32);
        let target_height = ((height as f32 * factor).round() as u32).clamp(1, max_side as u32);

        match RgbaImage::from_raw(width as u32, height as u32, self.pixels.rgba.clone()) {
            Some(buffer) => {
                let resized = imageops::resize(&buffer, target_width, target_height, FilterType::Triangle);
                ColorImage::from_rgba_unmultiplied(
                    [resized.width() as usize, resized.height() as usize],
                    resized.as_raw(),
                )
            }
            None => {
                warn!("Image {} has fewer pixels than its size says", self.id);
                ColorImage::new(
                    [target_width as usize, target_height as usize],
                    Color32::from_gray(200),
                )
            }
        }
    }
}

impl Element for Image {
    fn id(&self) -> ElementId {
        self.id
    }

    fn element_type(&self) -> &'static str {
        "image"
    }

    fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.size())
    }

    fn draw(&self, painter: &Painter, origin: Vec2) {
        let rect = self.rect().translate(origin);

        if let Some(texture) = &self.texture {
            painter.image(
                texture.id(),
                rect,
                Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                Color32::WHITE,
            );
        } else {
            painter.rect_filled(rect, 0.0, Color32::from_gray(200));
            painter.rect_stroke(rect, 0.0, egui::Stroke::new(1.0, Color32::from_gray(100)));
        }
    }

    fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(width: usize, height: usize) -> DecodedImage {
        DecodedImage {
            size: [width, height],
            rgba: vec![255; width * height * 4],
        }
    }

    #[test]
    fn test_scale_to_width_keeps_aspect_ratio() {
        let mut image = Image::new(ElementId::new(), blank(800, 400), Pos2::ZERO);
        image.scale_to_width(200.0);
        assert_eq!(image.size(), Vec2::new(200.0, 100.0));
        assert_eq!(image.rect(), Rect::from_min_size(Pos2::ZERO, Vec2::new(200.0, 100.0)));
    }

    #[test]
    fn test_small_images_are_scaled_up() {
        let mut image = Image::new(ElementId::new(), blank(50, 10), Pos2::ZERO);
        image.scale_to_width(200.0);
        assert_eq!(image.scale(), 4.0);
        assert_eq!(image.size().y, 40.0);
    }

    #[test]
    fn test_texture_is_uploaded_once() {
        let ctx = Context::default();
        let mut image = Image::new(ElementId::new(), blank(2, 2), Pos2::ZERO);
        assert!(!image.has_texture());

        image.ensure_texture(&ctx);
        let first = image.texture.as_ref().map(|t| t.id());
        image.ensure_texture(&ctx);
        assert_eq!(image.texture.as_ref().map(|t| t.id()), first);
        assert!(image.has_texture());
    }

    #[test]
    fn test_oversized_texture_is_downscaled() {
        let ctx = Context::default();
        let max_side = ctx.input(|i| i.max_texture_side);
        let mut image = Image::new(ElementId::new(), blank(max_side * 2, 8), Pos2::ZERO);
        image.scale_to_width(200.0);

        image.ensure_texture(&ctx);
        assert_eq!(image.texture.as_ref().map(|t| t.size()), Some([max_side, 4]));
        assert_eq!(image.source_size(), Vec2::new((max_side * 2) as f32, 8.0));
        assert!((image.size().x - 200.0).abs() < 0.001);
    }

    #[test]
    fn test_small_texture_keeps_its_pixels() {
        let image = Image::new(ElementId::new(), blank(3, 5), Pos2::ZERO);
        assert_eq!(image.texture_pixels(2048).size, [3, 5]);
        assert_eq!(image.texture_pixels(4).size, [2, 4]);
    }
}
