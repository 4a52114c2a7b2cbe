use std::io::Cursor;
use std::time::{Duration, Instant};

use sketch_surface::element::Element;
use sketch_surface::{DrawingSurface, ImageLoadError, ImageUploader};

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let buffer = image::RgbaImage::from_pixel(width, height, image::Rgba([0, 128, 255, 255]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(buffer)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

/// Poll until every load has finished, like the UI does once per frame
fn wait_for_uploads(uploader: &ImageUploader, surface: &mut DrawingSurface) -> usize {
    let deadline = Instant::now() + Duration::from_secs(10);
    let mut added = 0;
    loop {
        let idle = uploader.pending() == 0;
        added += uploader.poll(surface);
        if idle || Instant::now() > deadline {
            return added;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn test_upload_adds_one_image_scaled_to_width() {
    let ctx = egui::Context::default();
    let uploader = ImageUploader::new();
    let mut surface = DrawingSurface::default();

    surface.prepare_image_upload();
    assert!(!surface.drawing_mode());

    let bytes = png_bytes(640, 480);
    uploader.start(&ctx, async move { Some(bytes) });

    assert_eq!(wait_for_uploads(&uploader, &mut surface), 1);
    assert_eq!(surface.len(), 1);

    let image = surface.elements()[0].as_image().unwrap();
    assert_eq!(image.source_size(), egui::vec2(640.0, 480.0));
    assert!((image.rect().width() - 200.0).abs() < 0.001);
    assert!((image.rect().height() - 150.0).abs() < 0.001);
}

#[test]
fn test_concurrent_uploads_all_land() {
    let ctx = egui::Context::default();
    let uploader = ImageUploader::new();
    let mut surface = DrawingSurface::default();

    for width in [10, 300, 1200] {
        uploader.start_bytes(&ctx, png_bytes(width, 20));
    }

    assert_eq!(wait_for_uploads(&uploader, &mut surface), 3);
    for element in surface.elements() {
        assert!((element.rect().width() - 200.0).abs() < 0.001);
    }
}

#[test]
fn test_failed_upload_adds_nothing() {
    let ctx = egui::Context::default();
    let uploader = ImageUploader::new();
    let mut surface = DrawingSurface::default();

    uploader.start_bytes(&ctx, b"not an image".to_vec());
    uploader.start_bytes(&ctx, Vec::new());

    assert_eq!(wait_for_uploads(&uploader, &mut surface), 0);
    assert!(surface.is_empty());
}

#[test]
fn test_cancelled_picker_adds_nothing() {
    let ctx = egui::Context::default();
    let uploader = ImageUploader::new();
    let mut surface = DrawingSurface::default();

    uploader.start(&ctx, async { None });

    assert_eq!(wait_for_uploads(&uploader, &mut surface), 0);
    assert!(surface.is_empty());
}

#[test]
fn test_decode_failures_are_typed() {
    let result = futures::executor::block_on(sketch_surface::image_import::load_image(async {
        Some(b"garbage".to_vec())
    }));
    assert!(matches!(result, Err(ImageLoadError::Decode(_))));
}
