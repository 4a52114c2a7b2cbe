use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::error::{ImageLoadError, ImageLoadResult};
use crate::surface::DrawingSurface;

/// RGBA pixels ready to become a surface image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Width and height in pixels
    pub size: [usize; 2],
    /// Unmultiplied RGBA, row-major
    pub rgba: Vec<u8>,
}

/// Decode an encoded image (PNG, JPEG, GIF, ...) into RGBA pixels
pub fn decode_image(bytes: &[u8]) -> ImageLoadResult<DecodedImage> {
    if bytes.is_empty() {
        return Err(ImageLoadError::Empty);
    }

    let decoded = image::load_from_memory(bytes)?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(ImageLoadError::InvalidDimensions { width, height });
    }

    log::debug!("Decoded image: {}x{}", width, height);
    Ok(DecodedImage {
        size: [width as usize, height as usize],
        rgba: rgba.into_raw(),
    })
}

/// Await the bytes of a picked file, then decode them.
///
/// A source that yields `None` (the user cancelled the picker) is not an error.
pub async fn load_image<F>(source: F) -> ImageLoadResult<Option<DecodedImage>>
where
    F: Future<Output = Option<Vec<u8>>>,
{
    let Some(bytes) = source.await else {
        return Ok(None);
    };

    decode_image(&bytes).map(Some)
}

#[cfg(not(target_arch = "wasm32"))]
mod platform {
    use std::future::Future;

    pub trait MaybeSend: Send {}
    impl<T: Send> MaybeSend for T {}

    pub fn execute<F: Future<Output = ()> + Send + 'static>(future: F) {
        std::thread::spawn(move || futures::executor::block_on(future));
    }
}

#[cfg(target_arch = "wasm32")]
mod platform {
    use std::future::Future;

    pub trait MaybeSend {}
    impl<T> MaybeSend for T {}

    pub fn execute<F: Future<Output = ()> + 'static>(future: F) {
        wasm_bindgen_futures::spawn_local(future);
    }
}

pub use platform::MaybeSend;

/// Runs image loads off the UI thread and hands finished images back to it.
///
/// Loads are neither serialized nor cancelled; each one lands on the surface
/// the next time [`ImageUploader::poll`] runs after it completes.
#[derive(Clone, Default)]
pub struct ImageUploader {
    inbox: Arc<Mutex<Vec<DecodedImage>>>,
    pending: Arc<AtomicUsize>,
}

impl ImageUploader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start loading an image from `source`; the UI is woken when it finishes
    pub fn start<F>(&self, ctx: &egui::Context, source: F)
    where
        F: Future<Output = Option<Vec<u8>>> + MaybeSend + 'static,
    {
        let inbox = Arc::clone(&self.inbox);
        let pending = Arc::clone(&self.pending);
        let ctx = ctx.clone();

        pending.fetch_add(1, Ordering::SeqCst);
        platform::execute(async move {
            match load_image(source).await {
                Ok(Some(image)) => {
                    log::info!("Image loaded: {}x{}", image.size[0], image.size[1]);
                    inbox.lock().push(image);
                }
                Ok(None) => log::debug!("Image upload cancelled"),
                Err(err) => log::error!("Failed to load image: {}", err),
            }
            pending.fetch_sub(1, Ordering::SeqCst);
            ctx.request_repaint();
        });
    }

    /// Start loading an image whose bytes are already in memory
    pub fn start_bytes(&self, ctx: &egui::Context, bytes: Vec<u8>) {
        self.start(ctx, async move { Some(bytes) });
    }

    /// Number of loads that have not finished yet
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    /// Move every finished image onto the surface, returning how many were added
    pub fn poll(&self, surface: &mut DrawingSurface) -> usize {
        let finished = std::mem::take(&mut *self.inbox.lock());
        let count = finished.len();
        for image in finished {
            surface.add_image(image);
        }
        count
    }
}
