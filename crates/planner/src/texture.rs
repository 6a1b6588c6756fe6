//! Thumbnail texture cache
//!
//! Loads run on a small tokio runtime and report back over an unbounded
//! channel. The UI thread drains finished loads with [`TextureCache::poll`],
//! so nothing here ever blocks a frame or touches placement state.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Texture loading errors
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("loader task failed: {0}")]
    Task(String),
}

/// Decoded RGBA8 image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailImage {
    pub size: [usize; 2],
    pub rgba: Vec<u8>,
}

impl ThumbnailImage {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TextureError> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        let size = [image.width() as usize, image.height() as usize];
        Ok(Self {
            size,
            rgba: image.into_raw(),
        })
    }

    /// Single-color image, handy for tests and placeholders
    pub fn solid(size: [usize; 2], rgba: [u8; 4]) -> Self {
        Self {
            size,
            rgba: rgba.repeat(size[0] * size[1]),
        }
    }
}

/// Resolves an image reference to pixels. Called on a blocking worker thread.
pub trait ThumbnailLoader: Send + Sync + 'static {
    fn load(&self, reference: &str) -> Result<ThumbnailImage, TextureError>;
}

/// `http(s)://` references through reqwest, anything else as a file path
pub struct HttpThumbnailLoader {
    client: reqwest::blocking::Client,
    /// Base directory for relative file references
    base_dir: Option<PathBuf>,
}

impl HttpThumbnailLoader {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self, TextureError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self { client, base_dir })
    }
}

impl ThumbnailLoader for HttpThumbnailLoader {
    fn load(&self, reference: &str) -> Result<ThumbnailImage, TextureError> {
        let bytes = if reference.starts_with("http://") || reference.starts_with("https://") {
            self.client
                .get(reference)
                .send()?
                .error_for_status()?
                .bytes()?
                .to_vec()
        } else {
            let path = match &self.base_dir {
                Some(dir) => dir.join(reference),
                None => PathBuf::from(reference),
            };
            std::fs::read(path)?
        };
        ThumbnailImage::from_bytes(&bytes)
    }
}

/// Resolution state of one reference
#[derive(Debug, Clone)]
pub enum TextureState {
    Pending,
    Ready(Arc<ThumbnailImage>),
    Failed,
}

/// A load that finished since the previous poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureEvent {
    pub reference: String,
    pub ready: bool,
}

/// Scene-side view of the cache: ask for a reference, learn whether it is usable
pub trait TextureProvider {
    /// Request `reference` if it was never requested; true once it is ready
    fn resolve(&mut self, reference: &str) -> bool;
}

/// Provider that never loads anything; every box keeps its flat color
#[derive(Debug, Default, Clone, Copy)]
pub struct FlatTextures;

impl TextureProvider for FlatTextures {
    fn resolve(&mut self, _reference: &str) -> bool {
        false
    }
}

type LoadResult = (String, Result<ThumbnailImage, TextureError>);

/// Deduplicating, non-blocking thumbnail cache
pub struct TextureCache {
    /// Taken on drop so in-flight loads are abandoned rather than awaited
    runtime: Option<tokio::runtime::Runtime>,
    loader: Arc<dyn ThumbnailLoader>,
    states: HashMap<String, TextureState>,
    tx: UnboundedSender<LoadResult>,
    rx: UnboundedReceiver<LoadResult>,
    /// Bumped whenever a load finishes
    generation: u64,
    requests_issued: usize,
    on_ready: Option<Box<dyn FnMut(&TextureEvent)>>,
}

impl TextureCache {
    pub fn new(loader: Arc<dyn ThumbnailLoader>) -> Result<Self, TextureError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(4)
            .thread_name("thumbnail-loader")
            .enable_all()
            .build()?;
        let (tx, rx) = unbounded_channel();
        Ok(Self {
            runtime: Some(runtime),
            loader,
            states: HashMap::new(),
            tx,
            rx,
            generation: 0,
            requests_issued: 0,
            on_ready: None,
        })
    }

    /// Register the material-swap callback run for every finished load
    pub fn set_on_ready(&mut self, callback: impl FnMut(&TextureEvent) + 'static) {
        self.on_ready = Some(Box::new(callback));
    }

    /// Start loading `reference` unless it was requested before
    pub fn request(&mut self, reference: &str) {
        if self.states.contains_key(reference) {
            return;
        }
        let Some(runtime) = self.runtime.as_ref() else {
            return;
        };
        self.states
            .insert(reference.to_string(), TextureState::Pending);
        self.requests_issued += 1;

        let loader = Arc::clone(&self.loader);
        let tx = self.tx.clone();
        let reference = reference.to_string();
        tracing::debug!("Loading thumbnail {reference}");
        runtime.spawn(async move {
            let key = reference.clone();
            let result = tokio::task::spawn_blocking(move || loader.load(&key))
                .await
                .unwrap_or_else(|e| Err(TextureError::Task(e.to_string())));
            // Receiver gone means the cache was dropped; nothing to report to
            let _ = tx.send((reference, result));
        });
    }

    /// Drain finished loads without blocking
    pub fn poll(&mut self) -> Vec<TextureEvent> {
        let mut events = Vec::new();
        while let Ok((reference, result)) = self.rx.try_recv() {
            let state = match result {
                Ok(image) => TextureState::Ready(Arc::new(image)),
                Err(e) => {
                    tracing::warn!("Thumbnail {reference} unavailable, using flat color: {e}");
                    TextureState::Failed
                }
            };
            let event = TextureEvent {
                reference: reference.clone(),
                ready: matches!(state, TextureState::Ready(_)),
            };
            self.states.insert(reference, state);
            self.generation += 1;
            if let Some(callback) = self.on_ready.as_mut() {
                callback(&event);
            }
            events.push(event);
        }
        events
    }

    pub fn state(&self, reference: &str) -> Option<&TextureState> {
        self.states.get(reference)
    }

    pub fn ready(&self, reference: &str) -> Option<Arc<ThumbnailImage>> {
        match self.states.get(reference) {
            Some(TextureState::Ready(image)) => Some(Arc::clone(image)),
            _ => None,
        }
    }

    pub fn pending_count(&self) -> usize {
        self.states
            .values()
            .filter(|s| matches!(s, TextureState::Pending))
            .count()
    }

    /// Number of loads actually started
    pub fn requests_issued(&self) -> usize {
        self.requests_issued
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for TextureCache {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            let pending = self.pending_count();
            if pending > 0 {
                tracing::debug!("Abandoning {pending} in-flight thumbnail loads");
            }
            runtime.shutdown_background();
        }
    }
}

impl TextureProvider for TextureCache {
    fn resolve(&mut self, reference: &str) -> bool {
        self.request(reference);
        matches!(self.states.get(reference), Some(TextureState::Ready(_)))
    }
}
