use crate::{
    error::CodecError,
    render::TypeTreeRender,
    specific::SpecificTypeRender,
    value::Value,
    widgets::{WidgetPath, Widgets},
};
use std::{cell::RefCell, collections::HashMap};

/// Converts between an embedded blob and the value tree it holds.
pub trait BlobCodec {
    fn root_type(&self) -> &str;
    fn decode(&self, bytes: &[u8]) -> Result<Value, CodecError>;
    fn encode(&self, value: &Value) -> Result<Vec<u8>, CodecError>;
}

struct CacheEntry {
    source: Vec<u8>,
    decoded: Value,
    last_used: u64,
}

/// Decoded blobs keyed by widget path. An entry is reused only while the
/// bytes at its path are the ones it was decoded from.
pub struct BlobCache {
    entries: HashMap<WidgetPath, CacheEntry>,
    frame: u64,
    max_idle_frames: u64,
}

impl BlobCache {
    pub fn new(max_idle_frames: u64) -> Self {
        Self {
            entries: HashMap::new(),
            frame: 0,
            max_idle_frames,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get_or_decode(
        &mut self,
        path: &WidgetPath,
        bytes: &[u8],
        decode: impl FnOnce(&[u8]) -> Result<Value, CodecError>,
    ) -> Result<&Value, CodecError> {
        let frame = self.frame;
        let fresh = self
            .entries
            .get(path)
            .is_some_and(|entry| entry.source == bytes);

        if !fresh {
            tracing::debug!(path = %path, len = bytes.len(), "decoding embedded value");
            let decoded = decode(bytes)?;
            self.store(path, bytes.to_vec(), decoded);
        }

        let entry = self
            .entries
            .get_mut(path)
            .ok_or_else(|| CodecError::Decode(format!("no cache entry for {path}")))?;
        entry.last_used = frame;
        Ok(&entry.decoded)
    }

    pub fn store(&mut self, path: &WidgetPath, source: Vec<u8>, decoded: Value) {
        self.entries.insert(
            path.clone(),
            CacheEntry {
                source,
                decoded,
                last_used: self.frame,
            },
        );
    }

    pub fn invalidate(&mut self, path: &WidgetPath) {
        self.entries.remove(path);
    }

    /// Returns how many idle entries were evicted.
    pub fn end_frame(&mut self) -> usize {
        let before = self.entries.len();
        let frame = self.frame;
        let max_idle = self.max_idle_frames;
        self.entries
            .retain(|_, entry| frame - entry.last_used < max_idle);
        self.frame += 1;
        before - self.entries.len()
    }
}

impl Default for BlobCache {
    fn default() -> Self {
        Self::new(600)
    }
}

pub struct EmbeddedBlobRender<C> {
    codec: C,
    cache: RefCell<BlobCache>,
}

impl<C: BlobCodec> EmbeddedBlobRender<C> {
    pub fn new(codec: C) -> Self {
        Self::with_cache(codec, BlobCache::default())
    }

    pub fn with_cache(codec: C, cache: BlobCache) -> Self {
        Self {
            codec,
            cache: RefCell::new(cache),
        }
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.borrow().len()
    }
}

impl<C: BlobCodec> SpecificTypeRender for EmbeddedBlobRender<C> {
    fn uses_one_column(&self, _type_name: &str) -> bool {
        false
    }

    fn create_default(&self, _type_name: &str) -> Value {
        Value::Bytes(Vec::new())
    }

    fn render_value(
        &self,
        tree: &TypeTreeRender,
        ui: &mut dyn Widgets,
        value: &mut Value,
        _type_name: &str,
        path: &WidgetPath,
    ) -> bool {
        let Value::Bytes(bytes) = value else {
            ui.text(&format!("Expected embedded bytes, found {}", value.kind_name()));
            return false;
        };

        // Cloned out so nested blobs can use the cache while this one renders.
        let decoded = self
            .cache
            .borrow_mut()
            .get_or_decode(path, bytes.as_slice(), |b| self.codec.decode(b))
            .cloned();
        let mut decoded = match decoded {
            Ok(decoded) => decoded,
            Err(e) => {
                ui.text(&e.to_string());
                return false;
            }
        };

        let changed =
            tree.render_value_of_type(ui, &mut decoded, self.codec.root_type(), &path.deref());
        if !changed {
            return false;
        }

        match self.codec.encode(&decoded) {
            Ok(encoded) => {
                self.cache
                    .borrow_mut()
                    .store(path, encoded.clone(), decoded);
                *bytes = encoded;
                true
            }
            Err(e) => {
                tracing::warn!(path = %path, "{e}");
                ui.text(&e.to_string());
                false
            }
        }
    }

    fn end_frame(&self) {
        let evicted = self.cache.borrow_mut().end_frame();
        if evicted > 0 {
            tracing::debug!(evicted, "dropped idle embedded values");
        }
    }
}
