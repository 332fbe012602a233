//! Font resolution traits and the descriptor-keyed face cache.

use core::fmt;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use pageflow::StyleDescriptor;

/// Vertical metrics of a resolved face, in layout units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontMetrics {
    /// Baseline to the top of the tallest glyph.
    pub ascent: f32,
    /// Baseline to the bottom of the lowest glyph.
    pub descent: f32,
    /// Natural line height of the face.
    pub line_height: f32,
}

/// A resolved font face: the opaque handle layout measures against.
///
/// Faces loaded for equal descriptors are behaviorally interchangeable;
/// consumers may share and compare them freely but must not assume
/// identity beyond what [`FontCache`] guarantees.
pub trait FontFace: Send + Sync {
    /// Horizontal advance of `text` when drawn in this face.
    fn advance_width(&self, text: &str) -> f32;

    /// Vertical metrics of this face.
    fn metrics(&self) -> FontMetrics;
}

/// Host-provided face loader: the metrics boundary of the layout core.
///
/// Loading is expected to be expensive relative to lookup; callers go
/// through [`FontCache`] so each distinct descriptor is loaded once.
/// A load failure is fatal for the layout pass that needed the face;
/// there is no silent fallback width.
pub trait FontProvider: Send + Sync {
    /// Load the face for `style`, including its metrics table.
    fn load_face(&self, style: &StyleDescriptor) -> Result<Arc<dyn FontFace>, FontError>;
}

/// Structured error for face resolution failures.
#[derive(Clone, Debug, PartialEq)]
pub struct FontError {
    /// Stable machine-readable code.
    pub code: &'static str,
    /// Human-readable message.
    pub message: Box<str>,
    /// Descriptor that failed to resolve, when known.
    pub style: Option<StyleDescriptor>,
}

impl FontError {
    /// Build an error with a stable code and message.
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into().into_boxed_str(),
            style: None,
        }
    }

    /// Attach the descriptor that was being resolved.
    pub fn with_style(mut self, style: StyleDescriptor) -> Self {
        self.style = Some(style);
        self
    }
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font:{}: {}", self.code, self.message)?;
        if let Some(style) = &self.style {
            write!(
                f,
                " [size={} weight={:?} slant={:?}]",
                style.size, style.weight, style.slant
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for FontError {}

/// Cache hit/miss counters, snapshot via [`FontCache::stats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FontCacheStats {
    /// Resolutions served from the cache.
    pub hits: u64,
    /// Resolutions that loaded a new face.
    pub misses: u64,
}

/// Descriptor-keyed memoizing face cache.
///
/// Owned by the host and shared (via `Arc`) across layout passes; entries
/// are never evicted, since the universe of styles a document actually
/// uses is small and load cost dominates. One coarse mutex covers the
/// whole lookup-or-insert, so concurrent passes never load the same
/// descriptor twice.
pub struct FontCache {
    provider: Arc<dyn FontProvider>,
    faces: Mutex<HashMap<StyleDescriptor, Arc<dyn FontFace>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl FontCache {
    /// Create a cache over `provider`.
    pub fn new(provider: Arc<dyn FontProvider>) -> Self {
        Self {
            provider,
            faces: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Resolve the face for `style`, loading it on first use.
    pub fn resolve(&self, style: &StyleDescriptor) -> Result<Arc<dyn FontFace>, FontError> {
        let mut faces = self.faces.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(face) = faces.get(style) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(Arc::clone(face));
        }
        let face = self
            .provider
            .load_face(style)
            .map_err(|err| err.with_style(*style))?;
        faces.insert(*style, Arc::clone(&face));
        self.misses.fetch_add(1, Ordering::Relaxed);
        Ok(face)
    }

    /// Current hit/miss counters.
    pub fn stats(&self) -> FontCacheStats {
        FontCacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Number of distinct descriptors resolved so far.
    pub fn cached_faces(&self) -> usize {
        self.faces
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl fmt::Debug for FontCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontCache")
            .field("cached_faces", &self.cached_faces())
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{FontCache, FontError, FontFace, FontMetrics, FontProvider};
    use pageflow::{FontSlant, FontWeight, StyleDescriptor};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FixedFace {
        size: f32,
    }

    impl FontFace for FixedFace {
        fn advance_width(&self, text: &str) -> f32 {
            text.chars().count() as f32 * self.size / 2.0
        }

        fn metrics(&self) -> FontMetrics {
            FontMetrics {
                ascent: self.size * 0.8,
                descent: self.size * 0.25,
                line_height: self.size * 1.2,
            }
        }
    }

    struct CountingProvider {
        loads: AtomicUsize,
    }

    impl FontProvider for CountingProvider {
        fn load_face(&self, style: &StyleDescriptor) -> Result<Arc<dyn FontFace>, FontError> {
            self.loads.fetch_add(1, Ordering::Relaxed);
            Ok(Arc::new(FixedFace {
                size: style.size as f32,
            }))
        }
    }

    struct FailingProvider;

    impl FontProvider for FailingProvider {
        fn load_face(&self, _style: &StyleDescriptor) -> Result<Arc<dyn FontFace>, FontError> {
            Err(FontError::new("face_unavailable", "no face for style"))
        }
    }

    fn cache() -> FontCache {
        FontCache::new(Arc::new(CountingProvider {
            loads: AtomicUsize::new(0),
        }))
    }

    #[test]
    fn equal_descriptors_share_one_face() {
        let cache = cache();
        let style = StyleDescriptor::default();
        let first = cache.resolve(&style).expect("resolve");
        let second = cache.resolve(&style).expect("resolve");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.cached_faces(), 1);
        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
    }

    #[test]
    fn differing_descriptors_never_share_a_face() {
        let cache = cache();
        let roman = StyleDescriptor::default();
        let bold = StyleDescriptor::new(12, FontWeight::Bold, FontSlant::Roman);
        let large = StyleDescriptor::new(16, FontWeight::Normal, FontSlant::Roman);
        let a = cache.resolve(&roman).expect("resolve");
        let b = cache.resolve(&bold).expect("resolve");
        let c = cache.resolve(&large).expect("resolve");
        assert!(!Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(cache.cached_faces(), 3);
    }

    #[test]
    fn provider_failure_carries_style_context() {
        let cache = FontCache::new(Arc::new(FailingProvider));
        let style = StyleDescriptor::new(10, FontWeight::Normal, FontSlant::Italic);
        let err = cache.resolve(&style).expect_err("must fail");
        assert_eq!(err.code, "face_unavailable");
        assert_eq!(err.style, Some(style));
        let rendered = err.to_string();
        assert!(rendered.contains("face_unavailable"));
        assert!(rendered.contains("size=10"));
    }

    #[test]
    fn failed_resolutions_are_not_cached() {
        let cache = FontCache::new(Arc::new(FailingProvider));
        let style = StyleDescriptor::default();
        assert!(cache.resolve(&style).is_err());
        assert_eq!(cache.cached_faces(), 0);
        assert_eq!(cache.stats().misses, 0);
    }
}
