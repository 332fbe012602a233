//! embedded-graphics renderer backend for `pageflow` display lists.
//!
//! Provides a [`FontProvider`] over the built-in ASCII mono font set, so
//! layout and drawing share one source of metrics, and a renderer that
//! draws the visible slice of a display list against a scroll offset.

#![cfg_attr(
    not(test),
    deny(
        clippy::disallowed_methods,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

use embedded_graphics::{
    mono_font::{
        ascii::{
            FONT_10X20, FONT_6X13_BOLD, FONT_6X13_ITALIC, FONT_6X9, FONT_7X13_ITALIC, FONT_7X14,
            FONT_7X14_BOLD, FONT_8X13_ITALIC, FONT_9X18, FONT_9X18_BOLD,
        },
        MonoFont, MonoTextStyle,
    },
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use pageflow::{FontSlant, FontWeight, StyleDescriptor};
use pageflow_render::{DisplayList, FontError, FontFace, FontMetrics, FontProvider, Viewport};
use std::sync::Arc;

/// Why style-to-font mapping had to fall back to a different face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonoFallbackReason {
    /// The mono set has no bold-italic face at any size; bold wins.
    BoldItalicUnavailable,
    /// No face with the requested slant exists in this size bucket.
    SlantUnavailableAtSize,
    /// No face with the requested weight exists in this size bucket.
    WeightUnavailableAtSize,
}

/// Resolved mono face for a style, with the fallback taken, if any.
#[derive(Clone, Copy, Debug)]
pub struct MonoFontSelection {
    /// Selected face.
    pub font: &'static MonoFont<'static>,
    /// Fallback applied when the exact variant does not exist.
    pub fallback: Option<MonoFallbackReason>,
}

/// Size buckets over the point sizes the style tracker produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SizeBucket {
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl SizeBucket {
    fn for_points(size: i32) -> Self {
        if size <= 10 {
            Self::Small
        } else if size <= 14 {
            Self::Medium
        } else if size <= 18 {
            Self::Large
        } else {
            Self::ExtraLarge
        }
    }
}

/// [`FontProvider`] over the embedded-graphics ASCII mono font set.
///
/// Metrics come from the mono font geometry, so whatever layout measures
/// is exactly what [`EgRenderer`] draws. Sizes are bucketed; degenerate
/// descriptor sizes (including nonpositive ones from unbalanced markup)
/// land in the smallest bucket and still render.
#[derive(Clone, Copy, Debug, Default)]
pub struct MonoFontProvider;

impl MonoFontProvider {
    /// Select the mono face for `style`.
    pub fn select(style: &StyleDescriptor) -> MonoFontSelection {
        let bold = style.weight == FontWeight::Bold;
        let italic = style.slant == FontSlant::Italic;
        let (font, fallback): (&'static MonoFont<'static>, Option<MonoFallbackReason>) =
            match (SizeBucket::for_points(style.size), bold, italic) {
                (SizeBucket::Small, false, false) => (&FONT_6X9, None),
                (SizeBucket::Small, false, true) => (&FONT_6X13_ITALIC, None),
                (SizeBucket::Small, true, false) => (&FONT_6X13_BOLD, None),
                (SizeBucket::Small, true, true) => (
                    &FONT_6X13_BOLD,
                    Some(MonoFallbackReason::BoldItalicUnavailable),
                ),
                (SizeBucket::Medium, false, false) => (&FONT_7X14, None),
                (SizeBucket::Medium, false, true) => (&FONT_7X13_ITALIC, None),
                (SizeBucket::Medium, true, false) => (&FONT_7X14_BOLD, None),
                (SizeBucket::Medium, true, true) => (
                    &FONT_7X14_BOLD,
                    Some(MonoFallbackReason::BoldItalicUnavailable),
                ),
                (SizeBucket::Large, false, false) => (&FONT_9X18, None),
                (SizeBucket::Large, false, true) => (
                    &FONT_8X13_ITALIC,
                    Some(MonoFallbackReason::SlantUnavailableAtSize),
                ),
                (SizeBucket::Large, true, false) => (&FONT_9X18_BOLD, None),
                (SizeBucket::Large, true, true) => (
                    &FONT_9X18_BOLD,
                    Some(MonoFallbackReason::BoldItalicUnavailable),
                ),
                (SizeBucket::ExtraLarge, false, false) => (&FONT_10X20, None),
                (SizeBucket::ExtraLarge, false, true) => (
                    &FONT_9X18,
                    Some(MonoFallbackReason::SlantUnavailableAtSize),
                ),
                (SizeBucket::ExtraLarge, true, false) => (
                    &FONT_9X18_BOLD,
                    Some(MonoFallbackReason::WeightUnavailableAtSize),
                ),
                (SizeBucket::ExtraLarge, true, true) => (
                    &FONT_9X18_BOLD,
                    Some(MonoFallbackReason::BoldItalicUnavailable),
                ),
            };
        MonoFontSelection { font, fallback }
    }
}

impl FontProvider for MonoFontProvider {
    fn load_face(&self, style: &StyleDescriptor) -> Result<Arc<dyn FontFace>, FontError> {
        let selection = Self::select(style);
        Ok(Arc::new(MonoFace {
            font: selection.font,
        }))
    }
}

/// Face over one static mono font.
struct MonoFace {
    font: &'static MonoFont<'static>,
}

impl FontFace for MonoFace {
    fn advance_width(&self, text: &str) -> f32 {
        let glyph = self.font.character_size.width + self.font.character_spacing;
        (text.chars().count() as u32 * glyph) as f32
    }

    fn metrics(&self) -> FontMetrics {
        let height = self.font.character_size.height as f32;
        let ascent = self.font.baseline as f32;
        FontMetrics {
            ascent,
            descent: height - ascent,
            line_height: height,
        }
    }
}

/// Renderer configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EgRenderConfig {
    /// Clear the target before drawing.
    pub clear_first: bool,
}

impl Default for EgRenderConfig {
    fn default() -> Self {
        Self { clear_first: true }
    }
}

/// Per-render draw/cull counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Entries drawn inside the viewport.
    pub drawn: usize,
    /// Entries skipped by visibility culling.
    pub culled: usize,
}

/// Draws display lists into any `DrawTarget<Color = BinaryColor>`.
#[derive(Clone, Copy, Debug, Default)]
pub struct EgRenderer {
    cfg: EgRenderConfig,
}

impl EgRenderer {
    /// Create a renderer.
    pub fn new(cfg: EgRenderConfig) -> Self {
        Self { cfg }
    }

    /// Render the slice of `list` visible through `view`.
    pub fn render_view<D>(
        &self,
        list: &DisplayList,
        view: &Viewport,
        display: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        self.render_view_with_stats(list, view, display).map(|_| ())
    }

    /// Render the visible slice and report draw/cull counts.
    pub fn render_view_with_stats<D>(
        &self,
        list: &DisplayList,
        view: &Viewport,
        display: &mut D,
    ) -> Result<RenderStats, D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        if self.cfg.clear_first {
            display.clear(BinaryColor::Off)?;
        }
        let mut stats = RenderStats::default();
        for word in list.iter() {
            let selection = MonoFontProvider::select(&word.style);
            let line_height = selection.font.character_size.height as f32;
            if !view.is_visible(word.y, line_height) {
                stats.culled += 1;
                continue;
            }
            let style = MonoTextStyle::new(selection.font, BinaryColor::On);
            let origin = Point::new(
                word.x.round() as i32,
                (word.y - view.scroll).round() as i32,
            );
            // The placed y is already ascent-adjusted to the line's
            // shared baseline, so the glyph box anchors by its top.
            Text::with_baseline(&word.text, origin, style, Baseline::Top).draw(display)?;
            stats.drawn += 1;
        }
        Ok(stats)
    }
}
