//! Token-stream layout: line building, baseline resolution, display-list
//! assembly.

use smallvec::SmallVec;
use std::sync::Arc;

use pageflow::{StyleDescriptor, StyleState, TagKind, Token};

use crate::display_list::{DisplayList, PlacedWord};
use crate::font::{FontCache, FontError, FontMetrics};

/// Words buffered inline per line before spilling to the heap.
const LINE_WORDS_INLINE: usize = 16;

/// Layout configuration for one page geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Full page width.
    pub page_width: f32,
    /// Horizontal margin on both sides; also the left edge of every line.
    pub margin_x: f32,
    /// Top margin; also the vertical step added after a paragraph end.
    pub margin_y: f32,
    /// Leading factor applied to line ascent and descent.
    pub line_spacing: f32,
    /// Style active before any markup is seen.
    pub default_style: StyleDescriptor,
}

impl LayoutConfig {
    /// Convenience for a page width with default margins and spacing.
    pub fn for_page_width(page_width: f32) -> Self {
        Self {
            page_width,
            ..Self::default()
        }
    }

    /// Rightmost cursor position before the line is over-full.
    fn right_edge(&self) -> f32 {
        self.page_width - self.margin_x
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: 800.0,
            margin_x: 13.0,
            margin_y: 18.0,
            line_spacing: 1.25,
            default_style: StyleDescriptor::default(),
        }
    }
}

/// One word awaiting baseline resolution.
#[derive(Clone, Debug)]
struct LineWord {
    x: f32,
    text: String,
    style: StyleDescriptor,
}

/// Mutable pass state, scoped to a single `layout` call.
struct LayoutState {
    cursor_x: f32,
    cursor_y: f32,
    style: StyleState,
    line: SmallVec<[LineWord; LINE_WORDS_INLINE]>,
    out: DisplayList,
}

impl LayoutState {
    fn new(cfg: &LayoutConfig) -> Self {
        Self {
            cursor_x: cfg.margin_x,
            cursor_y: cfg.margin_y,
            style: StyleState::new(cfg.default_style),
            line: SmallVec::new(),
            out: DisplayList::default(),
        }
    }
}

/// Deterministic layout engine producing a display list from tokens.
///
/// The engine holds no pass state: each [`layout`](Self::layout) call is
/// an independent fold over its token stream, so an engine can be shared
/// and rerun (e.g. after a viewport resize) without carrying anything
/// over. The face cache is the only shared resource, and it never changes
/// results.
#[derive(Clone, Debug)]
pub struct LayoutEngine {
    cfg: LayoutConfig,
    fonts: Arc<FontCache>,
}

impl LayoutEngine {
    /// Create an engine over a host-owned face cache.
    pub fn new(cfg: LayoutConfig, fonts: Arc<FontCache>) -> Self {
        Self { cfg, fonts }
    }

    /// Active configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.cfg
    }

    /// Lay out `tokens` into a positioned, baseline-aligned display list.
    ///
    /// Fails only when a face needed by the pass cannot be resolved; an
    /// empty stream yields an empty list.
    pub fn layout<I>(&self, tokens: I) -> Result<DisplayList, FontError>
    where
        I: IntoIterator<Item = Token>,
    {
        let mut st = LayoutState::new(&self.cfg);
        for token in tokens {
            match token {
                Token::Text(content) => {
                    for word in content.split_whitespace() {
                        self.place_word(&mut st, word)?;
                    }
                }
                Token::Tag(name) => self.handle_tag(&mut st, &name)?,
            }
        }
        // Trailing buffered words still need a line.
        self.flush_line(&mut st)?;
        Ok(st.out)
    }

    fn handle_tag(&self, st: &mut LayoutState, name: &str) -> Result<(), FontError> {
        match TagKind::from_name(name) {
            TagKind::LineBreak => self.flush_line(st)?,
            TagKind::ParagraphEnd => {
                self.flush_line(st)?;
                st.cursor_y += self.cfg.margin_y;
            }
            TagKind::Other => log::debug!("ignoring unrecognized tag {:?}", name),
            kind => st.style.apply(kind),
        }
        Ok(())
    }

    /// Measure and buffer one word, wrapping afterwards if it crossed the
    /// right edge.
    ///
    /// The crossing word keeps its line (words are never split); the
    /// flush only makes the next word start at the left margin.
    fn place_word(&self, st: &mut LayoutState, word: &str) -> Result<(), FontError> {
        let style = st.style.current();
        let face = self.fonts.resolve(&style)?;
        let advance = face.advance_width(word);
        let space = face.advance_width(" ");

        st.line.push(LineWord {
            x: st.cursor_x,
            text: word.to_string(),
            style,
        });
        st.cursor_x += advance + space;

        if st.cursor_x > self.cfg.right_edge() {
            self.flush_line(st)?;
        }
        Ok(())
    }

    /// Resolve the buffered line against a shared baseline and emit it.
    ///
    /// The buffer is collected first and resolved second because the
    /// line's baseline depends on the tallest ascent on it, which is
    /// unknown until the line is complete. An empty buffer emits nothing,
    /// so consecutive block breaks never produce blank lines.
    fn flush_line(&self, st: &mut LayoutState) -> Result<(), FontError> {
        if st.line.is_empty() {
            return Ok(());
        }

        let line = core::mem::take(&mut st.line);
        let mut metrics: SmallVec<[FontMetrics; LINE_WORDS_INLINE]> = SmallVec::new();
        let mut max_ascent = 0.0f32;
        let mut max_descent = 0.0f32;
        for word in &line {
            let m = self.fonts.resolve(&word.style)?.metrics();
            max_ascent = max_ascent.max(m.ascent);
            max_descent = max_descent.max(m.descent);
            metrics.push(m);
        }

        let baseline = st.cursor_y + self.cfg.line_spacing * max_ascent;
        for (word, m) in line.into_iter().zip(metrics) {
            // Each word hangs from the shared baseline by its own ascent,
            // so smaller faces sit on the line instead of floating.
            st.out.push(PlacedWord {
                x: word.x,
                y: baseline - m.ascent,
                text: word.text,
                style: word.style,
            });
        }

        st.cursor_y = baseline + self.cfg.line_spacing * max_descent;
        st.cursor_x = self.cfg.margin_x;
        Ok(())
    }
}
