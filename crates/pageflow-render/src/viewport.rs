use crate::display_list::{DisplayList, PlacedWord};

/// Scrollable view over a laid-out document.
///
/// The viewport never touches the display list; it only answers which
/// entries fall inside the current scroll window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Visible height.
    pub height: f32,
    /// Current scroll offset from the document top.
    pub scroll: f32,
    /// Distance covered by one scroll step.
    pub scroll_step: f32,
}

impl Viewport {
    /// Viewport of `height` at the top of the document.
    pub fn new(height: f32) -> Self {
        Self {
            height,
            ..Self::default()
        }
    }

    /// Scroll one step towards the document end.
    pub fn scroll_down(&mut self) {
        self.scroll += self.scroll_step;
    }

    /// Scroll one step towards the document top, stopping at it.
    pub fn scroll_up(&mut self) {
        self.scroll = (self.scroll - self.scroll_step).max(0.0);
    }

    /// Whether an entry at `y` spanning `line_height` intersects the view.
    pub fn is_visible(&self, y: f32, line_height: f32) -> bool {
        y + line_height >= self.scroll && y <= self.scroll + self.height
    }

    /// Visible entries of `list`, assuming a uniform `line_height`.
    ///
    /// Renderers with per-style metrics should cull per entry with
    /// [`is_visible`](Self::is_visible) instead.
    pub fn visible<'a>(
        &'a self,
        list: &'a DisplayList,
        line_height: f32,
    ) -> impl Iterator<Item = &'a PlacedWord> + 'a {
        list.iter()
            .filter(move |word| self.is_visible(word.y, line_height))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            height: 600.0,
            scroll: 0.0,
            scroll_step: 100.0,
        }
    }
}
