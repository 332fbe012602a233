use crate::token::TagKind;

/// Font weight axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FontWeight {
    /// Regular weight.
    Normal,
    /// Bold weight.
    Bold,
}

/// Font slant axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FontSlant {
    /// Upright style.
    Roman,
    /// Italic style.
    Italic,
}

/// Value-equal font style key.
///
/// Two descriptors with equal fields are interchangeable; every consumer
/// (layout, font caches, renderers) keys on the field tuple, never on
/// identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleDescriptor {
    /// Size in points. Unbalanced `big`/`small` tags may drift this
    /// arbitrarily, including nonpositive; no clamp is applied.
    pub size: i32,
    /// Weight axis.
    pub weight: FontWeight,
    /// Slant axis.
    pub slant: FontSlant,
}

impl StyleDescriptor {
    /// Build a descriptor from explicit fields.
    pub fn new(size: i32, weight: FontWeight, slant: FontSlant) -> Self {
        Self {
            size,
            weight,
            slant,
        }
    }
}

impl Default for StyleDescriptor {
    fn default() -> Self {
        Self {
            size: 12,
            weight: FontWeight::Normal,
            slant: FontSlant::Roman,
        }
    }
}

/// Tracker of the active style while a token stream is scanned.
///
/// The scan is strictly left-to-right with no lookahead: each recognized
/// style tag mutates one axis, closing tags reverse exactly the paired
/// opening tag's effect, and anything else leaves the state untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StyleState {
    size: i32,
    weight: FontWeight,
    slant: FontSlant,
}

impl StyleState {
    /// Start tracking from `initial`.
    pub fn new(initial: StyleDescriptor) -> Self {
        Self {
            size: initial.size,
            weight: initial.weight,
            slant: initial.slant,
        }
    }

    /// Snapshot of the currently active style.
    pub fn current(&self) -> StyleDescriptor {
        StyleDescriptor {
            size: self.size,
            weight: self.weight,
            slant: self.slant,
        }
    }

    /// Apply one tag's effect.
    ///
    /// Structural tags (`br`, `/p`) and unrecognized tags have no style
    /// effect.
    pub fn apply(&mut self, tag: TagKind) {
        match tag {
            TagKind::Bold => self.weight = FontWeight::Bold,
            TagKind::BoldEnd => self.weight = FontWeight::Normal,
            TagKind::Italic => self.slant = FontSlant::Italic,
            TagKind::ItalicEnd => self.slant = FontSlant::Roman,
            TagKind::Big => self.size += 4,
            TagKind::BigEnd => self.size -= 4,
            TagKind::Small => self.size -= 2,
            TagKind::SmallEnd => self.size += 2,
            TagKind::LineBreak | TagKind::ParagraphEnd | TagKind::Other => {}
        }
    }
}

impl Default for StyleState {
    fn default() -> Self {
        Self::new(StyleDescriptor::default())
    }
}

#[cfg(test)]
mod tests {
    use super::{FontSlant, FontWeight, StyleDescriptor, StyleState};
    use crate::token::TagKind;

    fn applied(tags: &[&str]) -> StyleDescriptor {
        let mut state = StyleState::default();
        for tag in tags {
            state.apply(TagKind::from_name(tag));
        }
        state.current()
    }

    #[test]
    fn default_style_is_twelve_point_roman() {
        let style = StyleState::default().current();
        assert_eq!(style.size, 12);
        assert_eq!(style.weight, FontWeight::Normal);
        assert_eq!(style.slant, FontSlant::Roman);
    }

    #[test]
    fn nested_tags_compose_and_unwind() {
        let style = applied(&["b", "i", "big"]);
        assert_eq!(style.weight, FontWeight::Bold);
        assert_eq!(style.slant, FontSlant::Italic);
        assert_eq!(style.size, 16);

        let style = applied(&["b", "i", "big", "/big", "/i", "/b"]);
        assert_eq!(style, StyleDescriptor::default());
    }

    #[test]
    fn small_and_big_use_their_own_step_sizes() {
        assert_eq!(applied(&["small"]).size, 10);
        assert_eq!(applied(&["small", "/small"]).size, 12);
        assert_eq!(applied(&["big"]).size, 16);
        assert_eq!(applied(&["big", "small"]).size, 14);
    }

    #[test]
    fn unbalanced_tags_drift_without_clamping() {
        // Closers applied without openers keep adjusting the size, even
        // past zero; there is deliberately no clamp.
        assert_eq!(applied(&["/small", "/small"]).size, 16);
        assert_eq!(applied(&["/big", "/big", "/big", "/big"]).size, -4);
        assert_eq!(applied(&["/b"]).weight, FontWeight::Normal);
    }

    #[test]
    fn structural_and_unknown_tags_are_no_ops() {
        let style = applied(&["br", "/p", "div", "span", "p"]);
        assert_eq!(style, StyleDescriptor::default());
    }
}
