//! Computed Style
//!
//! The subset of computed style the focus code needs: whether a box is
//! generated at all and whether it is painted.

/// CSS `display` (only the distinctions that matter for rendering)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Inline,
    Block,
    Contents,
    None,
}

/// CSS `visibility`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
    Collapse,
}

/// Per-element computed style
///
/// `visibility` is inherited: `None` means "take the parent's value".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComputedStyle {
    pub display: Display,
    pub visibility: Option<Visibility>,
}

impl ComputedStyle {
    pub fn hidden() -> Self {
        Self { display: Display::None, visibility: None }
    }

    pub fn invisible() -> Self {
        Self { display: Display::Inline, visibility: Some(Visibility::Hidden) }
    }

    /// Whether this element generates no box
    pub fn is_display_none(&self) -> bool {
        self.display == Display::None
    }
}
