//! Keyboard state for the brand suggestion dropdown.

use crate::suggest::BrandSuggestion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKey {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    Focus,
    Input,
    Key(PanelKey),
    ClickOutside,
}

/// Suggestion dropdown: open/closed plus an optional highlighted row.
#[derive(Debug, Clone, Default)]
pub struct SuggestionPanel {
    open: bool,
    highlighted: Option<usize>,
    suggestions: Vec<BrandSuggestion>,
}

impl SuggestionPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn suggestions(&self) -> &[BrandSuggestion] {
        &self.suggestions
    }

    /// Replace the list after the query changed. Clears the highlight.
    pub fn set_suggestions(&mut self, suggestions: Vec<BrandSuggestion>) {
        self.suggestions = suggestions;
        self.highlighted = None;
    }

    /// Apply one UI event. Returns the committed suggestion on `Enter`.
    pub fn handle(&mut self, event: PanelEvent) -> Option<BrandSuggestion> {
        match event {
            PanelEvent::Focus => {
                self.open = true;
                None
            }
            PanelEvent::Input => {
                self.open = true;
                self.highlighted = None;
                None
            }
            PanelEvent::ClickOutside => {
                self.open = false;
                None
            }
            PanelEvent::Key(key) => self.handle_key(key),
        }
    }

    fn handle_key(&mut self, key: PanelKey) -> Option<BrandSuggestion> {
        if !self.open {
            if matches!(key, PanelKey::ArrowDown | PanelKey::ArrowUp) {
                self.open = true;
            }
            return None;
        }

        match key {
            PanelKey::ArrowDown => {
                if let Some(last) = self.suggestions.len().checked_sub(1) {
                    let next = self.highlighted.map_or(0, |i| i + 1);
                    self.highlighted = Some(next.min(last));
                }
                None
            }
            PanelKey::ArrowUp => {
                if !self.suggestions.is_empty() {
                    self.highlighted = Some(self.highlighted.map_or(0, |i| i.saturating_sub(1)));
                }
                None
            }
            PanelKey::Enter => {
                let chosen = self
                    .highlighted
                    .and_then(|i| self.suggestions.get(i))
                    .or_else(|| self.suggestions.first())
                    .cloned()?;
                self.open = false;
                Some(chosen)
            }
            PanelKey::Escape => {
                self.open = false;
                None
            }
        }
    }
}
