use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::kernel::Theme;

/// Presentation hook fired when the theme changes.
pub trait ThemeHook: Send {
    fn apply(&mut self, theme: Theme);
}

impl<F> ThemeHook for F
where
    F: FnMut(Theme) + Send,
{
    fn apply(&mut self, theme: Theme) {
        self(theme)
    }
}

/// Document-level `dark` marker: set while the theme is dark, cleared
/// otherwise. Clones share the marker, so a host can hand one clone to the
/// session and read the other.
#[derive(Debug, Clone, Default)]
pub struct DocumentTheme {
    dark: Arc<AtomicBool>,
    applied: Arc<AtomicUsize>,
}

impl DocumentTheme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dark(&self) -> bool {
        self.dark.load(Ordering::Relaxed)
    }

    /// How many times the hook has fired.
    pub fn applied(&self) -> usize {
        self.applied.load(Ordering::Relaxed)
    }
}

impl ThemeHook for DocumentTheme {
    fn apply(&mut self, theme: Theme) {
        let was_dark = self.dark.swap(theme.is_dark(), Ordering::Relaxed);
        self.applied.fetch_add(1, Ordering::Relaxed);
        if was_dark != theme.is_dark() {
            tracing::info!(theme = theme.label(), "document theme marker updated");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/theme.rs"]
mod tests;
