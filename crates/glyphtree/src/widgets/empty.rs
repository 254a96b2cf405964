use glyphtree_core::surface::Surface;

use crate::component::Component;

/// Takes up space and draws nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct Empty;

impl Component for Empty {
    fn render(&mut self, _surface: &mut Surface<'_>) {}
}
