use glyphtree_core::input::InputEvent;

use crate::component::Element;
use crate::context::Handle;

/// One screen of an application.
///
/// The scheduler owns the active scene. Application state is carried in the scene value itself;
/// switching scenes goes through [`Handle::change_scene`].
pub trait Scene {
    /// Builds the root of the component tree. `None` leaves the screen to overlays alone.
    fn create(&mut self, _handle: &Handle) -> Option<Element> {
        None
    }

    /// Called when the scene is replaced or the loop exits, before its tree and overlays are
    /// detached.
    fn destroy(&mut self, _handle: &Handle) {}

    fn tick(&mut self, _handle: &Handle) {}

    /// Last chance for input nothing in the tree wanted.
    fn handle_input(&mut self, _event: &InputEvent, _handle: &Handle) -> bool {
        false
    }
}
