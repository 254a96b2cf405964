//! The stock widget set.
//!
//! Leaf widgets ([`Label`], [`MenuEntry`], [`MonochromePicture`], [`TextInput`], ...) paint
//! themselves. Layout widgets ([`List`], [`Sticky`], [`Padding`], [`Border`], [`Centered`])
//! arrange child elements. [`Button`], [`DialogBox`], [`PopoverMenu`], [`SelectInput`] and
//! [`Tabs`] are assembled from the others.
//!
//! Widgets whose properties may change after construction hand out a cloneable `*Handle` that
//! can be sent to other threads; setters mark the widget dirty only when a value actually
//! changes.

mod border;
mod button;
mod centered;
mod dialog;
mod empty;
mod label;
mod list;
mod menu;
mod padding;
mod picture;
mod select;
mod sticky;
mod tabs;
mod text_input;
mod text_view;

pub use border::Border;
pub use border::BorderHandle;
pub use border::BorderStyle;
pub use button::Button;
pub use button::ButtonHandle;
pub use centered::Centered;
pub use dialog::DialogBox;
pub use empty::Empty;
pub use label::Label;
pub use label::LabelHandle;
pub use list::Direction;
pub use list::List;
pub use menu::MenuCallback;
pub use menu::MenuEntry;
pub use menu::MenuEntryHandle;
pub use menu::MenuItem;
pub use menu::MenuSeparator;
pub use menu::PopoverMenu;
pub use padding::Padding;
pub use picture::MonochromePicture;
pub use picture::PictureHandle;
pub use picture::PictureSize;
pub use select::SelectInput;
pub use select::SelectHandle;
pub use sticky::Sticky;
pub use sticky::StickyEdge;
pub use tabs::Tabs;
pub use text_input::TextInput;
pub use text_input::TextInputHandle;
pub use text_view::TextView;
pub use text_view::TextViewHandle;
