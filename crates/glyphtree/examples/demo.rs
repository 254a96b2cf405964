//! A tour of the stock widgets.
//!
//! Run with `cargo run -p glyphtree --example demo --features crossterm`. Log output goes to
//! `glyphtree-demo.log` (filter with `RUST_LOG`).

use glyphtree::component::Element;
use glyphtree::context::Context;
use glyphtree::context::Handle;
use glyphtree::core::input::InputEvent;
use glyphtree::core::input::KeyCode;
use glyphtree::logging::LoggingConfig;
use glyphtree::logging::init_logging;
use glyphtree::scene::Scene;
use glyphtree::scheduler::SchedulerOptions;
use glyphtree::widgets::Button;
use glyphtree::widgets::Centered;
use glyphtree::widgets::DialogBox;
use glyphtree::widgets::Direction;
use glyphtree::widgets::Label;
use glyphtree::widgets::LabelHandle;
use glyphtree::widgets::List;
use glyphtree::widgets::MenuItem;
use glyphtree::widgets::MonochromePicture;
use glyphtree::widgets::Padding;
use glyphtree::widgets::PopoverMenu;
use glyphtree::widgets::SelectInput;
use glyphtree::widgets::Sticky;
use glyphtree::widgets::StickyEdge;
use glyphtree::widgets::Tabs;
use glyphtree::widgets::TextInput;
use glyphtree::widgets::TextView;

const ABOUT: &str = "glyphtree lays widgets out in a tree and repaints only what changed. \
Menus and dialogs float above the tree as overlays. Scroll this text with the wheel or the \
arrow keys; the wheel works even when the pointer is elsewhere on the screen.";

const GLIDER: [&str; 6] = ["..#...", "...#..", ".###..", "......", "#.#.#.", ".#.#.#"];

fn status_line() -> (Label, LabelHandle) {
    let label = Label::new("<blue>Ready.</blue>").formatted(true);
    let handle = label.handle();
    (label, handle)
}

fn announce(status: &LabelHandle) -> impl FnMut(&Context, &str) + 'static {
    let status = status.clone();
    move |_, label| status.set_text(format!("Chose {label}"))
}

fn open_menu(ctx: &Context, status: &LabelHandle) {
    let menu = PopoverMenu::new(vec![
        MenuItem::entry("&New", announce(status)),
        MenuItem::entry("&Open", announce(status)),
        MenuItem::separator(),
        MenuItem::submenu(
            "&Recent",
            vec![
                MenuItem::entry("notes.txt", announce(status)),
                MenuItem::entry("todo.txt", announce(status)),
            ],
        ),
    ])
    .animated(true);
    let location = menu.size().offset(3, 0);
    if let Err(err) = ctx.register(Element::new(menu), location) {
        log::warn!("could not open menu: {err}");
    }
}

fn confirm_quit(ctx: &Context) {
    let dialog = DialogBox::new("Really quit the demo?")
        .option("&Yes", |ctx, _| ctx.handle().exit())
        .option("&No", |ctx, _| ctx.dismiss())
        .with_escape("&No");
    if let Err(err) = ctx.handle().register_component(Element::new(dialog), None, None) {
        log::warn!("could not open dialog: {err}");
    }
}

fn controls(status: &LabelHandle) -> List {
    let menu_status = status.clone();
    let echo = status.clone();
    let picked = status.clone();
    let font = SelectInput::new(["Monospace", "Proportional", "Braille"])
        .hotkey('s')
        .on_change(move |_, value| picked.set_text(format!("Font: {value}")));
    let input = TextInput::new("type here")
        .on_submit(move |_, text| echo.set_text(format!("Submitted {text:?}")));
    List::new(Direction::TopToBottom)
        .size(3)
        .push(
            List::new(Direction::LeftToRight)
                .size(12)
                .push(Button::new("&Menu").on_click(move |ctx, button| {
                    if button.is_activation() {
                        open_menu(ctx, &menu_status);
                    }
                    button.is_activation()
                }))
                .push(Button::new("&About").on_click(|ctx, button| {
                    if button.is_activation() {
                        ctx.handle().change_scene(About);
                    }
                    button.is_activation()
                }))
                .push(Button::new("&Quit").on_click(|ctx, button| {
                    if button.is_activation() {
                        confirm_quit(ctx);
                    }
                    button.is_activation()
                })),
        )
        .push(Padding::new(font).all(1))
        .push(Padding::new(input).all(1))
}

struct Home;

impl Scene for Home {
    fn create(&mut self, _handle: &Handle) -> Option<Element> {
        let (status, status_handle) = status_line();
        let glider = GLIDER
            .iter()
            .map(|row| row.chars().map(|c| c == '#').collect())
            .collect();

        let pane = Sticky::new(
            TextView::new(ABOUT),
            controls(&status_handle),
            StickyEdge::Right,
            30,
        );
        let tabs = Tabs::new()
            .tab("&Controls", pane)
            .tab("&Picture", Centered::new(MonochromePicture::new(glider)));
        Some(Element::new(Sticky::new(status, tabs, StickyEdge::Bottom, 1)))
    }

    fn handle_input(&mut self, event: &InputEvent, handle: &Handle) -> bool {
        if event.is_key(KeyCode::Esc) {
            handle.exit();
            return true;
        }
        false
    }
}

struct About;

impl Scene for About {
    fn create(&mut self, _handle: &Handle) -> Option<Element> {
        let text = Label::new("<invert>glyphtree</invert> demo\n\nPress any key to go back.")
            .formatted(true)
            .centered(true);
        Some(Element::new(Centered::new(text)))
    }

    fn handle_input(&mut self, event: &InputEvent, handle: &Handle) -> bool {
        if matches!(event, InputEvent::Keyboard(_)) {
            handle.change_scene(Home);
            return true;
        }
        false
    }
}

fn main() -> glyphtree::Result<()> {
    init_logging(LoggingConfig::to_file("glyphtree-demo.log"))?;
    glyphtree::run::execute(Home, SchedulerOptions::default(), None)
}
