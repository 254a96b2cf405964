mod support;

use std::cell::RefCell;
use std::rc::Rc;

use glyphtree::component::Component;
use glyphtree::component::ComponentId;
use glyphtree::component::Element;
use glyphtree::context::Context;
use glyphtree::context::Handle;
use glyphtree::core::geometry::Rectangle;
use glyphtree::core::input::DriverInput;
use glyphtree::core::input::KeyCode;
use glyphtree::core::input::KeyEvent;
use glyphtree::core::keymap::key_char;
use glyphtree::core::surface::Surface;
use glyphtree::widgets::DialogBox;
use glyphtree::widgets::Direction;
use glyphtree::widgets::Label;
use glyphtree::widgets::List;
use glyphtree::widgets::MenuItem;
use glyphtree::widgets::PopoverMenu;
use glyphtree::widgets::SelectInput;
use support::App;
use support::Build;

type Log = Rc<RefCell<Vec<String>>>;

fn recorder(log: &Log) -> impl FnMut(&Context, &str) + 'static {
    let log = log.clone();
    move |_, label| log.borrow_mut().push(label.to_string())
}

fn base() -> App {
    App::new(12, 40, Build(|_: &Handle| Element::new(Label::new("base"))))
}

/// Opens a three-level menu next to an unrelated note.
fn menus(app: &mut App, log: &Log) -> (ComponentId, ComponentId) {
    let note = app
        .main
        .register_component(
            Element::new(Label::new("note")),
            Some(Rectangle::new(11, 12, 0, 10)),
            None,
        )
        .unwrap();
    let menu = PopoverMenu::new(vec![
        MenuItem::submenu(
            "&File",
            vec![MenuItem::submenu(
                "&Recent",
                vec![MenuItem::entry("&notes.txt", recorder(log))],
            )],
        ),
        MenuItem::entry("&Quit", recorder(log)),
    ]);
    let location = menu.size().offset(1, 2);
    let root = app
        .main
        .register_component(Element::new(menu), Some(location), None)
        .unwrap();
    app.cycle();
    (note, root)
}

fn escape(app: &mut App) {
    app.send(DriverInput::Key(KeyEvent::new(KeyCode::Esc)));
}

#[test]
fn choosing_deep_in_a_chain_closes_every_menu_of_it() {
    let log = Log::default();
    let mut app = base();
    let (note, root) = menus(&mut app, &log);
    assert_eq!(app.lines()[2], "    File >");

    app.key('f');
    assert_eq!(app.main.overlay_ids().len(), 3);
    app.key('r');
    assert_eq!(app.main.overlay_ids().len(), 4);
    app.cycle();
    assert!(
        app.lines()[2].contains("notes.txt"),
        "each level opens level with its parent entry: {:?}",
        app.lines()
    );

    app.key('n');
    assert_eq!(*log.borrow(), vec!["&notes.txt".to_string()]);
    assert_eq!(app.main.overlay_ids(), vec![note]);
    assert!(!app.main.is_registered(root));
    app.cycle();
    assert_eq!(app.lines()[2], "");
    assert_eq!(app.lines()[11], "note");
}

#[test]
fn escape_closes_one_submenu_at_a_time() {
    let log = Log::default();
    let mut app = base();
    let (note, root) = menus(&mut app, &log);

    app.key('f');
    app.cycle();
    escape(&mut app);
    assert_eq!(app.main.overlay_ids(), vec![note, root]);

    escape(&mut app);
    assert_eq!(app.main.overlay_ids(), vec![note]);
    assert!(log.borrow().is_empty());
}

#[test]
fn clicking_away_closes_the_chain() {
    let log = Log::default();
    let mut app = base();
    let (note, _) = menus(&mut app, &log);
    app.key('f');
    app.cycle();

    app.click(35, 10);
    assert_eq!(app.main.overlay_ids(), vec![note]);
    assert!(log.borrow().is_empty());
}

#[test]
fn the_root_menu_swallows_keys_it_does_not_use() {
    let log = Log::default();
    let mut app = base();
    let (_, root) = menus(&mut app, &log);
    app.key('x');
    assert!(app.main.is_registered(root));
    app.key('q');
    assert_eq!(*log.borrow(), vec!["&Quit".to_string()]);
    assert!(!app.main.is_registered(root));
}

#[test]
fn dialog_options_dismiss_the_dialog() {
    let log = Log::default();
    let mut app = base();
    let mut record = recorder(&log);
    let dialog = DialogBox::new("Save changes?")
        .option("&Yes", move |ctx, label| {
            record(ctx, label);
            ctx.dismiss();
        })
        .option("&No", |ctx, _| ctx.dismiss())
        .with_padding(1);
    let id = app.main.register_component(Element::new(dialog), None, None).unwrap();
    app.cycle();
    assert!(app.lines().iter().any(|l| l.contains("Save changes?")));

    app.key('x');
    assert!(app.main.is_registered(id), "the dialog is modal");
    app.key('y');
    assert_eq!(*log.borrow(), vec!["&Yes".to_string()]);
    assert!(!app.main.is_registered(id));
}

#[test]
fn select_menu_opens_below_and_applies_the_choice() {
    let log = Log::default();
    let select = SelectInput::new(["alpha", "beta"]).on_change(recorder(&log));
    let value = select.handle();
    let mut slot = Some(select);
    let mut app = App::new(
        8,
        20,
        Build(move |_: &Handle| {
            let mut list = List::new(Direction::TopToBottom).size(1);
            if let Some(select) = slot.take() {
                list = list.push(select);
            }
            Element::new(list)
        }),
    );
    assert!(app.lines()[0].starts_with("[alpha"));

    app.click(1, 0);
    assert_eq!(app.main.overlay_ids().len(), 1);
    app.cycle();
    assert!(app.lines()[3].contains("beta"), "{:?}", app.lines());

    app.click(3, 3);
    assert_eq!(value.selected(), 1);
    assert_eq!(*log.borrow(), vec!["beta".to_string()]);
    assert!(app.main.overlay_ids().is_empty());
    app.cycle();
    assert!(app.lines()[0].starts_with("[beta"));
    assert!(app.lines()[2].is_empty());
}

#[test]
fn scheduler_keys_reach_a_menu_registered_from_a_callback() {
    let log = Log::default();
    let mut app = base();
    let handle = app.main.handle().clone();
    let inner = recorder(&log);
    let opener = Rc::new(RefCell::new(Some(inner)));
    let dialog = DialogBox::new("Open a menu?").option("&Menu", move |ctx, _| {
        ctx.dismiss();
        if let Some(callback) = opener.borrow_mut().take() {
            let menu = PopoverMenu::new(vec![MenuItem::entry("&Go", callback)]);
            let location = menu.size();
            if let Err(err) = handle.register_component(Element::new(menu), Some(location), None) {
                panic!("{err}");
            }
        }
    });
    app.main.register_component(Element::new(dialog), None, None).unwrap();
    app.cycle();

    app.key('m');
    assert_eq!(app.main.overlay_ids().len(), 1, "dialog out, menu in");
    app.send(DriverInput::Key(key_char('g')));
    assert_eq!(*log.borrow(), vec!["&Go".to_string()]);
    assert!(app.main.overlay_ids().is_empty());
}

/// Logs its name when torn down.
struct Leaf(&'static str, Log);

impl Component for Leaf {
    fn detach(&mut self) {
        self.1.borrow_mut().push(self.0.to_string());
    }

    fn render(&mut self, _surface: &mut Surface<'_>) {}
}

/// Registers a leaf overlay of its own as soon as it joins a tree.
struct Opener(Log);

impl Component for Opener {
    fn attach(&mut self, ctx: &Context) {
        let leaf = Element::new(Leaf("child overlay", self.0.clone()));
        if let Err(err) = ctx.register(leaf, Rectangle::sized(1, 4)) {
            panic!("{err}");
        }
    }

    fn detach(&mut self) {
        self.0.borrow_mut().push("parent".to_string());
    }

    fn render(&mut self, _surface: &mut Surface<'_>) {}
}

#[test]
fn nested_registrant_releases_its_overlay_before_its_own_teardown() {
    let log = Log::default();
    let mut app = base();
    let list = List::new(Direction::TopToBottom).push(Opener(log.clone()));
    let id = app
        .main
        .register_component(Element::new(list), Some(Rectangle::new(0, 2, 0, 10)), None)
        .unwrap();
    assert_eq!(app.main.overlay_ids().len(), 2);
    app.cycle();

    app.main.unregister_component(id);
    assert_eq!(*log.borrow(), vec!["child overlay".to_string(), "parent".to_string()]);
    assert!(app.main.overlay_ids().is_empty());
    app.cycle();
    assert_eq!(app.lines()[0], "base");
}
