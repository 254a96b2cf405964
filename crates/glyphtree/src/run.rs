use glyphtree_core::terminal::TerminalDisplay;
use glyphtree_core::terminal::TerminalOptions;

use crate::error::Result;
use crate::scene::Scene;
use crate::scheduler::IdleCallback;
use crate::scheduler::MainLoop;
use crate::scheduler::SchedulerOptions;

/// Takes over the terminal, runs `start` until the application exits, then restores the
/// terminal.
///
/// `idle` needs `options.realtime`.
pub fn execute(
    start: impl Scene + 'static,
    options: SchedulerOptions,
    idle: Option<IdleCallback<TerminalDisplay>>,
) -> Result<()> {
    execute_with(start, options, TerminalOptions::default(), idle)
}

pub fn execute_with(
    start: impl Scene + 'static,
    options: SchedulerOptions,
    terminal: TerminalOptions,
    idle: Option<IdleCallback<TerminalDisplay>>,
) -> Result<()> {
    let display = TerminalDisplay::with_options(terminal)?;
    let mut main = MainLoop::new(display, options);
    if let Some(idle) = idle {
        main = main.with_idle(idle)?;
    }
    main.change_scene(start);
    main.run();
    Ok(())
}
