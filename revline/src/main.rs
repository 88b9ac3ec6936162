//! revline: AI-assisted code-review annotation TUI.
//!
//! Entry point for the `revline` binary. Wires together the terminal
//! lifecycle (`tui`), unified event bus (`event`), 3-panel UI (`ui`),
//! theme system (`theme`), configuration (`config`), the workspace worker
//! thread (`workspace`), and the external reviewer plumbing (`review`).
//! The text-processing core (annotation extraction and markup rendering)
//! lives in the `revline-core` crate and is invoked from the event-loop
//! arms via `AppState`.
//!
//! # Startup sequence (order matters)
//!
//! 1. Load config and theme; read-only, safe before terminal init, and
//!    the only point where stderr is still a plain terminal.
//! 2. `install_panic_hook()`, installed first so it is the innermost
//!    hook: restores the terminal before the panic message prints.
//! 3. `register_sigterm()` returns an `Arc<AtomicBool>` polled in the
//!    event loop.
//! 4. `init_tui()` enters the alternate screen and enables raw mode.
//! 5. Create the event channel and `spawn_event_task()`.
//! 6. Spawn the workspace worker thread and request the file listing; the
//!    listing arrives as an event, so there is no blocking startup I/O.
//!
//! # Safety
//!
//! `restore_tui()` is called after the event loop exits (normal quit, `q`
//! key, SIGTERM, or `None` channel close). The event loop exits only via
//! `break`, never via `?`, so the restore point is always reached; draw
//! errors propagate out of the loop and reach it after `break`. The panic
//! hook covers unexpected panics.

mod app;
mod config;
mod event;
mod review;
mod theme;
mod tui;
mod ui;
mod workspace;

use std::sync::atomic::Ordering;

use ui::keybindings::KeyAction;
use workspace::types::WorkspaceRequest;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Step 0: load config and theme; read-only, safe before terminal init.
    let config = config::load();
    let theme = theme::Theme::from_name(&config.theme);
    let mut state = app::AppState::default();
    state.reviewer = config.reviewer;

    // Step 1: panic hook installed first; innermost hook restores terminal.
    tui::install_panic_hook();

    // Step 2: SIGTERM flag, polled in the 50ms heartbeat arm below.
    let term_flag = tui::register_sigterm();

    // Step 3: enter alternate screen and raw mode.
    let mut terminal = tui::init_tui()?;

    // Step 4: create event channel and spawn the background event task.
    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone());
    state.event_tx = Some(handler.tx.clone());
    let mut rx = handler.rx;

    // Step 5: spawn the workspace worker thread. It owns the repository
    // handle for its lifetime and answers on the event channel; the first
    // file listing is requested before the first frame so the UI starts in
    // its "Loading..." state rather than blank.
    let (workspace_tx, workspace_rx) = crossbeam_channel::unbounded();
    {
        let event_tx = handler.tx.clone();
        std::thread::spawn(move || {
            workspace::worker::workspace_worker_loop(".".to_owned(), workspace_rx, event_tx);
        });
    }
    let _ = workspace_tx.send(WorkspaceRequest::ListFiles);
    state.workspace_tx = Some(workspace_tx);

    // Event loop; exits only via `break`, never via `?`.
    // This guarantees `restore_tui()` is always reached after the loop.
    'event_loop: loop {
        tokio::select! {
            // Heartbeat: guarantees SIGTERM is checked at least every 50ms,
            // even when no crossterm/tick/render events arrive. Without
            // this arm, a quiescent terminal blocks forever in rx.recv()
            // and the SIGTERM flag is never polled.
            _ = tokio::time::sleep(std::time::Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(event::AppEvent::Render) => {
                        // Exactly one draw() call per Render event.
                        terminal.draw(|frame| ui::render(frame, &mut state, &theme))?;
                    }
                    Some(event::AppEvent::Key(key)) => {
                        if ui::keybindings::handle_key(key, &mut state) == KeyAction::Quit {
                            break 'event_loop;
                        }
                    }
                    Some(event::AppEvent::Mouse(mouse)) => {
                        let _ = ui::keybindings::handle_mouse(mouse, &mut state);
                    }
                    Some(event::AppEvent::Workspace(response)) => {
                        state.apply_workspace(response);
                    }
                    Some(event::AppEvent::Review(outcome)) => {
                        // Extraction and markup rendering run here, exactly
                        // once per completed reviewer response.
                        state.apply_review(*outcome, &theme);
                    }
                    Some(event::AppEvent::Resize(_, _)) => {
                        // Handled automatically by ratatui on the next
                        // Render: frame.area() returns the new size.
                    }
                    Some(event::AppEvent::Quit) | None => break 'event_loop,
                    _ => {}
                }
                // Check SIGTERM after every event too, not just on the
                // heartbeat, so quit latency is at most one event cycle.
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
        }
    }

    // Restore the terminal at the single exit point of the loop. Covers
    // normal quit, `q` key, SIGTERM, and channel close; the panic hook
    // handles the panic path separately.
    tui::restore_tui()?;
    Ok(())
}
