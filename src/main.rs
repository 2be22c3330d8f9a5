use anyhow::Result;
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use quake_map::app::App;
use quake_map::config::Config;
use quake_map::markers::MarkerSet;
use quake_map::{data, logging, report, ui};
use ratatui::DefaultTerminal;
use std::time::Duration;
use tracing::{error, info};

fn main() -> Result<()> {
    let config = Config::parse();
    logging::init(&config.log_file)?;
    info!(?config, "starting");

    // Load everything before taking over the terminal so failures reach stderr
    let markers = data::load_marker_set(&config).inspect_err(|e| error!("{e:#}"))?;
    report::log_summary(&markers, config.top);

    // Initialize terminal
    let mut terminal = ratatui::init();
    terminal.clear()?;

    // Enable mouse capture
    execute!(std::io::stdout(), EnableMouseCapture)?;

    let result = run(&mut terminal, markers);

    // Disable mouse capture and restore terminal
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    info!("exiting");
    result
}

/// Hover, click-or-drag, and wheel zoom
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Moved => app.pointer_moved(mouse.column, mouse.row),
        // Scroll wheel for zooming towards mouse position
        MouseEventKind::ScrollUp => app.zoom_in_at(mouse.column, mouse.row),
        MouseEventKind::ScrollDown => app.zoom_out_at(mouse.column, mouse.row),
        // Horizontal scroll for panning (trackpad two-finger swipe)
        MouseEventKind::ScrollLeft => app.pan(-15, 0),
        MouseEventKind::ScrollRight => app.pan(15, 0),
        MouseEventKind::Down(MouseButton::Left) => app.mouse_down(mouse.column, mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => {
            app.mouse_pos = Some((mouse.column, mouse.row));
            app.handle_drag(mouse.column, mouse.row);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if let Some(outcome) = app.mouse_up(mouse.column, mouse.row) {
                info!(?outcome, "click");
            }
        }
        _ => {}
    }
}

fn run(terminal: &mut DefaultTerminal, markers: MarkerSet) -> Result<()> {
    let size = terminal.size()?;
    let mut app = App::new(size.width as usize, size.height as usize, markers);

    // Main loop
    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;

        // Handle events with ~60fps target
        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events (not release)
                    if key.kind == KeyEventKind::Press {
                        match key.code {
                            KeyCode::Char('q') | KeyCode::Esc => app.quit(),

                            // Pan with hjkl or arrow keys
                            KeyCode::Left | KeyCode::Char('h') => app.pan(-10, 0),
                            KeyCode::Right | KeyCode::Char('l') => app.pan(10, 0),
                            KeyCode::Up | KeyCode::Char('k') => app.pan(0, -6),
                            KeyCode::Down | KeyCode::Char('j') => app.pan(0, 6),

                            // Zoom
                            KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_in(),
                            KeyCode::Char('-') | KeyCode::Char('_') => app.zoom_out(),

                            // Overlay toggles
                            KeyCode::Char('b') | KeyCode::Char('B') => {
                                app.basemap.toggle_outlines()
                            }
                            KeyCode::Char('g') | KeyCode::Char('G') => {
                                app.basemap.toggle_legend()
                            }

                            KeyCode::Char('r') | KeyCode::Char('0') => app.reset_view(),

                            _ => {}
                        }
                    }
                }
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
                Event::Resize(width, height) => app.resize(width as usize, height as usize),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
