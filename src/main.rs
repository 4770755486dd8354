use anyhow::Result;
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use evac_viz::app::App;
use evac_viz::config::{self, Args};
use evac_viz::export;
use evac_viz::map::Basemap;
use evac_viz::scenario::Strategy;
use evac_viz::ui;
use ratatui::DefaultTerminal;
use std::time::Duration;
use tracing::info;

fn main() -> Result<()> {
    let args = Args::parse();
    config::init_logging(&args)?;

    if let Some(path) = &args.export {
        return export::write_network(&args.selection(), path);
    }

    let basemap = args.basemap()?;

    // Initialize terminal
    let mut terminal = ratatui::init();
    terminal.clear()?;
    execute!(std::io::stdout(), EnableMouseCapture)?;

    let result = run(&mut terminal, &args, basemap);

    // Disable mouse capture and restore terminal
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

/// Handle mouse events for hovering, clicking, panning and zooming
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    app.set_mouse_pos(mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::ScrollUp => app.zoom_in_at(mouse.column, mouse.row),
        MouseEventKind::ScrollDown => app.zoom_out_at(mouse.column, mouse.row),
        MouseEventKind::ScrollLeft => app.pan(-15, 0),
        MouseEventKind::ScrollRight => app.pan(15, 0),
        MouseEventKind::Down(MouseButton::Left) => {
            app.click(mouse.column, mouse.row);
            app.last_mouse = Some((mouse.column, mouse.row));
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            app.handle_drag(mouse.column, mouse.row);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            app.end_drag();
        }
        _ => {}
    }
}

fn run(terminal: &mut DefaultTerminal, args: &Args, basemap: Option<Basemap>) -> Result<()> {
    let size = terminal.size()?;
    let mut app = App::new(size.width, size.height, args.selection(), args.radar, args.zoom);
    if let Some(basemap) = basemap {
        app = app.with_basemap(basemap);
    }
    info!(
        disaster = app.selection.disaster.name(),
        strategies = app.selection.len(),
        "dashboard started"
    );

    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;

        // Handle events with ~60fps target
        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => app.quit(),

                    // Pan with hjkl or arrow keys
                    KeyCode::Left | KeyCode::Char('h') => app.pan(-10, 0),
                    KeyCode::Right | KeyCode::Char('l') => app.pan(10, 0),
                    KeyCode::Up | KeyCode::Char('k') => app.pan(0, -8),
                    KeyCode::Down | KeyCode::Char('j') => app.pan(0, 8),

                    KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_in(),
                    KeyCode::Char('-') | KeyCode::Char('_') => app.zoom_out(),
                    KeyCode::Char('0') => app.reset_view(),

                    KeyCode::Char('1') => app.toggle_strategy(Strategy::ShortestPath),
                    KeyCode::Char('2') => app.toggle_strategy(Strategy::EthicalBalance),
                    KeyCode::Char('3') => app.toggle_strategy(Strategy::VulnerablePriority),
                    KeyCode::Char('d') => app.cycle_disaster(true),
                    KeyCode::Char('D') => app.cycle_disaster(false),
                    KeyCode::Char('r') | KeyCode::Char('R') => app.toggle_radar(),
                    KeyCode::Char('b') | KeyCode::Char('B') => app.toggle_basemap(),

                    _ => {}
                },
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
                Event::Resize(width, height) => app.resize(width, height),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    info!("dashboard closed");
    Ok(())
}
