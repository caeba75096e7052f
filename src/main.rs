use std::io::BufRead;
use std::time::{Duration, Instant};

use clap::Parser;
use crossbeam_channel::{unbounded, Receiver, TryRecvError};
use hexview::raster::{darken_color, Canvas, BACKGROUND_COLOR};
use hexview::{Cli, H3Grid, HexViewError, MapSession, ViewerConfig};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

const WINDOW_TITLE: &str = "hexview";
const PAN_PIXELS_PER_FRAME: f64 = 8.0;

const CELL_OUTLINE_COLOR: u32 = 0x003388FF;
const SELECTED_FILL_COLOR: u32 = 0x00FFA500; // orange
const LABEL_COLOR: u32 = 0x00303030;

/// A line typed on stdin while the window is open.
#[derive(Debug, PartialEq)]
enum Command {
    GoTo(String),
    Find(String),
    Link,
    Clear,
}

impl Command {
    fn parse(line: &str) -> Option<Command> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        match verb {
            "goto" | "g" => Some(Command::GoTo(rest.to_string())),
            "find" | "f" => Some(Command::Find(rest.to_string())),
            "link" => Some(Command::Link),
            "clear" => Some(Command::Clear),
            _ => None,
        }
    }
}

/// Rendering adapter: turns window events into camera changes and draws
/// the session's overlay.
struct MapWindow {
    window: Window,
    canvas: Canvas,
    session: MapSession<H3Grid>,
    commands: Receiver<String>,
    panning: bool,
    mouse_was_down: bool,
    title: String,
    last_frame_time: Instant,
    frame_count: usize,
}

impl MapWindow {
    fn new(config: &ViewerConfig, commands: Receiver<String>) -> Result<Self, HexViewError> {
        let mut window = Window::new(
            WINDOW_TITLE,
            config.width,
            config.height,
            WindowOptions {
                resize: true,
                ..WindowOptions::default()
            },
        )?;

        // Limit to max ~60 fps
        window.limit_update_rate(Some(Duration::from_micros(16600)));

        Ok(MapWindow {
            window,
            canvas: Canvas::new(config.width, config.height),
            session: MapSession::from_config(H3Grid::new(), config),
            commands,
            panning: false,
            mouse_was_down: false,
            title: String::new(),
            last_frame_time: Instant::now(),
            frame_count: 0,
        })
    }

    fn run(&mut self) -> Result<(), HexViewError> {
        while self.window.is_open() && !self.window.is_key_down(Key::Escape) {
            self.handle_commands();
            self.handle_input();
            self.session.flush_redraw();
            self.handle_pointer();
            self.render()?;
        }
        Ok(())
    }

    /// Apply queued stdin commands. A closed stdin just means no more
    /// commands; the window stays open.
    fn handle_commands(&mut self) {
        loop {
            let line = match self.commands.try_recv() {
                Ok(line) => line,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return,
            };
            match Command::parse(&line) {
                Some(Command::GoTo(text)) => {
                    self.session.go_to_coordinate(&text);
                }
                Some(Command::Find(id)) => {
                    self.session.find_cell(&id);
                }
                Some(Command::Link) => println!("{}", self.session.share_link()),
                Some(Command::Clear) => self.session.clear_selection(),
                None if line.trim().is_empty() => {}
                None => warn!("Unknown command {:?} (goto, find, link, clear)", line),
            }
        }
    }

    fn handle_input(&mut self) {
        let (width, height) = self.window.get_size();
        if (width, height) != self.session.camera().size() && width > 0 && height > 0 {
            self.session.camera_mut().set_size(width, height);
            self.canvas.resize(width, height);
            self.session.camera_settled();
        }

        let mut dx = 0.0;
        let mut dy = 0.0;
        if self.window.is_key_down(Key::Left) {
            dx -= PAN_PIXELS_PER_FRAME;
        }
        if self.window.is_key_down(Key::Right) {
            dx += PAN_PIXELS_PER_FRAME;
        }
        if self.window.is_key_down(Key::Up) {
            dy -= PAN_PIXELS_PER_FRAME;
        }
        if self.window.is_key_down(Key::Down) {
            dy += PAN_PIXELS_PER_FRAME;
        }

        if dx != 0.0 || dy != 0.0 {
            self.session.camera_mut().pan_pixels(dx, dy);
            self.panning = true;
        } else if self.panning {
            // Keys released: the pan has settled
            self.panning = false;
            self.session.camera_settled();
        }

        let zoom = self.session.camera().zoom();
        let zoom_in = self.window.is_key_pressed(Key::Equal, KeyRepeat::No)
            || self.window.is_key_pressed(Key::NumPadPlus, KeyRepeat::No);
        let zoom_out = self.window.is_key_pressed(Key::Minus, KeyRepeat::No)
            || self.window.is_key_pressed(Key::NumPadMinus, KeyRepeat::No);
        if zoom_in {
            self.session.camera_mut().set_zoom(zoom.saturating_add(1));
        } else if zoom_out {
            self.session.camera_mut().set_zoom(zoom.saturating_sub(1));
        }
        if self.session.camera().zoom() != zoom {
            info!("Zoom level {}", self.session.camera().zoom());
            self.session.camera_settled();
        }
    }

    /// Hover shows the tooltip in the title bar; a click prints the id.
    fn handle_pointer(&mut self) {
        let hovered = self
            .window
            .get_mouse_pos(MouseMode::Discard)
            .and_then(|(x, y)| self.session.cell_at(x as f64, y as f64));

        let title = match hovered {
            Some(record) => format!("{} | {}", WINDOW_TITLE, record.tooltip_text()),
            None => format!("{} | {}", WINDOW_TITLE, self.session.status_line()),
        };

        let mouse_down = self.window.get_mouse_down(MouseButton::Left);
        if mouse_down && !self.mouse_was_down {
            if let Some(record) = hovered {
                println!("{}", record.id);
                info!("Cell identifier {} written to stdout", record.id);
            }
        }
        self.mouse_was_down = mouse_down;

        if title != self.title {
            self.window.set_title(&title);
            self.title = title;
        }
    }

    fn render(&mut self) -> Result<(), HexViewError> {
        let start_time = Instant::now();
        self.canvas.clear(BACKGROUND_COLOR);

        let camera = self.session.camera();
        for record in self.session.overlay() {
            let ring = camera.project_ring(&record.boundary);
            if record.selected {
                self.canvas.fill_polygon(&ring, SELECTED_FILL_COLOR);
                self.canvas
                    .draw_ring(&ring, darken_color(SELECTED_FILL_COLOR, 0.7), 3);
            } else {
                self.canvas.draw_ring(&ring, CELL_OUTLINE_COLOR, 1);
            }
        }

        for record in self.session.overlay().iter().filter(|r| r.show_label) {
            let (x, y) = camera.project(&record.label_anchor());
            if self.canvas.contains(x, y) {
                self.canvas.draw_text_centered(
                    &record.id,
                    x.round() as i32,
                    y.round() as i32,
                    LABEL_COLOR,
                    1,
                );
            }
        }

        self.frame_count += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame_time);
        if elapsed.as_millis() > 1000 {
            let fps = self.frame_count as f64 / elapsed.as_secs_f64();
            debug!("FPS: {:.1}", fps);
            self.last_frame_time = now;
            self.frame_count = 0;
        }

        let frame_time = start_time.elapsed();
        if frame_time.as_millis() > 100 {
            debug!("Frame render time: {:?}", frame_time);
        }

        let (width, height) = self.canvas.size();
        self.window
            .update_with_buffer(self.canvas.buffer(), width, height)?;
        Ok(())
    }
}

/// Forward stdin lines to the UI thread, which does all the work.
fn spawn_command_reader() -> Receiver<String> {
    let (tx, rx) = unbounded();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn main() -> Result<(), HexViewError> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = ViewerConfig::from_cli(&cli)?;
    info!(config = ?config, "Starting viewer");

    let mut map_window = MapWindow::new(&config, spawn_command_reader())?;
    map_window.run()
}
