use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode},
    execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::env;
use std::io::{stdout, BufWriter};
use std::path::PathBuf;
use std::time::{Duration, Instant};

mod audio;
mod canvas;
mod fireworks;
mod show;
mod sky;

use canvas::Canvas;
use show::FireworksShow;
use sky::Sky;

fn print_usage() {
    eprintln!("skyburst - Terminal fireworks display");
    eprintln!();
    eprintln!("Usage: skyburst [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --bg-color RRGGBB  Night-sky base color as hex (e.g., --bg-color 06081a)");
    eprintln!("  --music PATH       Loop a background track while the show runs");
    eprintln!();
    eprintln!("Press 'q', ESC, or Ctrl+C to exit");
}

fn run(bg_color: (u8, u8, u8), music: Option<PathBuf>) -> std::io::Result<()> {
    // Start (or skip) the music before raw mode so failures print cleanly.
    let _music = music.and_then(|path| audio::start(&path));

    let stdout = stdout();
    let mut stdout = BufWriter::with_capacity(1024 * 64, stdout);

    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))?;

    let (cols, rows) = terminal::size()?;
    let mut canvas = Canvas::new(cols as usize, rows as usize * 2);
    let mut sky = Sky::new(cols as usize, rows as usize * 2, bg_color);
    let mut show = FireworksShow::new();

    let mut last_frame = Instant::now();
    let mut accumulator = 0.0f32;
    let mut time = 0.0f32;
    const FIXED_DT: f32 = 1.0 / 60.0;

    loop {
        if event::poll(Duration::from_millis(1))? {
            match event::read()? {
                Event::Key(key_event) => {
                    if key_event.code == KeyCode::Char('q')
                        || key_event.code == KeyCode::Esc
                        || (key_event.code == KeyCode::Char('c')
                            && key_event.modifiers.contains(event::KeyModifiers::CONTROL))
                    {
                        break;
                    }
                }
                Event::Resize(cols, rows) => {
                    // World coordinates are fixed, only the surfaces change.
                    canvas = Canvas::new(cols as usize, rows as usize * 2);
                    sky = Sky::new(cols as usize, rows as usize * 2, bg_color);
                    execute!(stdout, Clear(ClearType::All))?;
                }
                _ => {}
            }
        }

        let now = Instant::now();
        let frame_time = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        accumulator += frame_time;
        if accumulator > FIXED_DT * 3.0 {
            accumulator = FIXED_DT * 3.0;
        }

        while accumulator >= FIXED_DT {
            // Fade first so this tick's points land crisp on top of the
            // smeared previous frames.
            canvas.apply_trail();
            show.tick();
            show.render(&mut canvas);
            time += FIXED_DT;
            accumulator -= FIXED_DT;
        }
        if time > 10000.0 {
            time -= 10000.0;
        }

        canvas.present(&mut stdout, &sky, time)?;
    }

    execute!(stdout, Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    Ok(())
}

fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}

fn main() -> std::io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut bg_color = (6, 8, 20);
    let mut music: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bg-color" => {
                if i + 1 < args.len() {
                    if let Some(color) = parse_hex_color(&args[i + 1]) {
                        bg_color = color;
                        i += 2;
                    } else {
                        eprintln!("Invalid hex color: {}", args[i + 1]);
                        eprintln!("Expected format: RRGGBB (e.g., 06081a)");
                        std::process::exit(1);
                    }
                } else {
                    eprintln!("--bg-color requires a hex color value");
                    std::process::exit(1);
                }
            }
            "--music" => {
                if i + 1 < args.len() {
                    music = Some(PathBuf::from(&args[i + 1]));
                    i += 2;
                } else {
                    eprintln!("--music requires a file path");
                    std::process::exit(1);
                }
            }
            "help" | "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            arg => {
                eprintln!("Unknown option: {arg}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }

    run(bg_color, music)
}
