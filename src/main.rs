//! Minicurses Demo Binary
//!
//! Run with: cargo run -- [options]
//!
//! Shows a login form on the chosen backend:
//! - `emulator` (default): the local terminal in raw mode
//! - `bordered`: the same, framed
//! - `minitel`: a Minitel on a serial device
//! - `script`: replays a JSON event script headlessly and prints the final screen

use std::env;
use std::fs;

use env_logger::{Env, Target, WriteStyle};
use log::{info, warn};

use minicurses::backend::{Backend, Emulator, Minitel, ScriptedBackend};
use minicurses::config::{BackendKind, Config, USAGE};
use minicurses::core::{Style, Window};
use minicurses::widget::{AsciiArt, Button, Gravity, Label, MultilineLabel, Textbox, Widget};
use minicurses::{Error, LogBuffer, RootWindow};

const COLS: usize = 80;
const ROWS: usize = 24;

const LOGO: &str = r"
  __  __ _       _
 |  \/  (_)_ __ (_) ___ _   _ _ __ ___  ___  ___
 | |\/| | | '_ \| |/ __| | | | '__/ __|/ _ \/ __|
 | |  | | | | | | | (__| |_| | |  \__ \  __/\__ \
 |_|  |_|_|_| |_|_|\___|\__,_|_|  |___/\___||___/";

const HELP: &str = "Up/Down/Tab: move   Enter: activate   Esc: leave window\n\
                    Esc on the outer screen quits.";

/// Index of the user name field inside the form
const USER_FIELD: usize = 0;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The screen belongs to the backend; log lines are kept for display instead
    let log = LogBuffer::default();
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(log.clone())))
        .write_style(WriteStyle::Never)
        .format_timestamp(None)
        .init();

    let config = match Config::from_args(env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
    };
    if config.help {
        println!("{}", USAGE);
        return Ok(());
    }

    // Widgets are single-threaded and the backends block on input
    let outcome = tokio::task::spawn_blocking(move || run(config, log)).await??;

    match outcome {
        Some(user) => println!("Logged in as '{}'", user),
        None => println!("Cancelled"),
    }
    Ok(())
}

fn run(config: Config, log: LogBuffer) -> minicurses::Result<Option<String>> {
    match config.backend {
        BackendKind::Emulator => {
            let backend = Emulator::open(COLS, ROWS, log)?;
            drive(RootWindow::with_size(backend, COLS, ROWS), &config)
        }
        BackendKind::Bordered => {
            let backend = Emulator::open(COLS, ROWS, log)?.bordered();
            drive(RootWindow::with_size(backend, COLS, ROWS), &config)
        }
        BackendKind::Minitel => {
            let device = config
                .device
                .as_ref()
                .ok_or_else(|| Error::Config("--backend minitel requires --device".into()))?;
            let backend = Minitel::open(device, config.baud)?;
            drive(RootWindow::with_size(backend, COLS, ROWS), &config)
        }
        BackendKind::Script => {
            let path = config
                .script
                .as_ref()
                .ok_or_else(|| Error::Config("--backend script requires --script".into()))?;
            let backend = ScriptedBackend::from_json(&fs::read_to_string(path)?)?;
            replay(RootWindow::with_size(backend, COLS, ROWS), &config, &log)
        }
    }
}

/// Run an interactive backend and leave the device blank
fn drive<B: Backend>(mut root: RootWindow<B>, config: &Config) -> minicurses::Result<Option<String>> {
    let form = build_demo(&mut root, config)?;
    let outcome = root.run()?;

    let backend = root.backend_mut();
    backend.clear_screen()?;
    backend.cursor_home()?;
    backend.flush()?;

    Ok(outcome.map(|_| user_name(&root, form)))
}

/// Run a script to its end and print the last frame
fn replay(
    mut root: RootWindow<ScriptedBackend>,
    config: &Config,
    log: &LogBuffer,
) -> minicurses::Result<Option<String>> {
    let form = build_demo(&mut root, config)?;
    let outcome = match root.run() {
        Ok(outcome) => outcome,
        Err(Error::ScriptExhausted) => {
            warn!("script ended before the form was closed");
            None
        }
        Err(e) => return Err(e),
    };

    let screen = root.screen();
    for row in 0..screen.rows {
        println!("{}", screen.row_text(row).trim_end());
    }
    for line in log.lines() {
        println!("{}", line);
    }

    Ok(outcome.map(|_| user_name(&root, form)))
}

/// Lay out the login screen, returning the form's child index.
///
/// Focus starts inside the form.
fn build_demo<B: Backend>(root: &mut RootWindow<B>, config: &Config) -> minicurses::Result<usize> {
    let logo = match &config.art {
        Some(path) => AsciiArt::from_file(0, 2, path)?,
        None => AsciiArt::from_text(0, 14, LOGO),
    };
    root.add_passive(logo);

    let mut form = Window::new(8, 20, 40, 10);
    form.add_passive(Label::styled(1, 2, "Sign in", Style::BOLD | Style::UNDERLINE));
    form.add_passive(Label::new(3, 3, "User:"));
    form.add_passive(Label::new(5, 3, "Password:"));
    form.add(Textbox::new(3, 14).max_width(20).with_style(Style::UNDERLINE));
    form.add(Textbox::new(5, 14).max_width(20).secret(true).with_style(Style::UNDERLINE));

    let quit = root.quit_handle();
    form.add(Button::new(7, 8, "[ Login ]").on_click(move || {
        info!("login requested");
        quit.quit(Some("login".into()));
    }));
    let quit = root.quit_handle();
    form.add(Button::new(7, 24, "[ Cancel ]").on_click(move || quit.quit(None)));
    form.set_selected(true);

    root.window_mut().set_selected(false);
    let index = root.add(form);

    root.add_passive(
        MultilineLabel::new(20, 2, 76, 3)
            .with_text(HELP)
            .with_gravity(Gravity::Down),
    );
    root.add_passive(Label::styled(23, 2, "minicurses demo", Style::INVERTED));

    info!("demo ready on {:?}", config.backend);
    Ok(index)
}

fn user_name<B: Backend>(root: &RootWindow<B>, form: usize) -> String {
    root.window()
        .child(form)
        .and_then(Widget::as_window)
        .and_then(|form| form.child(USER_FIELD))
        .and_then(Widget::as_textbox)
        .map(|field| field.text().to_string())
        .unwrap_or_default()
}
