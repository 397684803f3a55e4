//! waymark: a markdown pager with a scroll-tracked "on this page" sidebar.
#![allow(clippy::multiple_crate_versions)]

use anyhow::Context;
use clap::Parser;
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use waymark::{
    app_state, chapters::ChapterList, config, formats::markdown::MarkdownFormat, input,
    navigator::Navigator, store, ui,
};

/// How long the event loop waits for input before painting another frame.
const FRAME: Duration = Duration::from_millis(16);

#[derive(Parser)]
#[command(name = "waymark")]
#[command(about = "Scroll-tracked heading sidebar for long documents", long_about = None)]
struct Args {
    /// Files or directories making up the book
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// File extensions to match
    #[arg(long, short = 'e', value_name = "EXT")]
    ext: Vec<String>,

    /// Draw the threshold line and tracker internals from the start
    #[arg(long)]
    debug_threshold: bool,

    /// Print the outline of the first document as JSON and exit
    #[arg(long)]
    dump_outline: bool,

    /// Keep session state (sidebar scroll) in this JSON file
    #[arg(long, value_name = "FILE")]
    state_file: Option<PathBuf>,
}

fn init_logging() {
    // Logs go to a file so they never draw over the TUI.
    let path = std::env::temp_dir().join("waymark.log");
    let writer = match std::fs::File::create(&path) {
        Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
        Err(_) => BoxMakeWriter::new(io::sink),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging();
    let mut cfg = config::Config::load();

    // Override config with command line args
    if !args.ext.is_empty() {
        cfg.file_extensions = args.ext;
    }
    if let Some(state_file) = args.state_file {
        cfg.state_file = state_file.display().to_string();
    }

    let documents = input::find_documents(args.paths, &cfg.file_extensions)?;
    if documents.is_empty() {
        eprintln!("No matching files found");
        return Ok(());
    }

    if args.dump_outline {
        let (_, headings) = input::load_document(&documents[0], &MarkdownFormat)?;
        let json = match Navigator::new(headings, &cfg) {
            Some(navigator) => {
                serde_json::to_string_pretty(&navigator.outline().entries(navigator.headings()))?
            }
            None => "[]".to_string(),
        };
        println!("{json}");
        return Ok(());
    }

    let mut entries = Vec::new();
    for doc in documents {
        match input::load_document(&doc, &MarkdownFormat) {
            Ok((_, headings)) => {
                let title = input::page_title(&doc, &headings);
                entries.push((doc, title));
            }
            Err(e) => tracing::warn!(path = %doc.display(), "skipping document: {e}"),
        }
    }
    if entries.is_empty() {
        eprintln!("No readable documents found");
        return Ok(());
    }

    let store: Box<dyn store::Store> = if cfg.state_file.is_empty() {
        Box::new(store::MemoryStore::default())
    } else {
        Box::new(
            store::JsonFileStore::open(&cfg.state_file)
                .with_context(|| format!("opening state file {}", cfg.state_file))?,
        )
    };

    let mut state = app_state::AppState::new(ChapterList::from_documents(entries), cfg, store);
    if args.debug_threshold {
        state.enable_threshold_debug();
    }

    run_tui(state)
}

fn run_tui(mut app: app_state::AppState) -> anyhow::Result<()> {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!("exiting after error: {e}");
    }
    result
}

fn resize<B: ratatui::backend::Backend>(
    terminal: &Terminal<B>,
    app: &mut app_state::AppState,
    now: Instant,
) -> io::Result<()> {
    let size = terminal.size()?;
    let (document_rows, sidebar_rows) = ui::pane_heights(Rect::new(0, 0, size.width, size.height));
    app.set_viewport(document_rows, sidebar_rows, now);
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut app_state::AppState,
) -> anyhow::Result<()> {
    resize(terminal, app, Instant::now())?;
    app.open_page(0, Instant::now())?;

    loop {
        let now = Instant::now();
        resize(terminal, app, now)?;
        app.frame(now);
        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(FRAME)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let now = Instant::now();
        app.message = None;
        let page = isize::try_from(app.page.viewport_rows.max(1)).unwrap_or(isize::MAX);

        match (app.focus, key.code) {
            (_, KeyCode::Char('q')) => return Ok(()),
            (_, KeyCode::Tab) => app.toggle_focus(),
            (_, KeyCode::Char('d')) => app.enable_threshold_debug(),
            (app_state::Focus::Document, KeyCode::Up | KeyCode::Char('k')) => {
                app.scroll_by(-1, now);
            }
            (app_state::Focus::Document, KeyCode::Down | KeyCode::Char('j')) => {
                app.scroll_by(1, now);
            }
            (_, KeyCode::PageUp) => app.scroll_by(-page, now),
            (_, KeyCode::PageDown) => app.scroll_by(page, now),
            (app_state::Focus::Document, KeyCode::Char('g') | KeyCode::Home) => {
                app.scroll_to(0, now);
            }
            (app_state::Focus::Document, KeyCode::Char('G') | KeyCode::End) => {
                app.scroll_to(app.page.max_scroll(), now);
            }
            (app_state::Focus::Sidebar, KeyCode::Up | KeyCode::Char('k')) => {
                app.move_selection(-1);
            }
            (app_state::Focus::Sidebar, KeyCode::Down | KeyCode::Char('j')) => {
                app.move_selection(1);
            }
            (app_state::Focus::Sidebar, KeyCode::Enter) => {
                if let Err(e) = app.follow_selection(now) {
                    app.message = Some(format!("Error opening page: {e}"));
                }
            }
            (
                app_state::Focus::Sidebar,
                KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right,
            ) => {
                app.toggle_selection();
            }
            _ => {}
        }
    }
}
