//! Vaultview - Login Detail Screen
//!
//! Terminal viewer and in-place editor for a single stored login record.
//!
//! Usage:
//!   vaultview [--db <path>] <hostname|id>
//!   vaultview [--db <path>] add <hostname> <username> <password>

use std::io;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{bail, Context};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver};

mod app;
mod detail;
mod input;
mod store;
mod ui;

use app::{App, AppConfig};
use detail::StoreEvent;
use store::{CredentialRecord, RecordId, SqliteStore};

fn main() -> anyhow::Result<()> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let mut config = AppConfig::default();
    if let Some(pos) = args.iter().position(|a| a == "--db") {
        if pos + 1 >= args.len() {
            bail!("--db requires a path");
        }
        config.db_path = args.remove(pos + 1).into();
        args.remove(pos);
    }

    let store = SqliteStore::open_path(&config.db_path)
        .with_context(|| format!("opening store at {}", config.db_path.display()))?;

    match args.first().map(String::as_str) {
        Some("add") => {
            let [_, hostname, username, password] = args.as_slice() else {
                bail!("usage: vaultview add <hostname> <username> <password>");
            };
            let record = CredentialRecord::new(
                hostname.as_str(),
                username.as_str(),
                password.as_str(),
            );
            store.insert_record(&record)?;
            println!("Added {} ({})", record.hostname, record.id);
            Ok(())
        }
        Some(query) => {
            let record = lookup_record(&store, query)?;
            // Opening the screen counts as a use
            store.touch(&record.id)?;
            run_tui(config, store, record)
        }
        None => bail!("usage: vaultview [--db <path>] <hostname|id>"),
    }
}

fn lookup_record(store: &SqliteStore, query: &str) -> anyhow::Result<CredentialRecord> {
    if let Some(record) = store.find_by_hostname(query)? {
        return Ok(record);
    }
    if let Some(record) = store.get_by_id(&RecordId::from(query))? {
        return Ok(record);
    }

    bail!("no login found for '{}'", query)
}

fn run_tui(config: AppConfig, store: SqliteStore, record: CredentialRecord) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let mut app = App::new(config, Rc::new(store), record, events_tx);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let local = tokio::task::LocalSet::new();
    let result = local.block_on(&rt, run_app(&mut terminal, &mut app, events_rx));

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    mut events_rx: UnboundedReceiver<StoreEvent>,
) -> anyhow::Result<()> {
    app.activate();

    loop {
        terminal.draw(|frame| app.render(frame))?;

        // Store completions apply in arrival order; the latest wins
        while let Ok(event) = events_rx.try_recv() {
            app.apply_store_event(event);
        }

        if app.should_quit {
            return Ok(());
        }

        if event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        } else {
            // Yield so spawned store futures make progress
            tokio::time::sleep(Duration::from_millis(30)).await;
        }
    }
}
