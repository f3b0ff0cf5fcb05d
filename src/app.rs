//! Application State
//!
//! Wires the detail controller to the terminal: key dispatch, edit buffers,
//! store-completion plumbing, status messages, and the delete confirm flow.

mod clipboard;

use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;
use tokio::sync::mpsc::UnboundedSender;

use crate::detail::{DetailController, StoreEvent, SubmitOutcome};
use crate::input::{self, Action, EditBuffers};
use crate::store::{CredentialRecord, SqliteStore, StoreConfig};
use crate::ui::{ConfirmDialog, DetailScreen, HelpBar, MessageType, StatusLine};

pub struct AppConfig {
    pub db_path: PathBuf,
    pub clipboard_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: StoreConfig::default().path,
            clipboard_timeout: Duration::from_secs(15),
        }
    }
}

pub struct App {
    pub config: AppConfig,
    store: Rc<SqliteStore>,
    controller: DetailController<SqliteStore>,
    buffers: EditBuffers,
    events_tx: UnboundedSender<StoreEvent>,
    message: Option<(String, MessageType, Instant)>,
    confirming_delete: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        config: AppConfig,
        store: Rc<SqliteStore>,
        record: CredentialRecord,
        events_tx: UnboundedSender<StoreEvent>,
    ) -> Self {
        let controller = DetailController::new(Rc::clone(&store), record);
        Self {
            config,
            store,
            controller,
            buffers: EditBuffers::default(),
            events_tx,
            message: None,
            confirming_delete: false,
            should_quit: false,
        }
    }

    /// The screen just became visible: kick off the usage-metadata fetch.
    ///
    /// Must run inside a `LocalSet`; the completion comes back through the
    /// events channel and is applied by the run loop.
    pub fn activate(&self) {
        let fut = self.controller.activate();
        let tx = self.events_tx.clone();
        tokio::task::spawn_local(async move {
            // Screen may be gone by the time this lands; nobody listening is fine
            let _ = tx.send(fut.await);
        });
    }

    /// Fold a store completion into controller state.
    pub fn apply_store_event(&mut self, event: StoreEvent) {
        self.controller.apply_store_event(event);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let action = if self.confirming_delete {
            input::confirm_action(key)
        } else if self.controller.mode().is_editing() {
            input::editing_action(key)
        } else {
            input::viewing_action(key)
        };
        self.dispatch(action);
    }

    fn dispatch(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Quit => self.should_quit = true,
            Action::BeginEdit => self.begin_edit(),
            Action::CopyUsername => self.copy_username(),
            Action::CopyPassword => self.copy_password(),
            Action::RequestDelete => self.confirming_delete = true,
            Action::Refresh => self.activate(),
            Action::InsertChar(c) => self.with_focused(|b| b.insert_char(c)),
            Action::Backspace => self.with_focused(|b| b.delete_char()),
            Action::DeleteForward => self.with_focused(|b| b.delete_char_forward()),
            Action::CursorLeft => self.with_focused(|b| b.cursor_left()),
            Action::CursorRight => self.with_focused(|b| b.cursor_right()),
            Action::CursorHome => self.with_focused(|b| b.cursor_home()),
            Action::CursorEnd => self.with_focused(|b| b.cursor_end()),
            Action::SubmitField => self.submit_field(),
            Action::EndEdit => self.commit(),
            Action::ConfirmYes => self.delete_record(),
            Action::ConfirmNo => self.confirming_delete = false,
        }
    }

    fn begin_edit(&mut self) {
        self.buffers = EditBuffers::from_record(self.controller.record());
        self.controller.begin_edit();
    }

    fn with_focused(&mut self, f: impl FnOnce(&mut input::FieldBuffer)) {
        if let Some(field) = self.controller.focus() {
            f(self.buffers.get_mut(field));
        }
    }

    fn submit_field(&mut self) {
        let Some(field) = self.controller.focus() else {
            return;
        };
        // Focus leaving the last field is the commit trigger
        if self.controller.handle_submit(field) == SubmitOutcome::Released {
            self.commit();
        }
    }

    fn commit(&mut self) {
        let (username, password, hostname) = self.buffers.take_captures();
        let (_, fut) = self.controller.commit_edit(username, password, hostname);
        let tx = self.events_tx.clone();
        tokio::task::spawn_local(async move {
            if let Some(event) = fut.await {
                let _ = tx.send(event);
            }
        });
    }

    fn copy_username(&mut self) {
        let username = self.controller.record().username.clone();
        clipboard::copy_with_timeout(&username, self.config.clipboard_timeout);
        let secs = self.config.clipboard_timeout.as_secs();
        self.set_message(&format!("Username copied ({}s)", secs), MessageType::Success);
    }

    fn copy_password(&mut self) {
        let password = self.controller.record().password.clone();
        clipboard::copy_with_timeout(&password, self.config.clipboard_timeout);
        let secs = self.config.clipboard_timeout.as_secs();
        self.set_message(&format!("Password copied ({}s)", secs), MessageType::Success);
    }

    fn delete_record(&mut self) {
        self.confirming_delete = false;
        match self.store.delete_record(&self.controller.record().id) {
            Ok(()) => self.should_quit = true,
            Err(e) => self.set_message(&format!("Delete failed: {}", e), MessageType::Error),
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        self.check_message_expiry();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(frame.area());

        let rows = self.controller.rows();
        let mut screen = DetailScreen::new(&rows).usage(self.controller.usage());
        if self.controller.mode().is_editing() {
            screen = screen.buffers(&self.buffers);
        }
        frame.render_widget(screen, chunks[0]);

        let mut status = StatusLine::new(self.controller.mode())
            .hostname(&self.controller.record().hostname);
        if let Some((msg, msg_type, _)) = &self.message {
            status = status.message(msg, *msg_type);
        }
        frame.render_widget(status, chunks[1]);
        frame.render_widget(
            HelpBar::new(self.controller.mode(), self.confirming_delete),
            chunks[2],
        );

        if self.confirming_delete {
            frame.render_widget(
                ConfirmDialog::new(" Confirm ", "Delete this login?"),
                frame.area(),
            );
        }
    }

    fn check_message_expiry(&mut self) {
        let expired = self
            .message
            .as_ref()
            .is_some_and(|(_, _, time)| time.elapsed() > Duration::from_secs(5));

        if expired {
            self.message = None;
        }
    }

    pub fn set_message(&mut self, msg: &str, msg_type: MessageType) {
        self.message = Some((msg.to_string(), msg_type, Instant::now()));
    }
}
