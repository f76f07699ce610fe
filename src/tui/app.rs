//! 单文件编辑器宿主：按键 -> 编辑 / 片段流程，效果在这里执行。

use super::crossterm::Key;
use crate::kernel::services::adapters::{open_catalog, AppMessage, AsyncRuntime};
use crate::kernel::services::ports::{ConfigError, Settings, SnippetCatalog};
use crate::kernel::{
    insert_snippet, next_placeholder, FlowAction, FlowEffect, FlowState, SnippetFlow,
    SnippetInsert,
};
use crate::models::TextBuffer;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;

pub type CatalogOpener =
    Box<dyn Fn(&Settings) -> Result<Arc<dyn SnippetCatalog>, ConfigError> + Send>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    Consumed,
    Ignored,
    Quit,
}

impl EventResult {
    pub fn is_consumed(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }

    pub fn is_quit(&self) -> bool {
        matches!(self, EventResult::Quit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    Query { value: String },
    Picker {
        title: &'static str,
        labels: Vec<String>,
        selected: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBox {
    pub text: String,
    pub is_error: bool,
}

/// Snippet whose placeholders are currently being filled.
#[derive(Debug, Clone)]
struct ActiveSnippet {
    insert: SnippetInsert,
    token: Option<String>,
}

pub struct App {
    path: PathBuf,
    buffer: TextBuffer,
    settings: Settings,
    open_catalog: CatalogOpener,
    flow: SnippetFlow,
    catalog: Option<Arc<dyn SnippetCatalog>>,
    runtime: AsyncRuntime,
    rx: Receiver<AppMessage>,
    overlay: Option<Overlay>,
    message: Option<MessageBox>,
    active: Option<ActiveSnippet>,
    status: String,
    dirty: bool,
    scroll: usize,
}

impl App {
    pub fn new(path: PathBuf, buffer: TextBuffer, settings: Settings) -> io::Result<Self> {
        Self::with_opener(path, buffer, settings, Box::new(open_catalog))
    }

    pub fn with_opener(
        path: PathBuf,
        buffer: TextBuffer,
        settings: Settings,
        open_catalog: CatalogOpener,
    ) -> io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        let runtime = AsyncRuntime::new(tx)?;
        Ok(Self {
            path,
            buffer,
            settings,
            open_catalog,
            flow: SnippetFlow::new(),
            catalog: None,
            runtime,
            rx,
            overlay: None,
            message: None,
            active: None,
            status: String::new(),
            dirty: false,
            scroll: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut TextBuffer {
        &mut self.buffer
    }

    pub fn flow_state(&self) -> &FlowState {
        self.flow.state()
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn message(&self) -> Option<&MessageBox> {
        self.message.as_ref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Keeps the cursor row inside a viewport of `height` rows.
    pub fn scroll_to_cursor(&mut self, height: usize) {
        let row = self.buffer.cursor().0;
        let height = height.max(1);
        if row < self.scroll {
            self.scroll = row;
        } else if row >= self.scroll + height {
            self.scroll = row + 1 - height;
        }
    }

    /// Shows a message box, e.g. a settings problem found at startup.
    pub fn show_message(&mut self, text: impl Into<String>, is_error: bool) {
        self.message = Some(MessageBox {
            text: text.into(),
            is_error,
        });
    }

    pub fn handle_key(&mut self, key: Key) -> EventResult {
        if key == Key::Ctrl('q') {
            return EventResult::Quit;
        }

        if self.message.is_some() {
            return match key {
                Key::Enter | Key::Esc => {
                    self.message = None;
                    EventResult::Consumed
                }
                _ => EventResult::Ignored,
            };
        }

        if self.flow.state().is_loading() {
            // 请求中只接受取消
            if key == Key::Esc {
                self.dispatch(FlowAction::Cancel);
                return EventResult::Consumed;
            }
            return EventResult::Ignored;
        }

        match self.overlay.take() {
            Some(Overlay::Query { value }) => self.handle_query_key(key, value),
            Some(Overlay::Picker {
                title,
                labels,
                selected,
            }) => self.handle_picker_key(key, title, labels, selected),
            None => self.handle_editor_key(key),
        }
    }

    fn handle_query_key(&mut self, key: Key, mut value: String) -> EventResult {
        match key {
            Key::Enter => {
                self.dispatch(FlowAction::SubmitQuery(value));
            }
            Key::Esc => {
                self.dispatch(FlowAction::Cancel);
            }
            Key::Char(ch) => {
                value.push(ch);
                self.overlay = Some(Overlay::Query { value });
            }
            Key::Backspace => {
                value.pop();
                self.overlay = Some(Overlay::Query { value });
            }
            _ => {
                self.overlay = Some(Overlay::Query { value });
                return EventResult::Ignored;
            }
        }
        EventResult::Consumed
    }

    fn handle_picker_key(
        &mut self,
        key: Key,
        title: &'static str,
        labels: Vec<String>,
        selected: usize,
    ) -> EventResult {
        let last = labels.len().saturating_sub(1);
        let selected = match key {
            Key::Enter => {
                self.dispatch(FlowAction::Choose(selected));
                return EventResult::Consumed;
            }
            Key::Esc => {
                self.dispatch(FlowAction::from_pick_index(-1));
                return EventResult::Consumed;
            }
            Key::Up => selected.saturating_sub(1),
            Key::Down => (selected + 1).min(last),
            Key::Home => 0,
            Key::End => last,
            _ => selected,
        };
        self.overlay = Some(Overlay::Picker {
            title,
            labels,
            selected,
        });
        EventResult::Consumed
    }

    fn handle_editor_key(&mut self, key: Key) -> EventResult {
        match key {
            Key::Ctrl('k') => self.run_snippet_command(),
            Key::Ctrl('s') => {
                if let Err(e) = self.save() {
                    tracing::error!(path = %self.path.display(), error = %e, "save failed");
                    self.show_message(format!("Could not save {}: {e}", self.path.display()), true);
                }
            }
            Key::Ctrl('d') => self.fill_default(),
            Key::Tab => self.select_next_placeholder(),
            Key::Esc => {
                self.buffer.clear_selections();
                self.active = None;
            }
            Key::Char(ch) => self.type_text(&ch.to_string()),
            Key::Enter => self.type_text("\n"),
            Key::Backspace => {
                self.buffer.delete_backward();
                self.dirty = true;
            }
            Key::Left => self.buffer.move_left(),
            Key::Right => self.buffer.move_right(),
            Key::Up => self.buffer.move_up(),
            Key::Down => self.buffer.move_down(),
            Key::Home => self.buffer.move_line_start(),
            Key::End => self.buffer.move_line_end(),
            Key::Ctrl(_) => return EventResult::Ignored,
        }
        EventResult::Consumed
    }

    /// Ctrl+K: builds a catalog client for this invocation and starts the flow.
    pub fn run_snippet_command(&mut self) {
        if !self.flow.state().is_resting() {
            return;
        }
        match (self.open_catalog)(&self.settings) {
            Ok(catalog) => {
                tracing::info!(backend = catalog.name(), "snippet command started");
                self.catalog = Some(catalog);
                self.dispatch(FlowAction::Start);
            }
            Err(e) => {
                tracing::warn!(error = %e, "snippet command not configured");
                self.show_message(e.to_string(), true);
            }
        }
    }

    /// Drains worker replies. Returns true when something changed on screen.
    pub fn tick(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.rx.try_recv() {
                Ok(AppMessage::Fetched { request_id, result }) => {
                    changed |= self.dispatch(FlowAction::Fetched { request_id, result });
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::error!("runtime channel closed");
                    break;
                }
            }
        }
        changed
    }

    fn dispatch(&mut self, action: FlowAction) -> bool {
        let result = self.flow.dispatch(action);
        for effect in result.effects {
            self.apply(effect);
        }

        match self.flow.state() {
            FlowState::Loading(_) => self.status = "Searching…".to_string(),
            state if state.is_resting() => {
                self.catalog = None;
                if self.status == "Searching…" {
                    self.status.clear();
                }
            }
            _ => self.status.clear(),
        }
        result.state_changed
    }

    fn apply(&mut self, effect: FlowEffect) {
        match effect {
            FlowEffect::PromptQuery => {
                self.overlay = Some(Overlay::Query {
                    value: String::new(),
                })
            }
            FlowEffect::ShowPicker { title, labels } => {
                self.overlay = Some(Overlay::Picker {
                    title,
                    labels,
                    selected: 0,
                })
            }
            FlowEffect::Fetch {
                request_id,
                request,
            } => match &self.catalog {
                Some(catalog) => {
                    tracing::debug!(request_id, ?request, "fetch scheduled");
                    self.runtime.fetch(catalog.clone(), request_id, request);
                }
                None => tracing::error!(request_id, "fetch without a catalog"),
            },
            FlowEffect::Message(text) => self.show_message(text, false),
            FlowEffect::Error(text) => self.show_message(text, true),
            FlowEffect::Insert(insert) => {
                let selected = insert_snippet(&mut self.buffer, &insert);
                self.dirty = true;
                self.status = match selected.name() {
                    Some(name) => format!("Inserted snippet, filling {{{{{name}}}}}"),
                    None => "Inserted snippet".to_string(),
                };
                self.active = Some(ActiveSnippet {
                    insert,
                    token: selected.token,
                });
            }
        }
    }

    fn type_text(&mut self, text: &str) {
        self.buffer.replace_selections(text);
        self.dirty = true;
    }

    /// Tab: moves the multi-selection to the next distinct placeholder.
    fn select_next_placeholder(&mut self) {
        let current = self.active.as_ref().and_then(|a| a.token.clone());
        let after = self.buffer.cursor_char_offset();
        let selected = next_placeholder(&mut self.buffer, after, current.as_deref());

        if selected.is_empty() {
            self.status = "No more placeholders".to_string();
            return;
        }
        self.status = format!("Filling {{{{{}}}}}", selected.name().unwrap_or_default());
        if let Some(active) = self.active.as_mut() {
            active.token = selected.token;
        }
    }

    /// Ctrl+D: types the declared default of the selected placeholder.
    fn fill_default(&mut self) {
        let Some(active) = self.active.as_ref() else {
            return;
        };
        if !self.buffer.has_selection() {
            return;
        }
        let default = active
            .token
            .as_deref()
            .map(crate::kernel::placeholder::placeholder_name)
            .and_then(|name| active.insert.default_for(name))
            .map(str::to_string);

        match default {
            Some(default) => self.type_text(&default),
            None => self.status = "No default for this placeholder".to_string(),
        }
    }

    pub fn save(&mut self) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = io::BufWriter::new(std::fs::File::create(&self.path)?);
        self.buffer.write_to(&mut file)?;
        io::Write::flush(&mut file)?;

        self.dirty = false;
        self.status = format!("Saved {}", self.path.display());
        tracing::info!(path = %self.path.display(), "file saved");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tui/app.rs"]
mod tests;
