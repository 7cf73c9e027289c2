pub mod config;
mod status_bar;
pub mod ui;

pub use config::WizardConfig;
pub use status_bar::StatusBarState;

use std::cell::Cell;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{info, warn};

use crate::error::Result;
use crate::loaders::{
    Action, Bucket, BucketSelection, BundleName, CollectorsStep, ConfigValue, Notification, Store,
    TelegrafPlugin, WizardStore, bundles,
};
use crate::ui::Theme;
use crate::vim::{Command, InputBuffer, ModeAction, VimMode, parse_command};
use crate::wizard::{
    CollectorsWizard, CompletionCallback, ErrorBoundary, StepIntent, StepView, WizardProps,
};

/// Message displayed to the user
pub struct Message {
    pub text: String,
    pub is_error: bool,
}

/// How a committed edit changes the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    SetText,
    AddItem,
    ReplaceLast,
}

/// Field currently being edited in the Configure step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEdit {
    pub plugin: String,
    pub field: String,
    pub kind: EditKind,
    /// Target index for `ReplaceLast`
    pub index: usize,
}

/// Host page that embeds the collectors wizard
pub struct LoaderApp {
    pub config: WizardConfig,
    pub theme: Theme,

    pub vim_mode: VimMode,
    pub command_buffer: InputBuffer,

    pub wizard: CollectorsWizard<Store>,
    pub boundary: ErrorBoundary,
    setup_completed: Rc<Cell<bool>>,

    // Host page
    pub bucket_cursor: usize,

    // Step view cursors
    pub select_cursor: usize,
    pub field_cursor: usize,
    pub edit: Option<FieldEdit>,
    pub edit_buffer: InputBuffer,

    pub message: Option<Message>,
    pub status_bar: StatusBarState,
    pub show_help: bool,
    pub should_exit: bool,
}

impl LoaderApp {
    pub fn new(config: WizardConfig) -> Result<Self> {
        let store = Store::new(config.links.clone(), config.username());

        let setup_completed = Rc::new(Cell::new(false));
        let flag = setup_completed.clone();
        let on_complete_setup: CompletionCallback = Box::new(move || {
            info!("Data loader setup complete");
            flag.set(true);
        });

        let props = WizardProps {
            visible: false,
            bucket: config.starting_bucket().cloned(),
            buckets: config.buckets.clone(),
            starting_type: config.starting.loader_type()?,
            starting_step: config.starting.step,
            starting_substep: config.starting.substep()?,
        };

        info!("Initialized host with {} buckets", props.buckets.len());

        Ok(Self {
            config,
            theme: Theme::default(),
            vim_mode: VimMode::Normal,
            command_buffer: InputBuffer::new(),
            wizard: CollectorsWizard::mount(store, props, on_complete_setup),
            boundary: ErrorBoundary::new(),
            setup_completed,
            bucket_cursor: 0,
            select_cursor: 0,
            field_cursor: 0,
            edit: None,
            edit_buffer: InputBuffer::new(),
            message: None,
            status_bar: StatusBarState::host(),
            show_help: false,
            should_exit: false,
        })
    }

    pub fn set_error(&mut self, text: String) {
        warn!("{}", text);
        self.message = Some(Message { text, is_error: true });
    }

    pub fn set_info(&mut self, text: String) {
        self.message = Some(Message { text, is_error: false });
    }

    /// Show the wizard, optionally writing into an explicit bucket
    pub fn open_wizard(&mut self, bucket: Option<Bucket>) {
        if self.wizard.is_visible() {
            return;
        }
        let bucket = bucket.or_else(|| self.config.starting_bucket().cloned());
        let props = WizardProps {
            visible: true,
            bucket,
            ..self.wizard.props().clone()
        };
        self.wizard.update_props(props);
        self.select_cursor = 0;
        self.field_cursor = 0;
        self.cancel_edit();
    }

    /// Overlay dismissal (Esc or `:dismiss`)
    pub fn close_wizard(&mut self) {
        self.wizard.dismiss();
        self.after_dismiss();
    }

    fn after_dismiss(&mut self) {
        self.boundary.reset();
        self.cancel_edit();
        if self.setup_completed.replace(false) {
            self.set_info("Telegraf configuration setup complete".to_string());
        }
    }

    /// Send one intent through the current step view
    fn send(&mut self, intent: StepIntent) {
        if !self.wizard.is_visible() {
            self.set_error("Open the wizard first (Enter or :open)".to_string());
            return;
        }
        let is_exit = intent == StepIntent::Exit;
        if !self.wizard.handle_intent(intent) {
            self.set_error("Not available on this step".to_string());
            return;
        }
        if is_exit {
            self.after_dismiss();
        }
    }

    fn dispatch(&mut self, action: Action) {
        self.send(StepIntent::Dispatch(action));
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.message.is_some() {
            self.message = None;
        }
        if self.wizard.store().state().latest_notification().is_some() {
            self.wizard.store_mut().dismiss_notification();
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?')) {
                self.show_help = false;
            }
            self.update_status_bar();
            return;
        }

        match self.vim_mode {
            VimMode::Normal => self.handle_normal_mode(key),
            VimMode::Insert => self.handle_insert_mode(key),
            VimMode::Command => self.handle_command_mode(key),
        }

        self.update_status_bar();
    }

    fn handle_normal_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(':') => {
                self.vim_mode = self.vim_mode.transition(ModeAction::EnterCommand);
                self.command_buffer.clear();
                return;
            }
            KeyCode::Char('?') | KeyCode::F(1) => {
                self.show_help = true;
                return;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_exit = true;
                return;
            }
            _ => {}
        }

        if !self.wizard.is_visible() {
            self.handle_host_key(key);
            return;
        }

        if key.code == KeyCode::Esc {
            self.close_wizard();
            return;
        }

        if self.boundary.failure().is_some() {
            return;
        }

        let step = self.wizard.view().step();
        match key.code {
            KeyCode::Char('>') => self.next_step(),
            KeyCode::Char('<') => self.previous_step(),
            _ => match step {
                Some(CollectorsStep::Select) => self.handle_select_key(key),
                Some(CollectorsStep::Configure) => self.handle_configure_key(key),
                Some(CollectorsStep::Verify) => self.handle_verify_key(key),
                None => {}
            },
        }
    }

    fn handle_host_key(&mut self, key: KeyEvent) {
        let count = self.config.buckets.len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.bucket_cursor + 1 < count {
                    self.bucket_cursor += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.bucket_cursor = self.bucket_cursor.saturating_sub(1);
            }
            KeyCode::Enter => {
                let bucket = self.config.buckets.get(self.bucket_cursor).cloned();
                self.open_wizard(bucket);
            }
            KeyCode::Char('o') => self.open_wizard(None),
            KeyCode::Char('q') => self.should_exit = true,
            _ => {}
        }
    }

    fn next_step(&mut self) {
        let leaving_select = self.wizard.view().step() == Some(CollectorsStep::Select);
        if leaving_select && self.loaders().telegraf_plugins.is_empty() {
            self.set_error("Select at least one plugin bundle".to_string());
            return;
        }
        self.field_cursor = 0;
        self.dispatch(Action::IncrementCurrentStepIndex);
    }

    fn previous_step(&mut self) {
        self.field_cursor = 0;
        // The empty view carries no handlers; step back through the container
        if self.wizard.view().step().is_none() {
            self.wizard.decrement_step();
        } else {
            self.dispatch(Action::DecrementCurrentStepIndex);
        }
    }

    fn loaders(&self) -> &crate::loaders::DataLoadersState {
        &self.wizard.store().state().data_loading.data_loaders
    }

    /// Rows of the Select step: every bundle, then every bucket
    pub fn select_rows(&self) -> usize {
        BundleName::ALL.len() + self.wizard.props().buckets.len()
    }

    fn handle_select_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.select_cursor + 1 < self.select_rows() {
                    self.select_cursor += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.select_cursor = self.select_cursor.saturating_sub(1);
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(bundle) = BundleName::ALL.get(self.select_cursor).copied() {
                    let action = if self.loaders().plugin_bundles.contains(&bundle) {
                        Action::RemovePluginBundle(bundle)
                    } else {
                        Action::AddPluginBundle(bundle)
                    };
                    self.dispatch(action);
                } else {
                    let idx = self.select_cursor - BundleName::ALL.len();
                    if let Some(b) = self.wizard.props().buckets.get(idx) {
                        let selection = BucketSelection::from(b);
                        self.dispatch(Action::SetBucketInfo(selection));
                    }
                }
            }
            _ => {}
        }
    }

    /// Plugin shown in Configure/Verify: the active one, else the first
    pub fn focused_plugin(&self) -> Option<&TelegrafPlugin> {
        let loaders = self.loaders();
        loaders
            .active_plugin()
            .or_else(|| loaders.telegraf_plugins.first())
    }

    fn cycle_plugin(&mut self, forward: bool) {
        let loaders = self.loaders();
        let count = loaders.telegraf_plugins.len();
        if count == 0 {
            return;
        }
        let current = loaders
            .telegraf_plugins
            .iter()
            .position(|p| p.active)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % count
        } else {
            (current + count - 1) % count
        };
        let name = loaders.telegraf_plugins[next].name.clone();
        self.field_cursor = 0;
        self.dispatch(Action::SetActiveTelegrafPlugin(name));
    }

    /// Plugin name, field name and value under the Configure cursor
    fn focused_field(&self) -> Option<(String, String, ConfigValue)> {
        let plugin = self.focused_plugin()?;
        let (field, value) = plugin.config.iter().nth(self.field_cursor)?;
        Some((plugin.name.clone(), field.clone(), value.clone()))
    }

    fn handle_configure_key(&mut self, key: KeyEvent) {
        let field_count = self.focused_plugin().map(|p| p.config.len()).unwrap_or(0);

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.field_cursor + 1 < field_count {
                    self.field_cursor += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.field_cursor = self.field_cursor.saturating_sub(1);
            }
            KeyCode::Char(']') | KeyCode::Tab => self.cycle_plugin(true),
            KeyCode::Char('[') | KeyCode::BackTab => self.cycle_plugin(false),
            KeyCode::Char('i') | KeyCode::Char('a') | KeyCode::Enter => {
                if let Some((plugin, field, value)) = self.focused_field() {
                    match value {
                        ConfigValue::Text(current) => {
                            self.begin_edit(plugin, field, EditKind::SetText, 0, &current)
                        }
                        ConfigValue::List(_) => {
                            self.begin_edit(plugin, field, EditKind::AddItem, 0, "")
                        }
                    }
                }
            }
            KeyCode::Char('r') => {
                if let Some((plugin, field, ConfigValue::List(items))) = self.focused_field() {
                    if let Some(last) = items.last() {
                        let index = items.len() - 1;
                        self.begin_edit(plugin, field, EditKind::ReplaceLast, index, last);
                    }
                }
            }
            KeyCode::Char('d') => match self.focused_field() {
                Some((plugin, field, ConfigValue::List(items))) => {
                    if let Some(value) = items.last().cloned() {
                        self.dispatch(Action::RemoveConfigValue { plugin, field, value });
                    }
                }
                Some((plugin, field, ConfigValue::Text(_))) => {
                    self.dispatch(Action::UpdateTelegrafPluginConfig {
                        plugin,
                        field,
                        value: String::new(),
                    });
                }
                None => {}
            },
            KeyCode::Char('s') => {
                if let Some(plugin) = self.focused_plugin() {
                    let action = Action::SetPluginConfiguration {
                        plugin: plugin.name.clone(),
                        config: plugin.config.clone(),
                    };
                    let name = plugin.name.clone();
                    self.dispatch(action);
                    self.set_info(format!("Saved {name} configuration"));
                }
            }
            _ => {}
        }
    }

    fn handle_verify_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(']') | KeyCode::Tab => self.cycle_plugin(true),
            KeyCode::Char('[') | KeyCode::BackTab => self.cycle_plugin(false),
            KeyCode::Enter => self.send(StepIntent::Exit),
            _ => {}
        }
    }

    fn begin_edit(&mut self, plugin: String, field: String, kind: EditKind, index: usize, initial: &str) {
        self.edit_buffer = if bundles::is_secret_field(&field) {
            InputBuffer::masked()
        } else {
            InputBuffer::new()
        };
        self.edit_buffer.set(initial);
        self.edit = Some(FieldEdit { plugin, field, kind, index });
        self.vim_mode = self.vim_mode.transition(ModeAction::EnterInsert);
    }

    fn cancel_edit(&mut self) {
        self.edit = None;
        self.edit_buffer.clear();
        if self.vim_mode == VimMode::Insert {
            self.vim_mode = self.vim_mode.transition(ModeAction::Escape);
        }
    }

    fn commit_edit(&mut self) {
        let Some(edit) = self.edit.take() else {
            return;
        };
        let value = self.edit_buffer.take();
        self.vim_mode = self.vim_mode.transition(ModeAction::Escape);

        let FieldEdit { plugin, field, kind, index } = edit;
        let action = match kind {
            EditKind::SetText => Action::UpdateTelegrafPluginConfig { plugin, field, value },
            EditKind::AddItem if value.is_empty() => return,
            EditKind::AddItem => Action::AddConfigValue { plugin, field, value },
            EditKind::ReplaceLast => Action::SetConfigArrayValue { plugin, field, value, index },
        };
        self.dispatch(action);
    }

    fn handle_insert_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.cancel_edit(),
            KeyCode::Enter => self.commit_edit(),
            KeyCode::Backspace => {
                self.edit_buffer.delete_back();
            }
            KeyCode::Delete => {
                self.edit_buffer.delete_forward();
            }
            KeyCode::Left => self.edit_buffer.move_left(),
            KeyCode::Right => self.edit_buffer.move_right(),
            KeyCode::Home => self.edit_buffer.move_start(),
            KeyCode::End => self.edit_buffer.move_end(),
            KeyCode::Char(c) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    match c {
                        'u' => self.edit_buffer.clear(),
                        'a' => self.edit_buffer.move_start(),
                        'e' => self.edit_buffer.move_end(),
                        _ => {}
                    }
                } else {
                    self.edit_buffer.insert(c);
                }
            }
            _ => {}
        }
    }

    fn handle_command_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.vim_mode = self.vim_mode.transition(ModeAction::Escape);
                self.command_buffer.clear();
            }
            KeyCode::Enter => {
                let cmd = self.command_buffer.take();
                self.vim_mode = self.vim_mode.transition(ModeAction::Execute);
                match parse_command(&cmd) {
                    Ok(command) => self.execute_command(command),
                    Err(e) => self.set_error(e.to_string()),
                }
            }
            KeyCode::Backspace => {
                if self.command_buffer.is_empty() {
                    self.vim_mode = self.vim_mode.transition(ModeAction::Escape);
                } else {
                    self.command_buffer.delete_back();
                }
            }
            KeyCode::Char(c) => self.command_buffer.insert(c),
            _ => {}
        }
    }

    fn execute_command(&mut self, command: Command) {
        match command {
            Command::Open => {
                let bucket = self.config.buckets.get(self.bucket_cursor).cloned();
                self.open_wizard(bucket);
            }
            Command::Next => self.next_step(),
            Command::Back if self.wizard.is_visible() => self.previous_step(),
            Command::Back => self.set_error("Open the wizard first (Enter or :open)".to_string()),
            Command::Step(step) => {
                if self.wizard.is_visible() {
                    self.field_cursor = 0;
                    self.wizard.set_current_step(step);
                } else {
                    self.set_error("Open the wizard first (Enter or :open)".to_string());
                }
            }
            Command::LoaderType(t) => self.dispatch(Action::SetDataLoadersType(t)),
            Command::Notify(text) => self.dispatch(Action::Notify(Notification::info(text))),
            Command::Finish => self.send(StepIntent::CompleteSetup),
            Command::Dismiss => {
                if self.wizard.is_visible() {
                    self.close_wizard();
                }
            }
            Command::Help => self.show_help = true,
            Command::Quit => self.should_exit = true,
        }
    }

    pub fn update_status_bar(&mut self) {
        if self.vim_mode == VimMode::Command {
            self.status_bar = StatusBarState::command_mode();
            return;
        }
        if self.edit.is_some() {
            self.status_bar = StatusBarState::editing();
            return;
        }
        if !self.wizard.is_visible() {
            self.status_bar = StatusBarState::host();
            return;
        }
        if self.boundary.failure().is_some() {
            self.status_bar = StatusBarState::view_failed();
            return;
        }

        self.status_bar = match self.wizard.view() {
            StepView::Select(_) => StatusBarState::select_step(),
            StepView::Configure(_) => StatusBarState::configure_step(),
            StepView::Verify(_) => StatusBarState::verify_step(),
            StepView::Empty => StatusBarState::empty_step(),
        };
    }
}
