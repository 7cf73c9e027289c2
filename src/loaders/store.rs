use chrono::{DateTime, Local};
use tracing::debug;

use super::bundles::BundleName;
use super::state::{DataLoadersState, PluginConfig};
use super::steps::StepsState;
use super::types::{BucketSelection, DataLoaderType, Links, Notification, Substep};

/// Every mutation the wizard can make to shared state
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetBucketInfo(BucketSelection),
    SetDataLoadersType(DataLoaderType),
    AddPluginBundle(BundleName),
    RemovePluginBundle(BundleName),
    UpdateTelegrafPluginConfig { plugin: String, field: String, value: String },
    AddConfigValue { plugin: String, field: String, value: String },
    RemoveConfigValue { plugin: String, field: String, value: String },
    SetConfigArrayValue { plugin: String, field: String, value: String, index: usize },
    SetActiveTelegrafPlugin(String),
    SetPluginConfiguration { plugin: String, config: PluginConfig },
    IncrementCurrentStepIndex,
    DecrementCurrentStepIndex,
    SetCurrentStepIndex(usize),
    SetSubstepIndex(usize, Substep),
    ClearDataLoaders,
    ClearSteps,
    Notify(Notification),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DataLoadingState {
    pub data_loaders: DataLoadersState,
    pub steps: StepsState,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Me {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct PostedNotification {
    pub notification: Notification,
    pub at: DateTime<Local>,
}

/// Process-wide state shared by the host and the wizard
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub links: Links,
    pub data_loading: DataLoadingState,
    pub me: Me,
    pub notifications: Vec<PostedNotification>,
}

impl AppState {
    pub fn latest_notification(&self) -> Option<&PostedNotification> {
        self.notifications.last()
    }
}

/// Read access to shared state plus the command channel that mutates it.
/// Injected into the wizard container at construction.
pub trait WizardStore {
    fn state(&self) -> &AppState;
    fn dispatch(&mut self, action: Action);
}

/// In-process store that applies actions synchronously
#[derive(Debug, Default)]
pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(links: Links, username: impl Into<String>) -> Self {
        Self {
            state: AppState {
                links,
                me: Me { name: username.into() },
                ..AppState::default()
            },
        }
    }

    pub fn dismiss_notification(&mut self) {
        self.state.notifications.pop();
    }
}

impl WizardStore for Store {
    fn state(&self) -> &AppState {
        &self.state
    }

    fn dispatch(&mut self, action: Action) {
        debug!(?action, "dispatch");
        apply(&mut self.state, action);
    }
}

/// Reduce one action into state
pub fn apply(state: &mut AppState, action: Action) {
    let loaders = &mut state.data_loading.data_loaders;
    let steps = &mut state.data_loading.steps;

    match action {
        Action::SetBucketInfo(selection) => steps.set_bucket_info(selection),
        Action::SetDataLoadersType(t) => loaders.set_loader_type(t),
        Action::AddPluginBundle(b) => loaders.add_plugin_bundle(b),
        Action::RemovePluginBundle(b) => loaders.remove_plugin_bundle(b),
        Action::UpdateTelegrafPluginConfig { plugin, field, value } => {
            loaders.update_plugin_config(&plugin, &field, &value)
        }
        Action::AddConfigValue { plugin, field, value } => {
            loaders.add_config_value(&plugin, &field, &value)
        }
        Action::RemoveConfigValue { plugin, field, value } => {
            loaders.remove_config_value(&plugin, &field, &value)
        }
        Action::SetConfigArrayValue { plugin, field, value, index } => {
            loaders.set_config_array_value(&plugin, &field, &value, index)
        }
        Action::SetActiveTelegrafPlugin(plugin) => loaders.set_active_plugin(&plugin),
        Action::SetPluginConfiguration { plugin, config } => {
            loaders.set_plugin_configuration(&plugin, config)
        }
        Action::IncrementCurrentStepIndex => steps.increment(),
        Action::DecrementCurrentStepIndex => steps.decrement(),
        Action::SetCurrentStepIndex(i) => steps.set_current_step(i),
        Action::SetSubstepIndex(step, substep) => steps.set_substep(step, substep),
        Action::ClearDataLoaders => loaders.clear(),
        Action::ClearSteps => steps.clear(),
        Action::Notify(notification) => state.notifications.push(PostedNotification {
            notification,
            at: Local::now(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_starts_with_user_and_links() {
        let store = Store::new(Links::default(), "ada");
        assert_eq!(store.state().me.name, "ada");
        assert_eq!(store.state().links.telegrafs, "/api/v2/telegrafs");
        assert_eq!(store.state().data_loading, DataLoadingState::default());
    }

    #[test]
    fn step_actions() {
        let mut store = Store::default();
        store.dispatch(Action::IncrementCurrentStepIndex);
        store.dispatch(Action::IncrementCurrentStepIndex);
        store.dispatch(Action::DecrementCurrentStepIndex);
        assert_eq!(store.state().data_loading.steps.current_step, 1);

        store.dispatch(Action::SetSubstepIndex(2, Substep::Streaming));
        assert_eq!(store.state().data_loading.steps.current_step, 2);
        assert_eq!(store.state().data_loading.steps.substep, Some(Substep::Streaming));

        store.dispatch(Action::ClearSteps);
        assert_eq!(store.state().data_loading.steps, StepsState::default());
    }

    #[test]
    fn notifications_stack() {
        let mut store = Store::default();
        store.dispatch(Action::Notify(Notification::info("first")));
        store.dispatch(Action::Notify(Notification::error("second")));
        assert_eq!(
            store.state().latest_notification().map(|n| n.notification.message.as_str()),
            Some("second")
        );
        store.dismiss_notification();
        assert_eq!(store.state().notifications.len(), 1);
    }

    #[test]
    fn clear_data_loaders_keeps_steps() {
        let mut store = Store::default();
        store.dispatch(Action::AddPluginBundle(BundleName::Docker));
        store.dispatch(Action::SetCurrentStepIndex(1));
        store.dispatch(Action::ClearDataLoaders);
        assert!(store.state().data_loading.data_loaders.telegraf_plugins.is_empty());
        assert_eq!(store.state().data_loading.steps.current_step, 1);
    }
}
