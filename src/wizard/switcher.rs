//! Picks the view for the current wizard step.
//!
//! Each step gets its own view-model struct holding exactly the fields that
//! view reads, and `StepView::accepts` lists the actions it may send back.

use crate::loaders::{
    Action, Bucket, BundleName, CollectorsStep, DataLoaderType, DataLoadersState, Links, Substep,
};

/// Props shared by every step view
#[derive(Debug, Clone, PartialEq)]
pub struct StepProps {
    pub links: Links,
    pub current_step_index: usize,
    pub substep: Option<Substep>,
}

/// Something a step view asks the container to do
#[derive(Debug, Clone, PartialEq)]
pub enum StepIntent {
    Dispatch(Action),
    /// Report setup as finished without closing
    CompleteSetup,
    /// Leave the wizard (runs the dismissal sequence)
    Exit,
}

/// Everything the switcher may hand down to a step view
#[derive(Debug, Clone)]
pub struct SwitcherProps<'a> {
    pub step_props: StepProps,
    pub buckets: &'a [Bucket],
    pub bucket_name: &'a str,
    pub org: &'a str,
    pub username: &'a str,
    pub selected_bucket: &'a str,
    pub data_loaders: &'a DataLoadersState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectStepProps<'a> {
    pub step: StepProps,
    pub buckets: &'a [Bucket],
    pub loader_type: DataLoaderType,
    pub plugin_bundles: &'a [BundleName],
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigureStepProps<'a> {
    pub step: StepProps,
    pub data_loaders: &'a DataLoadersState,
    pub buckets: &'a [Bucket],
    pub bucket: &'a str,
    pub org: &'a str,
    pub username: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VerifyStepProps<'a> {
    pub step: StepProps,
    pub data_loaders: &'a DataLoadersState,
    pub bucket: &'a str,
    pub selected_bucket: &'a str,
    pub org: &'a str,
    pub username: &'a str,
    pub step_index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepView<'a> {
    Select(SelectStepProps<'a>),
    Configure(ConfigureStepProps<'a>),
    Verify(VerifyStepProps<'a>),
    Empty,
}

/// Render dispatch for the collectors wizard. Pure.
pub fn render_step<'a>(current_step_index: usize, props: &SwitcherProps<'a>) -> StepView<'a> {
    match CollectorsStep::from_index(current_step_index) {
        Some(CollectorsStep::Select) => StepView::Select(SelectStepProps {
            step: props.step_props.clone(),
            buckets: props.buckets,
            loader_type: props.data_loaders.loader_type,
            plugin_bundles: &props.data_loaders.plugin_bundles,
        }),
        Some(CollectorsStep::Configure) => StepView::Configure(ConfigureStepProps {
            step: props.step_props.clone(),
            data_loaders: props.data_loaders,
            buckets: props.buckets,
            bucket: props.bucket_name,
            org: props.org,
            username: props.username,
        }),
        Some(CollectorsStep::Verify) => StepView::Verify(VerifyStepProps {
            step: props.step_props.clone(),
            data_loaders: props.data_loaders,
            bucket: props.bucket_name,
            selected_bucket: props.selected_bucket,
            org: props.org,
            username: props.username,
            step_index: current_step_index,
        }),
        None => StepView::Empty,
    }
}

impl StepView<'_> {
    pub fn step(&self) -> Option<CollectorsStep> {
        match self {
            StepView::Select(_) => Some(CollectorsStep::Select),
            StepView::Configure(_) => Some(CollectorsStep::Configure),
            StepView::Verify(_) => Some(CollectorsStep::Verify),
            StepView::Empty => None,
        }
    }

    /// Whether this view carries the handler for `intent`
    pub fn accepts(&self, intent: &StepIntent) -> bool {
        let action = match (self, intent) {
            (StepView::Empty, _) => return false,
            (_, StepIntent::CompleteSetup | StepIntent::Exit) => return true,
            (_, StepIntent::Dispatch(action)) => action,
        };

        if is_step_action(action) {
            return true;
        }

        match self {
            StepView::Select(_) => matches!(
                action,
                Action::SetDataLoadersType(_)
                    | Action::AddPluginBundle(_)
                    | Action::RemovePluginBundle(_)
                    | Action::SetBucketInfo(_)
            ),
            StepView::Configure(_) => matches!(
                action,
                Action::UpdateTelegrafPluginConfig { .. }
                    | Action::AddConfigValue { .. }
                    | Action::RemoveConfigValue { .. }
                    | Action::SetConfigArrayValue { .. }
                    | Action::SetActiveTelegrafPlugin(_)
                    | Action::SetPluginConfiguration { .. }
            ),
            StepView::Verify(_) => matches!(
                action,
                Action::SetActiveTelegrafPlugin(_) | Action::SetPluginConfiguration { .. }
            ),
            StepView::Empty => false,
        }
    }
}

/// Navigation and notification handlers carried by every step
fn is_step_action(action: &Action) -> bool {
    matches!(
        action,
        Action::SetCurrentStepIndex(_)
            | Action::IncrementCurrentStepIndex
            | Action::DecrementCurrentStepIndex
            | Action::SetSubstepIndex(..)
            | Action::Notify(_)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::{Notification, PluginConfig};

    fn buckets() -> Vec<Bucket> {
        vec![
            Bucket {
                organization: "acme".into(),
                organization_id: "o1".into(),
                name: "metrics".into(),
                id: "b1".into(),
            },
            Bucket {
                organization: "acme".into(),
                organization_id: "o1".into(),
                name: "logs".into(),
                id: "b2".into(),
            },
        ]
    }

    fn props<'a>(buckets: &'a [Bucket], loaders: &'a DataLoadersState, step: usize) -> SwitcherProps<'a> {
        SwitcherProps {
            step_props: StepProps {
                links: Links::default(),
                current_step_index: step,
                substep: None,
            },
            buckets,
            bucket_name: "metrics",
            org: "acme",
            username: "ada",
            selected_bucket: "b1",
            data_loaders: loaders,
        }
    }

    fn config_intents() -> Vec<StepIntent> {
        vec![
            Action::UpdateTelegrafPluginConfig { plugin: "redis".into(), field: "password".into(), value: "x".into() },
            Action::AddConfigValue { plugin: "redis".into(), field: "servers".into(), value: "a".into() },
            Action::RemoveConfigValue { plugin: "redis".into(), field: "servers".into(), value: "a".into() },
            Action::SetConfigArrayValue { plugin: "redis".into(), field: "servers".into(), value: "a".into(), index: 0 },
            Action::SetActiveTelegrafPlugin("redis".into()),
            Action::SetPluginConfiguration { plugin: "redis".into(), config: PluginConfig::new() },
        ]
        .into_iter()
        .map(StepIntent::Dispatch)
        .collect()
    }

    #[test]
    fn select_gets_full_bucket_list_and_no_config_handlers() {
        let buckets = buckets();
        let loaders = DataLoadersState::default();
        let view = render_step(0, &props(&buckets, &loaders, 0));

        let StepView::Select(select) = &view else {
            panic!("expected select view, got {view:?}");
        };
        assert_eq!(select.buckets, buckets.as_slice());
        assert!(config_intents().iter().all(|i| !view.accepts(i)));
        assert!(view.accepts(&StepIntent::Dispatch(Action::AddPluginBundle(BundleName::System))));
    }

    #[test]
    fn configure_gets_loader_state_and_config_handlers() {
        let buckets = buckets();
        let mut loaders = DataLoadersState::default();
        loaders.add_plugin_bundle(BundleName::Redis);
        let view = render_step(1, &props(&buckets, &loaders, 1));

        let StepView::Configure(configure) = &view else {
            panic!("expected configure view, got {view:?}");
        };
        assert_eq!(configure.data_loaders, &loaders);
        assert_eq!(configure.bucket, "metrics");
        assert_eq!(configure.org, "acme");
        assert_eq!(configure.username, "ada");
        assert!(config_intents().iter().all(|i| view.accepts(i)));
        assert!(!view.accepts(&StepIntent::Dispatch(Action::AddPluginBundle(BundleName::Docker))));
    }

    #[test]
    fn verify_gets_selected_bucket_and_step_index() {
        let buckets = buckets();
        let loaders = DataLoadersState::default();
        let view = render_step(2, &props(&buckets, &loaders, 2));

        let StepView::Verify(verify) = &view else {
            panic!("expected verify view, got {view:?}");
        };
        assert_eq!(verify.selected_bucket, "b1");
        assert_eq!(verify.bucket, "metrics");
        assert_eq!(verify.step_index, 2);
        assert!(view.accepts(&StepIntent::Dispatch(Action::SetActiveTelegrafPlugin("cpu".into()))));
        assert!(!view.accepts(&StepIntent::Dispatch(Action::AddConfigValue {
            plugin: "cpu".into(),
            field: "x".into(),
            value: "y".into(),
        })));
    }

    #[test]
    fn out_of_range_renders_empty_and_accepts_nothing() {
        let buckets = buckets();
        let loaders = DataLoadersState::default();
        for index in [3, 4, 99, usize::MAX] {
            let view = render_step(index, &props(&buckets, &loaders, index));
            assert_eq!(view, StepView::Empty);
            assert!(!view.accepts(&StepIntent::Exit));
            assert!(!view.accepts(&StepIntent::Dispatch(Action::IncrementCurrentStepIndex)));
            assert!(!view.accepts(&StepIntent::Dispatch(Action::Notify(Notification::info("x")))));
        }
    }

    #[test]
    fn render_is_repeatable() {
        let buckets = buckets();
        let loaders = DataLoadersState::default();
        let p = props(&buckets, &loaders, 1);
        assert_eq!(render_step(1, &p), render_step(1, &p));
    }

    #[test]
    fn clear_actions_never_come_from_views() {
        let buckets = buckets();
        let loaders = DataLoadersState::default();
        for index in 0..3 {
            let view = render_step(index, &props(&buckets, &loaders, index));
            assert!(!view.accepts(&StepIntent::Dispatch(Action::ClearSteps)));
            assert!(!view.accepts(&StepIntent::Dispatch(Action::ClearDataLoaders)));
        }
    }
}
