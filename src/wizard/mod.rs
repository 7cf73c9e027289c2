mod boundary;
pub mod switcher;

pub use boundary::ErrorBoundary;
pub use switcher::{
    ConfigureStepProps, SelectStepProps, StepIntent, StepProps, StepView, SwitcherProps,
    VerifyStepProps, render_step,
};

use crate::loaders::{Action, Bucket, BucketSelection, DataLoaderType, Substep, WizardStore};
use tracing::{debug, info, warn};

pub const WIZARD_TITLE: &str = "Create a Telegraf Config";

/// Called when the user finishes or leaves the wizard
pub type CompletionCallback = Box<dyn FnMut()>;

/// Inputs supplied by the host page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WizardProps {
    pub visible: bool,
    /// Explicit bucket to write into; wins over `buckets`
    pub bucket: Option<Bucket>,
    pub buckets: Vec<Bucket>,
    pub starting_type: Option<DataLoaderType>,
    pub starting_step: Option<usize>,
    pub starting_substep: Option<Substep>,
}

/// Lifecycle of one wizard session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardPhase {
    Closed,
    Initializing,
    Active,
    Closing,
}

/// Container for the collectors wizard.
///
/// Seeds shared state when the wizard opens, turns step-view intents into store
/// actions, and resets everything wizard-scoped on dismissal.
pub struct CollectorsWizard<S: WizardStore> {
    store: S,
    props: WizardProps,
    phase: WizardPhase,
    on_complete_setup: CompletionCallback,
}

impl<S: WizardStore> CollectorsWizard<S> {
    /// Create the container and run the first seeding pass
    pub fn mount(store: S, props: WizardProps, on_complete_setup: CompletionCallback) -> Self {
        let mut wizard = Self {
            store,
            props,
            phase: WizardPhase::Closed,
            on_complete_setup,
        };
        if wizard.props.visible {
            wizard.open();
        } else {
            wizard.seed();
        }
        wizard
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn props(&self) -> &WizardProps {
        &self.props
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    pub fn is_visible(&self) -> bool {
        self.props.visible
    }

    /// Replace the host props. Seeding only runs on a hidden-to-visible edge.
    pub fn update_props(&mut self, props: WizardProps) {
        let became_visible = !self.props.visible && props.visible;
        let became_hidden = self.props.visible && !props.visible;
        self.props = props;

        if became_visible {
            self.open();
        } else if became_hidden {
            self.phase = WizardPhase::Closed;
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        let props = WizardProps {
            visible,
            ..self.props.clone()
        };
        self.update_props(props);
    }

    fn open(&mut self) {
        self.phase = WizardPhase::Initializing;
        self.seed();
        self.phase = WizardPhase::Active;
        info!(step = self.current_step(), "Collectors wizard opened");
    }

    fn seed(&mut self) {
        self.seed_bucket_info();
        self.seed_starting_values();
    }

    fn seed_bucket_info(&mut self) {
        let bucket = self.props.bucket.as_ref().or(self.props.buckets.first());
        if let Some(b) = bucket {
            let selection = BucketSelection::from(b);
            debug!(bucket = %selection.bucket, org = %selection.org, "Seeding bucket selection");
            self.store.dispatch(Action::SetBucketInfo(selection));
        }
    }

    fn seed_starting_values(&mut self) {
        if let Some(t) = self.props.starting_type {
            self.store.dispatch(Action::SetDataLoadersType(t));
        }

        match (self.props.starting_step, self.props.starting_substep) {
            (step, Some(substep)) => {
                self.store
                    .dispatch(Action::SetSubstepIndex(step.unwrap_or(0), substep));
            }
            (Some(step), None) => self.store.dispatch(Action::SetCurrentStepIndex(step)),
            (None, None) => {}
        }
    }

    /// Close the wizard: report completion, then reset loader and step state.
    /// Does nothing once closed; the next open needs a hidden-to-visible edge.
    pub fn dismiss(&mut self) {
        if self.phase == WizardPhase::Closed {
            debug!("Dismiss ignored, wizard already closed");
            return;
        }
        self.phase = WizardPhase::Closing;
        (self.on_complete_setup)();
        self.store.dispatch(Action::ClearDataLoaders);
        self.store.dispatch(Action::ClearSteps);
        self.props.visible = false;
        self.phase = WizardPhase::Closed;
        info!("Collectors wizard dismissed");
    }

    pub fn current_step(&self) -> usize {
        self.store.state().data_loading.steps.current_step
    }

    pub fn set_current_step(&mut self, step: usize) {
        self.store.dispatch(Action::SetCurrentStepIndex(step));
    }

    pub fn increment_step(&mut self) {
        self.store.dispatch(Action::IncrementCurrentStepIndex);
    }

    pub fn decrement_step(&mut self) {
        self.store.dispatch(Action::DecrementCurrentStepIndex);
    }

    pub fn set_substep(&mut self, step: usize, substep: Substep) {
        self.store.dispatch(Action::SetSubstepIndex(step, substep));
    }

    /// Props handed to every step view
    pub fn step_props(&self) -> StepProps {
        let state = self.store.state();
        StepProps {
            links: state.links.clone(),
            current_step_index: state.data_loading.steps.current_step,
            substep: state.data_loading.steps.substep,
        }
    }

    /// Current step view
    pub fn view(&self) -> StepView<'_> {
        let state = self.store.state();
        let steps = &state.data_loading.steps;
        let selection = steps.selection.as_ref();

        let bucket_name = match &self.props.bucket {
            Some(b) => b.name.as_str(),
            None => selection.map(|s| s.bucket.as_str()).unwrap_or(""),
        };
        let org = match &self.props.bucket {
            Some(b) => b.organization.as_str(),
            None => selection.map(|s| s.org.as_str()).unwrap_or(""),
        };

        let props = SwitcherProps {
            step_props: self.step_props(),
            buckets: &self.props.buckets,
            bucket_name,
            org,
            username: &state.me.name,
            selected_bucket: steps.selected_bucket_id(),
            data_loaders: &state.data_loading.data_loaders,
        };

        render_step(steps.current_step, &props)
    }

    /// Run one intent from the current step view. Returns false when the wizard
    /// is not active or the view does not carry a handler for it.
    pub fn handle_intent(&mut self, intent: StepIntent) -> bool {
        if self.phase != WizardPhase::Active {
            warn!(?intent, phase = ?self.phase, "Intent sent to inactive wizard");
            return false;
        }
        if !self.view().accepts(&intent) {
            warn!(?intent, step = self.current_step(), "Intent not handled by current step");
            return false;
        }

        match intent {
            StepIntent::Dispatch(action) => self.store.dispatch(action),
            StepIntent::CompleteSetup => (self.on_complete_setup)(),
            StepIntent::Exit => self.dismiss(),
        }
        true
    }
}
