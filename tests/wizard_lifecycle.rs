use std::cell::RefCell;
use std::rc::Rc;

use dataloader_wizard::loaders::{
    Action, AppState, Bucket, BucketSelection, CollectorsStep, DataLoaderType, Links, Store, Substep, WizardStore,
};
use dataloader_wizard::wizard::{CollectorsWizard, CompletionCallback, StepIntent, WizardProps};

#[derive(Debug, Clone, PartialEq)]
enum Entry {
    Dispatched(Action),
    Completed,
}

type Log = Rc<RefCell<Vec<Entry>>>;

/// Store that records every dispatched action into a log it shares with the
/// completion callback
struct RecordingStore {
    inner: Store,
    log: Log,
}

impl WizardStore for RecordingStore {
    fn state(&self) -> &AppState {
        self.inner.state()
    }

    fn dispatch(&mut self, action: Action) {
        self.log.borrow_mut().push(Entry::Dispatched(action.clone()));
        self.inner.dispatch(action);
    }
}

fn bucket(name: &str, id: &str) -> Bucket {
    Bucket {
        organization: "acme".into(),
        organization_id: "o1".into(),
        name: name.into(),
        id: id.into(),
    }
}

fn mount(props: WizardProps) -> (CollectorsWizard<RecordingStore>, Log) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let store = RecordingStore {
        inner: Store::new(Links::default(), "admin"),
        log: log.clone(),
    };
    let cb_log = log.clone();
    let cb: CompletionCallback = Box::new(move || cb_log.borrow_mut().push(Entry::Completed));
    (CollectorsWizard::mount(store, props, cb), log)
}

fn drain(log: &Log) -> Vec<Entry> {
    log.borrow_mut().drain(..).collect()
}

#[test]
fn explicit_bucket_seeds_only_bucket_info() {
    let explicit = bucket("explicit", "bx");
    let (_wizard, log) = mount(WizardProps {
        visible: true,
        bucket: Some(explicit.clone()),
        buckets: vec![bucket("first", "b1"), bucket("second", "b2")],
        ..WizardProps::default()
    });

    assert_eq!(
        drain(&log),
        vec![Entry::Dispatched(Action::SetBucketInfo(BucketSelection::from(
            &explicit
        )))]
    );
}

#[test]
fn first_bucket_wins_without_explicit_bucket() {
    let (wizard, log) = mount(WizardProps {
        visible: true,
        buckets: vec![bucket("first", "b1"), bucket("second", "b2")],
        ..WizardProps::default()
    });

    assert_eq!(
        drain(&log),
        vec![Entry::Dispatched(Action::SetBucketInfo(BucketSelection::from(
            &bucket("first", "b1")
        )))]
    );
    assert_eq!(wizard.view().step(), Some(CollectorsStep::Select));
}

#[test]
fn no_buckets_dispatches_nothing() {
    let (_wizard, log) = mount(WizardProps {
        visible: true,
        ..WizardProps::default()
    });
    assert!(drain(&log).is_empty());
}

#[test]
fn substep_zero_is_seeded_with_its_step() {
    let (wizard, log) = mount(WizardProps {
        visible: true,
        starting_step: Some(2),
        starting_substep: Some(Substep::Index(0)),
        ..WizardProps::default()
    });

    assert_eq!(
        drain(&log),
        vec![Entry::Dispatched(Action::SetSubstepIndex(2, Substep::Index(0)))]
    );
    assert_eq!(wizard.current_step(), 2);
    assert_eq!(wizard.step_props().substep, Some(Substep::Index(0)));
}

#[test]
fn step_only_seeds_current_step() {
    let (wizard, log) = mount(WizardProps {
        visible: true,
        starting_step: Some(1),
        ..WizardProps::default()
    });

    assert_eq!(drain(&log), vec![Entry::Dispatched(Action::SetCurrentStepIndex(1))]);
    assert_eq!(wizard.current_step(), 1);
}

#[test]
fn empty_starting_type_is_seeded() {
    let (_wizard, log) = mount(WizardProps {
        visible: true,
        starting_type: Some(DataLoaderType::Empty),
        ..WizardProps::default()
    });

    assert_eq!(
        drain(&log),
        vec![Entry::Dispatched(Action::SetDataLoadersType(DataLoaderType::Empty))]
    );
}

#[test]
fn dismiss_notifies_before_clearing() {
    let (mut wizard, log) = mount(WizardProps {
        visible: true,
        buckets: vec![bucket("first", "b1")],
        ..WizardProps::default()
    });
    drain(&log);

    assert!(wizard.handle_intent(StepIntent::Exit));
    assert_eq!(
        drain(&log),
        vec![
            Entry::Completed,
            Entry::Dispatched(Action::ClearDataLoaders),
            Entry::Dispatched(Action::ClearSteps),
        ]
    );
}

#[test]
fn each_dismiss_clears_exactly_once() {
    let (mut wizard, log) = mount(WizardProps {
        visible: true,
        buckets: vec![bucket("first", "b1")],
        ..WizardProps::default()
    });

    for _ in 0..3 {
        wizard.dismiss();
        wizard.set_visible(false);
        wizard.set_visible(true);
    }

    let entries = drain(&log);
    let count = |e: &Entry| entries.iter().filter(|x| *x == e).count();
    assert_eq!(count(&Entry::Completed), 3);
    assert_eq!(count(&Entry::Dispatched(Action::ClearDataLoaders)), 3);
    assert_eq!(count(&Entry::Dispatched(Action::ClearSteps)), 3);
}

#[test]
fn reopen_reseeds_from_current_buckets() {
    let (mut wizard, log) = mount(WizardProps {
        visible: true,
        buckets: vec![bucket("first", "b1")],
        ..WizardProps::default()
    });
    wizard.dismiss();
    wizard.set_visible(false);
    drain(&log);

    wizard.update_props(WizardProps {
        visible: true,
        buckets: vec![bucket("other", "b9")],
        ..WizardProps::default()
    });

    assert_eq!(
        drain(&log),
        vec![Entry::Dispatched(Action::SetBucketInfo(BucketSelection::from(
            &bucket("other", "b9")
        )))]
    );
    assert_eq!(
        wizard.store().state().data_loading.steps.selected_bucket_id(),
        "b9"
    );
}

#[test]
fn unrelated_prop_updates_dispatch_nothing() {
    let (mut wizard, log) = mount(WizardProps {
        visible: true,
        buckets: vec![bucket("first", "b1")],
        ..WizardProps::default()
    });
    drain(&log);

    wizard.update_props(WizardProps {
        visible: true,
        buckets: vec![bucket("first", "b1"), bucket("second", "b2")],
        starting_step: Some(2),
        ..WizardProps::default()
    });

    assert!(drain(&log).is_empty());
    assert_eq!(wizard.current_step(), 0);
}

#[test]
fn complete_setup_does_not_clear_state() {
    let (mut wizard, log) = mount(WizardProps {
        visible: true,
        buckets: vec![bucket("first", "b1")],
        starting_step: Some(2),
        ..WizardProps::default()
    });
    drain(&log);

    assert!(wizard.handle_intent(StepIntent::CompleteSetup));
    assert_eq!(drain(&log), vec![Entry::Completed]);
    assert_eq!(wizard.current_step(), 2);
}

#[test]
fn exit_is_handled_once_per_session() {
    let (mut wizard, log) = mount(WizardProps {
        visible: true,
        buckets: vec![bucket("first", "b1")],
        ..WizardProps::default()
    });
    drain(&log);

    assert!(wizard.handle_intent(StepIntent::Exit));
    assert!(!wizard.handle_intent(StepIntent::Exit));
    assert!(!wizard.handle_intent(StepIntent::Dispatch(Action::IncrementCurrentStepIndex)));
    assert_eq!(
        drain(&log),
        vec![
            Entry::Completed,
            Entry::Dispatched(Action::ClearDataLoaders),
            Entry::Dispatched(Action::ClearSteps),
        ]
    );

    wizard.set_visible(true);
    assert_eq!(
        drain(&log),
        vec![Entry::Dispatched(Action::SetBucketInfo(BucketSelection::from(
            &bucket("first", "b1")
        )))]
    );
}
