pub mod bundles;
pub mod state;
pub mod steps;
pub mod store;
pub mod types;

pub use bundles::BundleName;
pub use state::{ConfigValue, ConfiguredState, DataLoadersState, PluginConfig, TelegrafPlugin};
pub use steps::StepsState;
pub use store::{Action, AppState, Store, WizardStore};
pub use types::{
    Bucket, BucketSelection, CollectorsStep, DataLoaderType, Links, Notification,
    NotificationKind, ParseError, Substep,
};
