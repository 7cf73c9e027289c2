pub mod app;
pub mod error;
pub mod event;
pub mod loaders;
pub mod ui;
pub mod vim;
pub mod wizard;
