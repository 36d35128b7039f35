pub mod deadline_watcher;
pub mod projector;
pub mod state;
pub mod submitter;
