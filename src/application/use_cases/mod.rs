pub mod process_projects;

pub use process_projects::{
    ProcessProjectsError, ProcessProjectsUseCase, ProgressListener, ProjectEvent, RunSummary,
};
