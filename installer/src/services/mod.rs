pub mod collaborators;
pub mod copy_worker;

pub use collaborators::{
    AutoConfirm, ConfirmationPrompt, ConsolePrompt, LogStatusSink, RecordingStatusSink, StatusSink,
};
pub use copy_worker::{CopyJob, CopyWorker};
