pub mod decision;
pub mod install;

pub use decision::decide;
pub use install::{progress_message, question_text, Installer};
