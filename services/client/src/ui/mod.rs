pub mod generation_task;
pub mod protocol;
pub mod render;
pub mod state;
pub mod terminal;

// Re-export the entry points the binary needs to start a session.
pub use state::{Flow, QuizRuntime};
pub use terminal::run_terminal;
