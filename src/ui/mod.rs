// UI and formatting module

pub mod formatters;
pub mod progress;
pub mod prompts;

// Re-export commonly used items for cleaner imports
pub use formatters::{format_duration, format_size, print_results, render_results_table};
pub use progress::show_progress_bar;
pub use prompts::{
    dimmed, info, prompt_selection, read_confirmation, success, warn, TerminalConfirm,
};
