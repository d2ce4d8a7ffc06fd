pub mod banner;
pub mod table;
pub mod tui;

/// Prints the welcome banner. Call once at startup (in main after tracing init).
pub fn init_ui() {
    banner::print_welcome();
}
