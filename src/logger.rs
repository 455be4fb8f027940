use colored::Colorize;

/// Fixed tag prefixed to every console line this tool emits.
const TAG: &str = "[ndu]";

/// Environment flag that turns on debug output; also visible to child
/// processes spawned after it is set.
const DEBUG_ENV: &str = "NDU_DEBUG";

pub fn on_actions() -> bool {
    // The runner sets GITHUB_ACTIONS=true and parses workflow commands
    // (::debug::, ::error::, ::add-mask::) from stdout.
    std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true")
}

pub fn debug_enabled() -> bool {
    std::env::var(DEBUG_ENV).is_ok()
}

/// Turns on debug output for the rest of the process.
pub fn enable_debug() {
    unsafe {
        std::env::set_var(DEBUG_ENV, "1");
    }
}

pub fn info(message: &str) {
    println!("{} {}", TAG.cyan(), message);
}

/// Emitted only when debug output is enabled.
pub fn debug(message: &str) {
    if !debug_enabled() {
        return;
    }
    if on_actions() {
        println!("::debug::{}", escape_data(message));
    } else {
        println!("{} {}", TAG.dimmed(), message.dimmed());
    }
}

pub fn error(message: &str) {
    if on_actions() {
        println!("::error::{}", escape_data(message));
    } else {
        eprintln!("{} {}", TAG.red().bold(), message);
    }
}

/// Registers a secret with the Actions runner so it is redacted from the
/// job log. Outside of Actions the value is deliberately not echoed at all.
pub fn add_mask(value: &str) {
    if on_actions() && !value.is_empty() {
        println!("::add-mask::{}", escape_data(value));
    }
}

/// Workflow-command payloads must escape '%', '\r', and '\n'; a raw newline
/// would terminate the command mid-message.
fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
