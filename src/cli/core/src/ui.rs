/* src/cli/core/src/ui.rs */

// Report lines for interactive commands. Server logs go through tracing.

#![allow(clippy::print_stdout)]

pub const RESET: &str = "\x1b[0m";
pub const DIM: &str = "\x1b[2m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const CYAN: &str = "\x1b[36m";

pub fn ok(msg: &str) {
  println!("  {GREEN}✓{RESET} {msg}");
}

pub fn fail(msg: &str) {
  println!("  {RED}✗{RESET} {msg}");
}

pub fn arrow(msg: &str) {
  println!("{CYAN}→{RESET} {msg}");
}

pub fn detail(msg: &str) {
  println!("    {DIM}{msg}{RESET}");
}
