//! Process primitives standing in for a scripting host's `system` object:
//! `print`, `exit`, argument vector, subprocess execution.

use std::io;
use std::process::{Command, ExitStatus};

pub fn execute(cmd: &str, args: &[&str]) -> io::Result<ExitStatus> {
    Command::new(cmd).args(args).status()
}

pub fn exit(status: i32) -> ! {
    std::process::exit(status)
}

pub fn print(args: &[&str]) {
    println!("{}", args.join(" "));
}

pub fn args() -> Vec<String> {
    std::env::args().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn executes_a_trivial_command() {
        let status = execute("true", &[]).unwrap();
        assert!(status.success());
    }
}
