use anyhow::Result;
use clap::Command;
use clap_complete::{Shell, generate};
use std::io;

/// Completion script for `shell`, as text
pub fn script(shell: Shell, cmd: &mut Command) -> Result<String> {
    let bin_name = cmd.get_name().to_string();
    let mut buffer = Vec::new();
    generate(shell, cmd, bin_name, &mut buffer);
    Ok(String::from_utf8(buffer)?)
}

pub fn execute(shell: Shell, cmd: &mut Command) -> Result<()> {
    let script = script(shell, cmd)?;
    io::Write::write_all(&mut io::stdout(), script.as_bytes())?;
    Ok(())
}
