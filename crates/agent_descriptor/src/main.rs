use std::io::{self, Write};

use agent_descriptor::AgentDescriptor;

fn main() -> io::Result<()> {
    let descriptor = AgentDescriptor::from_env();
    let json = descriptor.to_json_pretty().map_err(io::Error::other)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}")?;
    stdout.flush()
}
