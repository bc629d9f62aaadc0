use std::io::{self, Write};

/// Prints `message` to stdout and mirrors it into `writer` when one is given.
pub fn println(message: &str, writer: &mut Option<&mut dyn Write>) -> io::Result<()> {
    if let Err(e) = writeln!(io::stdout(), "{message}") {
        tracing::warn!(error = %e, "Failed to write to stdout");
    }

    if let Some(w) = writer {
        writeln!(w, "{message}")?;
    }

    Ok(())
}
