mod error;
mod session;

use rustyline::{error::ReadlineError, DefaultEditor};
use session::{Output, Session};
use std::io::{self, IsTerminal, Read};
use tracing_subscriber::EnvFilter;

/// Runs one line, printing the result or the error. Returns false if the session should end.
fn run_line(input: &str, session: &mut Session) -> bool {
    match session.execute(input) {
        Ok(Output::Quit) => return false,
        Ok(output) => {
            if let Some(text) = output.render() {
                println!("{}", text);
            }
        },
        Err(err) => err.report_to_stderr(),
    }
    true
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let mut session = Session::default();

    if !io::stdin().is_terminal() {
        // read lines from stdin
        let mut input = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut input) {
            eprintln!("{}", err);
            return;
        }

        for line in input.lines() {
            if !run_line(line, &mut session) {
                break;
            }
        }
        return;
    }

    // run the repl / interactive mode
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(err) => {
            eprintln!("{}", err);
            return;
        },
    };

    fn process_line(rl: &mut DefaultEditor, session: &mut Session) -> Result<bool, ReadlineError> {
        let input = rl.readline("> ")?;
        if input.trim().is_empty() {
            return Ok(true);
        }

        rl.add_history_entry(&input)?;
        Ok(run_line(&input, session))
    }

    loop {
        match process_line(&mut rl, &mut session) {
            Ok(true) => (),
            Ok(false) => break,
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => break,
            Err(err) => {
                eprintln!("{}", err);
                break;
            },
        }
    }
}
