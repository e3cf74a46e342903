//! Terminal confirmation for hazardous tool calls.
//!
//! ```text
//! ⚠  Hazardous tool requested
//!    Tool: run_command
//!    Args: {"command":"rm -rf build"}
//! Allow? [y/N]
//! ```
//!
//! Input is read by one long-lived thread that forwards lines over a channel.
//! A prompt that times out only stops waiting on the channel; a late answer
//! to it is discarded before the next prompt is shown.

use async_trait::async_trait;
use colored::Colorize;
use squadron_application::{ConfirmationDecision, ConfirmationError, SafetyConfirmationPort};
use squadron_domain::ToolArgs;
use squadron_domain::util::preview;
use std::io::{self, BufRead, Write};
use tokio::sync::{Mutex, mpsc};
use tracing::warn;

const ARGS_PREVIEW: usize = 300;

/// Interpret one line of user input. Empty input means "no".
pub fn parse_answer(input: &str) -> Option<ConfirmationDecision> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(ConfirmationDecision::Approve),
        "" | "n" | "no" => Some(ConfirmationDecision::Reject),
        _ => None,
    }
}

type Lines = mpsc::UnboundedReceiver<io::Result<String>>;

/// Asks on stdout; prompts from concurrent agents are shown one at a time.
pub struct InteractiveConfirmation {
    lines: Mutex<Lines>,
}

impl InteractiveConfirmation {
    /// Answers come from stdin.
    pub fn new() -> Self {
        Self::spawn_reader(|| io::stdin().lock())
    }

    /// Answers come from `reader` instead of stdin.
    pub fn with_reader<R: BufRead + Send + 'static>(reader: R) -> Self {
        Self::spawn_reader(move || reader)
    }

    fn spawn_reader<R, F>(open: F) -> Self
    where
        R: BufRead,
        F: FnOnce() -> R + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let spawned = std::thread::Builder::new()
            .name("confirmation-input".to_string())
            .spawn(move || {
                let mut reader = open();
                loop {
                    let mut line = String::new();
                    match reader.read_line(&mut line) {
                        Ok(0) => break,
                        Ok(_) => {
                            if tx.send(Ok(line)).is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            let _ = tx.send(Err(e));
                            break;
                        }
                    }
                }
            });
        // Without a reader the sender is gone and every prompt is cancelled
        if let Err(e) = spawned {
            warn!("Could not start confirmation input reader: {}", e);
        }

        Self {
            lines: Mutex::new(rx),
        }
    }

    fn show(tool_name: &str, args_json: &str) {
        println!();
        println!("{}", "⚠  Hazardous tool requested".yellow().bold());
        println!("   {} {}", "Tool:".cyan(), tool_name.bold());
        println!("   {} {}", "Args:".cyan(), args_json.dimmed());
    }

    fn prompt() -> Result<(), ConfirmationError> {
        print!("{} ", "Allow? [y/N]".magenta().bold());
        io::stdout()
            .flush()
            .map_err(|e| ConfirmationError::IoError(format!("Failed to flush stdout: {}", e)))
    }
}

impl Default for InteractiveConfirmation {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SafetyConfirmationPort for InteractiveConfirmation {
    async fn confirm(
        &self,
        tool_name: &str,
        args: &ToolArgs,
    ) -> Result<ConfirmationDecision, ConfirmationError> {
        let mut lines = self.lines.lock().await;

        // Lines typed while no prompt was showing answer nothing
        while lines.try_recv().is_ok() {}

        let args_json = preview(
            &serde_json::to_string(args).unwrap_or_else(|_| "{}".to_string()),
            ARGS_PREVIEW,
        );
        Self::show(tool_name, &args_json);

        loop {
            Self::prompt()?;
            let line = match lines.recv().await {
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    return Err(ConfirmationError::IoError(format!(
                        "Failed to read input: {}",
                        e
                    )));
                }
                None => return Err(ConfirmationError::Cancelled),
            };

            match parse_answer(&line) {
                Some(decision) => return Ok(decision),
                None => println!("Please answer 'y' or 'n'."),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer("y\n"), Some(ConfirmationDecision::Approve));
        assert_eq!(parse_answer(" YES "), Some(ConfirmationDecision::Approve));
        assert_eq!(parse_answer("\n"), Some(ConfirmationDecision::Reject));
        assert_eq!(parse_answer("no"), Some(ConfirmationDecision::Reject));
        assert_eq!(parse_answer("maybe"), None);
    }

    /// Blocking reader fed line by line from the test.
    struct FedInput {
        lines: std::sync::mpsc::Receiver<String>,
        pending: Vec<u8>,
    }

    impl io::Read for FedInput {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.pending.is_empty() {
                match self.lines.recv() {
                    Ok(line) => self.pending = line.into_bytes(),
                    Err(_) => return Ok(0),
                }
            }
            let n = buf.len().min(self.pending.len());
            buf[..n].copy_from_slice(&self.pending[..n]);
            self.pending.drain(..n);
            Ok(n)
        }
    }

    fn fed_confirmation() -> (std::sync::mpsc::Sender<String>, InteractiveConfirmation) {
        let (tx, rx) = std::sync::mpsc::channel();
        let input = io::BufReader::new(FedInput {
            lines: rx,
            pending: Vec::new(),
        });
        (tx, InteractiveConfirmation::with_reader(input))
    }

    async fn send_later(input: &std::sync::mpsc::Sender<String>, lines: &[&str]) {
        tokio::time::sleep(Duration::from_millis(100)).await;
        for line in lines {
            input.send(line.to_string()).unwrap();
        }
    }

    #[tokio::test]
    async fn test_reprompts_until_clear_answer() {
        let (input, confirmation) = fed_confirmation();

        let args = ToolArgs::new();
        let (decision, _) = tokio::join!(
            confirmation.confirm("run_command", &args),
            send_later(&input, &["maybe\n", "yes\n"])
        );
        assert_eq!(decision.unwrap(), ConfirmationDecision::Approve);
    }

    #[tokio::test]
    async fn test_late_answer_to_timed_out_prompt_is_discarded() {
        let (input, confirmation) = fed_confirmation();

        let timed_out = tokio::time::timeout(
            Duration::from_millis(50),
            confirmation.confirm("run_command", &ToolArgs::new()),
        )
        .await;
        assert!(timed_out.is_err());

        // The operator answers the prompt that already gave up
        input.send("y\n".to_string()).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        let args = ToolArgs::new();
        let (decision, _) = tokio::join!(
            confirmation.confirm("write_file", &args),
            send_later(&input, &["n\n"])
        );
        assert_eq!(decision.unwrap(), ConfirmationDecision::Reject);
    }

    #[tokio::test]
    async fn test_end_of_input_cancels() {
        let (input, confirmation) = fed_confirmation();
        drop(input);
        assert!(matches!(
            confirmation
                .confirm("run_command", &ToolArgs::new())
                .await,
            Err(ConfirmationError::Cancelled)
        ));
    }
}
