//! The interactive chat loop.
//!
//! Reads one line per turn, handles built-in commands locally and sends
//! everything else to the completion server while an animation plays.

pub mod commands;

use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

use crate::animation::{Animation, AnimationController};
use crate::client::CompletionClient;
use crate::config::Config;
use crate::protocol::CompletionRequest;
use commands::Command;

/// State of one chat session.
pub struct Session<W> {
    config: Config,
    client: CompletionClient,
    controller: AnimationController<W>,
    history: Vec<String>,
    /// Optional `readme.txt` shown by `--help`.
    readme: Option<PathBuf>,
}

impl<W> Session<W>
where
    W: Write + Send + 'static,
{
    /// Create a session that talks to the server in `config` and prints on `terminal`.
    pub fn new(config: Config, terminal: W) -> Result<Self> {
        let client = CompletionClient::new(&config)?;
        info!("Using completion server at {}", client.url());
        Ok(Self {
            config,
            client,
            controller: AnimationController::new(terminal),
            history: Vec::new(),
            readme: Config::config_dir().ok().map(|dir| dir.join("readme.txt")),
        })
    }

    /// Messages sent to the server so far.
    #[cfg(test)]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Run until `exit` or end of input.
    pub async fn run<R>(&mut self, input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let out = self.controller.terminal()?;
        writeln!(
            out,
            "Chat with {}. Type 'exit' to stop. (--help)",
            self.config.interlocutor_name
        )?;

        loop {
            let out = self.controller.terminal()?;
            write!(out, "{}: ", self.config.user_name)?;
            out.flush()?;

            let Some(line) = lines.next_line().await.context("Failed to read input")? else {
                writeln!(out)?;
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            match Command::parse(&line) {
                Some(Command::Exit) => break,
                Some(command) => self.run_command(command)?,
                None => self.converse(&line).await?,
            }
        }

        debug!("Chat ended after {} messages", self.history.len());
        Ok(())
    }

    fn run_command(&mut self, command: Command) -> Result<()> {
        debug!("Running command {:?}", command);
        let out = self.controller.terminal()?;
        match command {
            Command::Clear => commands::clear_console(out)?,
            Command::History => commands::show_history(out, &self.history)?,
            Command::Help => commands::show_help(out, self.readme.as_deref())?,
            Command::Version => commands::show_version(out)?,
            Command::Unknown => commands::show_unknown(out)?,
            Command::Exit => {}
        }
        out.flush()?;
        Ok(())
    }

    /// Send one message and print the reply, or the error, once the animation is gone.
    async fn converse(&mut self, input: &str) -> Result<()> {
        self.history.push(input.to_string());

        let animation = Animation::from_tag(&self.config.animation_style);
        let request = CompletionRequest::for_turn(&self.config, input);
        // The animation owns the tty until run_while returns, so log around it.
        debug!(
            "POST {} ({} prompt bytes)",
            self.client.url(),
            request.prompt.len()
        );
        let reply = self
            .controller
            .run_while(animation, self.client.complete(&request))
            .await?;

        let out = self.controller.terminal()?;
        match reply {
            Ok(text) => {
                debug!("Received {} reply bytes", text.len());
                writeln!(out, "{}: {}", self.config.interlocutor_name, text)?;
            }
            Err(e) => {
                warn!("Completion failed: {:#}", e);
                writeln!(out, "Error: {:#}", e)?;
            }
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::testing::{log_into, Capture};

    fn session_for(server: &mockito::ServerGuard, style: &str) -> (Session<Capture>, Capture) {
        let config = Config {
            host: server.host_with_port(),
            animation_style: style.to_string(),
            ..Config::default()
        };
        let capture = Capture::default();
        let mut session = Session::new(config, capture.clone()).unwrap();
        session.readme = None;
        (session, capture)
    }

    #[tokio::test]
    async fn test_reply_is_printed_after_animation_is_cleared() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/completion")
            .with_body(r#"{"content": " Hi there!\n"}"#)
            .create_async()
            .await;

        let (mut session, capture) = session_for(&server, "docker-style");
        session.run(&b"hello\nexit\n"[..]).await.unwrap();

        let text = capture.text();
        assert!(text.starts_with("Chat with Assistant. Type 'exit' to stop. (--help)\n"));
        let reply_at = text.find("Assistant: Hi there!\n").unwrap();
        let cleared_at = text.rfind("\x1b[2K").unwrap();
        assert!(cleared_at < reply_at);
        assert!(!text[reply_at..].contains('>'));
        assert_eq!(session.history(), ["hello".to_string()]);
    }

    #[tokio::test]
    async fn test_error_is_printed_after_animation_is_cleared() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/completion")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let (mut session, capture) = session_for(&server, "messenger-typing");
        session.run(&b"hello\nexit\n"[..]).await.unwrap();

        let text = capture.text();
        let error_at = text.find("Error: Completion request failed with status 500").unwrap();
        let released_at = text.rfind("\x1b[J").unwrap();
        assert!(released_at < error_at);
        assert!(!text[error_at..].contains('●'));
    }

    #[tokio::test]
    async fn test_commands_are_not_sent_or_recorded() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/completion")
            .with_body(r#"{"content": "ok"}"#)
            .expect(2)
            .create_async()
            .await;

        let (mut session, capture) = session_for(&server, "no-such-style");
        let input = b"first\n--help\n--bogus\n\nsecond\nHISTORY\n--version\nexit\nnever sent\n";
        session.run(&input[..]).await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            session.history(),
            ["first".to_string(), "second".to_string()]
        );

        let text = capture.text();
        let readme_at = text.find("termchat - chat with a completion server").unwrap();
        assert!(readme_at < text.find("Available commands:").unwrap());
        assert!(text.contains("Unknown command. Enter '--help' for a list of commands."));
        assert!(text.contains("Command history:\n1: first\n2: second\n"));
        assert!(text.contains("Program version: "));
        assert!(!text.contains("never sent"));
    }

    #[tokio::test]
    async fn test_verbose_logs_leave_the_animation_line_alone() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/completion")
            .with_body(r#"{"content": "pong"}"#)
            .create_async()
            .await;

        let (mut session, capture) = session_for(&server, "messenger-typing");
        let _guard = log_into(&capture);
        session.run(&b"ping\nexit\n"[..]).await.unwrap();

        let lines = capture.screen().lines();
        assert!(lines.iter().any(|l| l.contains("POST")));
        assert!(lines.iter().any(|l| l == "Assistant: pong"));
        assert!(!lines.iter().any(|l| l.contains('●')), "{lines:?}");
    }

    #[tokio::test]
    async fn test_end_of_input_ends_the_session() {
        let server = mockito::Server::new_async().await;
        let (mut session, capture) = session_for(&server, "typing");
        session.run(&b""[..]).await.unwrap();

        assert!(capture.text().ends_with("User: \n"));
        assert!(session.history().is_empty());
    }
}
