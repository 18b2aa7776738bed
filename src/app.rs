use std::{
    io::{self, Write},
    path::Path,
};

use anyhow::{Context, Result};
use reqwest::Client;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc::UnboundedReceiver,
};

use crate::{
    ai::ClassifierClient,
    config::AppConfig,
    controller::{ControllerState, FormController, Resolution},
    inbox::Inbox,
    infrastructure::shutdown::Shutdown,
    ui::{parse_line, Command, TerminalView, HELP},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Inbox plus form controller, driven one input line at a time.
pub struct Session<W> {
    controller: FormController<TerminalView<W>>,
    inbox: Inbox,
}

impl<W: Write> Session<W> {
    pub fn new(controller: FormController<TerminalView<W>>, inbox: Inbox) -> Self {
        Self { controller, inbox }
    }

    pub fn controller(&self) -> &FormController<TerminalView<W>> {
        &self.controller
    }

    pub fn greet(&mut self) {
        let view = self.controller.view_mut();
        view.line("inbox:");
        view.print_inbox(&self.inbox);
        view.line("type `help` for commands");
    }

    pub fn handle_line(&mut self, line: &str) -> Flow {
        let command = match parse_line(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Flow::Continue,
            Err(err) => {
                self.controller.view_mut().line(&err.to_string());
                return Flow::Continue;
            }
        };

        match command {
            Command::List => self.controller.view_mut().print_inbox(&self.inbox),
            Command::Open(index) => match self.inbox.get(index) {
                Some(entry) => self.controller.populate(entry),
                None => {
                    let message = format!("no email #{index} (inbox has {})", self.inbox.len());
                    self.controller.view_mut().line(&message);
                }
            },
            Command::Set(field, value) => self.controller.set_field(field, value),
            Command::Show => {
                let fields = self.controller.fields().clone();
                self.controller.view_mut().print_form(&fields);
            }
            Command::Process => {
                self.controller.submit();
            }
            Command::Help => self.controller.view_mut().line(HELP),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    pub fn resolve(&mut self, resolution: Resolution) {
        self.controller.resolve(resolution);
    }
}

pub struct TriageApp {
    session: Session<io::Stdout>,
    resolutions: UnboundedReceiver<Resolution>,
    shutdown: Shutdown,
}

impl TriageApp {
    pub async fn initialize(config: AppConfig, shutdown: Shutdown) -> Result<Self> {
        let inbox = match &config.inbox.file {
            Some(path) => Inbox::load(Path::new(path)).await?,
            None => Inbox::bundled().context("bundled inbox is invalid")?,
        };

        let http_client = Client::builder()
            .user_agent(format!("mail-triage-console/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        let classifier = ClassifierClient::new(http_client, &config.classifier)
            .context("failed to build classifier endpoint url")?;

        let view = TerminalView::new(io::stdout());
        let (controller, resolutions) = FormController::new(view, classifier, config.controller);

        Ok(Self {
            session: Session::new(controller, inbox),
            resolutions,
            shutdown,
        })
    }

    pub async fn run(self) -> Result<()> {
        let TriageApp {
            mut session,
            mut resolutions,
            shutdown,
        } = self;

        tracing::info!(target: "app", "mail triage console started");
        session.greet();

        let mut shutdown_listener = shutdown.subscribe();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut input_closed = false;

        loop {
            tokio::select! {
                _ = shutdown_listener.notified() => break,
                Some(resolution) = resolutions.recv() => session.resolve(resolution),
                line = lines.next_line(), if !input_closed => {
                    match line.context("failed to read from stdin")? {
                        Some(line) => {
                            if session.handle_line(&line) == Flow::Quit {
                                break;
                            }
                        }
                        None => {
                            tracing::debug!(target: "app", "stdin closed");
                            input_closed = true;
                        }
                    }
                }
            }

            // with piped input, let outstanding submissions render before exiting
            if input_closed && session.controller().state() == ControllerState::Idle {
                break;
            }
        }

        shutdown.trigger();
        tracing::info!(target: "app", "mail triage console stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use url::Url;
    use wiremock::{
        matchers::{body_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;
    use crate::config::{ClassifierConfig, ControllerConfig};

    fn session_for(base: &str) -> (Session<Vec<u8>>, UnboundedReceiver<Resolution>) {
        let client = ClassifierClient::new(
            Client::new(),
            &ClassifierConfig {
                base_url: Url::parse(base).unwrap(),
            },
        )
        .unwrap();
        let (controller, rx) = FormController::new(
            TerminalView::new(Vec::new()),
            client,
            ControllerConfig::default(),
        );
        let inbox = Inbox::from_json(
            r#"[{"sender":"alice@example.com","subject":"Refund request","content":"I want a refund"}]"#,
        )
        .unwrap();
        (Session::new(controller, inbox), rx)
    }

    fn printed(session: Session<Vec<u8>>) -> String {
        let Session { controller, .. } = session;
        String::from_utf8(controller.into_view().into_inner()).unwrap()
    }

    #[tokio::test]
    async fn open_then_process_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/process-email"))
            .and(body_json(serde_json::json!({
                "sender": "alice@example.com",
                "subject": "Refund request",
                "content": "I want a refund"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "classification": {
                    "main_category": "billing",
                    "confidence": 0.87,
                    "is_confident": true,
                    "summary": "Customer requests refund"
                },
                "response": { "suggested": "We will process your refund." }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (mut session, mut rx) = session_for(&server.uri());
        assert_eq!(session.handle_line("open 1"), Flow::Continue);
        assert_eq!(session.handle_line("process"), Flow::Continue);
        session.resolve(rx.recv().await.unwrap());

        let out = printed(session);
        assert!(out.contains("Confidence: 87.0%"));
        assert!(out.contains("We will process your refund."));
        assert!(!out.contains("Low confidence"));
    }

    #[tokio::test]
    async fn empty_form_shows_notice() {
        let (mut session, mut rx) = session_for("http://localhost:8000");
        session.handle_line("process");
        assert!(rx.try_recv().is_err());
        assert!(printed(session).contains("! Please fill in all fields"));
    }

    #[tokio::test]
    async fn quit_and_bad_input() {
        let (mut session, _rx) = session_for("http://localhost:8000");
        assert_eq!(session.handle_line("open 9"), Flow::Continue);
        assert_eq!(session.handle_line("bogus"), Flow::Continue);
        assert_eq!(session.handle_line("quit"), Flow::Quit);

        let out = printed(session);
        assert!(out.contains("no email #9 (inbox has 1)"));
        assert!(out.contains("unknown command `bogus`"));
    }
}
