pub mod render;
pub mod view;

use tokio::sync::mpsc;

use crate::{
    ai::{ClassifierClient, ProcessError},
    config::ControllerConfig,
    domain::{EmailEntry, OutboundRequest, ProcessedEmail},
};

pub use view::EmailView;

pub const MISSING_FIELDS_NOTICE: &str = "Please fill in all fields";
pub const BUSY_NOTICE: &str = "A submission is already in progress";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Sender,
    Subject,
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    AwaitingResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    Sent(u64),
    Invalid,
    Busy,
}

/// A finished request, delivered back to the loop that owns the controller.
#[derive(Debug)]
pub struct Resolution {
    pub ticket: u64,
    pub outcome: Result<ProcessedEmail, ProcessError>,
}

pub struct FormController<V> {
    view: V,
    fields: EmailEntry,
    client: ClassifierClient,
    resolutions: mpsc::UnboundedSender<Resolution>,
    config: ControllerConfig,
    in_flight: usize,
    next_ticket: u64,
}

impl<V: EmailView> FormController<V> {
    pub fn new(
        view: V,
        client: ClassifierClient,
        config: ControllerConfig,
    ) -> (Self, mpsc::UnboundedReceiver<Resolution>) {
        let (resolutions, receiver) = mpsc::unbounded_channel();
        let controller = Self {
            view,
            fields: EmailEntry::default(),
            client,
            resolutions,
            config,
            in_flight: 0,
            next_ticket: 1,
        };
        (controller, receiver)
    }

    #[cfg(test)]
    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    #[cfg(test)]
    pub fn into_view(self) -> V {
        self.view
    }

    pub fn fields(&self) -> &EmailEntry {
        &self.fields
    }

    pub fn state(&self) -> ControllerState {
        if self.in_flight == 0 {
            ControllerState::Idle
        } else {
            ControllerState::AwaitingResponse
        }
    }

    pub fn populate(&mut self, entry: &EmailEntry) {
        self.fields = entry.clone();
        self.view.set_fields(&self.fields);
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Sender => &mut self.fields.sender,
            Field::Subject => &mut self.fields.subject,
            Field::Content => &mut self.fields.content,
        };
        *slot = value.into();
        self.view.set_fields(&self.fields);
    }

    /// Validates the fields and spawns the request. Must run inside a tokio runtime.
    pub fn submit(&mut self) -> SubmitStatus {
        let Some(request) = OutboundRequest::from_fields(
            &self.fields.sender,
            &self.fields.subject,
            &self.fields.content,
        ) else {
            tracing::debug!(target: "controller", "submission blocked: empty field");
            self.view.notify(MISSING_FIELDS_NOTICE);
            return SubmitStatus::Invalid;
        };

        if self.config.submit_guard && self.in_flight > 0 {
            tracing::debug!(target: "controller", in_flight = self.in_flight, "submission blocked by guard");
            self.view.notify(BUSY_NOTICE);
            return SubmitStatus::Busy;
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.in_flight += 1;

        tracing::info!(
            target: "controller",
            ticket,
            in_flight = self.in_flight,
            endpoint = %self.client.endpoint(),
            "submitting email"
        );

        let client = self.client.clone();
        let resolutions = self.resolutions.clone();
        tokio::spawn(async move {
            let outcome = client.process(&request).await;
            if resolutions.send(Resolution { ticket, outcome }).is_err() {
                tracing::debug!(target: "controller", ticket, "controller gone; dropping result");
            }
        });

        SubmitStatus::Sent(ticket)
    }

    /// Renders whichever resolution arrives; the latest one overwrites earlier output.
    pub fn resolve(&mut self, resolution: Resolution) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match resolution.outcome {
            Ok(processed) => {
                tracing::info!(
                    target: "controller",
                    ticket = resolution.ticket,
                    category = %processed.classification.main_category,
                    confidence = processed.classification.confidence,
                    "classification received"
                );
                self.render(&processed);
            }
            Err(err) => {
                tracing::error!(
                    target: "controller",
                    ticket = resolution.ticket,
                    error = %err,
                    "error processing email"
                );
                self.view
                    .replace_results_with_error(&render::error_markup(&err.to_string()));
            }
        }
    }

    fn render(&mut self, processed: &ProcessedEmail) {
        self.view.reveal_results();
        self.view
            .set_details_markup(&render::details_markup(&processed.classification));
        self.view.set_suggested_text(&processed.response.suggested);
    }
}
