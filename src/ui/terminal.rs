use std::io::Write;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{controller::EmailView, domain::EmailEntry, inbox::Inbox};

static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?[A-Za-z][^>]*>").expect("valid tag regex"));

pub const HELP: &str = "\
commands:
  list                 show the inbox
  open <n>             load email n into the form
  sender <text>        set the sender field
  subject <text>       set the subject field
  content <text>       set the content field (\\n for line breaks)
  show                 print the form
  process              classify the email in the form
  quit                 exit";

/// Renders the view onto a line-oriented writer, usually stdout.
pub struct TerminalView<W> {
    out: W,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn line(&mut self, text: &str) {
        if let Err(err) = writeln!(self.out, "{text}").and_then(|_| self.out.flush()) {
            tracing::warn!(target: "app", error = %err, "failed to write to terminal");
        }
    }

    pub fn print_inbox(&mut self, inbox: &Inbox) {
        if inbox.is_empty() {
            self.line("(inbox is empty)");
            return;
        }
        for (i, entry) in inbox.entries().iter().enumerate() {
            self.line(&format!("{:>3}. {} | {}", i + 1, entry.sender, entry.subject));
        }
    }

    pub fn print_form(&mut self, fields: &EmailEntry) {
        self.line(&format!("sender : {}", fields.sender));
        self.line(&format!("subject: {}", fields.subject));
        self.line(&format!("content: {}", fields.content));
    }
}

impl<W: Write> EmailView for TerminalView<W> {
    fn set_fields(&mut self, fields: &EmailEntry) {
        self.print_form(fields);
    }

    fn notify(&mut self, message: &str) {
        self.line(&format!("! {message}"));
    }

    fn reveal_results(&mut self) {
        self.line("── classification ──");
    }

    fn set_details_markup(&mut self, markup: &str) {
        for line in markup_to_text(markup).lines() {
            self.line(line);
        }
    }

    fn set_suggested_text(&mut self, text: &str) {
        self.line("── suggested response ──");
        self.line(text);
    }

    fn replace_results_with_error(&mut self, markup: &str) {
        self.line(&markup_to_text(markup));
    }
}

fn markup_to_text(markup: &str) -> String {
    let text = TAG_REGEX
        .replace_all(markup, "")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    decode_entities(&text)
}

// `&amp;` goes last so `&amp;lt;` stays a literal `&lt;`
fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
