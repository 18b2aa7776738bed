use crate::domain::EmailEntry;

/// The page surface the controller drives. Implementations own presentation only.
pub trait EmailView {
    /// Mirrors the three input fields after they change.
    fn set_fields(&mut self, fields: &EmailEntry);

    /// Blocking notice, e.g. failed validation.
    fn notify(&mut self, message: &str);

    fn reveal_results(&mut self);

    fn set_details_markup(&mut self, markup: &str);

    /// Plain text, never interpreted as markup.
    fn set_suggested_text(&mut self, text: &str);

    /// Replaces the whole results region, hiding any earlier classification.
    fn replace_results_with_error(&mut self, markup: &str);
}
