//! Create and edit forms for an office.

use std::collections::BTreeSet;
use std::fmt::{self, Write as _};

use crate::models::{OfficeBody, OfficeRecord};

/// Inline error shown under an empty field.
pub const EMPTY_FIELD_ERROR: &str = "This field cannot be empty";

const PHONE_MAX_LEN: usize = 14;

/// One input of the office form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Title,
    Address,
    Fullname,
    Job,
    Email,
    Phone,
}

impl FormField {
    /// All fields in display order.
    pub const ALL: [FormField; 6] = [
        FormField::Title,
        FormField::Address,
        FormField::Fullname,
        FormField::Job,
        FormField::Email,
        FormField::Phone,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Address => "Enter the address",
            FormField::Fullname => "Full Name",
            FormField::Job => "Job Position",
            FormField::Email => "Email address",
            FormField::Phone => "Phone",
        }
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            FormField::Email => Some("name@example.com"),
            FormField::Phone => Some("(xxx) xxx-xxxx"),
            _ => None,
        }
    }

    /// Longest value the input accepts, if capped.
    pub fn max_len(&self) -> Option<usize> {
        match self {
            FormField::Phone => Some(PHONE_MAX_LEN),
            _ => None,
        }
    }
}

/// Per-field validation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeSet<FormField>);

impl FieldErrors {
    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.0.iter().copied()
    }
}

/// Values and inline errors of the six office inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfficeForm {
    defaults: OfficeBody,
    values: OfficeBody,
    errors: FieldErrors,
}

impl OfficeForm {
    /// Blank form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Form prefilled with `values`; `reset` returns to them.
    pub fn prefilled(values: OfficeBody) -> Self {
        Self {
            defaults: values.clone(),
            values,
            errors: FieldErrors::default(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.values.title,
            FormField::Address => &self.values.address,
            FormField::Fullname => &self.values.fullname,
            FormField::Job => &self.values.job,
            FormField::Email => &self.values.email,
            FormField::Phone => &self.values.phone,
        }
    }

    /// Type into a field. Capped inputs drop characters past their limit.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let mut value = value.into();
        if let Some(max) = field.max_len() {
            value = value.chars().take(max).collect();
        }
        if !value.trim().is_empty() {
            self.errors.0.remove(&field);
        }
        *self.slot(field) = value;
    }

    /// Check that every field is filled.
    ///
    /// On failure the inline errors are replaced with the empty fields.
    pub fn validate(&mut self) -> Result<OfficeBody, FieldErrors> {
        let missing: BTreeSet<FormField> = FormField::ALL
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
            .collect();

        self.errors = FieldErrors(missing);
        if self.errors.is_empty() {
            Ok(self.values.clone())
        } else {
            Err(self.errors.clone())
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Inline error text for `field`, if it failed validation.
    pub fn error(&self, field: FormField) -> Option<&'static str> {
        self.errors.contains(field).then_some(EMPTY_FIELD_ERROR)
    }

    /// Back to the initial values with no errors.
    pub fn reset(&mut self) {
        self.values = self.defaults.clone();
        self.errors = FieldErrors::default();
    }

    fn slot(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Title => &mut self.values.title,
            FormField::Address => &mut self.values.address,
            FormField::Fullname => &mut self.values.fullname,
            FormField::Job => &mut self.values.job,
            FormField::Email => &mut self.values.email,
            FormField::Phone => &mut self.values.phone,
        }
    }

    fn render(&self, heading: &str, button: &str, out: &mut String) -> fmt::Result {
        writeln!(out, "{} [x]", heading)?;
        for field in FormField::ALL {
            if field == FormField::Fullname {
                writeln!(out, "CONTACT INFORMATION")?;
            }
            let value = self.get(field);
            let shown = match (value.is_empty(), field.placeholder()) {
                (true, Some(placeholder)) => format!("<{}>", placeholder),
                _ => value.to_string(),
            };
            writeln!(out, "{} *: {}", field.label(), shown)?;
            if let Some(error) = self.error(field) {
                writeln!(out, "  ! {}", error)?;
            }
        }
        writeln!(out, "[{}]", button)
    }
}

/// The "New Location" form, collapsed behind the add affordance when closed.
#[derive(Debug, Clone, Default)]
pub struct CreateForm {
    open: bool,
    form: OfficeForm,
    saving: bool,
}

impl CreateForm {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Collapse and forget anything typed.
    pub fn close(&mut self) {
        self.open = false;
        self.saving = false;
        self.form.reset();
    }

    /// Whether a submit is in flight.
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub(crate) fn set_saving(&mut self, saving: bool) {
        self.saving = saving;
    }

    pub fn form(&self) -> &OfficeForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut OfficeForm {
        &mut self.form
    }

    pub(crate) fn render(&self, out: &mut String) -> fmt::Result {
        if self.open {
            let button = if self.saving { "Saving..." } else { "Save" };
            self.form.render("New Location", button, out)
        } else {
            writeln!(out, "[Add New Location +]")
        }
    }
}

/// The "Edit Location" form replacing one row of the list.
#[derive(Debug, Clone)]
pub struct EditForm {
    id: String,
    form: OfficeForm,
    saving: bool,
}

impl EditForm {
    /// Form prefilled from `record`.
    pub fn for_record(record: &OfficeRecord) -> Self {
        Self {
            id: record.id.clone(),
            form: OfficeForm::prefilled(record.to_body()),
            saving: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether a submit is in flight.
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub(crate) fn set_saving(&mut self, saving: bool) {
        self.saving = saving;
    }

    pub fn form(&self) -> &OfficeForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut OfficeForm {
        &mut self.form
    }

    pub(crate) fn render(&self, out: &mut String) -> fmt::Result {
        let button = if self.saving { "Saving..." } else { "Save" };
        self.form.render("Edit Location", button, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> OfficeForm {
        let mut form = OfficeForm::new();
        form.set(FormField::Title, "Branch A");
        form.set(FormField::Address, "1 Main St.");
        form.set(FormField::Fullname, "Jane Roe");
        form.set(FormField::Job, "Manager");
        form.set(FormField::Email, "jane@example.com");
        form.set(FormField::Phone, "(808) 555-0100");
        form
    }

    #[test]
    fn test_validate_complete_form() {
        let mut form = filled();

        let body = form.validate().unwrap();

        assert_eq!(body.title, "Branch A");
        assert_eq!(body.phone, "(808) 555-0100");
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_validate_reports_each_empty_field() {
        let mut form = filled();
        form.set(FormField::Job, "");
        form.set(FormField::Email, "   ");

        let errors = form.validate().unwrap_err();

        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec![FormField::Job, FormField::Email]
        );
        assert_eq!(form.error(FormField::Job), Some(EMPTY_FIELD_ERROR));
        assert_eq!(form.error(FormField::Title), None);
    }

    #[test]
    fn test_typing_clears_inline_error() {
        let mut form = OfficeForm::new();
        assert!(form.validate().is_err());
        assert!(form.errors().contains(FormField::Title));

        form.set(FormField::Title, "Branch");

        assert!(!form.errors().contains(FormField::Title));
        assert!(form.errors().contains(FormField::Address));
    }

    #[test]
    fn test_phone_is_capped() {
        let mut form = OfficeForm::new();

        form.set(FormField::Phone, "(808) 555-0100 ext 12");

        assert_eq!(form.get(FormField::Phone), "(808) 555-0100");
    }

    #[test]
    fn test_reset_returns_to_prefill() {
        let record = OfficeRecord::from_body("id-1".to_string(), filled().validate().unwrap());
        let mut edit = EditForm::for_record(&record);
        edit.form_mut().set(FormField::Title, "");
        assert!(edit.form_mut().validate().is_err());

        edit.form_mut().reset();

        assert_eq!(edit.form().get(FormField::Title), "Branch A");
        assert!(edit.form().errors().is_empty());
        assert_eq!(edit.id(), "id-1");
    }

    #[test]
    fn test_create_form_close_discards_input() {
        let mut create = CreateForm::default();
        create.open();
        create.form_mut().set(FormField::Title, "Draft");

        create.close();

        assert!(!create.is_open());
        assert_eq!(create.form().get(FormField::Title), "");
    }

    #[test]
    fn test_create_form_saving_state() {
        let mut create = CreateForm::default();
        create.open();
        create.set_saving(true);

        let mut out = String::new();
        create.render(&mut out).unwrap();
        assert!(out.starts_with("New Location"));
        assert!(out.trim_end().ends_with("[Saving...]"));

        create.close();
        assert!(!create.is_saving());
    }

    #[test]
    fn test_render_shows_errors_and_saving_state() {
        let record = OfficeRecord::from_body("id-1".to_string(), filled().validate().unwrap());
        let mut edit = EditForm::for_record(&record);
        edit.form_mut().set(FormField::Address, "");
        let _ = edit.form_mut().validate();
        edit.set_saving(true);

        let mut out = String::new();
        edit.render(&mut out).unwrap();

        assert!(out.starts_with("Edit Location [x]"));
        assert!(out.contains("Enter the address *: \n  ! This field cannot be empty"));
        assert!(out.contains("CONTACT INFORMATION"));
        assert!(out.trim_end().ends_with("[Saving...]"));
    }
}
