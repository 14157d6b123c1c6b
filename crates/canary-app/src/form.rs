//! Test case form state (create and edit modal)

use canary_core::{TestCase, TestCaseDraft, TestCaseId};

/// Form fields in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Description,
    InputPrompt,
    ExpectedBehavior,
    Category,
    Status,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Name,
        FormField::Description,
        FormField::InputPrompt,
        FormField::ExpectedBehavior,
        FormField::Category,
        FormField::Status,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Description => "Description",
            FormField::InputPrompt => "Input Prompt",
            FormField::ExpectedBehavior => "Expected Behavior",
            FormField::Category => "Category",
            FormField::Status => "Status",
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(
            self,
            FormField::Name | FormField::InputPrompt | FormField::ExpectedBehavior
        )
    }

    /// Free-text field (as opposed to a selector)
    pub fn is_text(&self) -> bool {
        !matches!(self, FormField::Category | FormField::Status)
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            FormField::Name => "e.g., factual_accuracy_test",
            FormField::Description => "Describe what this test case validates...",
            FormField::InputPrompt => "The prompt that will be sent to the LLM...",
            FormField::ExpectedBehavior => "Describe the expected output behavior...",
            FormField::Category | FormField::Status => "",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.label() == label)
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }
}

/// Whether the form creates a new record or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(TestCaseId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TestCaseForm {
    pub mode: FormMode,
    pub draft: TestCaseDraft,
    pub focus: FormField,
    /// Validation or save error shown under the fields
    pub error: Option<String>,
    /// A save request is in flight
    pub submitting: bool,
}

impl Default for TestCaseForm {
    fn default() -> Self {
        Self::create()
    }
}

impl TestCaseForm {
    /// Empty form with `factual` / active defaults
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            draft: TestCaseDraft::default(),
            focus: FormField::Name,
            error: None,
            submitting: false,
        }
    }

    /// Form pre-populated from an existing record
    pub fn edit(case: &TestCase) -> Self {
        Self {
            mode: FormMode::Edit(case.id),
            draft: TestCaseDraft::from_case(case),
            focus: FormField::Name,
            error: None,
            submitting: false,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add Test Case",
            FormMode::Edit(_) => "Edit Test Case",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Create",
            FormMode::Edit(_) => "Update",
        }
    }

    pub fn focus_next(&mut self) {
        let idx = (self.focus.index() + 1) % FormField::ALL.len();
        self.focus = FormField::ALL[idx];
    }

    pub fn focus_prev(&mut self) {
        let len = FormField::ALL.len();
        let idx = (self.focus.index() + len - 1) % len;
        self.focus = FormField::ALL[idx];
    }

    pub fn is_last_field(&self) -> bool {
        self.focus == FormField::Status
    }

    /// Display text for a field
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.draft.name,
            FormField::Description => &self.draft.description,
            FormField::InputPrompt => &self.draft.input_prompt,
            FormField::ExpectedBehavior => &self.draft.expected_behavior,
            FormField::Category => self.draft.category.label(),
            FormField::Status => {
                if self.draft.is_active {
                    "Active"
                } else {
                    "Inactive"
                }
            }
        }
    }

    fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Name => Some(&mut self.draft.name),
            FormField::Description => Some(&mut self.draft.description),
            FormField::InputPrompt => Some(&mut self.draft.input_prompt),
            FormField::ExpectedBehavior => Some(&mut self.draft.expected_behavior),
            FormField::Category | FormField::Status => None,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        let focus = self.focus;
        if let Some(text) = self.text_mut(focus) {
            text.push(c);
            self.error = None;
        }
    }

    pub fn backspace(&mut self) {
        let focus = self.focus;
        if let Some(text) = self.text_mut(focus) {
            text.pop();
        }
    }

    pub fn clear_field(&mut self) {
        let focus = self.focus;
        if let Some(text) = self.text_mut(focus) {
            text.clear();
        }
    }

    /// Cycle the focused selector (category or status)
    pub fn cycle_option(&mut self, forward: bool) {
        match self.focus {
            FormField::Category => {
                self.draft.category = if forward {
                    self.draft.category.next()
                } else {
                    self.draft.category.prev()
                };
            }
            FormField::Status => self.draft.is_active = !self.draft.is_active,
            _ => {}
        }
    }

    /// Check required fields. On failure the first missing field is
    /// focused and the error is recorded on the form.
    pub fn validate(&mut self) -> bool {
        match self.draft.validate() {
            Ok(()) => {
                self.error = None;
                true
            }
            Err(e) => {
                if let Some(field) = self
                    .draft
                    .missing_fields()
                    .first()
                    .and_then(|label| FormField::from_label(label))
                {
                    self.focus = field;
                }
                self.error = Some(e.to_string());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canary_api::test_utils::test_case;
    use canary_core::Category;

    #[test]
    fn test_create_defaults() {
        let form = TestCaseForm::create();
        assert_eq!(form.mode, FormMode::Create);
        assert_eq!(form.draft.category, Category::Factual);
        assert!(form.draft.is_active);
        assert_eq!(form.focus, FormField::Name);
        assert_eq!(form.title(), "Add Test Case");
    }

    #[test]
    fn test_edit_prepopulates() {
        let case = test_case(3, "Existing");
        let form = TestCaseForm::edit(&case);
        assert_eq!(form.mode, FormMode::Edit(case.id));
        assert_eq!(form.draft.name, "Existing");
        assert_eq!(form.draft.input_prompt, case.input_prompt);
        assert_eq!(form.title(), "Edit Test Case");
        assert_eq!(form.submit_label(), "Update");
    }

    #[test]
    fn test_typing_goes_to_focused_text_field() {
        let mut form = TestCaseForm::create();
        form.insert_char('h');
        form.insert_char('i');
        form.focus_next();
        form.insert_char('d');
        assert_eq!(form.draft.name, "hi");
        assert_eq!(form.draft.description, "d");

        form.backspace();
        assert_eq!(form.draft.description, "");
    }

    #[test]
    fn test_selectors_ignore_typing_and_cycle() {
        let mut form = TestCaseForm::create();
        form.focus = FormField::Category;
        form.insert_char('x');
        assert_eq!(form.draft.name, "");

        form.cycle_option(true);
        assert_eq!(form.draft.category, Category::Creative);
        form.cycle_option(false);
        form.cycle_option(false);
        assert_eq!(form.draft.category, Category::Other);

        form.focus = FormField::Status;
        form.cycle_option(true);
        assert!(!form.draft.is_active);
        assert_eq!(form.value(FormField::Status), "Inactive");
    }

    #[test]
    fn test_focus_wraps() {
        let mut form = TestCaseForm::create();
        form.focus_prev();
        assert_eq!(form.focus, FormField::Status);
        assert!(form.is_last_field());
        form.focus_next();
        assert_eq!(form.focus, FormField::Name);
    }

    #[test]
    fn test_validate_focuses_first_missing_field() {
        let mut form = TestCaseForm::create();
        form.draft.name = "n".into();
        form.focus = FormField::Status;

        assert!(!form.validate());
        assert_eq!(form.focus, FormField::InputPrompt);
        assert_eq!(form.error.as_deref(), Some("Input Prompt is required"));

        form.draft.input_prompt = "p".into();
        form.draft.expected_behavior = "e".into();
        assert!(form.validate());
        assert!(form.error.is_none());
    }
}
