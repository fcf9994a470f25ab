use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use phonebook_core::domain::{Contact, ContactId, Field};
use phonebook_core::filter::ContactFilter;
use phonebook_core::form::{ContactForm, FormOptions};
use phonebook_core::schema::ContactSchema;

use crate::actions::Action;

const LIST_EMPTY: &str = "No contacts yet. Fill in the form above to add one.";
const LIST_NO_MATCH: &str = "No contacts match the filter.";

#[derive(Debug, Clone)]
pub enum Mode {
    Form,
    List,
    FilterEditing,
    Confirm(ConfirmState),
    Notice(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Name,
    Number,
    Submit,
}

impl FormFocus {
    pub fn field(self) -> Option<Field> {
        match self {
            FormFocus::Name => Some(Field::Name),
            FormFocus::Number => Some(Field::Number),
            FormFocus::Submit => None,
        }
    }

    fn next(self) -> Self {
        match self {
            FormFocus::Name => FormFocus::Number,
            FormFocus::Number => FormFocus::Submit,
            FormFocus::Submit => FormFocus::Name,
        }
    }

    fn prev(self) -> Self {
        match self {
            FormFocus::Name => FormFocus::Submit,
            FormFocus::Number => FormFocus::Name,
            FormFocus::Submit => FormFocus::Number,
        }
    }
}

#[derive(Debug, Clone)]
pub struct App {
    pub mode: Mode,
    pub show_help: bool,
    pub should_quit: bool,
    pub form: ContactForm,
    pub form_focus: FormFocus,
    pub filter_input: String,
    pub filter: ContactFilter,
    pub contacts: Vec<Contact>,
    pub total_contacts: usize,
    pub selected: usize,
    pub status: Option<String>,
    pub error: Option<String>,
    actions: VecDeque<Action>,
    pub(crate) pending_select: Option<ContactId>,
}

impl App {
    pub fn new(form_options: FormOptions) -> Self {
        let mut app = Self {
            mode: Mode::Form,
            show_help: false,
            should_quit: false,
            form: ContactForm::new(ContactSchema::standard(), form_options),
            form_focus: FormFocus::Name,
            filter_input: String::new(),
            filter: ContactFilter::default(),
            contacts: Vec::new(),
            total_contacts: 0,
            selected: 0,
            status: None,
            error: None,
            actions: VecDeque::new(),
            pending_select: None,
        };
        app.enqueue(Action::LoadList);
        app
    }

    pub fn enqueue(&mut self, action: Action) {
        self.actions.push_back(action);
    }

    pub fn next_action(&mut self) -> Option<Action> {
        self.actions.pop_front()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn selected_contact(&self) -> Option<&Contact> {
        self.contacts.get(self.selected)
    }

    pub fn apply_list(&mut self, items: Vec<Contact>, total: usize) {
        self.contacts = items;
        self.total_contacts = total;
        if let Some(target) = self.pending_select.take() {
            if let Some(pos) = self.contacts.iter().position(|item| item.id == target) {
                self.selected = pos;
            }
        }
        if self.selected >= self.contacts.len() {
            self.selected = self.contacts.len().saturating_sub(1);
        }
    }

    pub fn empty_hint(&self) -> &'static str {
        if self.total_contacts == 0 {
            LIST_EMPTY
        } else {
            LIST_NO_MATCH
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press && key.kind != KeyEventKind::Repeat {
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.show_help = false;
            }
            return;
        }

        if matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        ) {
            self.should_quit = true;
            return;
        }

        let mut mode = std::mem::replace(&mut self.mode, Mode::Form);
        match &mut mode {
            Mode::Form => {
                if let Some(next) = self.handle_form_key(key) {
                    mode = next;
                }
            }
            Mode::List => {
                if let Some(next) = self.handle_list_key(key) {
                    mode = next;
                }
            }
            Mode::FilterEditing => {
                if let Some(next) = self.handle_filter_key(key) {
                    mode = next;
                }
            }
            Mode::Confirm(state) => {
                if let Some(next) = self.handle_confirm_key(state, key) {
                    mode = next;
                }
            }
            Mode::Notice(_) => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                    mode = Mode::Form;
                }
            }
        }
        self.mode = mode;
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Option<Mode> {
        match key.code {
            KeyCode::Esc => {
                self.blur_focused_field();
                return Some(Mode::List);
            }
            KeyCode::Tab | KeyCode::Down => self.move_form_focus(true),
            KeyCode::BackTab | KeyCode::Up => self.move_form_focus(false),
            KeyCode::Enter => {
                if self.form_focus == FormFocus::Submit {
                    self.enqueue(Action::SubmitContact);
                } else {
                    self.move_form_focus(true);
                }
            }
            _ => {
                if let Some(field) = self.form_focus.field() {
                    let mut value = self.form.value(field).to_string();
                    if apply_text_input(&mut value, key) {
                        self.form.set_value(field, value);
                    }
                }
            }
        }
        None
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Option<Mode> {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::PageDown => self.move_selection(5),
            KeyCode::PageUp => self.move_selection(-5),
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => {
                if !self.contacts.is_empty() {
                    self.selected = self.contacts.len() - 1;
                }
            }
            KeyCode::Char('/') => return Some(Mode::FilterEditing),
            KeyCode::Char('c') => {
                self.filter_input.clear();
                self.filter = ContactFilter::default();
                self.enqueue(Action::LoadList);
            }
            KeyCode::Char('a') | KeyCode::Tab | KeyCode::Esc => {
                self.form_focus = FormFocus::Name;
                return Some(Mode::Form);
            }
            KeyCode::Char('d') => {
                if let Some(contact) = self.selected_contact() {
                    let message = format!("Delete {}? (y/n)", contact.name);
                    let action = Action::DeleteContact(contact.id);
                    return Some(Mode::Confirm(ConfirmState::new(message, action)));
                }
            }
            _ => {}
        }
        None
    }

    fn handle_filter_key(&mut self, key: KeyEvent) -> Option<Mode> {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => return Some(Mode::List),
            _ => {
                if apply_text_input(&mut self.filter_input, key) {
                    self.filter = ContactFilter::new(&self.filter_input);
                    self.enqueue(Action::LoadList);
                }
            }
        }
        None
    }

    fn handle_confirm_key(&mut self, state: &mut ConfirmState, key: KeyEvent) -> Option<Mode> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.enqueue(state.action.clone());
                Some(Mode::List)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Mode::List),
            _ => None,
        }
    }

    fn move_form_focus(&mut self, forward: bool) {
        self.blur_focused_field();
        self.form_focus = if forward {
            self.form_focus.next()
        } else {
            self.form_focus.prev()
        };
    }

    fn blur_focused_field(&mut self) {
        if let Some(field) = self.form_focus.field() {
            self.form.blur(field);
        }
    }

    fn move_selection(&mut self, delta: i32) {
        if self.contacts.is_empty() {
            self.selected = 0;
            return;
        }
        let len = self.contacts.len() as i32;
        let next = (self.selected as i32 + delta).clamp(0, len - 1);
        self.selected = next as usize;
    }
}

/// Applies an editing key to `target`. Returns whether the text changed.
fn apply_text_input(target: &mut String, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let changed = !target.is_empty();
            target.clear();
            changed
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let before = target.len();
            delete_last_word(target);
            target.len() != before
        }
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return false;
            }
            target.push(ch);
            true
        }
        KeyCode::Backspace => target.pop().is_some(),
        _ => false,
    }
}

fn delete_last_word(value: &mut String) {
    while value.ends_with(|ch: char| ch.is_whitespace()) {
        value.pop();
    }
    while value.ends_with(|ch: char| !ch.is_whitespace()) {
        value.pop();
    }
}

#[derive(Debug, Clone)]
pub struct ConfirmState {
    pub message: String,
    pub action: Action,
}

impl ConfirmState {
    pub fn new(message: String, action: Action) -> Self {
        Self { message, action }
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_text_input, App, FormFocus, Mode};
    use crate::actions::Action;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use phonebook_core::domain::{Contact, ContactDraft, ContactId, Field};
    use phonebook_core::form::FormOptions;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(key(KeyCode::Char(ch)));
        }
    }

    fn drain(app: &mut App) -> Vec<Action> {
        std::iter::from_fn(|| app.next_action()).collect()
    }

    fn contact(name: &str) -> Contact {
        Contact::from_draft(ContactId::new(), &ContactDraft::new(name, "555-1234"))
    }

    #[test]
    fn typing_fills_focused_field_and_tab_blurs_it() {
        let mut app = App::new(FormOptions::default());
        drain(&mut app);
        type_text(&mut app, "Al");
        assert_eq!(app.form.value(Field::Name), "Al");
        assert!(app.form.visible_error(Field::Name).is_none());

        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.form_focus, FormFocus::Number);
        assert_eq!(
            app.form.visible_error(Field::Name).map(|err| err.message),
            Some("Too Short!")
        );

        type_text(&mut app, "qj");
        assert_eq!(app.form.value(Field::Number), "qj");
        assert!(!app.should_quit);
    }

    #[test]
    fn enter_on_submit_button_queues_submit() {
        let mut app = App::new(FormOptions::default());
        drain(&mut app);
        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.form_focus, FormFocus::Submit);
        app.handle_key(key(KeyCode::Enter));
        assert!(matches!(drain(&mut app).as_slice(), [Action::SubmitContact]));
    }

    #[test]
    fn notice_is_dismissed_back_to_form() {
        let mut app = App::new(FormOptions::default());
        app.mode = Mode::Notice("Anna Lee is already in contacts.".to_string());
        app.handle_key(key(KeyCode::Char('x')));
        assert!(matches!(app.mode, Mode::Notice(_)));
        app.handle_key(key(KeyCode::Enter));
        assert!(matches!(app.mode, Mode::Form));
    }

    #[test]
    fn list_delete_requires_confirmation() {
        let mut app = App::new(FormOptions::default());
        drain(&mut app);
        let first = contact("Rosie Simpson");
        let second = contact("Eden Clements");
        let second_id = second.id;
        app.apply_list(vec![first, second], 2);
        app.mode = Mode::List;

        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Char('d')));
        assert!(matches!(app.mode, Mode::Confirm(_)));
        app.handle_key(key(KeyCode::Char('y')));
        assert!(matches!(app.mode, Mode::List));
        match drain(&mut app).as_slice() {
            [Action::DeleteContact(id)] => assert_eq!(*id, second_id),
            other => panic!("unexpected actions: {other:?}"),
        }
    }

    #[test]
    fn filter_editing_updates_filter_live() {
        let mut app = App::new(FormOptions::default());
        drain(&mut app);
        app.mode = Mode::List;
        app.handle_key(key(KeyCode::Char('/')));
        type_text(&mut app, "Ro");
        assert_eq!(app.filter.as_str(), "ro");
        assert_eq!(drain(&mut app).len(), 2);
        app.handle_key(key(KeyCode::Enter));
        assert!(matches!(app.mode, Mode::List));
    }

    #[test]
    fn q_quits_only_outside_text_entry() {
        let mut app = App::new(FormOptions::default());
        app.handle_key(key(KeyCode::Char('q')));
        assert!(!app.should_quit);
        app.handle_key(key(KeyCode::Esc));
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn text_input_handles_editing_shortcuts() {
        let mut value = "Jo Ann".to_string();
        assert!(apply_text_input(
            &mut value,
            KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL)
        ));
        assert_eq!(value, "Jo ");
        assert!(apply_text_input(&mut value, key(KeyCode::Backspace)));
        assert_eq!(value, "Jo");
        assert!(apply_text_input(
            &mut value,
            KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)
        ));
        assert!(value.is_empty());
        assert!(!apply_text_input(&mut value, key(KeyCode::Backspace)));
    }

    #[test]
    fn apply_list_keeps_selection_in_bounds() {
        let mut app = App::new(FormOptions::default());
        app.apply_list(vec![contact("Ann"), contact("Bob")], 2);
        app.selected = 1;
        app.apply_list(vec![contact("Ann")], 2);
        assert_eq!(app.selected, 0);
        app.apply_list(Vec::new(), 2);
        assert_eq!(app.empty_hint(), super::LIST_NO_MATCH);
    }
}
