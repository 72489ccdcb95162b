use tracing::debug;

use crate::data::Choice;
use crate::models::{AppState, Field, Item, Shape};
use crate::session::{Answers, Grade, Position, Prompt, Session, Status, Submission};
use crate::speech::{Locale, Speaker};

/// Message shown under the answer fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect,
    /// The item was answered before; the stored answer is shown.
    AlreadyAnswered,
}

pub struct App {
    pub state: AppState,
    session: Session,
    speaker: Box<dyn Speaker>,
    auto_speak: bool,
    source_label: String,
    prompt: Option<Prompt>,
    inputs: Answers,
    focus: usize,
    grade: Option<Grade>,
    feedback: Option<Feedback>,
    goto_input: Option<String>,
    result_scroll: usize,
    choices: Vec<Choice>,
    selected_choice: usize,
    pending_load: Option<Choice>,
    status: Option<String>,
}

impl App {
    pub fn new(session: Session, speaker: Box<dyn Speaker>, source_label: impl Into<String>) -> Self {
        Self {
            state: AppState::Welcome,
            session,
            speaker,
            auto_speak: false,
            source_label: source_label.into(),
            prompt: None,
            inputs: Answers::new(),
            focus: 0,
            grade: None,
            feedback: None,
            goto_input: None,
            result_scroll: 0,
            choices: Vec::new(),
            selected_choice: 0,
            pending_load: None,
            status: None,
        }
    }

    /// Item sets offered on the welcome screen. The one already loaded is
    /// highlighted when it is among them.
    pub fn with_choices(mut self, choices: Vec<Choice>) -> Self {
        self.selected_choice = choices
            .iter()
            .position(|choice| choice.label == self.source_label)
            .unwrap_or(0);
        self.choices = choices;
        self
    }

    pub fn with_auto_speak(mut self, auto_speak: bool) -> Self {
        self.auto_speak = auto_speak;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn source_label(&self) -> &str {
        &self.source_label
    }

    pub fn shape(&self) -> Shape {
        self.session.items().shape()
    }

    pub fn total_items(&self) -> usize {
        self.session.len()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.session.current_index()
    }

    pub fn current_item_number(&self) -> usize {
        self.current_index().map_or(self.total_items(), |index| index + 1)
    }

    pub fn current_item(&self) -> Option<&Item> {
        self.session.current_item()
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    pub fn input(&self, field: Field) -> &str {
        self.inputs.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn focused_field(&self) -> Option<Field> {
        self.prompt.as_ref()?.fields.get(self.focus).copied()
    }

    pub fn grade(&self) -> Option<&Grade> {
        self.grade.as_ref()
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn statuses(&self) -> &[Status] {
        self.session.statuses()
    }

    pub fn score(&self) -> usize {
        self.session.score()
    }

    pub fn percentage_score(&self) -> u32 {
        self.session.percentage_score()
    }

    pub fn is_last(&self) -> bool {
        self.session.is_last()
    }

    pub fn goto_input(&self) -> Option<&str> {
        self.goto_input.as_deref()
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn selected_choice(&self) -> usize {
        self.selected_choice
    }

    /// Loading progress or the last load failure, shown on the welcome screen.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Answered items are shown read-only.
    pub fn is_locked(&self) -> bool {
        self.current_index()
            .is_some_and(|index| self.session.is_answered(index))
    }

    pub fn start_quiz(&mut self) {
        self.state = AppState::Quiz;
        self.load_item();
    }

    /// Refresh the prompt and inputs for the current position.
    fn load_item(&mut self) {
        if self.session.is_finished() {
            self.state = AppState::Result;
            self.result_scroll = 0;
            self.prompt = None;
            return;
        }

        self.prompt = self.session.prompt();
        self.focus = 0;
        self.goto_input = None;

        let stored = self.current_index().and_then(|index| {
            let record = self.session.state().record(index)?.values.clone();
            Some((record, self.session.stored_grade(index)?))
        });

        match stored {
            Some((values, grade)) => {
                self.inputs = values;
                self.grade = Some(grade);
                self.feedback = Some(Feedback::AlreadyAnswered);
            }
            None => {
                self.inputs.clear();
                self.grade = None;
                self.feedback = None;
                if self.auto_speak {
                    self.speak_prompt();
                }
            }
        }

        debug!(index = ?self.current_index(), locked = self.is_locked(), "showing item");
    }

    pub fn input_char(&mut self, c: char) {
        if self.is_locked() {
            return;
        }
        if let Some(field) = self.focused_field() {
            self.inputs.entry(field).or_default().push(c);
        }
    }

    pub fn delete_char(&mut self) {
        if self.is_locked() {
            return;
        }
        if let Some(field) = self.focused_field() {
            if let Some(value) = self.inputs.get_mut(&field) {
                value.pop();
            }
        }
    }

    pub fn focus_next(&mut self) {
        let count = self.prompt.as_ref().map_or(0, |prompt| prompt.fields.len());
        if count > 0 {
            self.focus = (self.focus + 1) % count;
        }
    }

    pub fn focus_previous(&mut self) {
        let count = self.prompt.as_ref().map_or(0, |prompt| prompt.fields.len());
        if count > 0 {
            self.focus = (self.focus + count - 1) % count;
        }
    }

    pub fn check_answer(&mut self) {
        match self.session.submit(self.inputs.clone()) {
            Submission::Graded(grade) => {
                self.feedback = Some(if grade.correct {
                    Feedback::Correct
                } else {
                    Feedback::Incorrect
                });
                self.grade = Some(grade);
            }
            Submission::Replay(grade) => {
                self.grade = Some(grade);
                self.feedback = Some(Feedback::AlreadyAnswered);
            }
            Submission::NotInSession => {}
        }
    }

    /// Move on; past the last item this shows the results.
    pub fn next(&mut self) {
        self.session.next();
        self.load_item();
    }

    pub fn previous(&mut self) {
        if let Position::InSession(index) = self.session.position() {
            if index > 0 {
                self.session.previous();
                self.load_item();
            }
        }
    }

    pub fn jump_to(&mut self, index: usize) {
        if index < self.total_items() {
            self.session.jump_to(index);
            self.state = AppState::Quiz;
            self.load_item();
        }
    }

    pub fn begin_goto(&mut self) {
        self.goto_input = Some(String::new());
    }

    pub fn goto_push(&mut self, c: char) {
        if let Some(input) = &mut self.goto_input {
            if c.is_ascii_digit() && input.len() < 6 {
                input.push(c);
            }
        }
    }

    pub fn goto_pop(&mut self) {
        if let Some(input) = &mut self.goto_input {
            input.pop();
        }
    }

    pub fn cancel_goto(&mut self) {
        self.goto_input = None;
    }

    /// Jump to the 1-based item number typed after Ctrl-G.
    pub fn commit_goto(&mut self) {
        let target = self
            .goto_input
            .take()
            .and_then(|input| input.parse::<usize>().ok())
            .and_then(|number| number.checked_sub(1));

        if let Some(index) = target {
            self.jump_to(index);
        }
    }

    pub fn speak_prompt(&mut self) {
        if let Some(text) = self.prompt.as_ref().and_then(|prompt| prompt.speech.clone()) {
            self.speaker.speak(&text, Locale::EnUs);
        }
    }

    /// Speak the correct value of the focused field. Before the item is
    /// answered only the prompt side may be heard, so nothing is given away.
    pub fn speak_focused_field(&mut self) {
        if !self.is_locked() {
            return;
        }
        let Some(field) = self.focused_field() else {
            return;
        };
        let Some(text) = self.current_item().map(|item| item.ground_truth(field).to_string()) else {
            return;
        };
        if !text.trim().is_empty() {
            self.speaker.speak(&text, Locale::for_field(field));
        }
    }

    pub fn restart(&mut self) {
        self.session.restart();
        self.state = AppState::Quiz;
        self.load_item();
    }

    pub fn scroll_results_down(&mut self) {
        let max_scroll = self.total_items().saturating_sub(1);
        self.result_scroll = (self.result_scroll + 1).min(max_scroll);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    /// Back to the welcome screen. The session is kept and `start_quiz`
    /// resumes it.
    pub fn open_menu(&mut self) {
        self.goto_input = None;
        self.state = AppState::Welcome;
    }

    pub fn select_next_choice(&mut self) {
        let last = self.choices.len().saturating_sub(1);
        self.selected_choice = (self.selected_choice + 1).min(last);
    }

    pub fn select_previous_choice(&mut self) {
        self.selected_choice = self.selected_choice.saturating_sub(1);
    }

    /// Ask for the highlighted item set. The event loop picks the request
    /// up with `take_pending_load`.
    pub fn request_selected_choice(&mut self) {
        if let Some(choice) = self.choices.get(self.selected_choice) {
            self.status = Some(format!("Loading {}…", choice.label));
            self.pending_load = Some(choice.clone());
        }
    }

    pub fn take_pending_load(&mut self) -> Option<Choice> {
        self.pending_load.take()
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    /// Swap in a freshly loaded session and go back to the welcome screen.
    pub fn replace_session(&mut self, session: Session, source_label: impl Into<String>) {
        self.session = session;
        self.source_label = source_label.into();
        self.state = AppState::Welcome;
        self.prompt = None;
        self.inputs.clear();
        self.focus = 0;
        self.grade = None;
        self.feedback = None;
        self.goto_input = None;
        self.result_scroll = 0;
        self.status = None;
    }
}
