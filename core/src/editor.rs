//! Create/edit workflow for a single person.
//!
//! # Design
//! `PersonEditor` is a state machine that never performs I/O on its own.
//! `open` and `begin_submit` tell the host what to fetch or send, and
//! `finish_load` / `finish_submit` consume the outcome, so the host may run
//! the call however it likes. `load` and `submit` are drivers for hosts that
//! simply block on a `PersonService`.
//!
//! ```text
//! Idle -> Loading (edit only) -> Ready -> Submitting -> Success
//!                                  ^                 \-> Failed
//!                                  \---------------------/
//! ```

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::error::ApiError;
use crate::http::Transport;
use crate::notice::{Notice, NoticeKind};
use crate::refresh::RefreshSignal;
use crate::service::PersonService;
use crate::types::{CreatePerson, Person, PersonId, UpdatePerson};
use crate::validation::{validate_field, validate_form, Field, FieldError, FormErrors, PersonDraft};

/// How long a host may keep the success notice visible before calling
/// `settle`. Purely advisory; the editor does not sleep.
pub const SETTLE_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Create,
    Edit(PersonId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Idle,
    Loading,
    Ready,
    Submitting,
    Success,
    Failed,
}

impl fmt::Display for EditorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EditorState::Idle => "idle",
            EditorState::Loading => "loading",
            EditorState::Ready => "ready",
            EditorState::Submitting => "submitting",
            EditorState::Success => "success",
            EditorState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// What `open` asks the host to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenStep {
    Load(PersonId),
    Ready,
}

/// The write `begin_submit` asks the host to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(CreatePerson),
    Update(PersonId, UpdatePerson),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    ToList,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("editor is busy ({0})")]
    Busy(EditorState),

    #[error("form has invalid fields")]
    Invalid(FormErrors),

    #[error("cannot {action} while {from}")]
    InvalidTransition { from: EditorState, action: &'static str },
}

#[derive(Debug)]
pub struct PersonEditor {
    mode: Mode,
    state: EditorState,
    draft: PersonDraft,
    touched: HashSet<Field>,
    errors: FormErrors,
    notice: Option<Notice>,
    saved: Option<Person>,
    refresh: RefreshSignal,
}

impl PersonEditor {
    pub fn new(mode: Mode, refresh: RefreshSignal) -> Self {
        Self {
            mode,
            state: EditorState::Idle,
            draft: PersonDraft::default(),
            touched: HashSet::new(),
            errors: FormErrors::default(),
            notice: None,
            saved: None,
            refresh,
        }
    }

    pub fn for_create(refresh: RefreshSignal) -> Self {
        Self::new(Mode::Create, refresh)
    }

    pub fn for_edit(id: PersonId, refresh: RefreshSignal) -> Self {
        Self::new(Mode::Edit(id), refresh)
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, Mode::Edit(_))
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn draft(&self) -> &PersonDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// The person returned by the last successful submit.
    pub fn saved(&self) -> Option<&Person> {
        self.saved.as_ref()
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    /// The error to display next to `field`; untouched fields show nothing.
    pub fn visible_error(&self, field: Field) -> Option<FieldError> {
        if self.is_touched(field) {
            self.errors.get(field)
        } else {
            None
        }
    }

    /// Submit controls are disabled while anything is in flight.
    pub fn can_submit(&self) -> bool {
        matches!(self.state, EditorState::Ready | EditorState::Failed)
    }

    pub fn open(&mut self) -> Result<OpenStep, EditorError> {
        if self.state != EditorState::Idle {
            return Err(self.invalid("open"));
        }
        match &self.mode {
            Mode::Create => {
                self.state = EditorState::Ready;
                Ok(OpenStep::Ready)
            }
            Mode::Edit(id) => {
                let id = id.clone();
                self.state = EditorState::Loading;
                Ok(OpenStep::Load(id))
            }
        }
    }

    /// A failed load leaves the form usable with empty fields.
    pub fn finish_load(&mut self, result: Result<Person, ApiError>) -> Result<(), EditorError> {
        if self.state != EditorState::Loading {
            return Err(self.invalid("finish loading"));
        }
        match result {
            Ok(person) => {
                self.draft = PersonDraft::new(person.name, person.email);
            }
            Err(e) => {
                log::error!("error loading person: {e}");
                self.notice = Some(Notice::new(NoticeKind::LoadFailed));
            }
        }
        self.state = EditorState::Ready;
        Ok(())
    }

    pub fn change(&mut self, field: Field, value: impl Into<String>) -> Result<(), EditorError> {
        self.ensure_editable("edit")?;
        self.draft.set(field, value.into());
        if self.is_touched(field) {
            self.revalidate(field);
        }
        Ok(())
    }

    pub fn blur(&mut self, field: Field) -> Result<(), EditorError> {
        self.ensure_editable("leave a field")?;
        self.touched.insert(field);
        self.revalidate(field);
        Ok(())
    }

    /// Validate every field and, if all pass, move to `Submitting`.
    ///
    /// Invalid drafts never leave this method, so no request is built for them.
    pub fn begin_submit(&mut self) -> Result<Submission, EditorError> {
        self.ensure_editable("submit")?;
        self.touched.extend(Field::ALL);
        self.errors = validate_form(&self.draft);
        if !self.errors.is_valid() {
            return Err(EditorError::Invalid(self.errors));
        }
        self.state = EditorState::Submitting;
        let submission = match &self.mode {
            Mode::Create => Submission::Create(CreatePerson {
                name: self.draft.name.clone(),
                email: self.draft.email.clone(),
            }),
            Mode::Edit(id) => Submission::Update(
                id.clone(),
                UpdatePerson::replace(self.draft.name.clone(), self.draft.email.clone()),
            ),
        };
        Ok(submission)
    }

    /// Record the write's outcome. On success observers are told to refresh.
    pub fn finish_submit(&mut self, result: Result<Person, ApiError>) -> Result<(), EditorError> {
        if self.state != EditorState::Submitting {
            return Err(self.invalid("finish submitting"));
        }
        let editing = self.is_edit();
        match result {
            Ok(person) => {
                log::info!("saved person {}", person.id);
                self.saved = Some(person);
                self.state = EditorState::Success;
                self.notice = Some(Notice::new(if editing { NoticeKind::Updated } else { NoticeKind::Created }));
                self.refresh.notify();
            }
            Err(e) => {
                log::error!("error saving person: {e}");
                self.state = EditorState::Failed;
                self.notice = Some(Notice::new(if editing {
                    NoticeKind::UpdateFailed
                } else {
                    NoticeKind::CreateFailed
                }));
            }
        }
        Ok(())
    }

    /// Leave the form after a successful save, once the host has shown the
    /// success notice for as long as it wants.
    pub fn settle(&mut self) -> Result<Navigation, EditorError> {
        if self.state != EditorState::Success {
            return Err(self.invalid("settle"));
        }
        Ok(Navigation::ToList)
    }

    pub fn cancel(&self) -> Result<Navigation, EditorError> {
        if self.state == EditorState::Submitting {
            return Err(EditorError::Busy(self.state));
        }
        Ok(Navigation::ToList)
    }

    /// `open` plus the load it asks for, executed on `service`.
    pub fn load<T: Transport>(&mut self, service: &PersonService<T>) -> Result<(), EditorError> {
        match self.open()? {
            OpenStep::Load(id) => self.finish_load(service.get_by_id(&id)),
            OpenStep::Ready => Ok(()),
        }
    }

    /// `begin_submit` plus the write it asks for, executed on `service`.
    ///
    /// A remote failure is not an `Err` here: it leaves the editor `Failed`
    /// with a notice, and the draft intact for another attempt.
    pub fn submit<T: Transport>(&mut self, service: &PersonService<T>) -> Result<(), EditorError> {
        let result = match self.begin_submit()? {
            Submission::Create(input) => service.create(&input),
            Submission::Update(id, input) => service.update(&id, &input),
        };
        self.finish_submit(result)
    }

    fn revalidate(&mut self, field: Field) {
        let error = validate_field(field, self.draft.get(field)).err();
        self.errors.set(field, error);
    }

    /// Gate for user edits. Touching a failed form makes it `Ready` again.
    fn ensure_editable(&mut self, action: &'static str) -> Result<(), EditorError> {
        match self.state {
            EditorState::Ready => Ok(()),
            EditorState::Failed => {
                self.state = EditorState::Ready;
                Ok(())
            }
            EditorState::Loading | EditorState::Submitting => Err(EditorError::Busy(self.state)),
            EditorState::Idle | EditorState::Success => Err(self.invalid(action)),
        }
    }

    fn invalid(&self, action: &'static str) -> EditorError {
        EditorError::InvalidTransition {
            from: self.state,
            action,
        }
    }
}
