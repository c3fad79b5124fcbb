//! Terminal front-end for the list and editor workflows.
//!
//! Each command returns `Ok(false)` when the workflow reported a failure to
//! the user, and `Err` only for problems the workflows do not model.

use std::io::{self, BufRead, Write};

use person_core::{
    ClientConfig, EditorError, Field, Locale, Notice, NoticeKind, Person, PersonClient, PersonEditor, PersonId,
    PersonList, PersonService, RefreshSignal, Transport,
};

use crate::transport::UreqTransport;

pub struct App<T> {
    service: PersonService<T>,
    locale: Locale,
    refresh: RefreshSignal,
}

impl App<UreqTransport> {
    pub fn new(config: ClientConfig, locale: Locale) -> Self {
        Self::with_transport(config, UreqTransport::new(), locale)
    }
}

impl<T: Transport> App<T> {
    pub fn with_transport(config: ClientConfig, transport: T, locale: Locale) -> Self {
        Self {
            service: PersonService::new(PersonClient::new(config), transport),
            locale,
            refresh: RefreshSignal::new(),
        }
    }

    pub fn list(&self) -> anyhow::Result<bool> {
        let mut list = PersonList::new(self.refresh.clone());
        list.reload(&self.service)?;
        if let Some(notice) = list.notice() {
            self.print_notice(notice);
            return Ok(false);
        }
        print_table(list.persons());
        Ok(true)
    }

    pub fn get(&self, id: PersonId) -> anyhow::Result<bool> {
        let mut editor = PersonEditor::for_edit(id.clone(), self.refresh.clone());
        editor.load(&self.service)?;
        if let Some(notice) = editor.notice() {
            self.print_notice(notice);
            return Ok(false);
        }
        let draft = editor.draft();
        println!("{id}\t{}\t{}", draft.name, draft.email);
        Ok(true)
    }

    pub fn create(&self, name: String, email: String) -> anyhow::Result<bool> {
        let mut editor = PersonEditor::for_create(self.refresh.clone());
        editor.load(&self.service)?;
        editor.change(Field::Name, name)?;
        editor.change(Field::Email, email)?;
        self.submit(editor)
    }

    /// Fields left out keep the values loaded from the server.
    pub fn update(&self, id: PersonId, name: Option<String>, email: Option<String>) -> anyhow::Result<bool> {
        let mut editor = PersonEditor::for_edit(id, self.refresh.clone());
        editor.load(&self.service)?;
        if let Some(notice) = editor.notice() {
            self.print_notice(notice);
            return Ok(false);
        }
        if let Some(name) = name {
            editor.change(Field::Name, name)?;
        }
        if let Some(email) = email {
            editor.change(Field::Email, email)?;
        }
        self.submit(editor)
    }

    pub fn delete(&self, id: PersonId, yes: bool) -> anyhow::Result<bool> {
        self.delete_with(id, |prompt| if yes { Ok(true) } else { confirm(prompt) })
    }

    /// `ask` decides whether the delete goes ahead. A refusal is not a failure.
    fn delete_with(&self, id: PersonId, ask: impl FnOnce(&str) -> io::Result<bool>) -> anyhow::Result<bool> {
        let mut list = PersonList::new(self.refresh.clone());
        list.reload(&self.service)?;
        let name = list
            .persons()
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| id.to_string());

        list.request_delete(id, name.clone());
        if !ask(&format!("Delete {name}?"))? {
            list.cancel_delete();
            return Ok(true);
        }
        let deleted = list.delete_confirmed(&self.service)?;
        self.print_notice(Notice::new(if deleted {
            NoticeKind::Deleted
        } else {
            NoticeKind::DeleteFailed
        }));
        // the reload after a delete may fail on its own
        if let Some(notice) = list.notice().filter(|n| n.kind == NoticeKind::ListFailed) {
            self.print_notice(notice);
        }
        Ok(deleted)
    }

    fn submit(&self, mut editor: PersonEditor) -> anyhow::Result<bool> {
        match editor.submit(&self.service) {
            Ok(()) => {}
            Err(EditorError::Invalid(errors)) => {
                for field in Field::ALL {
                    if let Some(error) = errors.get(field) {
                        eprintln!("{}", error.message(field, self.locale));
                    }
                }
                return Ok(false);
            }
            Err(e) => return Err(e.into()),
        }
        if let Some(notice) = editor.notice() {
            self.print_notice(notice);
        }
        match editor.saved() {
            Some(person) => {
                print_table(std::slice::from_ref(person));
                editor.settle()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn print_notice(&self, notice: Notice) {
        let message = notice.message(self.locale);
        if notice.is_error() {
            eprintln!("{message}");
        } else {
            println!("{message}");
        }
    }
}

fn print_table(persons: &[Person]) {
    for person in persons {
        println!("{}\t{}\t{}", person.id, person.name, person.email);
    }
}

fn confirm(prompt: &str) -> io::Result<bool> {
    let mut stdout = io::stdout();
    write!(stdout, "{prompt} [y/N] ")?;
    stdout.flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
