//! Client core for the person service and its create/edit/list workflows.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). Writes go to a command base
//! URL and reads to a query base URL; the two are configured independently.
//!
//! # Design
//! - `PersonClient` is stateless: it holds only its `ClientConfig`.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit. `PersonService` pairs them with a `Transport`.
//! - `PersonEditor` and `PersonList` are I/O-free state machines for the two
//!   screens; they share a `RefreshSignal` instead of a global event.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod editor;
pub mod error;
pub mod http;
pub mod list;
pub mod notice;
pub mod refresh;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod testing;

pub use client::PersonClient;
pub use config::ClientConfig;
pub use editor::{EditorError, EditorState, Mode, Navigation, OpenStep, PersonEditor, Submission, SETTLE_DELAY};
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use list::{ListError, PendingDelete, PersonList};
pub use notice::{Locale, Notice, NoticeKind, Severity};
pub use refresh::RefreshSignal;
pub use service::PersonService;
pub use types::{CreatePerson, Person, PersonId, UpdatePerson};
pub use validation::{validate_field, validate_form, Field, FieldError, FormErrors, PersonDraft};
