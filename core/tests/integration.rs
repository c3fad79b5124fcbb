//! Person lifecycle and workflow tests against the live mock server.
//!
//! # Design
//! Starts the mock server on random ports, in both the single-gateway and
//! the split-host topology, then exercises every client operation and both
//! workflows over real HTTP using ureq.

use std::cell::Cell;
use std::io::{Read, Write};

use person_core::{
    ApiError, ClientConfig, CreatePerson, EditorError, EditorState, Field, FieldError, HttpMethod, HttpRequest,
    HttpResponse, NoticeKind, PersonClient, PersonEditor, PersonId, PersonList, PersonService, RefreshSignal,
    Transport, UpdatePerson,
};

/// Executes requests with ureq and counts them.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
struct UreqTransport {
    agent: ureq::Agent,
    sent: Cell<usize>,
}

impl UreqTransport {
    fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent, sent: Cell::new(0) }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.sent.set(self.sent.get() + 1);
        let body = req.body.unwrap_or_default();
        let result = match req.method {
            HttpMethod::Get => self.agent.get(&req.url).call(),
            HttpMethod::Delete => self.agent.delete(&req.url).call(),
            HttpMethod::Post => self
                .agent
                .post(&req.url)
                .content_type("application/json")
                .send(body.as_bytes()),
            HttpMethod::Patch => self
                .agent
                .patch(&req.url)
                .content_type("application/json")
                .send(body.as_bytes()),
        };
        let mut response = result.map_err(|e| ApiError::network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::network(e.to_string()))?;
        Ok(HttpResponse::new(status, body))
    }
}

/// Bind a std listener on a random port and hand it to the mock server.
fn bind() -> (std::net::TcpListener, std::net::SocketAddr) {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    listener.set_nonblocking(true).unwrap();
    (listener, addr)
}

fn start_gateway() -> ClientConfig {
    let (std_listener, addr) = bind();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });
    ClientConfig::gateway(&format!("http://{addr}")).unwrap()
}

fn start_split() -> ClientConfig {
    let (std_command, command_addr) = bind();
    let (std_query, query_addr) = bind();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let command = tokio::net::TcpListener::from_std(std_command).unwrap();
            let query = tokio::net::TcpListener::from_std(std_query).unwrap();
            mock_server::run_split(command, query).await
        })
        .unwrap();
    });
    ClientConfig::new(
        &format!("http://{command_addr}{}", mock_server::COMMAND_PREFIX),
        &format!("http://{query_addr}{}", mock_server::QUERY_PREFIX),
    )
    .unwrap()
}

fn service(config: ClientConfig) -> PersonService<UreqTransport> {
    PersonService::new(PersonClient::new(config), UreqTransport::new())
}

fn crud_lifecycle(svc: &PersonService<UreqTransport>) {
    // list: empty
    assert!(svc.list_all().unwrap().is_empty(), "expected empty list");

    // create
    let created = svc
        .create(&CreatePerson {
            name: "Ana Silva".to_string(),
            email: "ana@example.com".to_string(),
        })
        .unwrap();
    assert!(!created.id.is_empty());
    assert_eq!(created.name, "Ana Silva");
    assert_eq!(created.email, "ana@example.com");
    let id = created.id.clone();

    // get round-trips
    let fetched = svc.get_by_id(&id).unwrap();
    assert_eq!(fetched, created);

    // update: email only
    let updated = svc
        .update(
            &id,
            &UpdatePerson {
                name: None,
                email: Some("ana.silva@example.com".to_string()),
            },
        )
        .unwrap();
    assert_eq!(updated.name, "Ana Silva");
    assert_eq!(updated.email, "ana.silva@example.com");

    // list: one row
    let persons = svc.list_all().unwrap();
    assert_eq!(persons.len(), 1);
    assert_eq!(persons[0].id, id);

    // delete
    svc.delete(&id).unwrap();

    // get / update / delete after delete: NotFound
    assert!(matches!(svc.get_by_id(&id), Err(ApiError::NotFound)));
    assert!(matches!(
        svc.update(&id, &UpdatePerson::replace("x", "x@example.com")),
        Err(ApiError::NotFound)
    ));
    assert!(matches!(svc.delete(&id), Err(ApiError::NotFound)));

    // list: empty again
    assert!(svc.list_all().unwrap().is_empty(), "expected empty list after delete");
}

#[test]
fn crud_lifecycle_through_gateway() {
    crud_lifecycle(&service(start_gateway()));
}

#[test]
fn crud_lifecycle_across_split_hosts() {
    crud_lifecycle(&service(start_split()));
}

#[test]
fn server_rejection_surfaces_as_validation() {
    let svc = service(start_gateway());
    let err = svc
        .create(&CreatePerson {
            name: " ".to_string(),
            email: "ana@example.com".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation { status: 422, .. }));
}

#[test]
fn unreachable_host_is_transport_error() {
    let (listener, addr) = bind();
    drop(listener);
    let svc = service(ClientConfig::gateway(&format!("http://{addr}")).unwrap());
    let err = svc.list_all().unwrap_err();
    assert!(matches!(err, ApiError::Transport { status: None, .. }));
}

#[test]
fn truncated_body_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = [0u8; 1024];
        let _ = stream.read(&mut request);
        stream
            .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 100\r\n\r\n[{\"id\"")
            .unwrap();
    });
    let svc = service(ClientConfig::gateway(&format!("http://{addr}")).unwrap());
    let err = svc.list_all().unwrap_err();
    assert!(matches!(err, ApiError::Transport { status: None, .. }), "{err}");
}

#[test]
fn ids_with_path_characters_stay_one_segment() {
    let svc = service(start_split());
    let created = svc
        .create(&CreatePerson {
            name: "Ana Silva".to_string(),
            email: "ana@example.com".to_string(),
        })
        .unwrap();

    let nested = format!("{}/..", created.id);
    for raw in ["../../../api/persons", "a?x=1#f", nested.as_str()] {
        let id = PersonId::new(raw);
        assert!(svc.get_by_id(&id).unwrap_err().is_not_found(), "get {raw}");
        assert!(svc.delete(&id).unwrap_err().is_not_found(), "delete {raw}");
    }
    assert_eq!(svc.list_all().unwrap(), vec![created]);
}

#[test]
fn editor_and_list_workflow() {
    let svc = service(start_split());
    let refresh = RefreshSignal::new();
    let mut list = PersonList::new(refresh.clone());
    list.reload(&svc).unwrap();
    assert!(list.is_empty());

    // invalid draft: no request leaves the editor
    let mut editor = PersonEditor::for_create(refresh.clone());
    editor.load(&svc).unwrap();
    editor.change(Field::Name, "").unwrap();
    editor.change(Field::Email, "bad-email").unwrap();
    let before = svc.transport().sent.get();
    assert!(matches!(editor.submit(&svc), Err(EditorError::Invalid(_))));
    assert_eq!(svc.transport().sent.get(), before);
    assert_eq!(editor.visible_error(Field::Name), Some(FieldError::Required));
    assert_eq!(editor.visible_error(Field::Email), Some(FieldError::InvalidFormat));

    // fix it and create
    editor.change(Field::Name, "Ana Silva").unwrap();
    editor.change(Field::Email, "ana@example.com").unwrap();
    editor.submit(&svc).unwrap();
    assert_eq!(editor.state(), EditorState::Success);
    assert_eq!(editor.notice().map(|n| n.kind), Some(NoticeKind::Created));
    let id = editor.saved().unwrap().id.clone();

    // the list sees the refresh and reloads
    assert!(list.needs_reload());
    list.reload(&svc).unwrap();
    assert_eq!(list.persons().len(), 1);
    assert_eq!(list.persons()[0].id, id);
    assert_eq!(list.persons()[0].name, "Ana Silva");
    assert_eq!(list.persons()[0].email, "ana@example.com");

    // edit the same person
    let mut editor = PersonEditor::for_edit(id.clone(), refresh.clone());
    editor.load(&svc).unwrap();
    assert_eq!(editor.draft().name, "Ana Silva");
    editor.change(Field::Name, "Ana Souza").unwrap();
    editor.submit(&svc).unwrap();
    assert_eq!(editor.notice().map(|n| n.kind), Some(NoticeKind::Updated));
    assert!(list.needs_reload());
    list.reload(&svc).unwrap();
    assert_eq!(list.persons()[0].name, "Ana Souza");

    // delete it from the list
    list.request_delete(id.clone(), "Ana Souza");
    assert!(list.delete_confirmed(&svc).unwrap());
    assert_eq!(list.notice().map(|n| n.kind), Some(NoticeKind::Deleted));
    assert!(list.is_empty());
}

#[test]
fn editing_a_missing_person_reports_update_failure() {
    let svc = service(start_gateway());
    let mut editor = PersonEditor::for_edit(PersonId::new("does-not-exist"), RefreshSignal::new());
    editor.load(&svc).unwrap();
    assert_eq!(editor.notice().map(|n| n.kind), Some(NoticeKind::LoadFailed));
    assert_eq!(editor.state(), EditorState::Ready);

    editor.change(Field::Name, "Ana Silva").unwrap();
    editor.change(Field::Email, "ana@example.com").unwrap();
    editor.submit(&svc).unwrap();
    assert_eq!(editor.state(), EditorState::Failed);
    assert_eq!(editor.notice().map(|n| n.kind), Some(NoticeKind::UpdateFailed));
    assert_eq!(editor.draft().name, "Ana Silva");
}
