use std::cell::RefCell;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::rc::Rc;
use std::time::Duration;

use healthplex_core::{FlatFormData, FormType};
use healthplex_forms::error::SubmitError;
use healthplex_forms::webhook::{
    Submitter, TransportResponse, UreqTransport, WebhookTransport, DRAFT_PRESERVED_NOTICE,
};
use healthplex_payload::{build_payload, StructuredPayload, SubmissionContext};

const URL: &str = "https://hooks.example.com/webhook/family-history";

#[derive(Default)]
struct Recorded {
    calls: Vec<(String, String, Duration)>,
}

struct FakeTransport {
    reply: Result<TransportResponse, fn() -> SubmitError>,
    recorded: Rc<RefCell<Recorded>>,
}

impl WebhookTransport for FakeTransport {
    fn post_json(
        &self,
        url: &str,
        body: &str,
        timeout: Duration,
    ) -> Result<TransportResponse, SubmitError> {
        self.recorded
            .borrow_mut()
            .calls
            .push((url.to_string(), body.to_string(), timeout));
        match &self.reply {
            Ok(response) => Ok(response.clone()),
            Err(make) => Err(make()),
        }
    }
}

fn submitter(
    reply: Result<TransportResponse, fn() -> SubmitError>,
) -> (Submitter, Rc<RefCell<Recorded>>) {
    let recorded = Rc::new(RefCell::new(Recorded::default()));
    let transport = FakeTransport {
        reply,
        recorded: Rc::clone(&recorded),
    };
    (
        Submitter::new(Box::new(transport), Duration::from_secs(25)),
        recorded,
    )
}

fn payload() -> StructuredPayload {
    let mut data = FlatFormData::new();
    data.insert("firstName", "Grace");
    data.insert("lastName", "Hopper");
    let ctx = SubmissionContext::new(jiff::Timestamp::UNIX_EPOCH, "UTC", "test");
    build_payload(FormType::FamilyHistory, &data, &ctx).unwrap()
}

fn ok(status: u16, body: &str) -> Result<TransportResponse, fn() -> SubmitError> {
    Ok(TransportResponse {
        status,
        body: Some(body.to_string()),
    })
}

#[test]
fn accepted_submission_posts_payload_json() {
    let (submitter, recorded) = submitter(ok(200, "ok"));
    let result = submitter.submit(URL, &payload());

    assert!(result.success);
    assert_eq!(result.notice(), None);
    let recorded = recorded.borrow();
    let (url, body, timeout) = &recorded.calls[0];
    assert_eq!(url, URL);
    assert_eq!(*timeout, Duration::from_secs(25));
    let json: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(json["_meta"]["formType"], "familyHistory");
    assert_eq!(json["contact"]["lastName"], "Hopper");
}

#[test]
fn unconfigured_url_never_reaches_the_network() {
    let (submitter, recorded) = submitter(ok(200, ""));

    for url in ["", "https://your-n8n-instance.com/webhook/family-history"] {
        let result = submitter.submit(url, &payload());
        assert!(!result.success);
        assert_eq!(
            result.message,
            "Webhook URL not configured. Please update the forms configuration"
        );
    }
    assert!(recorded.borrow().calls.is_empty());
}

#[test]
fn rejection_shows_truncated_body() {
    let long = "x".repeat(500);
    let (submitter, _) = submitter(ok(500, &long));
    let result = submitter.submit(URL, &payload());
    assert!(!result.success);
    assert_eq!(result.message.len(), 200);
}

#[test]
fn rejection_without_body_shows_status() {
    let (submitter, _) = submitter(Ok(TransportResponse {
        status: 502,
        body: None,
    }));
    let result = submitter.submit(URL, &payload());
    assert_eq!(result.message, "Submission failed (status 502)");

    let (submitter, _) = submitter_with_blank_body();
    assert_eq!(
        submitter.submit(URL, &payload()).message,
        "Submission failed (status 404)"
    );
}

fn submitter_with_blank_body() -> (Submitter, Rc<RefCell<Recorded>>) {
    submitter(ok(404, "  \n"))
}

#[test]
fn timeout_has_its_own_message() {
    let (submitter, _) = submitter(Err(|| SubmitError::Timeout));
    let result = submitter.submit(URL, &payload());
    assert_eq!(
        result.message,
        "Request timed out. Please check your internet connection and try again."
    );
    assert!(!result.draft_preserved);
}

#[test]
fn tighter_limit_wins() {
    let (submitter, recorded) = submitter(ok(204, ""));
    let result = submitter.submit_within(URL, &payload(), Duration::from_secs(3));
    assert!(result.success);
    assert_eq!(recorded.borrow().calls[0].2, Duration::from_secs(3));
}

#[test]
fn notice_only_accompanies_a_kept_draft() {
    let mut result = healthplex_forms::SubmissionResult::failed("boom");
    assert_eq!(result.notice(), None);
    result.draft_preserved = true;
    assert_eq!(result.notice(), Some(DRAFT_PRESERVED_NOTICE));
}

/// Accept one connection, read the request, and answer with `status` and
/// `body`. Returns the URL and a handle yielding the raw request.
fn serve_once(status: &'static str, body: &'static str) -> (String, std::thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = std::thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);
        let mut head = String::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                content_length = value.trim().parse().unwrap();
            }
            head.push_str(&line);
            if line == "\r\n" || line.is_empty() {
                break;
            }
        }
        let mut request_body = vec![0u8; content_length];
        reader.read_exact(&mut request_body).unwrap();

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        reader.get_mut().write_all(response.as_bytes()).unwrap();
        head + &String::from_utf8(request_body).unwrap()
    });
    (format!("http://{addr}/webhook/intake"), handle)
}

#[test]
fn ureq_transport_posts_json() {
    let (url, handle) = serve_once("200 OK", "accepted");
    let response = UreqTransport
        .post_json(&url, r#"{"a":1}"#, Duration::from_secs(5))
        .unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body.as_deref(), Some("accepted"));

    let request = handle.join().unwrap();
    assert!(request.starts_with("POST /webhook/intake HTTP/1.1"));
    assert!(request.to_ascii_lowercase().contains("content-type: application/json"));
    assert!(request.ends_with(r#"{"a":1}"#));
}

#[test]
fn ureq_transport_reports_error_status_as_response() {
    let (url, handle) = serve_once("500 Internal Server Error", "workflow crashed");
    let submitter = Submitter::http(Duration::from_secs(5));
    let result = submitter.submit(&url, &payload());
    handle.join().unwrap();

    assert!(!result.success);
    assert_eq!(result.message, "workflow crashed");
}

#[test]
fn ureq_transport_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/slow", listener.local_addr().unwrap());
    let handle = std::thread::spawn(move || {
        let (_stream, _) = listener.accept().unwrap();
        std::thread::sleep(Duration::from_millis(1500));
    });

    let err = UreqTransport
        .post_json(&url, "{}", Duration::from_millis(200))
        .unwrap_err();
    assert!(matches!(err, SubmitError::Timeout));
    handle.join().unwrap();
}
