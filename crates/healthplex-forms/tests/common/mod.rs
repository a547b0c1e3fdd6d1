#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use healthplex_forms::config::{FormsConfig, WebhookUrls};
use healthplex_forms::error::SubmitError;
use healthplex_forms::webhook::{Submitter, TransportResponse, WebhookTransport};

pub const WEBHOOK: &str = "https://hooks.example.com/webhook/form";

/// Records every POST and answers with a fixed status.
pub struct StubTransport {
    pub status: u16,
    pub bodies: Rc<RefCell<Vec<String>>>,
    pub timeouts: Rc<RefCell<Vec<Duration>>>,
}

impl WebhookTransport for StubTransport {
    fn post_json(
        &self,
        _url: &str,
        body: &str,
        timeout: Duration,
    ) -> Result<TransportResponse, SubmitError> {
        self.bodies.borrow_mut().push(body.to_string());
        self.timeouts.borrow_mut().push(timeout);
        Ok(TransportResponse {
            status: self.status,
            body: None,
        })
    }
}

pub struct Stub {
    pub bodies: Rc<RefCell<Vec<String>>>,
    pub timeouts: Rc<RefCell<Vec<Duration>>>,
}

impl Stub {
    pub fn last_json(&self) -> serde_json::Value {
        let bodies = self.bodies.borrow();
        serde_json::from_str(bodies.last().expect("nothing was posted")).unwrap()
    }
}

pub fn stub_submitter(status: u16) -> (Submitter, Stub) {
    let bodies = Rc::new(RefCell::new(Vec::new()));
    let timeouts = Rc::new(RefCell::new(Vec::new()));
    let transport = StubTransport {
        status,
        bodies: Rc::clone(&bodies),
        timeouts: Rc::clone(&timeouts),
    };
    (
        Submitter::new(Box::new(transport), Duration::from_secs(25)),
        Stub { bodies, timeouts },
    )
}

pub fn config() -> FormsConfig {
    FormsConfig::new(WebhookUrls {
        new_consultation: WEBHOOK.to_string(),
        family_history: WEBHOOK.to_string(),
        metabolic_assessment: WEBHOOK.to_string(),
        intake_wizard: WEBHOOK.to_string(),
    })
}

pub fn ctx(at: &str) -> healthplex_payload::SubmissionContext {
    healthplex_payload::SubmissionContext::new(at.parse().unwrap(), "UTC", "test")
}
