//! Scripted network for tests

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;

use super::{Network, NetworkResponse, SubmissionRequest};
use crate::error::{Result, SiteError};

#[derive(Debug, Clone)]
enum Outcome {
    Status(u16),
    TransportError(String),
}

/// [`Network`] that replays queued outcomes and records every request.
///
/// With an empty queue every request answers 200.
#[derive(Debug, Default)]
pub struct MockNetwork {
    outcomes: RefCell<VecDeque<Outcome>>,
    requests: RefCell<Vec<SubmissionRequest>>,
}

impl MockNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with `status`
    pub fn respond_with(&self, status: u16) -> &Self {
        self.outcomes.borrow_mut().push_back(Outcome::Status(status));
        self
    }

    /// Queue a transport failure
    pub fn fail_with(&self, reason: &str) -> &Self {
        self.outcomes
            .borrow_mut()
            .push_back(Outcome::TransportError(reason.to_string()));
        self
    }

    /// Requests seen so far
    pub fn requests(&self) -> Vec<SubmissionRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Network for MockNetwork {
    async fn send(&self, request: &SubmissionRequest) -> Result<NetworkResponse> {
        self.requests.borrow_mut().push(request.clone());
        let outcome = self.outcomes.borrow_mut().pop_front();
        match outcome {
            Some(Outcome::Status(status)) => Ok(NetworkResponse::new(status)),
            Some(Outcome::TransportError(reason)) => Err(SiteError::Transport(reason)),
            None => Ok(NetworkResponse::new(200)),
        }
    }
}
