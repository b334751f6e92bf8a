//! In-memory `ApiClient` that records requests and replays scripted responses.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use serde_json::Value;
use ucare::{ApiClient, HeaderMap, Method, Result, StatusCode};

pub const UUID: &str = "6c5e9526-b0fe-4739-8975-72e8d5ee6342";
pub const OTHER_UUID: &str = "a771f854-c2cb-408a-8c36-71af77811f3b";
pub const GROUP_ID: &str = "0513dda0-582f-447d-846f-096e5df9e2bb~3";
pub const CDN_BASE: &str = "https://ucarecdn.com/";

/// Scripted responses are consumed in order; the last one keeps repeating.
#[derive(Default)]
pub struct MockClient {
    headers: HeaderMap,
    responses: RefCell<HashMap<(Method, String), VecDeque<Value>>>,
    probe_statuses: RefCell<VecDeque<StatusCode>>,
    requests: RefCell<Vec<(Method, String)>>,
    probes: RefCell<Vec<String>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: Method, path: &str, body: Value) -> &Self {
        self.responses
            .borrow_mut()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(body);
        self
    }

    pub fn probe_status(&self, status: StatusCode) -> &Self {
        self.probe_statuses.borrow_mut().push_back(status);
        self
    }

    pub fn requests(&self) -> Vec<(Method, String)> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn probes(&self) -> Vec<String> {
        self.probes.borrow().clone()
    }
}

fn next_sticky<T: Clone>(queue: &mut VecDeque<T>) -> Option<T> {
    if queue.len() > 1 {
        queue.pop_front()
    } else {
        queue.front().cloned()
    }
}

impl ApiClient for MockClient {
    fn make_request(&self, method: Method, path: &str) -> Result<Value> {
        self.requests
            .borrow_mut()
            .push((method.clone(), path.to_string()));
        let mut responses = self.responses.borrow_mut();
        let body = responses
            .get_mut(&(method.clone(), path.to_string()))
            .and_then(next_sticky)
            .unwrap_or_else(|| panic!("no scripted response for {method} {path}"));
        Ok(body)
    }

    fn cdn_base(&self) -> &str {
        CDN_BASE
    }

    fn default_headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn probe(&self, url: &str) -> Result<StatusCode> {
        self.probes.borrow_mut().push(url.to_string());
        let mut statuses = self.probe_statuses.borrow_mut();
        let status = next_sticky(&mut *statuses)
            .unwrap_or_else(|| panic!("no scripted probe status for {url}"));
        Ok(status)
    }
}

pub fn file_path(uuid: &str) -> String {
    format!("/files/{uuid}/")
}

pub fn storage_path(uuid: &str) -> String {
    format!("/files/{uuid}/storage/")
}
