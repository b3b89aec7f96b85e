//! Canned transport for unit tests

use super::fetcher::{HttpResponse, Transport, TransportError};
use reqwest::header::HeaderMap;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Canned = Result<HttpResponse, String>;

/// Replays queued responses in order, then fails every further request
#[derive(Debug, Clone, Default)]
pub(crate) struct CannedTransport {
    responses: Arc<Mutex<VecDeque<Canned>>>,
    requests: Arc<Mutex<Vec<(String, HeaderMap)>>>,
}

impl CannedTransport {
    pub(crate) fn new(responses: Vec<Canned>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
            requests: Arc::default(),
        }
    }

    pub(crate) fn ok(body: &str) -> Canned {
        Ok(HttpResponse {
            status: 200,
            body: body.to_string(),
        })
    }

    pub(crate) fn status(status: u16) -> Canned {
        Ok(HttpResponse {
            status,
            body: String::new(),
        })
    }

    pub(crate) fn failure(message: &str) -> Canned {
        Err(message.to_string())
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn requested_urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }

    pub(crate) fn last_headers(&self) -> Option<HeaderMap> {
        self.requests
            .lock()
            .unwrap()
            .last()
            .map(|(_, headers)| headers.clone())
    }
}

impl Transport for CannedTransport {
    async fn get(
        &self,
        url: &str,
        headers: &HeaderMap,
        _timeout: Duration,
    ) -> Result<HttpResponse, TransportError> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), headers.clone()));

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(TransportError::Other(message)),
            None => Err(TransportError::Other("no canned response left".to_string())),
        }
    }
}
