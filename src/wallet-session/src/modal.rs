use std::future::Future;

use serde::Serialize;

use crate::{errors::SessionError, session::RpcResponse};

/// What the request modal shows once an action settles.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DisplayResponse {
    Success(RpcResponse),
    /// Any failure, flattened to its message.
    Error { error: String },
}

/// Visibility/loading/response state of the request modal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestModal {
    visible: bool,
    loading: bool,
    response: Option<DisplayResponse>,
}

impl RequestModal {
    pub fn begin(&mut self) {
        self.visible = true;
        self.loading = true;
    }

    pub fn finish(&mut self, outcome: Result<RpcResponse, SessionError>) {
        self.response = Some(match outcome {
            Ok(response) => DisplayResponse::Success(response),
            Err(err) => DisplayResponse::Error {
                error: err.to_string(),
            },
        });
        self.loading = false;
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    /// Show the modal in its loading state while `action` runs, then display the outcome.
    pub async fn track<F>(&mut self, action: F)
    where
        F: Future<Output = Result<RpcResponse, SessionError>>,
    {
        self.begin();
        let outcome = action.await;
        self.finish(outcome);
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn response(&self) -> Option<&DisplayResponse> {
        self.response.as_ref()
    }
}
