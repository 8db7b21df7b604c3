//! DTOs for the call history endpoint.

use serde::Serialize;

use crate::domain::entities::{RecordedCall, Replay};

/// Response for `GET /history/{operation}`.
#[derive(Debug, Serialize)]
pub struct ReplayResponse {
    pub operation: String,
    pub count: usize,
    pub calls: Vec<CallInfo>,
}

/// One recorded call.
#[derive(Debug, Serialize)]
pub struct CallInfo {
    pub input: String,
    pub output: String,
}

impl From<RecordedCall> for CallInfo {
    fn from(call: RecordedCall) -> Self {
        Self {
            input: call.input,
            output: call.output,
        }
    }
}

impl From<Replay> for ReplayResponse {
    fn from(replay: Replay) -> Self {
        Self {
            operation: replay.operation,
            count: replay.count,
            calls: replay.calls.into_iter().map(CallInfo::from).collect(),
        }
    }
}
