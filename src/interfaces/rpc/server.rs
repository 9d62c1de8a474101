use super::protocol::{
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR, RpcError,
    RpcRequest, RpcResponse,
};
use super::tools::{self, ToolError};
use crate::application::engine::PaymentEngine;
use serde_json::{Value, json};
use std::io;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "mock-payments";

/// Serves the payment tools over newline-delimited JSON-RPC.
///
/// Each input line holds one request; each response is written as one line.
/// Requests without an id are notifications and get no response.
#[derive(Clone)]
pub struct RpcServer {
    engine: Arc<PaymentEngine>,
}

impl RpcServer {
    pub fn new(engine: Arc<PaymentEngine>) -> Self {
        Self { engine }
    }

    /// Reads requests from `reader` until EOF, writing responses to `writer`.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(server = SERVER_NAME, "payment tool server ready");
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if let Some(response) = self.handle_line(&line).await {
                let mut encoded = serde_json::to_string(&response).map_err(io::Error::other)?;
                encoded.push('\n');
                writer.write_all(encoded.as_bytes()).await?;
                writer.flush().await?;
            }
        }
        info!("input closed, shutting down");
        Ok(())
    }

    /// Handles one raw input line. Blank lines and notifications yield `None`.
    pub async fn handle_line(&self, line: &str) -> Option<RpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let raw: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "unparseable request line");
                return Some(RpcResponse::failure(
                    Value::Null,
                    RpcError::new(PARSE_ERROR, format!("Parse error: {e}")),
                ));
            }
        };

        let request: RpcRequest = match serde_json::from_value(raw.clone()) {
            Ok(request) => request,
            Err(e) => {
                let id = raw.get("id").cloned().unwrap_or(Value::Null);
                return Some(RpcResponse::failure(
                    id,
                    RpcError::new(INVALID_REQUEST, format!("Invalid request: {e}")),
                ));
            }
        };

        let id = request.id.clone();
        let outcome = self.dispatch(request).await;
        let id = id?;
        Some(match outcome {
            Ok(result) => RpcResponse::success(id, result),
            Err(error) => RpcResponse::failure(id, error),
        })
    }

    async fn dispatch(&self, request: RpcRequest) -> Result<Value, RpcError> {
        debug!(method = %request.method, "request received");
        let params = request.params.unwrap_or_else(|| json!({}));

        match request.method.as_str() {
            "initialize" => Ok(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "serverInfo": { "name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION") },
                "capabilities": { "tools": {} }
            })),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": tools::definitions() })),
            "tools/call" => self.call_tool(params).await,
            method if method.starts_with("notifications/") => Ok(Value::Null),
            method => Err(RpcError::new(
                METHOD_NOT_FOUND,
                format!("Method not found: {method}"),
            )),
        }
    }

    async fn call_tool(&self, params: Value) -> Result<Value, RpcError> {
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| RpcError::new(INVALID_PARAMS, "Missing tool name"))?;
        let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

        match tools::call(&self.engine, name, arguments).await {
            Ok(result) => {
                let text = serde_json::to_string_pretty(&result)
                    .map_err(|e| RpcError::new(INTERNAL_ERROR, e.to_string()))?;
                Ok(json!({ "content": [{ "type": "text", "text": text }] }))
            }
            Err(ToolError::UnknownTool(name)) => Err(RpcError::new(
                INVALID_PARAMS,
                format!("Unknown tool: {name}"),
            )),
            Err(ToolError::Engine(err)) => {
                debug!(tool = name, code = err.code(), "tool call failed");
                Err(RpcError::from(&err))
            }
        }
    }
}
