//! HTTP transport implementation.
//!
//! Plain JSON-RPC 2.0 over `POST <rpc_path>`, so curl or a browser can drive
//! the tools without an MCP client library. Only the tool-facing subset of
//! MCP is served: `initialize`, `ping`, `tools/list`, `tools/call` and
//! notifications.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;
use crate::domains::tools::ToolError;

const PROTOCOL_VERSION: &str = "2024-11-05";
const JSONRPC_VERSION: &str = "2.0";

/// Incoming JSON-RPC message. Notifications carry no `id`.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// Outgoing JSON-RPC message.
#[derive(Debug, Clone, Serialize)]
pub struct RpcResponse {
    pub jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

/// JSON-RPC error object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
}

impl RpcError {
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;

    fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(Self::INVALID_PARAMS, message)
    }
}

impl From<ToolError> for RpcError {
    fn from(err: ToolError) -> Self {
        let code = if err.is_client_error() {
            Self::INVALID_PARAMS
        } else {
            Self::INTERNAL_ERROR
        };
        Self::new(code, err.to_string())
    }
}

impl RpcResponse {
    fn new(id: Option<Value>, outcome: Result<Value, RpcError>) -> Self {
        let (result, error) = match outcome {
            Ok(value) => (Some(value), None),
            Err(err) => (None, Some(err)),
        };
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result,
            error,
        }
    }
}

/// State shared by the HTTP handlers.
#[derive(Clone)]
struct AppState {
    server: McpServer,
    rpc_path: Arc<str>,
}

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

impl HttpTransport {
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// `host:port` the listener binds to.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Build the axum router serving `server`.
    pub fn router(&self, server: McpServer) -> Router {
        let state = AppState {
            server,
            rpc_path: Arc::from(self.config.rpc_path.as_str()),
        };

        let app = Router::new()
            .route(&self.config.rpc_path, post(handle_rpc))
            .route("/health", get(health))
            .route("/", get(describe))
            .with_state(state)
            .layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            app.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
        } else {
            app
        }
    }

    /// Bind and serve until the listener fails.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let tool_count = server.registry().len();
        let app = self.router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!(
            "Ready - {} tool(s) on http://{}{} (CORS {})",
            tool_count,
            addr,
            self.config.rpc_path,
            if self.config.enable_cors { "on" } else { "off" }
        );

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::serve(e.to_string()))
    }
}

/// `GET /` - what this endpoint is and which tools it serves.
async fn describe(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "protocol": format!("JSON-RPC {}", JSONRPC_VERSION),
        "rpc": &*state.rpc_path,
        "health": "/health",
        "tools": state.server.registry().tool_names(),
    }))
}

/// `GET /health`.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[instrument(skip_all, fields(method = %request.method))]
async fn handle_rpc(
    State(state): State<AppState>,
    Json(request): Json<RpcRequest>,
) -> Json<RpcResponse> {
    debug!("JSON-RPC request");
    Json(process_request(&state, request).await)
}

async fn process_request(state: &AppState, request: RpcRequest) -> RpcResponse {
    if request.jsonrpc != JSONRPC_VERSION {
        return RpcResponse::new(
            request.id,
            Err(RpcError::new(RpcError::INVALID_REQUEST, "Invalid Request")),
        );
    }

    let outcome = dispatch(state, &request.method, request.params).await;
    RpcResponse::new(request.id, outcome)
}

async fn dispatch(state: &AppState, method: &str, params: Option<Value>) -> Result<Value, RpcError> {
    match method {
        "initialize" => Ok(json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": {} },
            "serverInfo": {
                "name": state.server.name(),
                "version": state.server.version()
            },
            "instructions": state.server.instructions()
        })),
        "ping" => Ok(json!({})),
        "tools/list" => Ok(json!({ "tools": state.server.list_tools() })),
        "tools/call" => call_tool(state, params).await,
        other if other.starts_with("notifications/") => {
            debug!("Ignoring notification {}", other);
            Ok(Value::Null)
        }
        other => {
            warn!("Unknown method: {}", other);
            Err(RpcError::new(RpcError::METHOD_NOT_FOUND, "Method not found"))
        }
    }
}

async fn call_tool(state: &AppState, params: Option<Value>) -> Result<Value, RpcError> {
    let mut params = params.ok_or_else(|| RpcError::invalid_params("Missing params"))?;

    let name = params
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| RpcError::invalid_params("Missing tool name"))?;
    let arguments = params
        .get_mut("arguments")
        .map(Value::take)
        .unwrap_or(Value::Null);

    info!("tools/call {}", name);
    Ok(state.server.call_tool(&name, arguments).await?)
}
