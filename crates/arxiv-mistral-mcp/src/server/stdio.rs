//! Stdio transport for MCP protocol.
//!
//! Handles newline-delimited JSON-RPC 2.0 over stdin/stdout. Requests are
//! handled strictly one at a time. Nothing but responses is written to the
//! output stream.

use std::future::Future;

use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::tools::{McpTool, ToolContext};

use super::protocol::{
    DEFAULT_PROTOCOL_VERSION, JsonRpcRequest, JsonRpcResponse, McpToolInfo, codes,
};

/// Serve requests from `reader` until EOF or until `shutdown` resolves.
///
/// Lines that are not UTF-8 or not JSON are dropped and the loop continues.
///
/// Shutdown is only observed between requests; a request that has started is
/// always answered.
///
/// # Errors
///
/// Returns error on read or write failure.
pub async fn serve<R, W, S>(
    mut reader: R,
    mut writer: W,
    tools: &[Box<dyn McpTool>],
    ctx: &ToolContext,
    shutdown: S,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut buf = Vec::new();

    tracing::info!("MCP stdio server ready, waiting for requests...");

    loop {
        buf.clear();

        let bytes_read = tokio::select! {
            read = reader.read_until(b'\n', &mut buf) => read?,
            () = &mut shutdown => {
                tracing::info!("Shutdown requested, stopping");
                break;
            }
        };

        if bytes_read == 0 {
            tracing::info!("Stdin closed, shutting down");
            break;
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(e) => {
                tracing::debug!(error = %e, "Discarding line that is not UTF-8");
                continue;
            }
        };

        let Some(response) = handle_line(line, tools, ctx).await else {
            continue;
        };

        let response_json = serde_json::to_string(&response)?;
        writer.write_all(response_json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }

    Ok(())
}

/// Handle one input line, returning the response to write, if any.
///
/// Lines that are not JSON and notifications produce no response.
pub async fn handle_line(
    line: &str,
    tools: &[Box<dyn McpTool>],
    ctx: &ToolContext,
) -> Option<JsonRpcResponse> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let value: Value = match serde_json::from_str(trimmed) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(error = %e, "Discarding unparsable line");
            return None;
        }
    };

    let request: JsonRpcRequest = match serde_json::from_value(value.clone()) {
        Ok(req) => req,
        Err(e) => {
            let id = value.get("id").filter(|id| !id.is_null()).cloned()?;
            tracing::debug!(error = %e, "Rejecting malformed request");
            return Some(JsonRpcResponse::error(
                id,
                codes::INVALID_REQUEST,
                format!("Invalid request: {e}"),
            ));
        }
    };

    let Some(id) = request.id.clone() else {
        tracing::debug!(method = %request.method, "Received notification");
        return None;
    };

    tracing::debug!(method = %request.method, "Received request");
    Some(handle_request(id, &request, tools, ctx).await)
}

async fn handle_request(
    id: Value,
    req: &JsonRpcRequest,
    tools: &[Box<dyn McpTool>],
    ctx: &ToolContext,
) -> JsonRpcResponse {
    match req.method.as_str() {
        "initialize" => handle_initialize(id, &req.params),
        "tools/list" => handle_tools_list(id, tools),
        "tools/call" => handle_tools_call(id, &req.params, tools, ctx).await,
        "ping" => JsonRpcResponse::success(id, json!({})),
        _ => JsonRpcResponse::error(
            id,
            codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", req.method),
        ),
    }
}

fn handle_initialize(id: Value, params: &Value) -> JsonRpcResponse {
    let protocol_version = params
        .get("protocolVersion")
        .and_then(|v| v.as_str())
        .unwrap_or(DEFAULT_PROTOCOL_VERSION);

    tracing::info!("MCP initialize: protocol version {}", protocol_version);

    JsonRpcResponse::success(
        id,
        json!({
            "protocolVersion": protocol_version,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION")
            }
        }),
    )
}

fn handle_tools_list(id: Value, tools: &[Box<dyn McpTool>]) -> JsonRpcResponse {
    let tool_list: Vec<McpToolInfo> = tools
        .iter()
        .map(|t| McpToolInfo {
            name: t.name().to_string(),
            description: t.description().to_string(),
            input_schema: t.input_schema(),
        })
        .collect();

    JsonRpcResponse::success(id, json!({ "tools": tool_list }))
}

async fn handle_tools_call(
    id: Value,
    params: &Value,
    tools: &[Box<dyn McpTool>],
    ctx: &ToolContext,
) -> JsonRpcResponse {
    let tool_name = params.get("name").and_then(|v| v.as_str()).unwrap_or_default();

    let Some(tool) = tools.iter().find(|t| t.name() == tool_name) else {
        tracing::warn!(tool = %tool_name, "Unknown tool requested");
        return JsonRpcResponse::tool_content(
            id,
            &json!({ "error": format!("Unknown tool: {tool_name}") }),
        );
    };

    let arguments = match params.get("arguments") {
        Some(Value::Null) | None => json!({}),
        Some(args) => args.clone(),
    };

    tracing::info!(tool = %tool_name, "Executing tool");

    match tool.execute(ctx, arguments).await {
        Ok(result) => JsonRpcResponse::tool_content(id, &result),
        Err(e) if e.is_reported_as_data() => {
            tracing::warn!(tool = %tool_name, error = %e, "Tool reported an error");
            JsonRpcResponse::tool_content(id, &json!({ "error": e.to_user_message() }))
        }
        Err(e) => {
            tracing::error!(tool = %tool_name, error = %e, "Tool execution failed");
            JsonRpcResponse::error(id, codes::SERVER_ERROR, e.to_user_message())
        }
    }
}
