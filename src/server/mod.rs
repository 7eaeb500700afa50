//! Tool server: the operations published as MCP tools over stdio.

pub mod tools;
pub mod transport;

use rmcp::{
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo, Tool},
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
};
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::core::config::Config;
use crate::error::ProcIntelError;
use tools::{FindArgs, SpikeArgs, TopArgs, TreeArgs};
use transport::{CallLedger, CountingWriter, DrainingReader};

pub const SERVER_NAME: &str = "procintel";

/// Slack on top of the longest sampling delay before EOF stops waiting for answers
const DRAIN_SLACK: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct Server {
    config: Arc<Config>,
    tool_router: ToolRouter<Self>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            tool_router: Self::tool_router(),
        }
    }

    /// Every published tool with its input schema
    pub fn tools(&self) -> Vec<Tool> {
        let mut tools = self.tool_router.list_all();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools
    }

    fn drain_limit(&self) -> Duration {
        Duration::try_from_secs_f64(self.config.max_delay_secs)
            .unwrap_or_default()
            .saturating_add(DRAIN_SLACK)
    }

    /// Serve requests from stdin until EOF, writing responses to stdout
    pub async fn serve_stdio(self) -> crate::error::Result<()> {
        let (stdin, stdout) = rmcp::transport::stdio();
        self.serve_io(stdin, stdout).await
    }

    /// Serve requests from `reader` until EOF. Calls accepted before EOF are still answered.
    pub async fn serve_io<R, W>(self, reader: R, writer: W) -> crate::error::Result<()>
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let ledger = Arc::new(CallLedger::default());
        let reader = DrainingReader::new(reader, Arc::clone(&ledger), self.drain_limit());
        let writer = CountingWriter::new(writer, ledger);

        log::info!("Tool server ready ({} tools)", self.tool_router.list_all().len());
        let service = self
            .serve((reader, writer))
            .await
            .map_err(|e| ProcIntelError::other(format!("Failed to start tool server: {}", e)))?;

        let reason = service
            .waiting()
            .await
            .map_err(|e| ProcIntelError::other(format!("Tool server error: {}", e)))?;
        log::info!("Tool server stopped: {:?}", reason);
        Ok(())
    }
}

#[tool_router]
impl Server {
    #[tool(
        name = "get_system_summary",
        description = "Summarize the host: OS, CPU model, logical core count, total RAM (GB), \
                       total disk (GB) and boot time (Unix timestamp)"
    )]
    async fn get_system_summary(&self) -> std::result::Result<CallToolResult, McpError> {
        respond(tools::system_summary(&self.config).await)
    }

    #[tool(
        name = "get_cpu_usage",
        description = "Measure CPU usage as a percentage of total capacity over a 1-second window"
    )]
    async fn get_cpu_usage(
        &self,
        context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        respond(cancellable(&context, tools::cpu_usage()).await)
    }

    #[tool(
        name = "get_memory_usage",
        description = "Report RAM (total, used, free, percent) and swap (total, used, percent) \
                       usage in GB"
    )]
    async fn get_memory_usage(&self) -> std::result::Result<CallToolResult, McpError> {
        respond(tools::memory_usage().await)
    }

    #[tool(
        name = "get_disk_usage",
        description = "Report total, used and free space (GB) and percent used of the root \
                       filesystem"
    )]
    async fn get_disk_usage(&self) -> std::result::Result<CallToolResult, McpError> {
        respond(tools::disk_usage(&self.config).await)
    }

    #[tool(
        name = "get_top_processes",
        description = "Return the top N processes sorted by CPU usage, measured across a short \
                       sampling delay"
    )]
    async fn get_top_processes(
        &self,
        Parameters(args): Parameters<TopArgs>,
        context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        respond(cancellable(&context, tools::top_processes(args, &self.config)).await)
    }

    #[tool(
        name = "find_process_by_name",
        description = "Find running processes whose name contains the given text (case-insensitive)"
    )]
    async fn find_process_by_name(
        &self,
        Parameters(args): Parameters<FindArgs>,
    ) -> std::result::Result<CallToolResult, McpError> {
        respond(tools::find_process_by_name(args).await)
    }

    #[tool(
        name = "get_process_tree",
        description = "List a process and all of its descendant processes as 'name (pid)' labels"
    )]
    async fn get_process_tree(
        &self,
        Parameters(args): Parameters<TreeArgs>,
    ) -> std::result::Result<CallToolResult, McpError> {
        respond(tools::process_tree(args).await)
    }

    #[tool(
        name = "detect_spikes",
        description = "Warn when CPU or memory usage exceeds a percentage threshold"
    )]
    async fn detect_spikes(
        &self,
        Parameters(args): Parameters<SpikeArgs>,
        context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        respond(cancellable(&context, tools::detect_spikes(args, &self.config)).await)
    }

    #[tool(
        name = "analyze_process_anomalies",
        description = "Flag processes holding over 1000 MB with near-zero CPU, and zombie or \
                       defunct processes"
    )]
    async fn analyze_process_anomalies(
        &self,
        context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        respond(cancellable(&context, tools::analyze_process_anomalies(&self.config)).await)
    }
}

#[tool_handler]
impl ServerHandler for Server {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: rmcp::model::Implementation {
                name: SERVER_NAME.into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: Some("procintel host telemetry".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Read-only host telemetry. Use get_system_summary for an overview, \
                 get_top_processes or find_process_by_name to locate processes, and \
                 detect_spikes or analyze_process_anomalies to look for trouble."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Stop sampling early when the client cancels the request
async fn cancellable<F>(context: &RequestContext<RoleServer>, work: F) -> crate::error::Result<Value>
where
    F: Future<Output = crate::error::Result<Value>>,
{
    tokio::select! {
        result = work => result,
        _ = context.ct.cancelled() => Err(ProcIntelError::Cancelled),
    }
}

/// Wrap an operation's payload as a tool result
fn respond(outcome: crate::error::Result<Value>) -> std::result::Result<CallToolResult, McpError> {
    let payload = outcome.map_err(to_mcp_error)?;
    let text = serde_json::to_string_pretty(&payload)
        .map_err(|e| McpError::internal_error(format!("JSON error: {}", e), None))?;

    let mut result = CallToolResult::success(vec![Content::text(text)]);
    if payload.is_object() {
        result.structured_content = Some(payload);
    }
    Ok(result)
}

fn to_mcp_error(error: ProcIntelError) -> McpError {
    if error.is_caller_error() {
        log::warn!("Rejected tool call: {}", error);
        McpError::invalid_params(error.to_string(), None)
    } else {
        log::error!("Tool failed: {}", error);
        McpError::internal_error(error.to_string(), None)
    }
}
