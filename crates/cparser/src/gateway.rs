//! Remote query gateway: JSON-RPC access to one shared [`Session`].
//!
//! Messages use the LSP base protocol (`Content-Length` framing), so any
//! JSON-RPC client that speaks LSP framing can drive it. After the standard
//! `initialize` handshake a client calls `cparser/parse` and then queries the
//! parsed unit with `cparser/report` and the listing methods.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;
use tower_lsp::{
    ClientSocket, LanguageServer, LspService, Server,
    jsonrpc::{Error, ErrorCode, Result},
    lsp_types::{InitializeParams, InitializeResult, InitializedParams, ServerCapabilities, ServerInfo},
};
use tracing::{debug, info, warn};

use crate::{
    ast::ParseError,
    lexical::SourceRemark,
    session::{ParseOutcome, Session},
    symbols::SymbolReport,
};

pub const PARSE_METHOD: &str = "cparser/parse";
pub const REPORT_METHOD: &str = "cparser/report";
pub const COMMENTS_METHOD: &str = "cparser/comments";
pub const PREPROCESSOR_METHOD: &str = "cparser/preprocessorStatements";

/// JSON-RPC error code for a failed parse; `data` carries the diagnostics.
pub const PARSE_FAILED_CODE: i64 = -32001;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseParams {
    pub file_path: String,
    pub source_text: String,
}

pub struct QueryGateway {
    session: Arc<Session>,
}

impl QueryGateway {
    pub fn new(session: Arc<Session>) -> Self {
        Self {
            session,
        }
    }

    /// Build a JSON-RPC service bound to `session`, one per connection.
    pub fn service(session: Arc<Session>) -> (LspService<Self>, ClientSocket) {
        LspService::build(move |_client| Self::new(session))
            .custom_method(PARSE_METHOD, Self::parse)
            .custom_method(REPORT_METHOD, Self::report)
            .custom_method(COMMENTS_METHOD, Self::comments)
            .custom_method(PREPROCESSOR_METHOD, Self::preprocessor_statements)
            .finish()
    }

    async fn parse(
        &self,
        params: ParseParams,
    ) -> Result<ParseOutcome> {
        debug!("[gateway] parse {} ({} bytes)", params.file_path, params.source_text.len());
        let session = Arc::clone(&self.session);
        run_blocking("parse", move || session.parse(&params.file_path, &params.source_text))
            .await?
            .map_err(|error| parse_error_to_rpc(&error))
    }

    async fn report(&self) -> Result<SymbolReport> {
        let session = Arc::clone(&self.session);
        run_blocking("report", move || session.report()).await
    }

    async fn comments(&self) -> Result<Vec<SourceRemark>> {
        let session = Arc::clone(&self.session);
        run_blocking("comments", move || session.comments()).await
    }

    async fn preprocessor_statements(&self) -> Result<Vec<SourceRemark>> {
        let session = Arc::clone(&self.session);
        run_blocking("preprocessor", move || session.preprocessor_statements()).await
    }
}

/// Run CPU-bound session work off the async workers.
async fn run_blocking<T: Send + 'static>(
    task: &str,
    work: impl FnOnce() -> T + Send + 'static,
) -> Result<T> {
    tokio::task::spawn_blocking(work).await.map_err(|error| Error {
        code: ErrorCode::InternalError,
        message: format!("{task} task failed: {error}").into(),
        data: None,
    })
}

pub fn parse_error_to_rpc(error: &ParseError) -> Error {
    Error {
        code: ErrorCode::ServerError(PARSE_FAILED_CODE),
        message: error.to_string().into(),
        data: Some(json!({ "diagnostics": error.diagnostics() })),
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for QueryGateway {
    async fn initialize(
        &self,
        _: InitializeParams,
    ) -> Result<InitializeResult> {
        info!("[gateway] client connected");
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                experimental: Some(json!({
                    "cparser": {
                        "methods": [PARSE_METHOD, REPORT_METHOD, COMMENTS_METHOD, PREPROCESSOR_METHOD],
                    }
                })),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "cparser".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(
        &self,
        _: InitializedParams,
    ) {
        debug!("[gateway] handshake complete");
    }

    async fn shutdown(&self) -> Result<()> {
        info!("[gateway] client requested shutdown");
        Ok(())
    }
}

/// Accept connections forever, serving each against the shared session.
pub async fn serve(
    listener: TcpListener,
    session: Arc<Session>,
) -> std::io::Result<()> {
    loop {
        let (stream, peer) = listener.accept().await?;
        info!("[gateway] accepted connection from {peer}");

        let (service, socket) = QueryGateway::service(Arc::clone(&session));
        tokio::spawn(async move {
            let (read, write) = tokio::io::split(stream);
            Server::new(read, write, socket).serve(service).await;
            info!("[gateway] connection from {peer} closed");
        });
    }
}

/// Bind `address` and serve; logs and returns the bind error if the port is taken.
pub async fn bind_and_serve(
    address: &str,
    session: Arc<Session>,
    on_ready: impl FnOnce(std::net::SocketAddr),
) -> std::io::Result<()> {
    let listener = match TcpListener::bind(address).await {
        Ok(listener) => listener,
        Err(error) => {
            warn!("[gateway] cannot bind {address}: {error}");
            return Err(error);
        },
    };
    on_ready(listener.local_addr()?);
    serve(listener, session).await
}
