//! Language Server Protocol implementation for dvibhasha.
//!
//! This module provides an LSP server that enables IDE features like:
//! - Real-time syntax diagnostics
//! - Hover information (canonical token kind and every spelling of a keyword)
//!
//! # Architecture
//!
//! The LSP server uses `tower-lsp` and communicates via JSON-RPC over stdio.
//! It keeps the text and version of every open document and re-parses the
//! whole document on each change.
//!
//! ```text
//! Editor (VSCode, etc.)
//!     ↓ JSON-RPC over stdio
//! DvibhashaLanguageServer
//!     ↓ Uses
//! dvibhasha (lexer, parser)
//! ```
//!
//! Edits can overlap: a slow parse of version 3 may finish after version 4
//! was stored. Diagnostics are only published while the parsed version is
//! still the newest one, so the last edit always wins.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::lexer::{lex, spellings_of};
use crate::parse_source;

/// State for a single open document.
#[derive(Debug)]
pub struct DocumentState {
    /// The document's content.
    pub content: String,
    /// The document's version as reported by the client.
    pub version: i32,
}

/// Shared state for the language server.
#[derive(Debug, Default)]
pub struct ServerState {
    /// Open documents indexed by URI.
    pub documents: HashMap<Url, DocumentState>,
}

/// The dvibhasha Language Server.
pub struct DvibhashaLanguageServer {
    /// Client handle for sending notifications.
    client: Client,
    /// Shared server state.
    state: Arc<RwLock<ServerState>>,
}

impl DvibhashaLanguageServer {
    /// Creates a new language server instance.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            state: Arc::new(RwLock::new(ServerState::default())),
        }
    }

    /// Parses one version of a document and publishes its diagnostics,
    /// unless a newer version arrived in the meantime.
    async fn analyze_document(&self, uri: Url, content: &str, version: i32) {
        let diagnostics = diagnostics_for(content);

        let is_current = {
            let state = self.state.read().await;
            state
                .documents
                .get(&uri)
                .is_some_and(|doc| doc.version == version)
        };
        if !is_current {
            log::debug!("dropping stale diagnostics for {uri} (version {version})");
            return;
        }

        log::debug!(
            "publishing {} diagnostics for {uri} (version {version})",
            diagnostics.len()
        );
        self.client
            .publish_diagnostics(uri, diagnostics, Some(version))
            .await;
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for DvibhashaLanguageServer {
    async fn initialize(&self, _: InitializeParams) -> Result<InitializeResult> {
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                // Document sync - we want full content on each change
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "dvibhasha-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "dvibhasha LSP server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let content = params.text_document.text;
        let version = params.text_document.version;

        {
            let mut state = self.state.write().await;
            state.documents.insert(
                uri.clone(),
                DocumentState {
                    content: content.clone(),
                    version,
                },
            );
        }

        self.analyze_document(uri, &content, version).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        // FULL sync: the last change holds the whole document.
        let Some(change) = params.content_changes.into_iter().last() else {
            return;
        };
        let content = change.text;

        {
            let mut state = self.state.write().await;
            match state.documents.get_mut(&uri) {
                Some(doc) if doc.version > version => {
                    log::debug!("ignoring out-of-order change for {uri} (version {version})");
                    return;
                }
                Some(doc) => {
                    doc.content = content.clone();
                    doc.version = version;
                }
                None => {
                    state.documents.insert(
                        uri.clone(),
                        DocumentState {
                            content: content.clone(),
                            version,
                        },
                    );
                }
            }
        }

        self.analyze_document(uri, &content, version).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;

        {
            let mut state = self.state.write().await;
            state.documents.remove(&uri);
        }

        // Clear diagnostics
        self.client.publish_diagnostics(uri, vec![], None).await;
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        let content = {
            let state = self.state.read().await;
            state.documents.get(uri).map(|d| d.content.clone())
        };

        if let Some(content) = content
            && let Some(info) = hover_text(&content, position)
        {
            return Ok(Some(Hover {
                contents: HoverContents::Markup(MarkupContent {
                    kind: MarkupKind::Markdown,
                    value: info,
                }),
                range: None,
            }));
        }

        Ok(None)
    }
}

/// Parses `source` and turns every syntax error into a diagnostic.
pub fn diagnostics_for(source: &str) -> Vec<Diagnostic> {
    parse_source(source)
        .errors
        .iter()
        .map(|err| {
            let span = err.span();
            Diagnostic {
                range: span_to_range(source, span.start, span.end),
                severity: Some(DiagnosticSeverity::ERROR),
                source: Some("dvibhasha".to_string()),
                message: err.to_string(),
                ..Default::default()
            }
        })
        .collect()
}

/// Describes the token under `position`: its canonical kind and, for
/// keywords and mnemonic operators, every spelling that means the same.
pub fn hover_text(source: &str, position: Position) -> Option<String> {
    let offset = position_to_offset(source, position)?;
    let tokens = lex(source);
    let token = tokens
        .iter()
        .find(|token| token.span.start <= offset && offset < token.span.end)?;

    let mut info = format!("**Token:** `{:?}`\n\n**Text:** `{}`", token.kind, token.text);
    let spellings = spellings_of(token.kind);
    if !spellings.is_empty() {
        let list: Vec<String> = spellings.iter().map(|s| format!("`{s}`")).collect();
        info.push_str(&format!("\n\n**Spellings:** {}", list.join(", ")));
    }
    Some(info)
}

/// Converts a byte range to an LSP Range.
fn span_to_range(source: &str, start: usize, end: usize) -> Range {
    let start_pos = offset_to_position(source, start);
    let end_pos = offset_to_position(source, end);
    Range {
        start: start_pos,
        end: end_pos,
    }
}

/// Converts a byte offset to an LSP Position (line, UTF-16 column).
fn offset_to_position(source: &str, offset: usize) -> Position {
    let mut line = 0u32;
    let mut character = 0u32;

    for (i, c) in source.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line += 1;
            character = 0;
        } else {
            character += c.len_utf16() as u32;
        }
    }

    Position { line, character }
}

/// Converts an LSP Position to a byte offset.
fn position_to_offset(source: &str, position: Position) -> Option<usize> {
    let mut current_line = 0u32;
    let mut current_char = 0u32;

    for (i, c) in source.char_indices() {
        if current_line == position.line && current_char >= position.character {
            return Some(i);
        }
        if c == '\n' {
            if current_line == position.line {
                // Position is past end of line
                return Some(i);
            }
            current_line += 1;
            current_char = 0;
        } else {
            current_char += c.len_utf16() as u32;
        }
    }

    // Position might be at the very end
    if current_line == position.line {
        Some(source.len())
    } else {
        None
    }
}
