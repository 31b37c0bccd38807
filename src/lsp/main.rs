//! `dvibhasha-lsp`: serves diagnostics and keyword hovers for dvibhasha sources.
//!
//! Editors launch this binary and talk to it over stdin and stdout; it takes
//! no arguments. Diagnostic logging is controlled by `RUST_LOG` and always
//! goes to stderr, for example:
//!
//! ```bash
//! RUST_LOG=dvibhasha=trace dvibhasha-lsp 2>dvibhasha-lsp.log
//! ```

use tower_lsp::{LspService, Server};

use dvibhasha::lsp::DvibhashaLanguageServer;

#[tokio::main]
async fn main() {
    // stdout belongs to the JSON-RPC stream.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    log::info!("dvibhasha-lsp {} listening on stdio", env!("CARGO_PKG_VERSION"));

    let (service, socket) = LspService::new(DvibhashaLanguageServer::new);
    Server::new(tokio::io::stdin(), tokio::io::stdout(), socket)
        .serve(service)
        .await;

    log::info!("dvibhasha-lsp stopped");
}
