#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use rexx_lsp::analyzer::Diagnostic;
use rexx_lsp::{DiagnosticsPublisher, DocumentStore, ServerConfig};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tower_lsp::lsp_types::Url;

pub const ONLY_VAR1: &str = "/* REXX */
say var
var1 = 1
";

pub const VARIABLES: &str = "/* REXX */
say var
var1 = 1
say var
var2 = 2
say var
var3 = 3
say var
";

pub const BROKEN: &str = "x = {\nsay 'fine'\n";

pub type Published = (Url, Option<i32>, Vec<Diagnostic>);

/// Forwards every publication into a channel the test can await.
pub struct ChannelPublisher(UnboundedSender<Published>);

impl DiagnosticsPublisher for ChannelPublisher {
    fn publish(&self, uri: Url, version: Option<i32>, diagnostics: Vec<Diagnostic>) {
        let _ = self.0.send((uri, version, diagnostics));
    }
}

pub fn uri(name: &str) -> Url {
    Url::parse(&format!("file:///workspace/{name}")).unwrap()
}

pub fn store_with_publisher(
    open_delay_ms: u64,
    change_delay_ms: u64,
) -> (Arc<DocumentStore>, UnboundedReceiver<Published>) {
    let (tx, rx) = unbounded_channel();
    let config = ServerConfig {
        diagnostics_open_delay_ms: open_delay_ms,
        diagnostics_change_delay_ms: change_delay_ms,
        ..ServerConfig::default()
    };
    let store = DocumentStore::with_config(config).with_publisher(Arc::new(ChannelPublisher(tx)));
    (Arc::new(store), rx)
}

pub async fn next_published(rx: &mut UnboundedReceiver<Published>) -> Published {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("no diagnostics published in time")
        .expect("publisher dropped")
}

/// A program big enough that parsing it is not instant.
pub fn large_program(lines: usize) -> String {
    let mut src = String::from("/* REXX */\n");
    for i in 0..lines {
        src.push_str(&format!("value{i} = {i} + 1 /* note */\nsay 'line' value{i}\n"));
    }
    src
}
