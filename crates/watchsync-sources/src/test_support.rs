use axum::Router;
use std::sync::Arc;
use watchsync_config::{MemoryLogStore, OperationLog};
use watchsync_models::Severity;

/// Serve `router` on an ephemeral local port and return its base URL
pub async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn memory_log() -> OperationLog {
    OperationLog::new(Arc::new(MemoryLogStore::new()))
}

pub fn count_severity(log: &OperationLog, severity: Severity) -> usize {
    log.entries().iter().filter(|e| e.severity == severity).count()
}
