//! Network actor - runs endpoint requests in the Tokio async runtime

use std::collections::HashMap;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::EndpointId;
use crate::network::client::{create_client, execute_request};

/// Tracks the in-flight request of one endpoint for cancellation
struct ActiveRequest {
    generation: u64,
    cancel_tx: oneshot::Sender<()>,
}

/// Network actor that processes request commands
pub struct NetworkActor {
    client: reqwest::Client,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    /// Each task yields the endpoint and generation it ran for
    active_requests: JoinSet<(EndpointId, u64)>,
    cancel_handles: HashMap<EndpointId, ActiveRequest>,
}

impl NetworkActor {
    pub fn new(response_tx: mpsc::UnboundedSender<NetworkResponse>) -> reqwest::Result<Self> {
        Ok(NetworkActor {
            client: create_client()?,
            response_tx,
            active_requests: JoinSet::new(),
            cancel_handles: HashMap::new(),
        })
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                // Handle incoming commands
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Execute { id, generation, method, url }) => {
                            let (cancel_tx, cancel_rx) = oneshot::channel();

                            // Dropping the previous sender aborts the superseded request
                            if let Some(previous) = self.cancel_handles.insert(id, ActiveRequest { generation, cancel_tx }) {
                                tracing::debug!(?id, generation = previous.generation, "Superseding request");
                            }

                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(?id, generation, %url, %method, "Executing request");
                                tokio::select! {
                                    view = execute_request(&client, &method, &url) => {
                                        tracing::info!(?id, generation, status = ?view.http_status, elapsed_ms = view.elapsed_ms, "Request completed");
                                        let _ = response_tx.send(NetworkResponse::Completed { id, generation, view });
                                    }
                                    _ = cancel_rx => {
                                        tracing::debug!(?id, generation, "Request aborted");
                                    }
                                }
                                (id, generation)
                            });
                        }

                        Some(NetworkCommand::Cancel { id }) => {
                            if let Some(active) = self.cancel_handles.remove(&id) {
                                tracing::info!(?id, generation = active.generation, "Cancelling request");
                                let _ = active.cancel_tx.send(());
                            }
                        }

                        Some(NetworkCommand::Shutdown) => {
                            // Cancel all active requests
                            for (_, active) in self.cancel_handles.drain() {
                                let _ = active.cancel_tx.send(());
                            }
                            break;
                        }

                        None => break,
                    }
                }

                // Forget finished tasks unless a newer request took their slot
                Some(result) = self.active_requests.join_next() => {
                    if let Ok((id, generation)) = result {
                        self.finish(id, generation);
                    }
                }
            }
        }
    }

    fn finish(&mut self, id: EndpointId, generation: u64) {
        if self
            .cancel_handles
            .get(&id)
            .is_some_and(|active| active.generation == generation)
        {
            self.cancel_handles.remove(&id);
        }
    }

    #[cfg(test)]
    fn is_tracking(&self, id: EndpointId) -> bool {
        self.cancel_handles.contains_key(&id)
    }
}
