//! Network messages - communication between App and Network layers

use crate::models::EndpointId;
use crate::request::ResponseView;

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Execute the request of one endpoint
    Execute {
        id: EndpointId,
        generation: u64,
        method: String,
        url: String,
    },
    /// Abort the in-flight request of an endpoint, if any
    Cancel { id: EndpointId },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug)]
pub enum NetworkResponse {
    /// A request reached its terminal view (success or error)
    Completed {
        id: EndpointId,
        generation: u64,
        view: ResponseView,
    },
}

impl NetworkResponse {
    pub fn id(&self) -> EndpointId {
        match self {
            NetworkResponse::Completed { id, .. } => *id,
        }
    }

    pub fn generation(&self) -> u64 {
        match self {
            NetworkResponse::Completed { generation, .. } => *generation,
        }
    }
}
