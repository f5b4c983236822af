//! Request layer - form state, URL synchronization and response handling

pub mod media;
pub mod query;
pub mod response;
pub mod url_sync;

pub use media::MediaHandle;
pub use response::{
    classify_response, ContentKind, ResponseBody, ResponseSnapshot, ResponseStore, ResponseView,
    ViewStatus,
};
pub use url_sync::{FormField, RequestForm, SyncResult};
