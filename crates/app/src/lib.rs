//! Client side of the Innovex Arena site: the typed API client, the public
//! submission forms, the admin access gate and the admin dashboard tabs.
//!
//! Everything talks to the server through the [`Backend`] trait so the UI
//! logic can run against a fake in tests.

pub mod api;
pub mod backend;
pub mod dashboard;
pub mod download;
pub mod forms;
pub mod gate;
pub mod notice;

#[cfg(test)]
pub(crate) mod testing;

pub use api::ApiClient;
pub use backend::{Backend, FileUpload};
pub use dashboard::{AdminEntity, Dashboard, EditableEntity, EntityTab};
pub use gate::{AdminGate, GateState};
pub use notice::{Notice, NoticeKind};
