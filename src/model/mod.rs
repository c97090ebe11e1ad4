pub mod api;
pub mod application;
pub mod bytes;
pub mod common;
pub mod credentials;
pub mod document;
pub mod event_api;

pub use api::*;
pub use application::*;
pub use common::*;
pub use credentials::*;
pub use document::*;
pub use event_api::*;
