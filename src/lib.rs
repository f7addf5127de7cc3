// Building blocks
pub mod error;
pub mod executor;
pub mod filter;
pub mod keyset;

// Domain layer
pub mod notification;
pub mod template;

// Composition and dispatch
pub mod client;
pub mod compose;
pub mod config;

pub use client::{Client, DeliveryOutcome, DispatchReport, DispatchResult};
pub use compose::ComposeMode;
pub use config::{ClientConfig, DispatchMode};
pub use error::{ClientError, Result};
pub use executor::{Executor, ExecutorError, OperationKind};
pub use filter::{Condition, Filter};
pub use keyset::UniqueKeySet;
pub use notification::{to_client_name, NotificationMetadata, NotificationRequest};
pub use template::{NotificationTemplate, TemplateError, TemplateResolver};
