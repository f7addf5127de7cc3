//! Template model, strict variable substitution, and the batched resolver.

mod resolver;
mod substitution;
mod types;

pub use resolver::TemplateResolver;
pub use substitution::render;
pub use types::{NotificationTemplate, TemplateError};
