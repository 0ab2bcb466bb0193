//! Public types for the Eventsmith API.

mod cost_mode;
mod diagnostics;
mod message;
mod options;
mod request;
mod response;

pub use cost_mode::CostMode;
pub use diagnostics::{DescriptionDiagnostics, DescriptionResult, TitleDiagnostics, TitleResult};
pub use message::{Message, Role};
pub use options::{
    CompletionOptions, DEFAULT_FREQUENCY_PENALTY, DEFAULT_PRESENCE_PENALTY, DEFAULT_TOP_P,
};
pub(crate) use request::effective_context;
pub use request::{
    DescriptionRequest, MAX_DESCRIPTION_CHARS, MAX_TITLES, MIN_DESCRIPTION_CHARS, MIN_TITLES,
    TitleRequest,
};
pub use response::{ChatResponse, Usage};
