pub mod events;
pub mod http;
mod plan;
mod request;
pub mod response;
mod step;
mod types;

pub use events::{
    CompositeEventSink, Event, EventSink, NoOpEventSink, StderrEventSink, StdoutEventSink,
};
pub use http::{HttpClient, HttpError, HttpRequestParts, HttpResponseParts, ReqwestHttpClient};
pub use plan::PlanExecutor;
pub use request::build_request;
pub use step::{StepExecutor, StepOutcome};
pub use types::ExecutorConfig;
