pub mod message;
pub mod query;
pub mod user;

pub use message::{Message, MessageRole};
pub use query::{QueryFlow, QueryOutcome, QueryRequest, SubmitError};
pub use user::{AuthSession, AuthUser};
