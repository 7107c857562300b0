//! Reply generation
//!
//! Chat sessions depend on the [`ReplyGenerator`] trait only. [`MockLlm`]
//! is the generator the server ships with.

pub mod error;
pub mod mock;
pub mod provider;

pub use error::LlmError;
pub use mock::MockLlm;
pub use provider::{ReplyGenerator, ReplyRequest, TokenStream};
