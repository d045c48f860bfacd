//! Exchange handling subsystem.
//!
//! # Data Flow
//! ```text
//! axum Request
//!     → dispatch.rs (Content-Type stage → Accept stage)
//!     → context.rs (Exchange handed to the user handler)
//!     → handler: Result<Outcome<T>, Problem>
//!     → dispatch.rs (materialize conclusion or write problem)
//!     → axum Response
//! ```
//!
//! # Design Decisions
//! - One Exchange per request, moved into the handler, never shared
//! - Handlers return a typed `Result`; no runtime test for "is this a Problem"
//! - `Outcome::Handled` lets a handler bypass materialization entirely

pub mod conclusion;
pub mod context;
pub mod dispatch;

pub use conclusion::{Conclusion, Outcome};
pub use context::Exchange;
pub use dispatch::{dispatch, ExchangeHandler, ExchangeRoute};

/// What every exchange handler returns.
pub type ExchangeResult<T> = Result<Outcome<T>, crate::problem::Problem>;
