//! Dispatch layer.
//!
//! Every call moves through `Validating → Dispatched → Completed`, or stops
//! at `Validating → Failed`. Validation always runs on the caller's thread,
//! so argument errors surface synchronously on every entry point:
//!
//! - **blocking** (`*_sync`): the codec runs on the calling thread
//! - **future** (`compress`, `decompress`): the codec runs on a tokio
//!   blocking worker and the result resolves a [`Pending`]
//! - **callback** (`*_with`): same worker, result handed to a closure that
//!   fires exactly once
//!
//! All three shapes feed the same codec with the same request, so they
//! produce identical bytes and identical error kinds. Calls share no mutable
//! state and in-flight codec work cannot be cancelled.

mod pending;
mod service;

pub use pending::Pending;
pub use service::JpegService;
