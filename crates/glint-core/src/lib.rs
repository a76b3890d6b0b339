//! Core systems for Glint.
//!
//! This crate provides the foundational pieces of the Glint toolkit:
//!
//! - **Object Model**: Guarded init/update/close lifecycle, names and tags
//! - **Signals**: Ordered, synchronous handler lists for object events
//! - **Cancellation**: Cooperative stop signal for window threads
//! - **Logging**: `tracing` targets and performance spans
//!
//! # Lifecycle Example
//!
//! ```
//! use glint_core::{Object, ObjectBase};
//!
//! struct Counter {
//!     base: ObjectBase,
//! }
//!
//! impl Object for Counter {
//!     fn object_base(&self) -> &ObjectBase {
//!         &self.base
//!     }
//! }
//!
//! let counter = Counter { base: ObjectBase::with_name("counter") };
//! assert!(!counter.update(0.016));
//! counter.init();
//! assert!(counter.update(0.016));
//! counter.close();
//! counter.close(); // closing twice is fine
//! ```
//!
//! # Signal Example
//!
//! ```
//! use glint_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```

pub mod cancel;
mod error;
pub mod logging;
pub mod object;
pub mod signal;

pub use cancel::CancellationToken;
pub use error::{GlintError, Result};
pub use logging::PerfSpan;
pub use object::{object_cast, DrawableObjectBase, Object, ObjectBase, Tag};
pub use signal::{ConnectionGuard, ConnectionId, Signal};

static_assertions::assert_impl_all!(ObjectBase: Send, Sync);
static_assertions::assert_impl_all!(DrawableObjectBase: Send, Sync);
static_assertions::assert_impl_all!(Signal<String>: Send, Sync);
static_assertions::assert_impl_all!(CancellationToken: Send, Sync, Clone);
