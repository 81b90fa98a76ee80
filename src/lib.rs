//! # ww-core
//!
//! Lazy, chainable iterator pipelines for Rust.
//!
//! ## Design Philosophy
//!
//! - **Lazy by default**: transforms only describe work; elements are read
//!   when a consumer asks for them
//! - **Single pass**: a [`Pipeline`](core::pipeline::Pipeline) is a cursor
//!   that yields each element once, and more cursors are made explicitly
//! - **Errors, not surprises**: bad boundaries, reads after a fork and
//!   unhashable fingerprints are reported as [`Error`](foundation::error::Error)
//!   values
//!
//! ## Architecture
//!
//! The library is organized into two layers:
//!
//! 1. **Foundation Layer**: errors, shared types, buffers and the iterator
//!    adapters every other part is built from
//! 2. **Core API Layer**: free-standing tools, the pipeline wrapper, its
//!    operators and option structs
//!
//! ## Example
//!
//! ```rust
//! use ww_core::prelude::*;
//!
//! let squares = || Pipeline::new((0..10).map(|x| x * x));
//!
//! let middle: Vec<_> = squares().slice(3..8).unwrap().collect();
//! assert_eq!(middle, vec![9, 16, 25, 36, 49]);
//!
//! assert_eq!(squares().at(-1).unwrap(), 81);
//!
//! let from_25: Vec<_> = squares()
//!     .slice(SliceSpec::new().start_when(|x: &i32| x % 10 == 5))
//!     .unwrap()
//!     .collect();
//! assert_eq!(from_25, vec![25, 36, 49, 64, 81]);
//! ```

#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    missing_docs,
    rustdoc::all
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]
#![forbid(unsafe_code)]

// Foundation layer modules
pub mod foundation {
    //! Foundation layer providing errors, shared types, buffers and adapters.

    pub mod error;
    pub mod iterator;
    pub mod memory;
    pub mod types;
}

// Core API layer modules
pub mod core {
    //! Core API layer: tools, the pipeline wrapper and its configuration.
    pub mod config;
    pub mod ops;
    pub mod pipeline;
    pub mod tools;
    pub mod traits;
}

// Re-exports for convenience
pub mod prelude {
    //! Common imports for users of the library.
    pub use crate::core::{
        config::{ConfigBuilder, ConfigValue, GroupOptions, JoinOptions, SampleOptions, SortOptions},
        pipeline::{Pipeline, Selection, Selector},
        tools::{
            at_index, at_index_or, chunks, first_true, firsts, groupby, iterslice, lasts,
            skip_duplicates, skip_duplicates_by, starts_when, stops_when, window,
        },
        traits::*,
    };
    pub use crate::foundation::{
        error::{ConfigError, Error, ErrorContext, Result},
        iterator::*,
        memory::{tee, RingBuffer, TeeBranch, WindowCursor},
        types::*,
    };
}

// Version information
/// The version of the ww-core library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The minimum supported Rust version.
pub const MSRV: &str = "1.75.0";
