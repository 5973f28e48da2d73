//! Orchestration behind the `keyseal` command line.
//!
//! [`pipeline`] turns one private key, given as hex, WIF or BIP38 plus a
//! password, into every format the other crates produce.

#![warn(
    missing_docs,
    rust_2018_idioms,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]
#![forbid(unsafe_code)]

pub mod pipeline;
