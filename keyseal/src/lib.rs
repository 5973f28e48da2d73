//! # Keyseal
//!
//! Encodings and password encryption for secp256k1 private keys.
//!
//! This crate holds the chain-agnostic building blocks: Base58Check and hex,
//! the two password KDF profiles, AES-256 in ECB and CBC modes, secp256k1 key
//! handling, the 11-bit mnemonic codec and password-sealed payloads. Chain
//! formats (WIF, BIP38, addresses) live in `keyseal-btc` and `keyseal-eth`.
//!
//! ## Features
//!
//! - **Bit-exact codecs**: every encoder has a decoder that reverses it
//! - **Typed failures**: one [`Error`] enum with a named kind per failure
//! - **Secrets zeroized**: key material is wrapped in [`zeroize::Zeroizing`]

#![warn(
    missing_docs,
    rust_2018_idioms,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::doc_markdown,
    clippy::missing_const_for_fn,
    clippy::uninlined_format_args,
    clippy::return_self_not_must_use,
    clippy::cast_possible_truncation,
    clippy::similar_names,
    clippy::redundant_closure_for_method_calls,
    clippy::option_if_let_else,
    clippy::unreadable_literal
)]
#![forbid(unsafe_code)]

pub mod cipher;
pub mod encoding;
pub mod error;
pub mod hash;
pub mod kdf;
pub mod keys;
pub mod mnemonic;
pub mod sealed;

pub use error::{Error, Result};
pub use kdf::KdfProfile;
pub use keys::{PrivateKey, PublicKey};
pub use mnemonic::MnemonicPhrase;
pub use sealed::SealedBox;
