//! Bitcoin key formats for keyseal.
//!
//! - [`wif`]: Wallet Import Format encode/decode.
//! - [`P2pkhAddress`]: legacy Base58Check addresses.
//! - [`bip38`]: password-encrypted private keys.
//!
//! # Usage
//!
//! ```no_run
//! use keyseal_btc::{Network, P2pkhAddress, bip38, wif};
//!
//! let (key, network) = wif::decode("KwdMAjGmerYanjeui5SHS7JkmpZvVipYvB2LJGU1ZxJwYvP98617").unwrap();
//! let address = P2pkhAddress::from_public_key(&key.public_key(), network);
//! let encrypted = bip38::encrypt(&key, "correct horse").unwrap();
//! assert_eq!(bip38::decrypt(&encrypted, "correct horse").unwrap(), key);
//! println!("{address} {encrypted}");
//! ```

#![warn(
    missing_docs,
    rust_2018_idioms,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]
#![forbid(unsafe_code)]

mod address;
pub mod bip38;
mod network;
pub mod wif;

pub use address::P2pkhAddress;
pub use bip38::Bip38Payload;
pub use network::{Network, ParseNetworkError};
pub use wif::parse_private_key;
