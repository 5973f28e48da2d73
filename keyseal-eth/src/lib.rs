//! Ethereum addresses for keyseal.
//!
//! Derives the 20-byte account address of a secp256k1 key. Display is plain
//! lowercase hex; [`EthAddress::to_checksum_string`] gives the EIP-55 form.
//!
//! # Usage
//!
//! ```
//! use keyseal::PrivateKey;
//! use keyseal_eth::EthAddress;
//!
//! let key = PrivateKey::from_hex(
//!     "0000000000000000000000000000000000000000000000000000000000000001",
//!     true,
//! )
//! .unwrap();
//! let address = EthAddress::from_public_key(&key.public_key());
//! assert_eq!(address.to_string(), "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf");
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

pub use address::EthAddress;
