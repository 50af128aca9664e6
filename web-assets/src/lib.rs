#![no_std]

//! Static files of the blink control page, embedded at build time.
//!
//! [`ASSETS`] maps a file name such as `index.html` to its contents.

include!(concat!(env!("OUT_DIR"), "/assets.rs"));
