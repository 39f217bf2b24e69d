//! # avrlibc-core
//!
//! Reference implementations of the avr-libc routines exercised by the
//! conformance harness.
//!
//! Everything here follows the AVR data model: `int` is 16 bits, `long` is
//! 32 bits and `double` is IEEE-754 binary32. Host-side quirks that differ
//! from avr-libc (glibc's `%lc`, `%0c`, a lone sign under `%d`) are resolved
//! in favour of the AVR behavior.

#![forbid(unsafe_code)]

pub mod eeprom;
pub mod fplib;
pub mod math;
pub mod pgmspace;
pub mod stdio;
pub mod stdlib;

/// End-of-file marker returned by the stdio family.
pub const EOF: i32 = -1;
