//! General utilities: `<stdlib.h>` and `<assert.h>`.

pub mod assert;
pub mod conversion;
pub mod itoa;
pub mod malloc;

pub use assert::AssertionFailure;
pub use conversion::{atoi, atol, strtol, strtoul};
pub use itoa::{itoa, ltoa, ultoa, utoa};
pub use malloc::{Heap, HeapError, HeapLimit};
