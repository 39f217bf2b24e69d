//! Formatted I/O: the `printf` and `scanf` families.

pub mod printf;
pub mod scanf;

pub use printf::{Arg, PrintfError, format_bytes, snprintf, sprintf_p, vsprintf};
pub use scanf::{
    ByteSource, CStrSource, Format, ProgMemSource, ScanError, StreamSource, fscanf, sscanf,
    sscanf_p, vfscanf,
};
