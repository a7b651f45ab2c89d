#![forbid(unsafe_code)]

pub mod kkt;
pub mod ldl;

pub use kkt::{assemble_kkt, sym_mat_vec, DirectKkt};
pub use ldl::LdlFactor;
