mod checksum;
mod signature;

pub use checksum::{sha256_hex, sha256_hex_file, sha256_hex_reader};
pub use signature::{verify_detached_signature_hex, verify_file_signature};
