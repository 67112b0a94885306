pub mod demo;
pub mod keygen;
pub mod sign;
pub mod verify;

use anyhow::{Context, Result};
use std::path::Path;
use zeroize::Zeroizing;

/// Read a private key file into a buffer that is wiped on drop
pub(crate) fn read_private_key(path: &Path) -> Result<Zeroizing<Vec<u8>>> {
    std::fs::read(path)
        .map(Zeroizing::new)
        .with_context(|| format!("failed to read private key {}", path.display()))
}

pub(crate) fn read_public_key(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("failed to read public key {}", path.display()))
}
