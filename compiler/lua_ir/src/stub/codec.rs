//! Byte format for stub trees.
//!
//! Layout: 4-byte magic `LSTB`, little-endian `u32` format version, then the
//! bincode encoding of the stub vector. Element types are written as their
//! external ids.

use bincode::Options;

use super::{Stub, StubError, StubTree};

const MAGIC: [u8; 4] = *b"LSTB";
const HEADER_LEN: usize = 8;

/// Current stub format version. Bump on any change to [`Stub`]'s layout.
pub const STUB_FORMAT_VERSION: u32 = 1;

/// Fixed-width integers; the body must end exactly where the stubs do.
fn body_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .reject_trailing_bytes()
}

impl StubTree {
    /// Serialize the tree.
    pub fn encode(&self) -> Result<Vec<u8>, StubError> {
        let mut out = Vec::with_capacity(HEADER_LEN + self.stubs.len() * 16);
        out.extend_from_slice(&MAGIC);
        out.extend_from_slice(&STUB_FORMAT_VERSION.to_le_bytes());
        body_options().serialize_into(&mut out, &self.stubs)?;
        Ok(out)
    }

    /// Deserialize and validate a tree written by [`StubTree::encode`].
    pub fn decode(bytes: &[u8]) -> Result<StubTree, StubError> {
        let (Some(magic), Some(version)) = (bytes.get(0..4), bytes.get(4..HEADER_LEN)) else {
            return Err(StubError::Truncated { len: bytes.len() });
        };
        if magic != MAGIC {
            let mut found = [0u8; 4];
            found.copy_from_slice(magic);
            return Err(StubError::BadMagic { found });
        }
        let mut raw = [0u8; 4];
        raw.copy_from_slice(version);
        let found = u32::from_le_bytes(raw);
        if found != STUB_FORMAT_VERSION {
            return Err(StubError::Version {
                found,
                expected: STUB_FORMAT_VERSION,
            });
        }
        let stubs: Vec<Stub> = body_options().deserialize(&bytes[HEADER_LEN..])?;
        StubTree::from_stubs(stubs)
    }
}
