//! Strong-name identity for .NET assemblies.
//!
//! Assembly metadata records a strong name either as the full RSA public key (the `Assembly`
//! table and most `AssemblyRef` rows of older compilers) or as its 8-byte public key token
//! (the compact form used by most `AssemblyRef` rows). Display names only ever carry the
//! token, so [`Identity::to_token`] reduces both forms to a [`PublicKeyToken`].
//!
//! # ECMA-335 References
//!
//! - **Section II.6.2.1.3**: PublicKeyToken - the low 8 bytes of the SHA-1 hash of the
//!   public key, in reverse order
//! - **Section II.22.5**: AssemblyRef.PublicKeyOrToken - flag-selected key or token
//!
//! # Examples
//!
//! ```rust
//! use typeident::metadata::identity::Identity;
//!
//! // The 16-byte ECMA standard key used by the core framework assemblies
//! let ecma = [0, 0, 0, 0, 0, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0];
//! let identity = Identity::from(&ecma, true)?;
//! assert_eq!(identity.to_token().to_string(), "b77a5c561934e089");
//! # Ok::<(), typeident::Error>(())
//! ```

use std::fmt;

use sha1::{Digest, Sha1};

use crate::Result;

/// An identifier for an assembly's strong name.
/// Can be either a public-key or a hashed token, as indicated by the metadata flags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identity {
    /// The full RSA public-key
    PubKey(Vec<u8>),
    /// 8-byte public key token, little-endian so that `to_le_bytes` yields display order
    Token(u64),
}

impl Identity {
    /// Create an `Identity` from raw metadata blob data.
    ///
    /// # Arguments
    /// * `data`    - The data to create the identity from
    /// * `is_pub`  - Is it a public-key, or a token
    ///
    /// # Errors
    /// Returns an error if a token blob is shorter than 8 bytes.
    pub fn from(data: &[u8], is_pub: bool) -> Result<Self> {
        if is_pub {
            return Ok(Identity::PubKey(data.to_vec()));
        }

        let bytes: [u8; 8] = data
            .get(..8)
            .and_then(|slice| slice.try_into().ok())
            .ok_or_else(|| {
                malformed_error!("Public key token needs 8 bytes, got {}", data.len())
            })?;
        Ok(Identity::Token(u64::from_le_bytes(bytes)))
    }

    /// Reduce this identity to the public key token shown in display names.
    ///
    /// Public keys are hashed with SHA-1; the token is the last 8 bytes of the digest in
    /// reverse order. Tokens are returned unchanged.
    #[must_use]
    pub fn to_token(&self) -> PublicKeyToken {
        match self {
            Identity::PubKey(data) => {
                let digest = Sha1::digest(data);
                let mut bytes = [0u8; 8];
                for (dst, src) in bytes.iter_mut().zip(digest.iter().rev()) {
                    *dst = *src;
                }
                PublicKeyToken(bytes)
            }
            Identity::Token(token) => PublicKeyToken(token.to_le_bytes()),
        }
    }
}

/// An 8-byte public key token, stored in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicKeyToken(pub [u8; 8]);

impl PublicKeyToken {
    /// Parse a token from its 16-character hexadecimal display form.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the text is not exactly 8 hex-encoded bytes.
    pub fn parse(text: &str) -> Result<Self> {
        let decoded = hex::decode(text)
            .map_err(|e| malformed_error!("Invalid hex in PublicKeyToken '{}': {}", text, e))?;

        let bytes: [u8; 8] = decoded.as_slice().try_into().map_err(|_| {
            malformed_error!(
                "PublicKeyToken must be exactly 8 bytes (16 hex characters), got {} bytes from '{}'",
                decoded.len(),
                text
            )
        })?;
        Ok(PublicKeyToken(bytes))
    }

    /// The token bytes in display order.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }
}

impl fmt::Display for PublicKeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl From<Identity> for PublicKeyToken {
    fn from(identity: Identity) -> Self {
        identity.to_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ECMA_KEY: [u8; 16] = [0, 0, 0, 0, 0, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0];

    #[test]
    fn test_identity_from_pubkey() {
        let data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16];
        let identity = Identity::from(&data, true).unwrap();

        match identity {
            Identity::PubKey(pubkey_data) => assert_eq!(pubkey_data, data),
            Identity::Token(_) => panic!("Expected PubKey variant"),
        }
    }

    #[test]
    fn test_identity_from_token() {
        let data = [0xb7, 0x7a, 0x5c, 0x56, 0x19, 0x34, 0xe0, 0x89];
        let identity = Identity::from(&data, false).unwrap();

        assert_eq!(identity, Identity::Token(0x89e0_3419_565c_7ab7));
        assert_eq!(identity.to_token().to_string(), "b77a5c561934e089");
    }

    #[test]
    fn test_identity_from_token_insufficient_data() {
        let result = Identity::from(&[1, 2, 3], false);
        assert!(result.is_err());
    }

    #[test]
    fn test_ecma_key_token() {
        let identity = Identity::PubKey(ECMA_KEY.to_vec());
        assert_eq!(identity.to_token().to_string(), "b77a5c561934e089");
    }

    #[test]
    fn test_pubkey_token_is_reversed_digest_tail() {
        let key = vec![0x42u8; 160];
        let digest = Sha1::digest(&key);
        let mut expected: Vec<u8> = digest[digest.len() - 8..].to_vec();
        expected.reverse();

        let token = Identity::PubKey(key).to_token();
        assert_eq!(token.as_bytes().to_vec(), expected);
    }

    #[test]
    fn test_token_parse() {
        let token = PublicKeyToken::parse("b03f5f7f11d50a3a").unwrap();
        assert_eq!(
            token.as_bytes(),
            &[0xb0, 0x3f, 0x5f, 0x7f, 0x11, 0xd5, 0x0a, 0x3a]
        );
        assert_eq!(token.to_string(), "b03f5f7f11d50a3a");
        assert_eq!(
            PublicKeyToken::parse("000000000000000f").unwrap().to_string(),
            "000000000000000f"
        );

        assert!(PublicKeyToken::parse("b03f5f7f").is_err());
        assert!(PublicKeyToken::parse("zz3f5f7f11d50a3a").is_err());
    }
}
