//! Identity - Derives the Nostr signing identity from a mnemonic phrase.
//!
//! The phrase is validated against the BIP-39 English wordlist, then the
//! signing key is derived at the NIP-06 path `m/44'/1237'/0'/0/0`. Only the
//! address-index-0 identity is used; the mnemonic itself is never stored.
//!
//! Reference: https://github.com/nostr-protocol/nips/blob/master/06.md

use std::str::FromStr;

use bip39::Mnemonic;
use bitcoin::bip32::{DerivationPath, Xpriv};
use bitcoin::secp256k1::Secp256k1;
use nostr::nips::nip19::ToBech32;

/// NIP-06: purpose 44' / coin type 1237' / account 0' / change 0 / index 0
const NOSTR_DERIVATION_PATH: &str = "m/44'/1237'/0'/0/0";

/// Errors during identity derivation
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),
    #[error("Derivation failed: {0}")]
    DerivationFailed(String),
    #[error("Key encoding failed: {0}")]
    EncodingFailed(String),
}

/// Signing identity for a session. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct Identity {
    pub keys: nostr::Keys,
    /// 32-byte x-only public key, hex encoded
    pub pubkey_hex: String,
    /// NIP-19 public encoding
    pub npub: String,
    /// NIP-19 secret encoding
    pub nsec: String,
}

impl Identity {
    /// Derive the identity from a BIP-39 mnemonic (empty passphrase).
    pub fn from_mnemonic(mnemonic_str: &str) -> Result<Self, IdentityError> {
        let mnemonic = Mnemonic::parse_normalized(mnemonic_str)
            .map_err(|e| IdentityError::InvalidMnemonic(e.to_string()))?;
        let seed = mnemonic.to_seed("");

        let secp = Secp256k1::new();
        let master = Xpriv::new_master(bitcoin::Network::Bitcoin, &seed)
            .map_err(|e| IdentityError::DerivationFailed(e.to_string()))?;
        let path = DerivationPath::from_str(NOSTR_DERIVATION_PATH)
            .map_err(|e| IdentityError::DerivationFailed(e.to_string()))?;
        let derived = master
            .derive_priv(&secp, &path)
            .map_err(|e| IdentityError::DerivationFailed(e.to_string()))?;

        let sk = nostr::SecretKey::from_slice(&derived.private_key.secret_bytes())
            .map_err(|e| IdentityError::DerivationFailed(e.to_string()))?;
        let keys = nostr::Keys::new(sk);

        let pubkey_hex = keys.public_key().to_hex();
        let npub = keys
            .public_key()
            .to_bech32()
            .map_err(|e| IdentityError::EncodingFailed(e.to_string()))?;
        let nsec = keys
            .secret_key()
            .to_bech32()
            .map_err(|e| IdentityError::EncodingFailed(e.to_string()))?;

        Ok(Self { keys, pubkey_hex, npub, nsec })
    }

    pub fn public_key(&self) -> nostr::PublicKey {
        self.keys.public_key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MNEMONIC: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    // NIP-06 reference vector
    const NIP06_MNEMONIC: &str =
        "leader monkey parrot ring guide accident before fence cannon height naive bean";

    #[test]
    fn test_nip06_reference_vector() {
        let identity = Identity::from_mnemonic(NIP06_MNEMONIC).expect("should derive");
        assert_eq!(
            identity.keys.secret_key().to_secret_hex(),
            "7f7ff03d123792d6ac594bfa67bf6d0c0ab55b6b1fdb6249303fe861f1ccba9a"
        );
        assert_eq!(
            identity.pubkey_hex,
            "17162c921dc4d2518f9a101db33695df1afb56ab82f5ff3e5da6eec3ca5cd917"
        );
        assert_eq!(
            identity.nsec,
            "nsec10allq0gjx7fddtzef0ax00mdps9t2kmtrldkyjfs8l5xruwvh2dq0lhhkp"
        );
        assert_eq!(
            identity.npub,
            "npub1zutzeysacnf9rru6zqwmxd54mud0k44tst6l70ja5mhv8jjumytsd2x7nu"
        );
    }

    #[test]
    fn test_identity_from_mnemonic() {
        let identity = Identity::from_mnemonic(TEST_MNEMONIC).expect("should derive");
        assert_eq!(identity.pubkey_hex.len(), 64);
        assert!(identity.npub.starts_with("npub1"));
        assert!(identity.nsec.starts_with("nsec1"));
    }

    #[test]
    fn test_identity_deterministic() {
        let id1 = Identity::from_mnemonic(TEST_MNEMONIC).expect("should derive");
        let id2 = Identity::from_mnemonic(TEST_MNEMONIC).expect("should derive");
        assert_eq!(id1.pubkey_hex, id2.pubkey_hex);
        assert_eq!(id1.npub, id2.npub);
        assert_eq!(id1.nsec, id2.nsec);
    }

    #[test]
    fn test_rejects_bad_checksum() {
        let err = Identity::from_mnemonic(
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon",
        );
        assert!(matches!(err, Err(IdentityError::InvalidMnemonic(_))));
    }

    #[test]
    fn test_rejects_garbage_words() {
        let err = Identity::from_mnemonic("definitely not a wordlist phrase");
        assert!(matches!(err, Err(IdentityError::InvalidMnemonic(_))));
    }
}
