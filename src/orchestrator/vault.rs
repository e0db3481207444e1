//! The Vault: Judge Identity
//!
//! Holds the judge's wallet key, derived once at startup from a mnemonic,
//! and signs finalized reports as EIP-191 personal messages.

use alloy_primitives::Address;
use alloy_signer::SignerSync;
use alloy_signer_local::{coins_bip39::English, MnemonicBuilder, PrivateKeySigner};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::JudgeError;
use crate::judge::{FinalReport, SignedDecision};
use crate::utils;

/// Signing capability handed to request handlers.
pub trait DecisionSigner: Send + Sync {
    /// Checksummed, `0x`-prefixed address of the signing key
    fn address(&self) -> String;

    /// Hex signature (no `0x` prefix) over `message` as a personal message.
    fn sign_message(&self, message: &str) -> Result<String, JudgeError>;
}

pub struct WalletSigner {
    signer: PrivateKeySigner,
    address: Address,
}

impl WalletSigner {
    /// Derive the first account (`m/44'/60'/0'/0/0`) of `phrase`.
    pub fn from_mnemonic(phrase: &str) -> Result<Self, JudgeError> {
        let signer = MnemonicBuilder::<English>::default()
            .phrase(phrase.trim())
            .build()
            .map_err(|e| JudgeError::Signing(format!("Invalid mnemonic: {}", e)))?;
        let address = signer.address();

        info!("🔐 Vault: Judge identity {}", address.to_checksum(None));
        Ok(Self { signer, address })
    }
}

impl std::fmt::Debug for WalletSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletSigner")
            .field("address", &self.address.to_checksum(None))
            .finish_non_exhaustive()
    }
}

impl DecisionSigner for WalletSigner {
    fn address(&self) -> String {
        self.address.to_checksum(None)
    }

    fn sign_message(&self, message: &str) -> Result<String, JudgeError> {
        let signature = self
            .signer
            .sign_message_sync(message.as_bytes())
            .map_err(|e| JudgeError::Signing(e.to_string()))?;
        Ok(hex::encode(signature.as_bytes()))
    }
}

/// Canonical text of `value`, as signed.
pub fn canonical_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JudgeError> {
    utils::canonical_json(value).map_err(|e| JudgeError::Internal(e.into()))
}

/// Sign the canonical text of `report`.
pub fn sign_decision(
    signer: &dyn DecisionSigner,
    report: FinalReport,
) -> Result<SignedDecision, JudgeError> {
    let text = canonical_json(&report)?;
    let signature = signer.sign_message(&text)?;
    debug!("Signed {} bytes of report JSON", text.len());

    Ok(SignedDecision {
        judge_address: signer.address(),
        result: report,
        signature,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MNEMONIC: &str = "test test test test test test test test test test test junk";

    fn signer() -> WalletSigner {
        WalletSigner::from_mnemonic(TEST_MNEMONIC).unwrap()
    }

    #[test]
    fn test_address_from_mnemonic() {
        assert_eq!(signer().address(), "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    }

    #[test]
    fn test_invalid_mnemonic_rejected() {
        let err = WalletSigner::from_mnemonic("not a real phrase").unwrap_err();
        assert!(matches!(err, JudgeError::Signing(_)));
    }

    #[test]
    fn test_signing_is_deterministic() {
        let s = signer();
        let a = s.sign_message("{\"water_health_percent\": \"72%\"}").unwrap();
        let b = s.sign_message("{\"water_health_percent\": \"72%\"}").unwrap();
        let c = s.sign_message("{\"water_health_percent\": \"73%\"}").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 130);
        assert!(!a.starts_with("0x"));
    }

    #[test]
    fn test_sign_decision_keeps_field_order() {
        let report = FinalReport::simplified(72, "Drinkable after boiling.", "Bacteria.", "Boil.");
        let decision = sign_decision(&signer(), report).unwrap();

        assert_eq!(decision.judge_address, "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let text = canonical_json(&decision.result).unwrap();
        assert!(
            text.starts_with("{\"water_health_percent\": \"72%\", \"current_water_use_cases\": ")
        );
        assert_eq!(decision.signature, signer().sign_message(&text).unwrap());
    }
}
