//! Key derivation context shared by advertisement signing and verification.

use overlay_crypto::{Counterparty, DerivationContext, SecurityLevel, WalletProtocol};
use overlay_types::Protocol;

/// Advertisement keys are scoped per app and per counterparty.
pub const LINKAGE_SECURITY_LEVEL: SecurityLevel = SecurityLevel::EveryAppAndCounterparty;

/// Every identity advertises under key id `"1"`.
pub const LINKAGE_KEY_ID: &str = "1";

/// Context for `protocol`'s advertisement key.
///
/// Signers use [`Counterparty::Anyone`]; verifiers use the claimed identity.
pub fn linkage_context(protocol: Protocol, counterparty: Counterparty) -> DerivationContext {
    DerivationContext::new(
        WalletProtocol::new(LINKAGE_SECURITY_LEVEL, protocol.protocol_name()),
        LINKAGE_KEY_ID,
        counterparty,
    )
}
