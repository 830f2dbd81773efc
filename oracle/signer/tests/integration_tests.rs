//! Integration tests for fiscal-oracle-signer
//!
//! These tests exercise the oracle end to end the way a settlement contract
//! would see it:
//! - Reference scenarios for both regimes
//! - Tamper detection on every signed field
//! - Isolation between the standard and simplified signature spaces
//! - Concurrent use of one signer

use fiscal_crypto_secp256k1::Secp256k1Keypair;
use fiscal_oracle_core::{
    Address, AuthorizationMode, AuthorizationPayload, Sector, SignedAuthorization,
    StandardPayload, U256,
};
use fiscal_oracle_signer::{
    keyfile::{read_keyfile, write_keyfile},
    recover_signer, verify::recover_payload_signer, verify_authorization, AuthoritySigner,
};
use tempfile::TempDir;

// Well-known development key (DO NOT USE IN PRODUCTION)
const TEST_KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";
const SELLER: &str = "0x1234567890123456789012345678901234567890";
const INVOICE: &str = "NFe35260112345678000195550010000000011234567890";

fn signer() -> AuthoritySigner {
    AuthoritySigner::new(Secp256k1Keypair::from_hex(TEST_KEY).unwrap())
}

fn seller() -> Address {
    SELLER.parse().unwrap()
}

/// `n` whole currency units in 18-decimal base units.
fn units(n: u64) -> U256 {
    U256::from(n) * U256::exp10(18)
}

fn standard_payload(auth: &SignedAuthorization) -> StandardPayload {
    match auth.payload() {
        AuthorizationPayload::Standard(payload) => payload.clone(),
        other => panic!("expected a standard payload, got {:?}", other.mode()),
    }
}

// ============================================================================
// Reference Scenarios
// ============================================================================

mod scenarios {
    use super::*;

    #[test]
    fn test_standard_general_sector() {
        let signer = signer();
        let auth = signer
            .authorize_standard(INVOICE, seller(), units(1_000), Sector::resolve("PADRAO"), U256::zero())
            .unwrap();

        assert_eq!(auth.federal_share(), U256::from(865u64) * U256::exp10(17));
        assert_eq!(auth.state_share(), U256::from(1_115u64) * U256::exp10(17));
        assert_eq!(auth.municipal_share(), units(47));
        assert!(auth.credit_offset().is_zero());
        assert!(verify_authorization(&auth, &signer.address()).is_ok());
    }

    #[test]
    fn test_standard_with_credits() {
        let signer = signer();
        let auth = signer
            .authorize_standard(INVOICE, seller(), units(1_000), Sector::Standard, units(50))
            .unwrap();

        assert_eq!(auth.credit_offset(), units(50));
        assert!(verify_authorization(&auth, &signer.address()).is_ok());
    }

    #[test]
    fn test_standard_health_sector() {
        let signer = signer();
        let auth = signer
            .authorize_standard(INVOICE, seller(), units(1_000), Sector::resolve("SAUDE"), U256::zero())
            .unwrap();

        let tenth = U256::exp10(17);
        assert_eq!(auth.federal_share(), U256::from(433u64) * tenth);
        assert_eq!(auth.state_share(), U256::from(558u64) * tenth);
        assert_eq!(auth.municipal_share(), U256::from(235u64) * tenth);

        let total = auth.federal_share() + auth.state_share() + auth.municipal_share();
        assert_eq!(total, U256::from(1_226u64) * tenth);
    }

    #[test]
    fn test_simplified_retail() {
        let signer = signer();
        let auth = signer
            .authorize_simplified(INVOICE, seller(), units(200), Sector::resolve("PADRAO"))
            .unwrap();
        let breakdown = signer
            .engine()
            .calculate_simplified(units(200), Sector::Standard);

        assert_eq!(auth.rate_bps(), 2_650);
        assert_eq!(breakdown.tax_amount, units(53));
        assert_eq!(breakdown.net_to_seller, units(147));
        assert!(verify_authorization(&auth, &signer.address()).is_ok());
    }

    #[test]
    fn test_simplified_basic_basket() {
        let signer = signer();
        let auth = signer
            .authorize_simplified(INVOICE, seller(), units(200), Sector::resolve("CESTA_BASICA"))
            .unwrap();

        assert_eq!(auth.rate_bps(), 0);
        assert!(verify_authorization(&auth, &signer.address()).is_ok());
    }

    #[test]
    fn test_unknown_sector_signs_general_rates() {
        let signer = signer();
        let unknown = signer
            .authorize_standard(INVOICE, seller(), units(10), Sector::resolve("MINERACAO"), U256::zero())
            .unwrap();
        let general = signer
            .authorize_standard(INVOICE, seller(), units(10), Sector::Standard, U256::zero())
            .unwrap();

        assert_eq!(unknown.digest(), general.digest());
        assert_eq!(unknown.signature(), general.signature());
    }
}

// ============================================================================
// Tamper Detection
// ============================================================================

mod tampering {
    use super::*;

    #[test]
    fn test_federal_share_plus_one_is_rejected() {
        let signer = signer();
        let auth = signer
            .authorize_standard(INVOICE, seller(), units(1_000), Sector::Standard, U256::zero())
            .unwrap();

        let mut tampered = standard_payload(&auth);
        tampered.federal_share += U256::one();

        let recovered = recover_payload_signer(&tampered.into(), auth.signature());
        assert_ne!(recovered, Some(auth.signer()));
    }

    #[test]
    fn test_zeroed_federal_share_is_rejected() {
        let signer = signer();
        let auth = signer
            .authorize_standard(INVOICE, seller(), units(1_000), Sector::Standard, U256::zero())
            .unwrap();

        let tampered = StandardPayload {
            federal_share: U256::zero(),
            ..standard_payload(&auth)
        };
        let forged = SignedAuthorization::new(
            tampered.into(),
            *auth.signature(),
            auth.signer(),
            auth.issued_at(),
        );

        assert!(verify_authorization(&forged, &signer.address()).is_err());
    }

    #[test]
    fn test_every_field_is_bound() {
        let signer = signer();
        let auth = signer
            .authorize_standard(INVOICE, seller(), units(1_000), Sector::Standard, units(20))
            .unwrap();
        let original = standard_payload(&auth);

        let tampered = [
            StandardPayload {
                invoice_id: format!("{INVOICE}0"),
                ..original.clone()
            },
            StandardPayload {
                seller: Address::new([0xff; 20]),
                ..original.clone()
            },
            StandardPayload {
                gross_amount: original.gross_amount + U256::one(),
                ..original.clone()
            },
            StandardPayload {
                state_share: original.state_share - U256::one(),
                ..original.clone()
            },
            StandardPayload {
                municipal_share: original.municipal_share + U256::one(),
                ..original.clone()
            },
            StandardPayload {
                credit_offset: original.credit_offset + U256::one(),
                ..original.clone()
            },
        ];

        for payload in tampered {
            let recovered = recover_payload_signer(&payload.into(), auth.signature());
            assert_ne!(recovered, Some(signer.address()));
        }
    }
}

// ============================================================================
// Regime Isolation
// ============================================================================

mod regime_isolation {
    use super::*;

    #[test]
    fn test_simplified_signature_fails_as_standard() {
        let signer = signer();
        let auth = signer
            .authorize_simplified(INVOICE, seller(), units(200), Sector::Standard)
            .unwrap();
        assert_eq!(auth.mode(), AuthorizationMode::Simplified);

        // Same identity and amount, with the rate dropped into a numeric slot.
        let replay = StandardPayload {
            invoice_id: INVOICE.to_string(),
            seller: seller(),
            gross_amount: units(200),
            federal_share: U256::from(auth.rate_bps()),
            state_share: U256::zero(),
            municipal_share: U256::zero(),
            credit_offset: U256::zero(),
        };

        let recovered = recover_payload_signer(&replay.into(), auth.signature());
        assert_ne!(recovered, Some(signer.address()));
    }

    #[test]
    fn test_standard_and_simplified_digests_differ() {
        let signer = signer();
        let standard = signer
            .authorize_standard(INVOICE, seller(), units(200), Sector::BasicBasket, U256::zero())
            .unwrap();
        let simplified = signer
            .authorize_simplified(INVOICE, seller(), units(200), Sector::BasicBasket)
            .unwrap();

        assert_ne!(standard.digest(), simplified.digest());
        assert_ne!(standard.signature(), simplified.signature());
    }
}

// ============================================================================
// Key Provisioning and Serialization
// ============================================================================

mod provisioning {
    use super::*;

    #[test]
    fn test_signer_from_keyfile() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("oracle.key");
        write_keyfile(&path, &Secp256k1Keypair::from_hex(TEST_KEY).unwrap()).unwrap();

        let loaded = AuthoritySigner::new(read_keyfile(&path).unwrap());
        assert_eq!(loaded.address(), signer().address());
    }

    #[test]
    fn test_json_roundtrip_still_verifies() {
        let signer = signer();
        let auth = signer
            .authorize_standard(INVOICE, seller(), units(1_000), Sector::Education, units(3))
            .unwrap();

        let json = serde_json::to_string(&auth).unwrap();
        let decoded: SignedAuthorization = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, auth);
        assert_eq!(recover_signer(&decoded), Some(signer.address()));
    }

    #[test]
    fn test_distinct_keys_distinct_signers() {
        let a = AuthoritySigner::new(Secp256k1Keypair::generate(&mut rand_core::OsRng));
        let b = AuthoritySigner::new(Secp256k1Keypair::generate(&mut rand_core::OsRng));
        assert_ne!(a.address(), b.address());

        let auth = a
            .authorize_simplified(INVOICE, seller(), units(1), Sector::Health)
            .unwrap();
        assert!(verify_authorization(&auth, &b.address()).is_err());
    }
}

// ============================================================================
// Concurrency
// ============================================================================

mod concurrency {
    use super::*;

    #[test]
    fn test_shared_signer_counts_every_issuance() {
        const THREADS: u64 = 8;
        const PER_THREAD: u64 = 16;

        let signer = signer();
        std::thread::scope(|scope| {
            for t in 0..THREADS {
                let signer = &signer;
                scope.spawn(move || {
                    for i in 0..PER_THREAD {
                        let invoice = format!("NFe-{t}-{i}");
                        let auth = signer
                            .authorize_standard(&invoice, seller(), units(i + 1), Sector::Standard, U256::zero())
                            .unwrap();
                        assert!(verify_authorization(&auth, &signer.address()).is_ok());
                    }
                });
            }
        });

        assert_eq!(signer.issuance_count(), THREADS * PER_THREAD);
    }
}
