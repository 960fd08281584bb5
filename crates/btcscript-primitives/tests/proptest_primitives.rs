use proptest::prelude::*;

use btcscript_primitives::chainhash::Hash;
use btcscript_primitives::ec::{PublicKey, Signature};
use btcscript_primitives::hash::{sha256, sha256d};
use btcscript_primitives::util::{VarInt, WireReader, WireWriter};
use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::SigningKey;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn sign_then_verify_through_der(
        seed in prop::array::uniform32(any::<u8>()),
        msg in prop::collection::vec(any::<u8>(), 0..256)
    ) {
        // Not every 32-byte array is a valid scalar.
        if let Ok(sk) = SigningKey::from_slice(&seed) {
            let digest = sha256d(&msg);
            let sig: k256::ecdsa::Signature = sk.sign_prehash(&digest).unwrap();
            let der = sig.to_der();

            let parsed = Signature::from_der(der.as_bytes()).unwrap();
            prop_assert_eq!(parsed.to_der(), der.as_bytes().to_vec());

            let key = PublicKey::from_bytes(&sk.verifying_key().to_sec1_bytes()).unwrap();
            prop_assert!(key.verify(&digest, &parsed));

            let other = sha256(&digest);
            prop_assert!(!key.verify(&other, &parsed));
        }
    }

    #[test]
    fn hash_hex_roundtrip(bytes in prop::array::uniform32(any::<u8>())) {
        let hash = Hash::new(bytes);
        let hash2 = Hash::from_hex(&hash.to_string()).unwrap();
        prop_assert_eq!(hash.as_bytes(), hash2.as_bytes());
    }

    #[test]
    fn varint_reader_writer_agree(values in prop::collection::vec(any::<u64>(), 0..16)) {
        let mut w = WireWriter::new();
        for v in &values {
            w.write_varint(VarInt(*v));
        }
        let bytes = w.into_bytes();
        let expected: usize = values.iter().map(|v| VarInt(*v).length()).sum();
        prop_assert_eq!(bytes.len(), expected);

        let mut r = WireReader::new(&bytes);
        for v in &values {
            prop_assert_eq!(r.read_varint().unwrap().value(), *v);
        }
        prop_assert_eq!(r.remaining(), 0);
    }
}
