use proptest::prelude::*;

use btcscript_script::classify::{is_pubkey_hash_type, is_pubkey_type};
use btcscript_script::interpreter::{as_bool, Engine};
use btcscript_script::operand::{decode_push_length, encode_push_header, smallest_push};
use btcscript_script::{Opcode, Operation, Script};

fn arb_operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 0..600).prop_map(|d| Operation::push(&d).unwrap()),
        (0x4fu8..=0xff).prop_map(|b| Operation::from_opcode(Opcode::from_byte(b))),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn built_scripts_survive_serialization(ops in prop::collection::vec(arb_operation(), 0..16)) {
        let script: Script = ops.into_iter().collect();
        let parsed = Script::parse(&script.to_bytes()).unwrap();
        prop_assert_eq!(parsed, script);
    }

    #[test]
    fn parsed_bytes_serialize_back(data in prop::collection::vec(any::<u8>(), 0..256)) {
        if let Ok(script) = Script::parse(&data) {
            prop_assert_eq!(script.to_bytes(), data);
        } else {
            prop_assert!(Script::parse_lenient(&data).is_empty());
        }
    }

    #[test]
    fn push_header_carries_length(len in 0usize..70_000) {
        let opcode = smallest_push(len).unwrap();
        let header = encode_push_header(opcode, len).unwrap();
        let (decoded, width) = decode_push_length(header[0], &header[1..]).unwrap();
        prop_assert_eq!(decoded, len);
        prop_assert_eq!(width + 1, header.len());
    }

    #[test]
    fn nonzero_byte_other_than_sign_is_true(
        prefix in prop::collection::vec(any::<u8>(), 0..8),
        b in 1u8..=0xff,
    ) {
        let mut item = prefix.clone();
        item.push(b);
        let expected = b != 0x80 || prefix.iter().any(|&x| x != 0);
        prop_assert_eq!(as_bool(&item), expected);
    }

    #[test]
    fn classifier_predicates_exclusive(data in prop::collection::vec(any::<u8>(), 0..80)) {
        if let Ok(script) = Script::parse(&data) {
            let ops = script.operations();
            prop_assert!(!(is_pubkey_type(ops) && is_pubkey_hash_type(ops)));
        }
    }

    #[test]
    fn execution_never_panics(data in prop::collection::vec(any::<u8>(), 0..64)) {
        let script = Script::parse_lenient(&data);
        let _ = Engine::new().run(&script, None, 0);
        let _ = Engine::new().execute(&script, &script, None, 0);
    }
}
