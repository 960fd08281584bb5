use btcscript::transaction::sighash::SIGHASH_ALL;
use btcscript::{Config, Engine, PaymentType, Script, Transaction};

const BLOCK_170_TX: &str = "0100000001c997a5e56e104102fa209c6a852dd90660a20b2d9c352423edce25857fcd3704000000004847304402204e45e16932b8af514961a1d3a1a25fdf3f4f7732e9d624c6c61548ab5fb8cd410220181522ec8eca07de4860a4acdd12909d831cc56cbbac4622082221a8768d1d0901ffffffff0200ca9a3b00000000434104ae1a62fe09c5f51b13905f07f06b99a2f7159b2225f374cd378d71302fa28414e7aab37397f554a7df5f142c21c1b7303b8a0626f1baded5c72a704f7e6cd84cac00286bee0000000043410411db93e1dcdb8a016b49840f8c53bc1eb68a382e97b1482ecad7b148a6909a5cb2e0eaddfb84ccf9744464f82e160bfa9b8b64f9d4c03f999b8643f656b412a3ac00000000";

const SPENT_SCRIPT: &str = "410411db93e1dcdb8a016b49840f8c53bc1eb68a382e97b1482ecad7b148a6909a5cb2e0eaddfb84ccf9744464f82e160bfa9b8b64f9d4c03f999b8643f656b412a3ac";

#[test]
fn block_170_spend_verifies() {
    let tx = Transaction::from_hex(BLOCK_170_TX).unwrap();
    let locking = Script::from_hex(SPENT_SCRIPT).unwrap();
    assert_eq!(locking.payment_type(), PaymentType::PubKey);
    assert!(tx.verify_input(0, &locking).is_ok());

    let unlocking = &tx.inputs[0].unlocking_script;
    let sig = unlocking.operations()[0].data();
    assert_eq!(*sig.last().unwrap() as u32, SIGHASH_ALL);
    assert!(Engine::new().verify(unlocking, &locking, Some(&tx), 0));
}

#[test]
fn raw_bytes_follow_parse_mode() {
    let tx = Transaction::from_hex(BLOCK_170_TX).unwrap();
    let unlocking = tx.inputs[0].unlocking_script.to_bytes();
    let locking = hex::decode(SPENT_SCRIPT).unwrap();

    for cfg in [Config::strict(), Config::legacy()] {
        let engine = Engine::with_config(cfg);
        assert!(engine.execute_bytes(&unlocking, &locking, Some(&tx), 0).is_ok());
    }

    // a truncated locking script only parses leniently, to nothing
    let truncated = &locking[..10];
    assert!(Engine::new()
        .execute_bytes(&unlocking, truncated, Some(&tx), 0)
        .is_err());
    assert!(Engine::with_config(Config::legacy())
        .execute_bytes(&unlocking, truncated, Some(&tx), 0)
        .is_ok());
}
