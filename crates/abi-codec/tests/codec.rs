//! Cross-module tests driving the public API the way a contract caller
//! would: parse a signature, encode arguments, decode them back.

use abi_codec::{decode, decode_topic, encode, encode_function_call, encode_topic, AbiError, Type, Value};
use alloy_primitives::{Address, U256};

#[test]
fn call_arguments_round_trip_through_parsed_types() {
    let types = [
        Type::parse("address").unwrap(),
        Type::parse("uint256").unwrap(),
        Type::parse("string").unwrap(),
        Type::parse("bytes32[2]").unwrap(),
        Type::parse("uint64[]").unwrap(),
    ];
    let values = [
        Value::Address(Address::repeat_byte(0x77)),
        Value::Uint(U256::from(123_456_789u64)),
        Value::from("transfer memo"),
        Value::Array(vec![
            Value::FixedBytes(vec![0x11; 32]),
            Value::FixedBytes(vec![0x22; 32]),
        ]),
        Value::Array(vec![Value::from(1u64), Value::from(2u64), Value::from(3u64)]),
    ];

    let encoded = encode(&types, &values).unwrap();
    let decoded = decode(&types, &encoded).unwrap();
    assert_eq!(decoded, values);
}

#[test]
fn erc20_transfer_calldata_matches_known_vector() {
    let to = Address::new([
        0xde, 0xad, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    ]);
    let amount = U256::from(10u64).pow(U256::from(18u64));
    let data = encode_function_call(
        "transfer",
        &[Type::Address, Type::Uint(256)],
        &[Value::Address(to), Value::Uint(amount)],
    )
    .unwrap();

    assert_eq!(hex::encode(&data[..4]), "a9059cbb");
    assert!(hex::encode(&data[4..36]).starts_with("000000000000000000000000dead"));
    assert!(hex::encode(&data[36..68]).ends_with("0de0b6b3a7640000"));
}

#[test]
fn mixed_static_dynamic_offsets_are_stable() {
    // Static elements fill head slots in place; the dynamic string's head
    // slot holds the offset of its tail.
    let types = [
        Type::parse("uint256").unwrap(),
        Type::parse("string").unwrap(),
        Type::parse("bool").unwrap(),
    ];
    let values = [Value::from(5u64), Value::from("dog"), Value::Bool(true)];
    let encoded = encode(&types, &values).unwrap();

    assert_eq!(encoded.len(), 32 * 5);
    assert_eq!(encoded[31], 5);
    assert_eq!(encoded[63], 96, "string tail starts after the 3-slot head");
    assert_eq!(encoded[95], 1);
    assert_eq!(encoded[127], 3, "string length");
    assert_eq!(&encoded[128..131], b"dog");
}

#[test]
fn every_truncation_of_a_complex_buffer_fails_cleanly() {
    let types = [Type::parse("tuple(string name, uint256[] amounts)[]").unwrap()];
    let values = [Value::Array(vec![Value::Tuple(vec![
        ("name".to_string(), Value::from("holder")),
        (
            "amounts".to_string(),
            Value::Array(vec![Value::from(10u64), Value::from(20u64)]),
        ),
    ])])];
    let encoded = encode(&types, &values).unwrap();

    for cut in 0..encoded.len() {
        let result = decode(&types, &encoded[..cut]);
        assert!(
            matches!(
                result,
                Err(AbiError::BufferTooShort { .. }) | Err(AbiError::OffsetOutOfRange { .. })
            ),
            "truncation at byte {cut} must be detected, got {result:?}"
        );
    }
}

#[test]
fn topic_encoding_is_one_way_for_dynamic_types() {
    let ty = Type::parse("string").unwrap();
    let value = Value::from("indexed payload");
    let topic = encode_topic(&ty, &value).unwrap();

    // The topic is a hash, not the payload.
    assert_ne!(&topic.as_slice()[..15], b"indexed payload");
    assert_eq!(
        decode_topic(&ty, &topic),
        Err(AbiError::NonInvertibleTopic("string".into()))
    );
}

#[test]
fn indexed_value_types_survive_the_topic_round_trip() {
    let cases = [
        ("bool", Value::Bool(true)),
        ("uint64", Value::from(20u64)),
        ("uint256", Value::Uint(U256::from(1_000_000u64))),
        (
            "address",
            Value::Address(Address::new([
                0x01, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            ])),
        ),
    ];
    for (sig, value) in cases {
        let ty = Type::parse(sig).unwrap();
        let topic = encode_topic(&ty, &value).unwrap();
        assert_eq!(decode_topic(&ty, &topic).unwrap(), value, "case {sig}");
    }
}
