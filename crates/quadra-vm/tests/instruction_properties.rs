//! Property tests for the instruction wire format.

use proptest::prelude::*;
use quadra_vm::{Dst, Instruction, Opcode, Port, Src};

fn arb_port() -> impl Strategy<Value = Port> {
    prop_oneof![
        Just(Port::Up),
        Just(Port::Down),
        Just(Port::Left),
        Just(Port::Right),
    ]
}

fn arb_src() -> impl Strategy<Value = Src> {
    prop_oneof![
        (0u32..=255).prop_map(Src::Lit),
        Just(Src::Acc),
        Just(Src::Nil),
        Just(Src::In),
        arb_port().prop_map(Src::Port),
        Just(Src::Last),
    ]
}

fn arb_dst() -> impl Strategy<Value = Dst> {
    prop_oneof![
        Just(Dst::Acc),
        Just(Dst::Nil),
        Just(Dst::Out),
        arb_port().prop_map(Dst::Port),
        Just(Dst::Last),
    ]
}

fn arb_instruction() -> impl Strategy<Value = Instruction> {
    ((1u32..=13).prop_map(Opcode::from_code), arb_src(), arb_dst())
        .prop_map(|(op, src, dst)| Instruction::new(op, src, dst))
}

proptest! {
    #[test]
    fn encode_decode_roundtrip(instr in arb_instruction()) {
        let word = instr.encode().unwrap();
        prop_assert_eq!(Instruction::decode(word), instr);
    }

    #[test]
    fn encoding_is_injective(a in arb_instruction(), b in arb_instruction()) {
        let wa = a.encode().unwrap();
        let wb = b.encode().unwrap();
        prop_assert_eq!(a == b, wa == wb);
    }

    #[test]
    fn wide_literals_never_encode(value in 256u32.., dst in arb_dst()) {
        prop_assert!(Instruction::mov(Src::Lit(value), dst).encode().is_err());
    }

    #[test]
    fn decoding_is_total_and_canonical(word in any::<u32>()) {
        let instr = Instruction::decode(word);
        // Whatever the tag bits were, the decoded instruction is encodable,
        // and its encoding decodes back to itself.
        let canonical = instr.encode().unwrap();
        prop_assert_eq!(Instruction::decode(canonical), instr);
    }
}
