use num_traits::AsPrimitive;

pub type BaseType = u64;
pub type SeedType = BaseType;

pub const BITS: [SeedType; 8] = [
    (0x68E31DA4 as BaseType) << 32 | 0xB5297A4D as BaseType,  // 0b0110'1000'1110'0011'0001'1101'1010'0100'1011'0101'0010'1001'0111'1010'0100'1101
    (0x1B56C4E9 as BaseType) << 32 | 0xA37B4539 as BaseType,  // 0b0001'1011'0101'0110'1100'1100'1110'1001'1010'0011'0111'1011'0100'0101'0011'1001
    (0x72BE5D74 as BaseType) << 32 | 0xC3E1F763 as BaseType,  // 0b0111'0010'1011'1110'0101'1101'0111'0100'1100'0011'1110'0001'1111'0111'0110'0011
    (0xD0B3AC93 as BaseType) << 32 | 0x9ACFC8C5 as BaseType,  // 0b1101'0000'1011'0011'1010'1100'1001'0011'1001'1010'1100'1111'1100'1000'1100'0101
    0xFFFFFFFFFFFFFFC5,
    0xFFFFFFFFFFFFFF43,
    0xFFFFFFFFFFFFFC2F,
    0xFFFFFFFFFFFFF837,
];
pub const SEED: SeedType = (0xD0B3AC93 as BaseType) << 32 | 0x9ACFC8C5;
pub const SHIFTS: [u32; 8] = [41, 37, 29, 23, 19, 17, 11, 7];

/// Rounds used by [`get_fast_1d_noise`].
const FAST_ROUNDS: usize = 3;

/// 2^-53, the spacing of doubles in [0.5, 1).
const UNIT_SCALE: f64 = 1.0 / (1u64 << 53) as f64;

/// Mangles `value` with `seed` through alternating multiply/xor-shift and
/// add/xor-shift rounds. One round per `(bit, shift)` pair.
pub fn get_1d_noise<X, S>(
    value: X,
    seed: S,
    bits: impl IntoIterator<Item = impl AsPrimitive<BaseType>>,
    shifts: impl IntoIterator<Item = impl AsPrimitive<u32>>,
) -> BaseType
where
    X: AsPrimitive<BaseType>,
    S: AsPrimitive<BaseType>,
{
    let mut mangled_bits: BaseType = value.as_();
    for (index, (bit, shift)) in bits.into_iter().zip(shifts).enumerate() {
        if index % 2 == 0 {
            mangled_bits = mangled_bits.wrapping_mul(bit.as_());
            if index == 0 {
                mangled_bits = mangled_bits.wrapping_add(seed.as_());
            }
            mangled_bits ^= mangled_bits.wrapping_shr(shift.as_());
        } else {
            mangled_bits = mangled_bits.wrapping_add(bit.as_());
            mangled_bits ^= mangled_bits.wrapping_shl(shift.as_());
        }
    }
    mangled_bits
}

#[inline]
pub fn get_fast_1d_noise(value: impl AsPrimitive<BaseType>, seed: impl AsPrimitive<BaseType>) -> BaseType {
    get_1d_noise(value, seed, BITS.into_iter().take(FAST_ROUNDS), SHIFTS.into_iter().take(FAST_ROUNDS))
}

/// Full-strength step used by the generators: all eight rounds.
#[inline]
pub fn step(state: BaseType, seed: SeedType) -> BaseType {
    get_1d_noise(state, seed, BITS, SHIFTS)
}

/// Maps the top 53 bits onto [0, 1). Never returns 1.0.
#[inline]
pub fn to_unit(bits: BaseType) -> f64 {
    (bits >> 11) as f64 * UNIT_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::zero(0_u64, 12296723819396979203_u64)]
    #[case::one(1_u64, 4035685362827872442_u64)]
    fn test_get_fast_1d_noise(#[case] input: u64, #[case] expected: u64) {
        let bits = BITS.into_iter().take(3);
        let shifts = SHIFTS.into_iter().take(3);
        let result_a = get_1d_noise(input, SEED, bits, shifts);
        let result_b = get_fast_1d_noise(input, SEED);
        assert_eq!(result_a, result_b);
        assert_eq!(result_a, expected);
    }

    #[rstest]
    #[case::u8_0(0_u8, 3_u8)]
    #[case::u8_20(20_u8, 89_u8)]
    #[case::u16_1(1_u16, 18618_u16)]
    #[case::u32_1(1_u32, 2627291322_u32)]
    fn test_narrow_inputs_truncate<I>(#[case] input: I, #[case] expected: I)
    where
        I: AsPrimitive<BaseType> + PartialEq + std::fmt::Debug,
        BaseType: AsPrimitive<I>,
    {
        let result: I = get_fast_1d_noise(input, SEED).as_();
        assert_eq!(result, expected);
    }

    #[rstest]
    #[case::zero(0, 11232662089424706751)]
    #[case::one(1, 4637869880875179677)]
    fn test_step(#[case] state: u64, #[case] expected: u64) {
        assert_eq!(step(state, SEED), expected);
    }

    #[test]
    fn test_to_unit_bounds() {
        assert_eq!(to_unit(0), 0.0);
        assert!(to_unit(u64::MAX) < 1.0);
        assert!(to_unit(u64::MAX) > 0.999_999);
    }
}
