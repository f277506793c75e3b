//! Property-based tests for the token pipeline.

use proptest::prelude::*;
use totp_token::{decode, format_token, Algorithm, Timestamp, TokenGenerator, TotpError};

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

fn algorithm_strategy() -> impl Strategy<Value = Algorithm> {
    proptest::sample::select(Algorithm::ALL.to_vec())
}

fn key_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(proptest::sample::select(ALPHABET.to_vec()), 1..64)
        .prop_map(|symbols| String::from_utf8(symbols).unwrap())
}

proptest! {
    /// Tokens never exceed the digit count, and only fall short when the value is small.
    #[test]
    fn token_width(
        key in key_strategy(),
        seconds in any::<u64>(),
        digits in 1usize..=12,
        algorithm in algorithm_strategy(),
    ) {
        let generator = TokenGenerator::default()
            .with_algorithm(algorithm)
            .with_digits(digits)
            .unwrap()
            .with_timestamp(Timestamp::Seconds(seconds));
        let token = generator.generate(&key).unwrap();
        prop_assert!(token.len() <= digits);
        prop_assert!(token.bytes().all(|c| c.is_ascii_digit()));
        if token.len() < digits {
            prop_assert!(token.len() <= 10);
            prop_assert!(token.len() == 1 || !token.starts_with('0'));
        }
    }

    /// Every instant of a period yields the same token.
    #[test]
    fn same_period_same_token(
        key in key_strategy(),
        window in 0u64..100_000_000,
        period in 1u64..=120,
        a in any::<u64>(),
        b in any::<u64>(),
    ) {
        let start = window * period;
        let generator = TokenGenerator::default().with_period(period).unwrap();
        prop_assert_eq!(
            generator.generate_at(&key, Timestamp::Seconds(start + a % period)).unwrap(),
            generator.generate_at(&key, Timestamp::Seconds(start + b % period)).unwrap()
        );
    }

    /// Lowercase input and trailing padding decode to the same bytes.
    #[test]
    fn case_and_padding_insensitive(key in key_strategy(), padding in 0usize..8) {
        let variant = format!("{}{}", key.to_lowercase(), "=".repeat(padding));
        prop_assert_eq!(decode(&key).unwrap(), decode(&variant).unwrap());
        prop_assert_eq!(decode(&key).unwrap().len(), key.len() * 5 / 8);
    }

    /// Seconds and their millisecond counterpart land on the same counter.
    #[test]
    fn millis_match_seconds(key in key_strategy(), seconds in 0u64..10_000_000_000, ms in 0u64..1000) {
        let generator = TokenGenerator::default();
        prop_assert_eq!(
            generator.generate_at(&key, Timestamp::Seconds(seconds)).unwrap(),
            generator.generate_at(&key, Timestamp::Millis(seconds * 1000 + ms)).unwrap()
        );
    }

    /// Epoch integers are accepted only with 10 or 13 digits.
    #[test]
    fn epoch_digit_rule(n in any::<u64>()) {
        let result = TokenGenerator::default().generate_at("JBSWY3DPEHPK3PXP", Timestamp::Epoch(n));
        let len = n.to_string().len();
        if len == 10 || len == 13 {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(result, Err(TotpError::InvalidTimestamp(Timestamp::Epoch(n))));
        }
    }

    /// Any character outside the alphabet is refused.
    #[test]
    fn invalid_character_rejected(key in key_strategy(), c in any::<char>(), at in any::<prop::sample::Index>()) {
        prop_assume!(!c.is_ascii_alphabetic() && !('2'..='7').contains(&c) && c != '=');
        let mut chars: Vec<char> = key.chars().collect();
        let i = at.index(chars.len() + 1);
        chars.insert(i, c);
        let key: String = chars.into_iter().collect();
        prop_assert_eq!(decode(&key), Err(TotpError::InvalidKey));
    }

    /// Formatting keeps a suffix of the decimal value.
    #[test]
    fn format_is_suffix(value in 0u32..=0x7fff_ffff, digits in 1usize..=12) {
        let token = format_token(value, digits);
        prop_assert!(value.to_string().ends_with(&token));
        prop_assert_eq!(token.len(), digits.min(value.to_string().len()));
    }

    /// A generated token always passes its own check.
    #[test]
    fn generated_token_checks(key in key_strategy(), seconds in any::<u64>(), algorithm in algorithm_strategy()) {
        let generator = TokenGenerator::default()
            .with_algorithm(algorithm)
            .with_timestamp(Timestamp::Seconds(seconds));
        let token = generator.generate(&key).unwrap();
        prop_assert!(generator.check(&key, &token, 0).unwrap());
    }
}
