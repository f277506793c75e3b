use totp_token::{Algorithm, Timestamp, TokenGenerator};

// rfc-6238 Appendix B, SHA-1 column.
fn main() {
    let generator = TokenGenerator::default()
        .with_algorithm(Algorithm::SHA1)
        .with_digits(8)
        .unwrap();

    for time in [59, 1111111109, 1111111111, 1234567890, 2000000000, 20000000000] {
        let code = generator
            .generate_at("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ", Timestamp::Seconds(time))
            .unwrap();
        println!("{:>11}\t{}", time, code);
    }
}
