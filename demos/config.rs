use totp_token::{TokenConfig, TokenGenerator};

fn main() {
    let config: TokenConfig = serde_json::from_str(
        r#"{ "algorithm": "SHA3-256", "period": 60, "digits": 8, "timestamp": "2023-02-02T07:46:03Z" }"#,
    )
    .unwrap();
    let generator = TokenGenerator::new(config);
    println!("{}", generator);
    println!("code: {}", generator.generate("CI2FM6EQCI2FM6EQKU").unwrap());

    let rejected = serde_json::from_str::<TokenConfig>(r#"{ "period": 0 }"#);
    println!("period 0: {}", rejected.unwrap_err());
}
