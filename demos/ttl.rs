use totp_token::{Timestamp, TokenGenerator};

fn main() {
    loop {
        let totp = TokenGenerator::default().with_timestamp(Timestamp::now());
        println!(
            "code {}\t ttl {}\t valid until: {}",
            totp.generate("JBSWY3DPEHPK3PXP").unwrap(),
            totp.ttl().unwrap(),
            totp.next_step().unwrap()
        );
        std::thread::sleep(std::time::Duration::from_secs(1));
    }
}
