use base64::Engine;
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use rand::Rng;
use sha2::{Digest, Sha256};

const SALT_LEN: usize = 16;
const HASH_ROUNDS: u32 = 10_000;

/// Hashes a password as `base64(salt)$base64(digest)`.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0_u8; SALT_LEN];
    rand::thread_rng().fill(&mut salt);
    encode(&salt, &digest(&salt, password))
}

pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt, expected)) = stored.split_once('$') else {
        return false;
    };
    let (Ok(salt), Ok(expected)) = (STANDARD_NO_PAD.decode(salt), STANDARD_NO_PAD.decode(expected))
    else {
        return false;
    };

    constant_time_eq(&digest(&salt, password), &expected)
}

pub fn random_token(len: usize) -> String {
    let mut bytes = vec![0_u8; len];
    rand::thread_rng().fill(bytes.as_mut_slice());
    URL_SAFE_NO_PAD.encode(bytes)
}

fn digest(salt: &[u8], password: &str) -> Vec<u8> {
    let mut current = Sha256::new()
        .chain_update(salt)
        .chain_update(password.as_bytes())
        .finalize();

    for _ in 1..HASH_ROUNDS {
        current = Sha256::new()
            .chain_update(salt)
            .chain_update(current)
            .finalize();
    }

    current.to_vec()
}

fn encode(salt: &[u8], digest: &[u8]) -> String {
    format!(
        "{}${}",
        STANDARD_NO_PAD.encode(salt),
        STANDARD_NO_PAD.encode(digest)
    )
}

fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    if left.len() != right.len() {
        return false;
    }

    left.iter()
        .zip(right)
        .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
