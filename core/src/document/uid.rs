//! Identifier generation for headings, tables and special blocks.
//!
//! Each uid is 12 alphanumeric characters: a 5-character salt chosen once per
//! process, then a 7-character base-62 rendering of a process-wide counter.
//! Two calls in the same process therefore never return the same uid (until
//! the counter wraps after 62^7 calls), and the salt keeps uids from two
//! processes writing into the same document apart.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

use uuid::Uuid;

pub const UID_LEN: usize = 12;

const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const SALT_LEN: usize = 5;

static COUNTER: AtomicU64 = AtomicU64::new(0);
static SALT: OnceLock<[u8; SALT_LEN]> = OnceLock::new();

fn salt() -> &'static [u8; SALT_LEN] {
    SALT.get_or_init(|| {
        let bytes = Uuid::new_v4().into_bytes();
        let mut salt = [0u8; SALT_LEN];
        for (slot, byte) in salt.iter_mut().zip(bytes) {
            *slot = ALPHABET[byte as usize % ALPHABET.len()];
        }
        salt
    })
}

/// Return a fresh 12-character alphanumeric uid.
pub fn next_uid() -> String {
    let mut n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut buf = [b'0'; UID_LEN];
    buf[..SALT_LEN].copy_from_slice(salt());
    for slot in buf[SALT_LEN..].iter_mut().rev() {
        *slot = ALPHABET[(n % 62) as usize];
        n /= 62;
    }
    buf.iter().map(|&b| b as char).collect()
}
