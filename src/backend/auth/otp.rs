/**
 * One-Time Codes
 *
 * Six-digit numeric codes for the password reset flow. Digits are drawn
 * uniformly from the OS random source, so leading zeros occur.
 */

use chrono::{DateTime, Duration, Utc};

pub const OTP_LENGTH: usize = 6;

/// Generate a fresh numeric code
pub fn generate_otp() -> Result<String, getrandom::Error> {
    let mut code = String::with_capacity(OTP_LENGTH);
    let mut buf = [0u8; 16];

    while code.len() < OTP_LENGTH {
        getrandom::fill(&mut buf)?;
        // 250 is the largest multiple of 10 below 256; rejecting the rest keeps digits uniform
        for byte in buf.iter().filter(|b| **b < 250) {
            code.push(char::from(b'0' + byte % 10));
            if code.len() == OTP_LENGTH {
                break;
            }
        }
    }

    Ok(code)
}

/// Whether `code` has the shape of an issued OTP
pub fn is_well_formed(code: &str) -> bool {
    code.len() == OTP_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
}

/// Whether a code issued at `issued_at` is still redeemable at `now`
pub fn is_fresh(issued_at: Option<DateTime<Utc>>, lifetime: Duration, now: DateTime<Utc>) -> bool {
    match issued_at {
        Some(issued_at) => now <= issued_at + lifetime,
        None => false,
    }
}
