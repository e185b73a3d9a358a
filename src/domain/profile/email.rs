//! Email address syntax check.
//!
//! Accepts `local@domain` where the local part is a dot-separated run of atoms and quoted
//! strings, and the domain is either a dotted hostname or a bracketed IPv4 / `IPv6:`
//! literal.

use std::net::{Ipv4Addr, Ipv6Addr};

const MAX_ADDRESS_LEN: usize = 254;
const MAX_LOCAL_PART_LEN: usize = 64;
const MAX_LABEL_LEN: usize = 63;
const PUNYCODE_PREFIX: &str = "xn--";

/// Returns true when `address` is syntactically a deliverable mailbox address.
pub fn is_valid_address(address: &str) -> bool {
    if address.chars().count() > MAX_ADDRESS_LEN {
        return false;
    }
    // A quoted local part may contain '@'; the domain never does.
    let Some((local, domain)) = address.rsplit_once('@') else {
        return false;
    };
    is_valid_local_part(local) && is_valid_domain(domain)
}

fn is_atext(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'/' | b'=' | b'?'
                | b'^' | b'_' | b'`' | b'{' | b'|' | b'}' | b'~'
        )
}

// Printable ASCII minus '"' and '\', the obsolete control range, and folding whitespace
// (space, tab). CR and LF never appear unescaped.
fn is_qtext(b: u8) -> bool {
    matches!(
        b,
        0x01..=0x08 | b'\t' | 0x0B | 0x0C | 0x0E..=0x1F | b' ' | b'!' | 0x23..=0x5B | 0x5D..=0x7F
    )
}

fn is_valid_local_part(local: &str) -> bool {
    if local.is_empty() || local.len() > MAX_LOCAL_PART_LEN {
        return false;
    }

    let bytes = local.as_bytes();
    let mut pos = 0;
    loop {
        pos = match bytes.get(pos) {
            Some(b'"') => match quoted_string_end(bytes, pos) {
                Some(end) => end,
                None => return false,
            },
            Some(&b) if is_atext(b) => {
                pos + bytes[pos..].iter().take_while(|b| is_atext(**b)).count()
            }
            _ => return false,
        };
        match bytes.get(pos) {
            None => return true,
            Some(b'.') => pos += 1,
            Some(_) => return false,
        }
    }
}

/// Returns the index just past the closing quote of the quoted string opening at `start`.
fn quoted_string_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut pos = start + 1;
    loop {
        match *bytes.get(pos)? {
            b'"' => return Some(pos + 1),
            b'\\' => {
                if !bytes.get(pos + 1)?.is_ascii() {
                    return None;
                }
                pos += 2;
            }
            b if is_qtext(b) => pos += 1,
            _ => return None,
        }
    }
}

fn is_valid_domain(domain: &str) -> bool {
    if let Some(literal) = domain
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    {
        return is_valid_address_literal(literal);
    }

    let labels: Vec<&str> = domain.split('.').collect();
    let Some((tld, hosts)) = labels.split_last() else {
        return false;
    };
    !hosts.is_empty() && hosts.iter().all(|label| is_valid_label(label)) && is_valid_tld(tld)
}

fn is_valid_address_literal(literal: &str) -> bool {
    let ipv6 = literal
        .get(..5)
        .filter(|tag| tag.eq_ignore_ascii_case("IPv6:"))
        .and_then(|_| literal.get(5..));
    match ipv6 {
        Some(addr) => addr.parse::<Ipv6Addr>().is_ok(),
        None => literal.parse::<Ipv4Addr>().is_ok(),
    }
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= MAX_LABEL_LEN
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

/// A top-level label is a letter followed by letters and digits, or a punycode label.
fn is_valid_tld(tld: &str) -> bool {
    if !is_valid_label(tld) {
        return false;
    }
    let punycode = tld
        .get(..PUNYCODE_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(PUNYCODE_PREFIX))
        && tld.len() > PUNYCODE_PREFIX.len();
    if punycode {
        return true;
    }
    tld.as_bytes()
        .first()
        .is_some_and(|b| b.is_ascii_alphabetic())
        && tld.bytes().all(|b| b.is_ascii_alphanumeric())
}
