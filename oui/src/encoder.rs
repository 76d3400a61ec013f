//! Canonical address form and the keys derived from it.
//!
//! Every comparison in the engine happens on the canonical form: uppercase hex digit pairs
//! separated by colons (`AA:BB:CC:01:02:03`). Prefixes of assigned blocks are truncations
//! of that form (`AA:BB:CC`, `70:B3:D5:0`, `00:1B:C5:00:0`). Keys are always derived from
//! the first [`OUI_STR_LEN`] characters, so records of different block sizes that share
//! an OUI also share their keys.

/// Length of the 24-bit OUI part in canonical form (`XX:XX:XX`).
pub const OUI_STR_LEN: usize = 8;

/// Length of a full 48-bit address in canonical form.
pub const MAC_STR_LEN: usize = 17;

/// Number of buckets addressed by the 12-bit prefix fold.
pub const FOLD_BUCKETS: usize = 1 << 12;

/// Character positions of the six OUI nibbles in canonical form.
const OUI_NIBBLE_POSITIONS: [usize; 6] = [0, 1, 3, 4, 6, 7];

/// Multiplier used to spread the OUI over bucket bits above the fold.
const BUCKET_MIX: u32 = 0x9E37_79B1;

/// Returns `true` when `s` is in canonical form.
///
/// Canonical strings are 8 to 17 characters long, have a colon at every position
/// `2, 5, 8, 11, 14` they cover, an uppercase hex digit everywhere else, and never end
/// with a colon.
pub fn is_canonical(s: &str) -> bool {
    let bytes = s.as_bytes();
    if !(OUI_STR_LEN..=MAC_STR_LEN).contains(&bytes.len()) || bytes.last() == Some(&b':') {
        return false;
    }

    bytes.iter().enumerate().all(|(position, &byte)| {
        if position % 3 == 2 {
            byte == b':'
        } else {
            byte.is_ascii_digit() || (b'A'..=b'F').contains(&byte)
        }
    })
}

/// Normalizes a raw address or prefix to canonical form.
///
/// Surrounding whitespace is trimmed and letters are uppercased. Dash separators
/// (`aa-bb-cc-01-02-03`) and bare 12-digit hex (`aabbcc010203`) are converted to colon
/// form. Returns [`None`] for anything that is not canonical afterwards.
pub fn canonicalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let mut canonical = trimmed.to_ascii_uppercase().replace('-', ":");

    if canonical.len() == 12 && canonical.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        canonical = canonical
            .as_bytes()
            .chunks(2)
            .map(|pair| String::from_utf8_lossy(pair).into_owned())
            .collect::<Vec<_>>()
            .join(":");
    }

    is_canonical(&canonical).then_some(canonical)
}

/// Formats a 6-byte hardware address in canonical form.
pub fn format_mac(bytes: [u8; 6]) -> String {
    format!(
        "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
        bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5]
    )
}

/// Extends a canonical prefix to a full address, filling every missing digit with `fill`.
pub fn pad_to_mac(prefix: &str, fill: char) -> String {
    let mut mac = String::with_capacity(MAC_STR_LEN);
    mac.push_str(prefix);
    for position in prefix.len()..MAC_STR_LEN {
        mac.push(if position % 3 == 2 { ':' } else { fill });
    }
    mac
}

/// Returns the `XX:XX:XX` part of a canonical string.
pub fn oui_part(canonical: &str) -> &str {
    &canonical[..OUI_STR_LEN]
}

/// Packs the six OUI nibbles into a 24-bit key.
///
/// The key orders exactly as the `XX:XX:XX` part does, so it can stand in for string
/// comparison on the OUI. Records sharing an OUI share a key.
pub fn numeric_key(canonical: &str) -> u32 {
    let bytes = canonical.as_bytes();
    OUI_NIBBLE_POSITIONS
        .iter()
        .fold(0, |key, &position| key << 4 | nibble(bytes[position]))
}

/// Folds the OUI into 12 bits by XOR-ing two nibble permutations.
///
/// `(n0 n3 n6) ^ (n4 n1 n7)` where `nI` is the nibble at character position `I`.
pub fn prefix_fold(canonical: &str) -> u32 {
    let bytes = canonical.as_bytes();
    let n = |position: usize| nibble(bytes[position]);

    (n(0) << 8 | n(3) << 4 | n(6)) ^ (n(4) << 8 | n(1) << 4 | n(7))
}

/// Selects the bucket of a canonical string among `bucket_count` buckets.
///
/// With [`FOLD_BUCKETS`] buckets the bucket is the [`prefix_fold`]. Larger counts keep the
/// fold as the low 12 bits and take the higher bits from a multiplicative mix of the
/// [`numeric_key`].
pub fn bucket_hash(canonical: &str, bucket_count: usize) -> usize {
    let fold = prefix_fold(canonical) as usize;
    if bucket_count <= FOLD_BUCKETS {
        return fold % bucket_count;
    }

    let mixed = numeric_key(canonical).wrapping_mul(BUCKET_MIX) as usize;
    ((mixed << 12) | fold) % bucket_count
}

/// Number of leading bytes shared by `a` and `b`.
pub fn shared_prefix_len(a: &str, b: &str) -> usize {
    a.bytes()
        .zip(b.bytes())
        .take_while(|(left, right)| left == right)
        .count()
}

/// Returns `true` when the record `prefix` covers `query`.
pub fn is_prefix_of(prefix: &str, query: &str) -> bool {
    query.starts_with(prefix)
}

fn nibble(byte: u8) -> u32 {
    match byte {
        b'0'..=b'9' => u32::from(byte - b'0'),
        b'A'..=b'F' => u32::from(byte - b'A' + 10),
        b'a'..=b'f' => u32::from(byte - b'a' + 10),
        _ => 0,
    }
}
