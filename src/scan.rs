//! Hexadecimal field scanning for uevent values like `PRODUCT` and `PROP`.
//!
//! Matches how C's `%x` conversion reads these values: leading whitespace is skipped, an optional
//! `0x` prefix is accepted, and scanning stops at the first non-hex character.

/// Scans one hexadecimal number from the start of `s`.
///
/// Returns the value and the unconsumed remainder, or [`None`] if `s` doesn't start with a hex
/// number or the number doesn't fit in a `u64`.
pub fn hex(s: &str) -> Option<(u64, &str)> {
    let s = s.trim_start();
    let s = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_hexdigit()) => rest,
        _ => s,
    };

    let end = s
        .find(|c: char| !c.is_ascii_hexdigit())
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    let value = u64::from_str_radix(&s[..end], 16).ok()?;
    Some((value, &s[end..]))
}

/// Scans `N` hexadecimal numbers separated by `sep`.
///
/// Text after the last number is ignored.
pub fn hex_fields<const N: usize>(mut s: &str, sep: char) -> Option<[u64; N]> {
    let mut out = [0; N];
    for (i, slot) in out.iter_mut().enumerate() {
        if i != 0 {
            s = s.strip_prefix(sep)?;
        }
        let (value, rest) = hex(s)?;
        *slot = value;
        s = rest;
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single() {
        assert_eq!(hex("1f"), Some((0x1f, "")));
        assert_eq!(hex("  0x40 5"), Some((0x40, " 5")));
        assert_eq!(hex("0xg"), Some((0, "xg")));
        assert_eq!(hex("DEAD/"), Some((0xdead, "/")));
        assert_eq!(hex(""), None);
        assert_eq!(hex("/12"), None);
        assert_eq!(hex("zz"), None);
        assert_eq!(hex("1ffffffffffffffff"), None);
    }

    #[test]
    fn fields() {
        assert_eq!(
            hex_fields::<4>("0011/0002/0007/001f", '/'),
            Some([0x11, 0x2, 0x7, 0x1f])
        );
        assert_eq!(
            hex_fields::<4>("11/2/7/1f/trailing", '/'),
            Some([0x11, 0x2, 0x7, 0x1f])
        );
        assert_eq!(hex_fields::<4>("0011/0002/0007", '/'), None);
        assert_eq!(hex_fields::<4>("0011:0002:0007:001f", '/'), None);
        assert_eq!(hex_fields::<4>("0011//0007/001f", '/'), None);
    }
}
