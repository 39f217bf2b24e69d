//! Integer to string conversions (`itoa`, `ltoa`, `utoa`, `ultoa`).
//!
//! avr-libc semantics: radix must be in `2..=36`, otherwise the result is the
//! empty string. Digits above 9 are lowercase. Only radix 10 renders a sign;
//! every other radix prints the two's-complement bit pattern.

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn valid_radix(radix: i32) -> Option<u32> {
    u32::try_from(radix).ok().filter(|r| (2..=36).contains(r))
}

fn render_unsigned(mut value: u32, radix: u32, out: &mut String) {
    let mut buf = [0u8; 32];
    let mut pos = buf.len();
    loop {
        pos -= 1;
        buf[pos] = DIGITS[(value % radix) as usize];
        value /= radix;
        if value == 0 {
            break;
        }
    }
    out.extend(buf[pos..].iter().map(|&b| char::from(b)));
}

fn render_signed(value: i32, bits_mask: u32, radix: i32) -> String {
    let mut out = String::new();
    let Some(radix) = valid_radix(radix) else {
        return out;
    };
    if radix == 10 && value < 0 {
        out.push('-');
        render_unsigned(value.unsigned_abs(), radix, &mut out);
    } else {
        render_unsigned(value as u32 & bits_mask, radix, &mut out);
    }
    out
}

/// `itoa` for the 16-bit `int`.
#[must_use]
pub fn itoa(value: i16, radix: i32) -> String {
    render_signed(i32::from(value), 0xFFFF, radix)
}

/// `ltoa` for the 32-bit `long`.
#[must_use]
pub fn ltoa(value: i32, radix: i32) -> String {
    render_signed(value, u32::MAX, radix)
}

/// `utoa` for `unsigned int`.
#[must_use]
pub fn utoa(value: u16, radix: i32) -> String {
    ultoa(u32::from(value), radix)
}

/// `ultoa` for `unsigned long`.
#[must_use]
pub fn ultoa(value: u32, radix: i32) -> String {
    let mut out = String::new();
    if let Some(radix) = valid_radix(radix) {
        render_unsigned(value, radix, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_is_signed() {
        assert_eq!(itoa(-12345, 10), "-12345");
        assert_eq!(itoa(i16::MIN, 10), "-32768");
        assert_eq!(ltoa(i32::MIN, 10), "-2147483648");
    }

    #[test]
    fn other_radixes_print_bit_pattern() {
        assert_eq!(itoa(35, 2), "100011");
        assert_eq!(itoa(35, 36), "z");
        assert_eq!(itoa(-1, 16), "ffff");
        assert_eq!(itoa(-1, 2), "1111111111111111");
        assert_eq!(ltoa(-1, 16), "ffffffff");
    }

    #[test]
    fn invalid_radix_gives_empty_string() {
        for radix in [0, 1, 37, 0x0108, -10] {
            assert_eq!(itoa(2, radix), "", "radix {radix}");
            assert_eq!(ultoa(2, radix), "", "radix {radix}");
        }
    }

    #[test]
    fn unsigned_variants() {
        assert_eq!(utoa(0, 10), "0");
        assert_eq!(utoa(u16::MAX, 8), "177777");
        assert_eq!(ultoa(u32::MAX, 36), "1z141z3");
    }
}
