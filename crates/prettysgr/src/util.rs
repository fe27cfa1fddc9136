//! Helper module for readable byte strings.
//!
//! Rendered escape sequences are hard to read in logs and test failures. The
//! [`Nicely`] wrapper displays printable ASCII as is, common control
//! characters as mnemonics such as `‹𝖾𝗌𝖼›`, and all other bytes as
//! two-digit hexadecimal numbers such as `‹9b›`.
//!
//! ```
//! # use prettysgr::util::Nicely;
//! assert_eq!(Nicely(b"\x1b[1mhi").to_string(), "\"‹𝖾𝗌𝖼›[1mhi\"");
//! ```

use core::fmt;

/// Nicely format a byte.
fn format_nicely(byte: u8, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if (0x20..=0x7e).contains(&byte) {
        return fmt::Write::write_char(f, byte as char);
    }

    // The mnemonics use math sans-serif letters and include at least one
    // letter that is not a hexadecimal digit.
    let replacement = match byte {
        0x00 => "‹𝗇𝗎𝗅›",
        0x07 => "‹𝖻𝖾𝗅›",
        0x08 => "‹𝖻s›",
        0x09 => "‹𝗁𝗍›",
        0x0a => "‹𝗅𝖿›",
        0x0d => "‹𝖼𝗋›",
        0x1b => "‹𝖾𝗌𝖼›",
        0x7f => "‹𝖽𝖾𝗅›",
        0x9b => "‹𝖼𝗌𝗂›",
        _ => return write!(f, "‹{:02x}›", byte),
    };

    f.write_str(replacement)
}

/// A wrapper for displaying byte strings nicely.
#[derive(Clone, Copy)]
pub struct Nicely<'a>(pub &'a [u8]);

impl fmt::Display for Nicely<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        for byte in self.0.iter() {
            if *byte == b'"' {
                f.write_str("\\\"")?;
            } else {
                format_nicely(*byte, f)?;
            }
        }
        f.write_str("\"")
    }
}

impl fmt::Debug for Nicely<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod test {
    use super::Nicely;

    #[test]
    fn test_nicely() {
        assert_eq!(
            format!("{}", Nicely(b"\x1b[48;5;12m\"x\"\n")),
            "\"‹𝖾𝗌𝖼›[48;5;12m\\\"x\\\"‹𝗅𝖿›\""
        );
        assert_eq!(format!("{:?}", Nicely(b"\x9b\x0c\xff")), "\"‹𝖼𝗌𝗂›‹0c›‹ff›\"");
        assert_eq!(Nicely(b"").to_string(), "\"\"");
    }
}
