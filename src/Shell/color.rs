use crate::error::{Error, Result};

/// A resolved color, 16 bits per channel as the X protocol expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb16 {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
}

/// Parse a `#rrggbb` color.
pub fn parse_hex_color(value: &str) -> Result<Rgb16> {
    let invalid = || Error::Config(format!("invalid color {:?}, expected #rrggbb", value));

    let hex = value.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |range: std::ops::Range<usize>| -> Result<u16> {
        let byte = u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())?;
        // 0xab -> 0xabab so that full intensity stays full intensity
        Ok(u16::from(byte) * 0x101)
    };

    Ok(Rgb16 {
        red: channel(0..2)?,
        green: channel(2..4)?,
        blue: channel(4..6)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lower_and_upper_case() {
        let c = parse_hex_color("#3e3E3e").expect("valid color");
        assert_eq!(c, Rgb16 { red: 0x3e3e, green: 0x3e3e, blue: 0x3e3e });

        let white = parse_hex_color("#FFFFFF").expect("valid color");
        assert_eq!(white.red, u16::MAX);
    }

    #[test]
    fn rejects_malformed_colors() {
        for bad in ["3e3e3e", "#3e3e3", "#3e3e3e3", "#gggggg", "", "#"] {
            assert!(parse_hex_color(bad).is_err(), "{bad:?} should be rejected");
        }
    }
}
