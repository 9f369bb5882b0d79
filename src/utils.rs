/* --- src/utils.rs --- */

/// Macro to convert a string literal to a null-terminated UTF-16 array at compile time.
///
/// # Example
/// ```rust
/// let wide_str = w!("Hello");
/// assert_eq!(wide_str, &[72, 101, 108, 108, 111, 0]);
/// ```
#[macro_export]
macro_rules! w {
    ($s:literal) => {{
        const S: &[u8] = $s.as_bytes();
        const LEN: usize = S.len() + 1;
        const UTF16: [u16; LEN] = {
            let mut out = [0u16; LEN];
            let mut i = 0;
            while i < S.len() {
                out[i] = S[i] as u16;
                i += 1;
            }
            out[LEN - 1] = 0;
            out
        };
        &UTF16[..]
    }};
}

/// Convert a Rust string to a null-terminated UTF-16 vector.
pub fn to_wstring(value: &str) -> Vec<u16> {
    value.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Convert a UTF-16 buffer (terminated or not) back to a Rust string,
/// stopping at the first null.
pub fn from_wide(buffer: &[u16]) -> String {
    let len = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
    String::from_utf16_lossy(&buffer[..len])
}

/// Copy `text` into a fixed UTF-16 field, always null-terminated, truncating
/// if needed. Used for the binary config dump.
pub fn fill_wide_field(field: &mut [u16], text: &str) {
    field.fill(0);
    if field.is_empty() {
        return;
    }
    let last = field.len() - 1;
    for (slot, unit) in field[..last].iter_mut().zip(text.encode_utf16()) {
        *slot = unit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wstring_round_trip() {
        let wide = to_wstring("lockrs");
        assert_eq!(wide.last(), Some(&0));
        assert_eq!(from_wide(&wide), "lockrs");
    }

    #[test]
    fn from_wide_stops_at_null() {
        let buffer = [0x61, 0x62, 0, 0x63];
        assert_eq!(from_wide(&buffer), "ab");
    }

    #[test]
    fn fill_wide_field_truncates_and_terminates() {
        let mut field = [0u16; 4];
        fill_wide_field(&mut field, "abcdef");
        assert_eq!(field, [0x61, 0x62, 0x63, 0]);
    }
}
