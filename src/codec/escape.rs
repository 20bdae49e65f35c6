/// Reverses the escaping getfacl applies to names and paths. Whitespace, non-printable bytes, and
/// backslashes are written as a backslash followed by three octal digits (`\040` for a space) and
/// a literal backslash may also appear doubled. The decoded bytes have to form valid UTF-8.
pub(crate) fn unescape_qualifier(value: &str) -> Result<String, EscapeError> {
    if !value.contains('\\') {
        return Ok(value.to_string());
    }

    let bytes = value.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut idx = 0;

    while idx < bytes.len() {
        if bytes[idx] != b'\\' {
            decoded.push(bytes[idx]);
            idx += 1;
            continue;
        }

        match bytes.get(idx + 1..idx + 4) {
            Some(&[a, b, c]) if is_octal(a) && is_octal(b) && is_octal(c) => {
                let digit = |d: u8| u16::from(d - b'0');
                let byte = digit(a) * 64 + digit(b) * 8 + digit(c);

                if byte > 0xff {
                    return Err(EscapeError::OutOfRange(idx));
                }

                decoded.push(byte as u8);
                idx += 4;
            }
            _ if bytes.get(idx + 1) == Some(&b'\\') => {
                decoded.push(b'\\');
                idx += 2;
            }
            _ => return Err(EscapeError::Incomplete(idx)),
        }
    }

    String::from_utf8(decoded).map_err(|_| EscapeError::InvalidUtf8)
}

fn is_octal(byte: u8) -> bool {
    (b'0'..=b'7').contains(&byte)
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EscapeError {
    #[error("incomplete escape sequence at byte {0}")]
    Incomplete(usize),

    #[error("decoded name is not valid UTF-8")]
    InvalidUtf8,

    #[error("escape sequence at byte {0} is larger than a single byte")]
    OutOfRange(usize),
}
