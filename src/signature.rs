use std::fmt;

/// A byte pattern identifying a function in the host image.
///
/// Written as space-separated hex bytes with `??` for wildcards, e.g.
/// `E9 ?? ?? ?? ?? 83 7F 44 02`. Wildcards usually cover relative call or jump
/// offsets that change between host builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    bytes: Vec<Option<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("signature is empty")]
    Empty,
    #[error("invalid byte '{token}' at position {index}")]
    InvalidToken { token: String, index: usize },
    #[error("signature has no concrete bytes")]
    AllWildcards,
}

// Builds a signature from byte literals and `_` wildcards.
macro_rules! pattern {
    (@byte _) => {
        None
    };
    (@byte $b:literal) => {
        Some($b)
    };
    ($($byte:tt),+ $(,)?) => {
        Signature::from_pattern(vec![$(pattern!(@byte $byte)),+])
    };
}

impl Signature {
    pub fn parse(text: &str) -> Result<Self, SignatureError> {
        let mut bytes = Vec::new();
        for (index, token) in text.split_whitespace().enumerate() {
            if token == "??" || token == "?" {
                bytes.push(None);
                continue;
            }
            if token.len() != 2 {
                return Err(SignatureError::InvalidToken {
                    token: token.to_string(),
                    index,
                });
            }
            let byte =
                u8::from_str_radix(token, 16).map_err(|_| SignatureError::InvalidToken {
                    token: token.to_string(),
                    index,
                })?;
            bytes.push(Some(byte));
        }

        if bytes.is_empty() {
            return Err(SignatureError::Empty);
        }
        if bytes.iter().all(Option::is_none) {
            return Err(SignatureError::AllWildcards);
        }
        Ok(Self { bytes })
    }

    fn from_pattern(bytes: Vec<Option<u8>>) -> Self {
        Self { bytes }
    }

    /// Pattern bytes in order; `None` matches any byte.
    pub fn bytes(&self) -> &[Option<u8>] {
        &self.bytes
    }
}

impl std::str::FromStr for Signature {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Signature::parse(s)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.bytes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match byte {
                Some(b) => write!(f, "{b:02X}")?,
                None => f.write_str("??")?,
            }
        }
        Ok(())
    }
}

/// The host functions the plugin needs, by signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signatures {
    /// Edge-triggered "just activated" query. Hooked.
    pub is_input_id_pressed: Signature,
    /// Level-triggered "currently down" query. Called directly.
    pub is_input_id_down: Signature,
    /// Per-cycle hotbar binding evaluation. Hooked.
    pub check_hotbar_bindings: Signature,
}

impl Default for Signatures {
    fn default() -> Self {
        Self {
            is_input_id_pressed: pattern![0xE9, _, _, _, _, 0x83, 0x7F, 0x44, 0x02],
            is_input_id_down: pattern![0xE9, _, _, _, _, 0xB9, 0x4F, 0x01, 0x00, 0x00],
            check_hotbar_bindings: pattern![0x89, 0x54, 0x24, 0x10, 0x53, 0x41, 0x55, 0x41, 0x57],
        }
    }
}
