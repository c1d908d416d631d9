/// Character set for generating short codes.
pub const ALPHABET_CHARS: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M',
    'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm',
    'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Draws fixed-length random codes.
///
/// Each character is an independent uniform draw from the alphabet (nanoid
/// masks random bytes and rejects out-of-range values). Uniqueness is not
/// this type's concern; see [`crate::services::LinkService::shorten`].
#[derive(Debug, Clone)]
pub struct ShortCodeGenerator {
    length: usize,
    alphabet: &'static [char],
}

impl ShortCodeGenerator {
    /// Generator over the 62-character alphanumeric alphabet
    pub fn new(length: usize) -> Self {
        Self::with_alphabet(length, ALPHABET_CHARS)
    }

    /// Generator over a custom alphabet of at most 255 characters
    pub fn with_alphabet(length: usize, alphabet: &'static [char]) -> Self {
        Self { length, alphabet }
    }

    /// Draw one candidate code
    pub fn generate(&self) -> String {
        let length = self.length;
        nanoid::nanoid!(length, self.alphabet)
    }
}
