//! Signature registry service
//!
//! Holds the ordered catalog of copier header signatures. The order is the
//! tie-break when a window satisfies more than one format.

use crate::domain::entities::{FormatSignature, HeaderFormat, PatternRule, Segment};

/// Immutable, ordered catalog of header signatures
///
/// # Known limitation
///
/// The first `snes` rule only asks for eight zero bytes at offset 8, which
/// many unrelated files satisfy. It is evaluated last so every more specific
/// format gets a chance first, but a file with no other signature and zeros
/// at that position will be reported as `snes`.
///
/// # Example
///
/// ```
/// use romsplit::domain::entities::HeaderFormat;
/// use romsplit::domain::services::SignatureRegistry;
///
/// let registry = SignatureRegistry::console_headers();
/// let nes = registry.get(HeaderFormat::Nes).unwrap();
/// assert_eq!(nes.header_length(), 16);
/// ```
#[derive(Debug, Clone)]
pub struct SignatureRegistry {
    signatures: Vec<FormatSignature>,
}

impl SignatureRegistry {
    /// Creates a registry evaluating `signatures` in the given order
    pub fn from_signatures(signatures: Vec<FormatSignature>) -> Self {
        Self { signatures }
    }

    /// Creates the registry of supported console headers
    pub fn console_headers() -> Self {
        let signatures = vec![
            // A78: "ATARI7800" after the version byte, or the end-of-header marker
            FormatSignature::new(
                HeaderFormat::A7800,
                128,
                vec![
                    PatternRule::literal_at(1, b"ATARI7800"),
                    PatternRule::literal_at(100, b"ACTUAL CART DATA STARTS HERE"),
                ],
            ),
            // fwNES: "FDS\x1A", side count 1-4, then 12 zero bytes
            FormatSignature::new(
                HeaderFormat::Fds,
                16,
                vec![PatternRule::new(vec![
                    Segment::Literal(vec![0x46, 0x44, 0x53, 0x1A]),
                    Segment::AnyOf(vec![0x01, 0x02, 0x03, 0x04]),
                    Segment::Literal(vec![0x00; 12]),
                ])],
            ),
            // LNX: "LYNX", or "BS9" from older dumps
            FormatSignature::new(
                HeaderFormat::Lynx,
                64,
                vec![
                    PatternRule::literal_at(0, &[0x4C, 0x59, 0x4E, 0x58]),
                    PatternRule::literal_at(0, &[0x42, 0x53, 0x39]),
                ],
            ),
            // iNES: "NES\x1A"
            FormatSignature::new(
                HeaderFormat::Nes,
                16,
                vec![PatternRule::literal_at(0, &[0x4E, 0x45, 0x53, 0x1A])],
            ),
            // SMC/SWC zero padding, Game Doctor marker, or Super UFO
            FormatSignature::new(
                HeaderFormat::Snes,
                512,
                vec![
                    PatternRule::literal_at(8, &[0x00; 8]),
                    PatternRule::literal_at(8, &[0xAA, 0xBB, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00]),
                    PatternRule::literal_at(8, b"SUPERUFO"),
                ],
            ),
        ];

        Self::from_signatures(signatures)
    }

    /// Returns the signatures in evaluation order
    pub fn lookup(&self) -> &[FormatSignature] {
        &self.signatures
    }

    /// Returns the signature registered for `format`
    pub fn get(&self, format: HeaderFormat) -> Option<&FormatSignature> {
        self.signatures.iter().find(|sig| sig.format() == format)
    }

    /// Longest rule span in the catalog
    pub fn max_span(&self) -> usize {
        self.signatures
            .iter()
            .flat_map(|sig| sig.rules())
            .map(PatternRule::span)
            .max()
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}

impl Default for SignatureRegistry {
    fn default() -> Self {
        Self::console_headers()
    }
}
