//! Header signature entity
//!
//! Describes the byte patterns that identify a copier header prepended to a
//! raw game image, and the fixed length of that header.

use std::fmt;
use std::str::FromStr;

/// Header formats known to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderFormat {
    /// Atari 7800 `.a78` header
    A7800,
    /// Famicom Disk System `fwNES` header
    Fds,
    /// Atari Lynx `.lnx` header
    Lynx,
    /// iNES / NES 2.0 header
    Nes,
    /// Super Nintendo copier header (SMC, SWC, Super UFO)
    Snes,
}

impl HeaderFormat {
    pub const ALL: [HeaderFormat; 5] = [
        HeaderFormat::A7800,
        HeaderFormat::Fds,
        HeaderFormat::Lynx,
        HeaderFormat::Nes,
        HeaderFormat::Snes,
    ];

    /// Returns the short identifier used in reports
    pub fn id(&self) -> &'static str {
        match self {
            HeaderFormat::A7800 => "a7800",
            HeaderFormat::Fds => "fds",
            HeaderFormat::Lynx => "lynx",
            HeaderFormat::Nes => "nes",
            HeaderFormat::Snes => "snes",
        }
    }

    /// Returns a human-readable name for this format
    pub fn name(&self) -> &'static str {
        match self {
            HeaderFormat::A7800 => "Atari 7800",
            HeaderFormat::Fds => "Famicom Disk System",
            HeaderFormat::Lynx => "Atari Lynx",
            HeaderFormat::Nes => "Nintendo Entertainment System",
            HeaderFormat::Snes => "Super Nintendo copier",
        }
    }
}

impl fmt::Display for HeaderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for HeaderFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HeaderFormat::ALL
            .into_iter()
            .find(|format| format.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown header format '{}'", s))
    }
}

/// One step of a pattern rule, consumed left to right from window offset 0
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Don't-care bytes
    Skip(usize),
    /// Bytes that must appear verbatim
    Literal(Vec<u8>),
    /// A single byte that must be one of the listed values
    AnyOf(Vec<u8>),
}

impl Segment {
    /// Number of window bytes this segment covers
    pub fn len(&self) -> usize {
        match self {
            Segment::Skip(n) => *n,
            Segment::Literal(bytes) => bytes.len(),
            Segment::AnyOf(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks `bytes`, which must be exactly `self.len()` long
    fn matches(&self, bytes: &[u8]) -> bool {
        match self {
            Segment::Skip(_) => true,
            Segment::Literal(expected) => bytes == expected.as_slice(),
            Segment::AnyOf(allowed) => bytes.first().is_some_and(|b| allowed.contains(b)),
        }
    }
}

/// An ordered sequence of segments that must all hold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternRule {
    segments: Vec<Segment>,
}

impl PatternRule {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// A single literal anchored at `offset`
    pub fn literal_at(offset: usize, bytes: &[u8]) -> Self {
        let mut segments = Vec::with_capacity(2);
        if offset > 0 {
            segments.push(Segment::Skip(offset));
        }
        segments.push(Segment::Literal(bytes.to_vec()));
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of leading window bytes the rule needs to be decidable
    pub fn span(&self) -> usize {
        self.segments.iter().map(Segment::len).sum()
    }

    /// Checks the rule against the start of `window`.
    ///
    /// A window shorter than [`span`](Self::span) never matches.
    pub fn matches(&self, window: &[u8]) -> bool {
        if window.len() < self.span() {
            return false;
        }

        let mut cursor = 0;
        for segment in &self.segments {
            let end = cursor + segment.len();
            if !segment.matches(&window[cursor..end]) {
                return false;
            }
            cursor = end;
        }
        true
    }
}

/// A header format together with its length and alternative rules
#[derive(Debug, Clone)]
pub struct FormatSignature {
    format: HeaderFormat,
    header_length: usize,
    rules: Vec<PatternRule>,
}

impl FormatSignature {
    /// Creates a new format signature
    pub fn new(format: HeaderFormat, header_length: usize, rules: Vec<PatternRule>) -> Self {
        Self {
            format,
            header_length,
            rules,
        }
    }

    pub fn format(&self) -> HeaderFormat {
        self.format
    }

    /// Length in bytes of the header, independent of which rule matched
    pub fn header_length(&self) -> usize {
        self.header_length
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// Returns the index of the first rule that matches `window`
    pub fn first_matching_rule(&self, window: &[u8]) -> Option<usize> {
        self.rules.iter().position(|rule| rule.matches(window))
    }

    pub fn matches(&self, window: &[u8]) -> bool {
        self.first_matching_rule(window).is_some()
    }
}
