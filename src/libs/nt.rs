/// The gap symbol in alignments.
pub const GAP: u8 = b'-';

/// Nucleotide symbols, in the fixed row/column order used by every matrix
/// in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum Nt {
    A = 0,
    C = 1,
    G = 2,
    T = 3,
}

impl Nt {
    pub const ALL: [Nt; 4] = [Nt::A, Nt::C, Nt::G, Nt::T];

    pub fn from_u8(b: u8) -> Option<Nt> {
        match b.to_ascii_uppercase() {
            b'A' => Some(Nt::A),
            b'C' => Some(Nt::C),
            b'G' => Some(Nt::G),
            b'T' => Some(Nt::T),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Nt::A => 'A',
            Nt::C => 'C',
            Nt::G => 'G',
            Nt::T => 'T',
        }
    }
}

/// One-hot encodes a nucleotide byte as a basis vector in A, C, G, T order.
///
/// Returns `None` for gaps and any other symbol.
pub fn one_hot(b: u8) -> Option<[f64; 4]> {
    Nt::from_u8(b).map(|nt| {
        let mut v = [0.0; 4];
        v[nt as usize] = 1.0;
        v
    })
}
