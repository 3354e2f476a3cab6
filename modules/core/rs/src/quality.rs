use std::fmt::Display;

use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;
use eyre::{ensure, Result};
use impl_tools::autoimpl;
use num::PrimInt;

use crate::sequence::{Nesting, Shallow};

/// Element types that carry a Phred quality score.
#[autoimpl(for<T: trait + ?Sized> &T, &mut T, Box<T>)]
pub trait Quality {
    /// Numeric representation of the score.
    type Phred: PrimInt;

    fn to_phred(&self) -> Self::Phred;
}

/// Phred quality score stored as the raw score and printed in the Phred+33 (Sanger) encoding.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Phred(u8);

impl Phred {
    /// ASCII offset of the Phred+33 encoding.
    pub const OFFSET: u8 = b'!';
    /// Highest score representable by a printable Phred+33 character ('~').
    pub const MAX: u8 = b'~' - Self::OFFSET;

    pub fn new(score: u8) -> Result<Self> {
        ensure!(
            score <= Self::MAX,
            "Phred score {score} is above the maximum {}",
            Self::MAX
        );
        Ok(Self(score))
    }

    /// Decode a Phred+33 character.
    pub fn from_ascii(symbol: u8) -> Result<Self> {
        ensure!(
            (Self::OFFSET..=b'~').contains(&symbol),
            "Invalid Phred+33 quality character: {:?}",
            symbol as char
        );
        Ok(Self(symbol - Self::OFFSET))
    }

    pub fn to_ascii(&self) -> u8 {
        self.0 + Self::OFFSET
    }

    pub fn score(&self) -> u8 {
        self.0
    }
}

impl Quality for Phred {
    type Phred = u8;

    #[inline(always)]
    fn to_phred(&self) -> Self::Phred {
        self.0
    }
}

impl Nesting for Phred {
    type Depth = Shallow;
}

impl Display for Phred {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_ascii() as char)
    }
}

impl TryFrom<char> for Phred {
    type Error = eyre::Report;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        ensure!(value.is_ascii(), "Invalid Phred+33 quality character: {value:?}");
        Phred::from_ascii(value as u8)
    }
}

/// A sequence symbol (nucleotide, amino acid, ...) annotated with its quality.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[derive(Constructor, Getters, Dissolve)]
pub struct Qualified<S> {
    symbol: S,
    quality: Phred,
}

impl<S> Quality for Qualified<S> {
    type Phred = u8;

    #[inline(always)]
    fn to_phred(&self) -> Self::Phred {
        self.quality.to_phred()
    }
}

impl<S> Nesting for Qualified<S> {
    type Depth = Shallow;
}

/// Zip symbols with Phred+33 encoded qualities, e.g. the sequence and quality lines of a FASTQ record.
pub fn qualify<S: Copy>(symbols: &[S], qualities: &[u8]) -> Result<Vec<Qualified<S>>> {
    ensure!(
        symbols.len() == qualities.len(),
        "Sequence length ({}) doesn't match quality length ({})",
        symbols.len(),
        qualities.len()
    );
    symbols
        .iter()
        .zip(qualities)
        .map(|(symbol, quality)| Ok(Qualified::new(*symbol, Phred::from_ascii(*quality)?)))
        .collect()
}

/// A minimum quality: either a quality letter or a raw numeric score.
pub trait Threshold<P> {
    fn to_threshold(&self) -> P;
}

impl<P: PrimInt, Q: Quality<Phred = P>> Threshold<P> for Q {
    #[inline(always)]
    fn to_threshold(&self) -> P {
        self.to_phred()
    }
}

/// Numeric thresholds outside the range of the score type saturate to its bounds.
macro_rules! impl_numeric_threshold {
    ($($ty:ty),+) => {
        $(
            impl<P: PrimInt> Threshold<P> for $ty {
                #[inline(always)]
                fn to_threshold(&self) -> P {
                    ::num::cast(*self).unwrap_or_else(|| {
                        if *self < <$ty>::default() {
                            P::min_value()
                        } else {
                            P::max_value()
                        }
                    })
                }
            }
        )+
    };
}

impl_numeric_threshold!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);
