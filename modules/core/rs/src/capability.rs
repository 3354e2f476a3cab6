use std::fmt::Display;

/// Iteration strength of a sequence. Every tier implies all tiers below it.
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum Tier {
    /// Single-pass: positions can't be revisited once left.
    Input = 0,
    /// Multi-pass: cursors can be copied and re-read.
    Forward = 1,
    /// Multi-pass cursors that can also step backwards.
    Bidirectional = 2,
    /// Cursors that can jump by an arbitrary offset in O(1).
    RandomAccess = 3,
    /// Random-access cursors over elements stored next to each other in memory.
    Contiguous = 4,
}

impl Tier {
    #[inline(always)]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// `const` version of `>=`.
    #[inline(always)]
    pub const fn implies(self, other: Tier) -> bool {
        self.rank() >= other.rank()
    }

    #[inline(always)]
    pub const fn is_multi_pass(self) -> bool {
        self.implies(Tier::Forward)
    }

    /// The weaker of two tiers.
    pub const fn min(self, other: Tier) -> Tier {
        if self.rank() <= other.rank() {
            self
        } else {
            other
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Tier::Input => "input",
            Tier::Forward => "forward",
            Tier::Bidirectional => "bidirectional",
            Tier::RandomAccess => "random-access",
            Tier::Contiguous => "contiguous",
        }
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Full capability set of a sequence: the tier plus orthogonal attributes.
///
/// Adaptors describe how they transfer capabilities from their input with the `const` helpers
/// below, e.g. `C::CAPABILITIES.with_sized(false).with_common(false)`.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Capabilities {
    pub tier: Tier,
    /// The number of remaining elements is known in O(1).
    pub sized: bool,
    /// Start and end are the same kind of position (the end is a reachable cursor state).
    pub common: bool,
    /// Can be iterated through a shared handle, i.e. iterating doesn't mutate the sequence.
    pub const_iterable: bool,
    /// Elements can be overwritten in place through the cursor.
    pub output: bool,
}

impl Capabilities {
    /// Weakest possible sequence: a consume-once stream.
    pub const INPUT: Capabilities = Capabilities {
        tier: Tier::Input,
        sized: false,
        common: false,
        const_iterable: false,
        output: false,
    };

    /// A borrowed slice: everything except writes.
    pub const CONTIGUOUS: Capabilities = Capabilities {
        tier: Tier::Contiguous,
        sized: true,
        common: true,
        const_iterable: true,
        output: false,
    };

    pub const fn new(tier: Tier) -> Self {
        Capabilities {
            tier,
            ..Self::INPUT
        }
    }

    pub const fn with_tier(self, tier: Tier) -> Self {
        Capabilities { tier, ..self }
    }

    /// Keeps the current tier unless it is stronger than `tier`.
    pub const fn at_most(self, tier: Tier) -> Self {
        Capabilities {
            tier: self.tier.min(tier),
            ..self
        }
    }

    pub const fn with_sized(self, sized: bool) -> Self {
        Capabilities { sized, ..self }
    }

    pub const fn with_common(self, common: bool) -> Self {
        Capabilities { common, ..self }
    }

    pub const fn with_const_iterable(self, const_iterable: bool) -> Self {
        Capabilities {
            const_iterable,
            ..self
        }
    }

    pub const fn with_output(self, output: bool) -> Self {
        Capabilities { output, ..self }
    }

    /// What is left when a multi-pass sequence is consumed through a unique handle.
    pub const fn single_pass(self) -> Self {
        Capabilities {
            tier: Tier::Input,
            common: false,
            const_iterable: false,
            ..self
        }
    }

    #[inline(always)]
    pub const fn is_multi_pass(&self) -> bool {
        self.tier.is_multi_pass()
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::INPUT
    }
}

impl Display for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tier)?;
        for (flag, name) in [
            (self.sized, "sized"),
            (self.common, "common"),
            (self.const_iterable, "const-iterable"),
            (self.output, "output"),
        ] {
            if flag {
                write!(f, "+{name}")?;
            }
        }
        Ok(())
    }
}
