pub const LG_RADIX: u32 = 8;
pub const BINS: usize = 1 << LG_RADIX;
pub const KEY_BITS: u32 = 32;
/// One pass per byte of a `u32` key.
pub const PASSES: usize = (KEY_BITS / LG_RADIX) as usize;

/// The byte window examined by one digit pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DigitPass {
    pub index: usize,
    pub mask: u32,
    pub shift: u32,
}

impl DigitPass {
    /// Pass `index` looks at byte `index`, least significant first.
    pub const fn new(index: usize) -> Self {
        assert!(index < PASSES, "a u32 key has only four digit passes");
        let shift = index as u32 * LG_RADIX;
        Self {
            index,
            mask: ((BINS - 1) as u32) << shift,
            shift,
        }
    }

    /// The first `passes` digit passes in LSD order.
    pub fn first(passes: usize) -> impl Iterator<Item = DigitPass> {
        (0..passes.min(PASSES)).map(DigitPass::new)
    }

    pub fn all() -> impl Iterator<Item = DigitPass> {
        Self::first(PASSES)
    }

    #[inline(always)]
    pub fn digit(self, key: u32) -> usize {
        extract_digit(key, self.mask, self.shift)
    }
}

#[inline(always)]
pub fn extract_digit(key: u32, mask: u32, shift: u32) -> usize {
    ((key & mask) >> shift) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_and_shifts() {
        let passes: Vec<_> = DigitPass::all().map(|p| (p.mask, p.shift)).collect();
        assert_eq!(
            passes,
            vec![(0xFF, 0), (0xFF00, 8), (0xFF_0000, 16), (0xFF00_0000, 24)]
        );
    }

    #[test]
    fn digits_of_a_key() {
        let key = 0xDEAD_BEEF;
        let digits: Vec<_> = DigitPass::all().map(|p| p.digit(key)).collect();
        assert_eq!(digits, vec![0xEF, 0xBE, 0xAD, 0xDE]);
        assert_eq!(extract_digit(u32::MAX, 0xFF00_0000, 24), 255);
        assert_eq!(extract_digit(0, 0xFF00, 8), 0);
    }

    #[test]
    #[should_panic(expected = "only four digit passes")]
    fn pass_past_the_last_byte() {
        DigitPass::new(PASSES);
    }

    #[test]
    fn first_is_capped() {
        assert_eq!(DigitPass::first(2).count(), 2);
        assert_eq!(DigitPass::first(9).count(), PASSES);
    }
}
