/// Controls how a session treats inputs the base design accepted silently.
/// The default reproduces that behavior; each switch turns one class of
/// silent acceptance into a hard error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionPolicy {
    /// Reject negative amounts, quantities and unit prices on append, and
    /// refuse quantity adjustments that would go below zero.
    pub reject_negative: bool,
    /// Treat a duplicate stock code on append and an unknown code on adjust
    /// as errors instead of accepting or ignoring them.
    pub strict_codes: bool,
}

impl SessionPolicy {
    /// Base behavior: negatives accepted, unknown codes ignored, duplicate
    /// codes allowed.
    pub fn permissive() -> Self {
        Self::default()
    }

    pub fn strict() -> Self {
        Self {
            reject_negative: true,
            strict_codes: true,
        }
    }
}
