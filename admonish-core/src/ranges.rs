//! Offset ranges and the live-preview decoration check

/// A span of document offsets, both ends inclusive
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Range {
    pub from: usize,
    pub to: usize,
}

impl Range {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// Whether this range starts inside, ends inside, or contains `[from, to]`
    pub fn overlaps(&self, from: usize, to: usize) -> bool {
        let starts_inside = self.from >= from && self.from <= to;
        let ends_inside = self.to >= from && self.to <= to;
        let contains = self.from <= from && self.to >= to;
        starts_inside || ends_inside || contains
    }
}

/// True if any range overlaps `[from, to]`
pub fn ranges_include(ranges: &[Range], from: usize, to: usize) -> bool {
    ranges.iter().any(|range| range.overlaps(from, to))
}

/// Detects whether the editor currently shows a live preview.
///
/// Chosen once for the host and handed to whatever decorates blocks.
pub trait LivePreview<S: ?Sized> {
    fn is_live_preview(&self, state: &S) -> bool;
}

/// Live preview setting that does not depend on editor state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedPreview(pub bool);

impl<S: ?Sized> LivePreview<S> for FixedPreview {
    fn is_live_preview(&self, _state: &S) -> bool {
        self.0
    }
}

/// Whether a rendered block should replace its source text.
///
/// Blocks are left as source while any selection touches them.
pub fn should_decorate<S, P>(
    preview: &P,
    state: &S,
    selections: &[Range],
    block: Range,
) -> bool
where
    S: ?Sized,
    P: LivePreview<S> + ?Sized,
{
    preview.is_live_preview(state) && !ranges_include(selections, block.from, block.to)
}
