use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::{MatrixError, MatrixResult};

/// Pixel dimensions of one candidate fixture, width by height.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The same dimensions with width and height exchanged.
    pub fn swapped(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// `max(w/h, h/w)` — how far the size is from square.
    pub fn skew(self) -> f64 {
        let w = f64::from(self.width);
        let h = f64::from(self.height);
        (w / h).max(h / w)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Coarse bucket derived from comparing width against height.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum AspectClass {
    Landscape,
    Portrait,
    Square,
}

impl AspectClass {
    /// Stable enumeration order used for directory layout.
    pub const ALL: [AspectClass; 3] = [
        AspectClass::Landscape,
        AspectClass::Portrait,
        AspectClass::Square,
    ];

    pub fn of(size: Size) -> Self {
        use std::cmp::Ordering;
        match size.width.cmp(&size.height) {
            Ordering::Equal => AspectClass::Square,
            Ordering::Less => AspectClass::Portrait,
            Ordering::Greater => AspectClass::Landscape,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AspectClass::Landscape => "Landscape",
            AspectClass::Portrait => "Portrait",
            AspectClass::Square => "Square",
        }
    }
}

impl fmt::Display for AspectClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Enumerate every (width, height) pair drawn with repetition from
/// `base_dimensions`, keep those whose skew is at most `max_skew`, include
/// both orientations of each kept pair, and bucket the result by
/// [`AspectClass`]. Sizes within a bucket are sorted ascending so iteration
/// is stable across runs.
pub fn enumerate_sizes(
    base_dimensions: &[u32],
    max_skew: f64,
) -> MatrixResult<BTreeMap<AspectClass, Vec<Size>>> {
    let mut accepted = BTreeSet::new();
    for (i, &w) in base_dimensions.iter().enumerate() {
        for &h in &base_dimensions[i..] {
            let size = Size::new(w, h);
            if size.skew() > max_skew {
                continue;
            }
            accepted.insert(size);
            accepted.insert(size.swapped());
        }
    }

    let mut buckets: BTreeMap<AspectClass, Vec<Size>> = BTreeMap::new();
    for size in accepted {
        let aspect = AspectClass::of(size);
        if aspect != AspectClass::Square && size.width == size.height {
            return Err(MatrixError::invariant(format!(
                "size {size} with equal sides bucketed as {aspect}"
            )));
        }
        buckets.entry(aspect).or_default().push(size);
    }
    Ok(buckets)
}
