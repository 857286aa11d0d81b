use std::fmt;

use crate::error::{MatrixError, MatrixResult};

/// EXIF orientation code. Codes 1..=8 follow the EXIF standard; code 0 is
/// the explicit "no tag" case (the fixture is written without metadata).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Orientation(u8);

/// Quarter-turn applied after any mirroring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Rotation {
    None,
    Deg90,
    Deg180,
    Deg270,
}

/// How a decoder must rearrange raw pixel data for a given orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Transformation {
    pub rotation: Rotation,
    pub flip_vertical: bool,
    pub flip_horizontal: bool,
}

impl Transformation {
    pub const IDENTITY: Transformation = Transformation {
        rotation: Rotation::None,
        flip_vertical: false,
        flip_horizontal: false,
    };

    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }
}

// Fixed mapping from orientation code to transformation, indexed by code.
// Semantics per the EXIF specification: 2 mirrors horizontally, 3 rotates
// 180, 5..=8 involve quarter turns. Codes 0 and 1 are identity.
const TRANSFORMATIONS: [Transformation; 9] = [
    Transformation::IDENTITY,
    Transformation::IDENTITY,
    Transformation {
        rotation: Rotation::None,
        flip_vertical: false,
        flip_horizontal: true,
    },
    Transformation {
        rotation: Rotation::Deg180,
        flip_vertical: false,
        flip_horizontal: false,
    },
    Transformation {
        rotation: Rotation::Deg180,
        flip_vertical: false,
        flip_horizontal: true,
    },
    Transformation {
        rotation: Rotation::Deg90,
        flip_vertical: false,
        flip_horizontal: true,
    },
    Transformation {
        rotation: Rotation::Deg90,
        flip_vertical: false,
        flip_horizontal: false,
    },
    Transformation {
        rotation: Rotation::Deg270,
        flip_vertical: false,
        flip_horizontal: true,
    },
    Transformation {
        rotation: Rotation::Deg270,
        flip_vertical: false,
        flip_horizontal: false,
    },
];

impl Orientation {
    /// Every orientation the generator emits, in emission order.
    pub const ALL: [Orientation; 9] = [
        Orientation(0),
        Orientation(1),
        Orientation(2),
        Orientation(3),
        Orientation(4),
        Orientation(5),
        Orientation(6),
        Orientation(7),
        Orientation(8),
    ];

    pub fn new(code: u8) -> MatrixResult<Self> {
        if code > 8 {
            return Err(MatrixError::invariant(format!(
                "orientation code {code} outside 0..=8"
            )));
        }
        Ok(Self(code))
    }

    pub fn code(self) -> u8 {
        self.0
    }

    /// Whether the fixture must be tagged with metadata at all.
    pub fn is_tagged(self) -> bool {
        self.0 != 0
    }

    pub fn transformation(self) -> Transformation {
        TRANSFORMATIONS[usize::from(self.0)]
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_nine_entries_and_identity_heads() {
        assert_eq!(Orientation::ALL.len(), 9);
        assert!(Orientation::new(0).unwrap().transformation().is_identity());
        assert!(Orientation::new(1).unwrap().transformation().is_identity());
        assert!(Orientation::new(9).is_err());
    }

    #[test]
    fn mirrored_codes_flip_horizontally() {
        for code in [2u8, 4, 5, 7] {
            let t = Orientation::new(code).unwrap().transformation();
            assert!(t.flip_horizontal, "code {code} must mirror");
            assert!(!t.flip_vertical);
        }
        for code in [0u8, 1, 3, 6, 8] {
            let t = Orientation::new(code).unwrap().transformation();
            assert!(!t.flip_horizontal, "code {code} must not mirror");
        }
    }

    #[test]
    fn rotations_match_exif_semantics() {
        let rot = |c: u8| Orientation::new(c).unwrap().transformation().rotation;
        assert_eq!(rot(3), Rotation::Deg180);
        assert_eq!(rot(4), Rotation::Deg180);
        assert_eq!(rot(5), Rotation::Deg90);
        assert_eq!(rot(6), Rotation::Deg90);
        assert_eq!(rot(7), Rotation::Deg270);
        assert_eq!(rot(8), Rotation::Deg270);
    }

    #[test]
    fn only_zero_is_untagged() {
        assert!(!Orientation::new(0).unwrap().is_tagged());
        for code in 1..=8 {
            assert!(Orientation::new(code).unwrap().is_tagged());
        }
    }
}
