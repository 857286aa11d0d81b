#![forbid(unsafe_code)]

//! Deterministic EXIF-orientation test-image matrix generator.
//!
//! The generator enumerates the cross-product of aspect ratio, pixel
//! dimensions, orientation code, encoded format, and recorded resize
//! request, writes one canonical fixture file per combination, and keeps a
//! zim-wiki note tree (one note per directory level) in step without ever
//! clobbering notes a person has grown past the stabilize threshold.
//!
//! The run is intentionally sequential and idempotent: re-running against a
//! prior output tree rewrites fixtures byte-identically and only appends to
//! leaf notes that are still below the threshold.

pub mod driver;
pub mod error;
pub mod fixture;
pub mod matrix;
pub mod notes;
pub mod orientation;
pub mod pattern;
pub mod scale;

pub use driver::{GeneratorConfig, MATRIX_ROOT, PlannedFixture, RunSummary, plan, run};
pub use error::{MatrixError, MatrixResult};
pub use fixture::{
    ExiftoolTagger, FixtureFormat, FixtureId, NoopTagger, OrientationTagger, is_exiftool_on_path,
    write_fixture,
};
pub use matrix::{AspectClass, Size, enumerate_sizes};
pub use notes::{
    DEFAULT_STABILIZE_THRESHOLD, ensure_note, merge_leaf_reference, note_header, note_path,
    reference_line,
};
pub use orientation::{Orientation, Rotation, Transformation};
pub use scale::{ScaleAxis, ScaleDirection, ScaleSpec};
