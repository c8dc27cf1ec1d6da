//! Internal recursion engines.
//!
//! These modules implement the core numerical routines; one file per
//! SLATEC-family algorithm. All functions are `pub(crate)` — the public
//! surface lives in the crate root.
//!
//! # Conventions
//!
//! Output sequences are written into caller-supplied slices; the engines
//! never allocate. The degree recursion takes its window length from the
//! output slice and is total over its input domain. The 3j recursion
//! returns `Result<(m2min, m2max), Error>`, with the error variants in
//! bijection with the SLATEC IER codes.

pub(crate) mod dl;
pub(crate) mod rc3jm;
