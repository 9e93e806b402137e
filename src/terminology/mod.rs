/*!
 * Terminology control: the placeholder substitution protocol.
 *
 * Submodules:
 * - `table`: the merged term mapping with provenance
 * - `case`: casing policy derivation and application
 * - `preprocess`: term matching and placeholder rewriting before translation
 * - `postprocess`: placeholder reinsertion after translation
 */

pub mod case;
pub mod postprocess;
pub mod preprocess;
pub mod table;

pub use case::CasePolicy;
pub use postprocess::{postprocess, PostprocessOutcome};
pub use preprocess::{PlaceholderCounter, PreprocessOutcome, Preprocessor};
pub use table::{Term, TermCounts, TermProvenance, TermTable, TermTableLoad};
