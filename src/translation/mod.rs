/*!
 * Translation of source items using AI providers.
 *
 * This module is split into several submodules:
 *
 * - `range`: Parsing and clamping of the requested item range
 * - `core`: Single-item translation client with pass-through fallback
 * - `batch`: Sequential processing of a range and result persistence
 */

// Re-export main types for easier usage
pub use self::batch::{BatchRunner, BatchSummary, ResultRecord};
pub use self::core::{Translate, TranslationClient, TranslationOutcome, FALLBACK_MODEL};
pub use self::range::ItemRange;

// Submodules
pub mod batch;
pub mod core;
pub mod range;
