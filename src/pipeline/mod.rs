//! Pipeline stages for a single analysis request.
//!
//! Each submodule implements exactly one transformation step. Keeping stages
//! separate makes each independently testable and lets us swap
//! implementations (e.g. a different PDF backend) without touching other
//! stages.
//!
//! ## Data Flow
//!
//! ```text
//! fetch ──▶ extract ──▶ analyze
//! (URL→tmp)  (PDF→text)  (LLM + retry + fallback)
//! ```
//!
//! 1. [`fetch`]   — download the PDF to a scoped temp file; the only stage
//!    allowed to touch the client-supplied URL
//! 2. [`extract`] — parse the PDF into text; runs in `spawn_blocking`
//!    because PDF parsing is CPU-bound
//! 3. [`analyze`] — drive the model call with retry and the local fallback;
//!    never fails outward
//!
//! A request's stages run strictly in order with no internal parallelism;
//! separate requests overlap freely under the runtime.

pub mod analyze;
pub mod extract;
pub mod fetch;
