//! # pgx-ref
//!
//! Reference scenarios for the PGX risk pipeline.
//!
//! 1. **Codeine, CYP2D6 poor metabolizer**: prodrug that cannot be activated.
//! 2. **Gene isolation**: a CYP2C19 marker does not leak into CYP2D6 drugs.
//! 3. **Unsupported drug names**: unknown names are ignored.
//! 4. **Missing declaration**: the file is rejected before any evaluation.
//! 5. **Azathioprine, TPMT poor metabolizer**: critical thiopurine toxicity.
//!
//! All data is hardcoded and fictional. No external services are contacted.

pub mod mock_data;
pub mod scenarios;
