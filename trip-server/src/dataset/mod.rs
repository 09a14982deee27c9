//! Deal dataset loading.
//!
//! The dataset is a JSON document with a currency and a flat list of deals:
//!
//! ```json
//! {
//!   "currency": "EUR",
//!   "deals": [
//!     {
//!       "transport": "train",
//!       "departure": "London",
//!       "arrival": "Amsterdam",
//!       "duration": { "h": "05", "m": "00" },
//!       "cost": 160,
//!       "discount": 0,
//!       "reference": "TLA0500"
//!     }
//!   ]
//! }
//! ```

mod error;
mod raw;
mod source;

pub use error::DatasetError;
pub use raw::{DealSet, RawDeal, RawDuration};
pub use source::DealSource;
