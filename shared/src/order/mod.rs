//! POS order types
//!
//! Request and response bodies of `POST /api/order/create-pos-order`.

mod types;

pub use types::*;
