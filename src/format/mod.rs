//! Formatting and normalization helpers shared by the engine.
//!
//! Money and attendance inputs arrive as loosely-typed text or JSON values;
//! these helpers normalize them into the strongly-typed values the
//! calculator works with, and render results with the fixed display rules
//! (two decimal places for money, `DD-MM-YYYY` for dates).

mod date;
mod money;

pub use date::{EMPTY_DISPLAY, format_dmy};
pub use money::{
    format_days, format_money, normalize_amount, parse_amount, parse_count, round_money,
};

pub(crate) use money::{deserialize_amount, deserialize_count, deserialize_text};
