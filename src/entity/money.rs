use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

/// Writes a monetary column with exactly two decimal places.
///
/// SQLite keeps decimals as `REAL`, so `1.10` reads back as `1.1`.
pub fn serialize<S: Serializer>(
  value: &Option<Decimal>,
  ser: S,
) -> Result<S::Ok, S::Error> {
  value
    .map(|mut value| {
      value.rescale(2);
      value
    })
    .serialize(ser)
}
