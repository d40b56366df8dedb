use crate::data::table::Cell;

/// Strictly parse a cell as a finite number. Text is trimmed first.
pub fn parse_number(cell: &Cell) -> Option<f64> {
    let value = match cell {
        Cell::Number(n) => *n,
        Cell::Text(s) => s.trim().parse::<f64>().ok()?,
        Cell::Empty => return None,
    };
    value.is_finite().then_some(value)
}

/// A chart value after coercion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coerced {
    pub value: f64,
    /// The cell did not parse and `value` is the `0` fallback.
    pub fell_back: bool,
}

/// Coerce a cell for charting: anything that does not parse becomes `0`.
pub fn coerce_or_zero(cell: &Cell) -> Coerced {
    match parse_number(cell) {
        Some(value) => Coerced {
            value,
            fell_back: false,
        },
        None => Coerced {
            value: 0.0,
            fell_back: true,
        },
    }
}
