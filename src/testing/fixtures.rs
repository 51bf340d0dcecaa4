//! Sample inputs for tokenizer tests.

/// A small trade log: `symbol,quantity,price,venue`.
pub const TRADES_CSV: &str = "\
AAPL,100,189.25,XNAS
MSFT,250,411.5,XNAS
VOD,1200,0.7265,XLON
SAP,-40,1.4e2,XETR
";

/// Column values of [`TRADES_CSV`], row by row.
#[must_use]
pub fn trades() -> Vec<(&'static str, i32, f64, &'static str)> {
    vec![
        ("AAPL", 100, 189.25, "XNAS"),
        ("MSFT", 250, 411.5, "XNAS"),
        ("VOD", 1200, 0.7265, "XLON"),
        ("SAP", -40, 140.0, "XETR"),
    ]
}

/// `rows` lines of `id,label,ratio` with predictable values.
///
/// Row `i` is `i,row-i,i/8` with the ratio printed by `f64`'s `Display`.
#[must_use]
pub fn generated_rows(rows: usize) -> String {
    let mut out = String::with_capacity(rows * 24);
    for i in 0..rows {
        out.push_str(&format!("{i},row-{i},{}\n", i as f64 / 8.0));
    }
    out
}

/// A single-column input whose only cell is `len` repetitions of `fill`.
#[must_use]
pub fn long_cell(len: usize, fill: char) -> String {
    let mut out: String = std::iter::repeat_n(fill, len).collect();
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_rows_are_newline_terminated() {
        let out = generated_rows(3);
        assert_eq!(out, "0,row-0,0\n1,row-1,0.125\n2,row-2,0.25\n");
        assert!(generated_rows(0).is_empty());
    }
}
