use anyhow::Result;
use cellstream::testing::*;
use cellstream::*;
use std::io::ErrorKind;

#[test]
fn dispatches_text_and_int_rows_in_order() -> Result<()> {
    let (mut names, mut counts) = (Vec::new(), Vec::new());
    let summary = Tokenizer::with_separator(',')
        .column(record_text(&mut names))
        .column(record_int(&mut counts))
        .parse_str("A,1\nB,2\n")?;

    assert_eq!(summary.rows, 2);
    assert_eq!(summary.cells, 4);
    assert_eq!(names, vec![(0, "A".to_string()), (1, "B".to_string())]);
    assert_eq!(counts, vec![(0, 1), (1, 2)]);
    Ok(())
}

#[test]
fn extra_columns_are_ignored() -> Result<()> {
    let mut first = Vec::new();
    let summary = Tokenizer::default()
        .column(record_text(&mut first))
        .parse_str("a,b,c\nd,e,f\n")?;

    assert_eq!(summary.rows, 2);
    assert_eq!(summary.cells, 2);
    assert_eq!(values(&first), vec!["a", "d"]);
    Ok(())
}

#[test]
fn no_consumers_still_counts_rows() -> Result<()> {
    let summary = Tokenizer::default().parse_str("1,2\n3,4\n5,6")?;
    assert_eq!(summary.rows, 3);
    assert_eq!(summary.cells, 0);
    Ok(())
}

#[test]
fn more_consumers_than_columns_fails_at_that_row() {
    let (mut a, mut b) = (Vec::new(), Vec::new());
    let err = Tokenizer::default()
        .column(record_text(&mut a))
        .column(record_text(&mut b))
        .parse_str("x,y\nlonely\nz,w\n")
        .unwrap_err();

    assert!(matches!(
        err,
        Error::ColumnConsumerMismatch {
            row: 1,
            columns: 1,
            consumers: 2
        }
    ));
    // Row 0 and the first cell of row 1 were dispatched before the failure.
    assert_eq!(values(&a), vec!["x", "lonely"]);
    assert_eq!(values(&b), vec!["y"]);
}

#[test]
fn malformed_number_reports_row_and_column() {
    let (mut labels, mut qty) = (Vec::new(), Vec::new());
    let err = Tokenizer::default()
        .column(record_text(&mut labels))
        .column(record_int(&mut qty))
        .parse_str("x,1\ny,oops\nz,3\n")
        .unwrap_err();

    match err {
        Error::MalformedNumericLiteral { row, column, source } => {
            assert_eq!((row, column), (1, 1));
            assert_eq!(source.literal, "oops");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(qty, vec![(0, 1)]);
    assert_eq!(values(&labels), vec!["x", "y"]);
}

#[test]
fn empty_numeric_cell_is_malformed() {
    let mut qty = Vec::new();
    let err = Tokenizer::default()
        .column(record_long(&mut qty))
        .parse_str("\"\"\n")
        .unwrap_err();
    assert!(matches!(err, Error::MalformedNumericLiteral { row: 0, column: 0, .. }));
}

#[test]
fn terminators_are_normalized() -> Result<()> {
    for input in ["a,1\nb,2\n", "a,1\r\nb,2\r\n", "a,1\rb,2\r", "a,1\r\nb,2"] {
        let (mut names, mut n) = (Vec::new(), Vec::new());
        let summary = Tokenizer::default()
            .column(record_text(&mut names))
            .column(record_int(&mut n))
            .parse_str(input)?;
        assert_eq!(summary.rows, 2, "{input:?}");
        drop(summary);
        assert_eq!(values(&names), vec!["a", "b"], "{input:?}");
        assert_eq!(values(&n), vec![1, 2], "{input:?}");
    }
    Ok(())
}

#[test]
fn blank_lines_produce_no_rows() -> Result<()> {
    let mut names = Vec::new();
    let summary = Tokenizer::default()
        .column(record_text(&mut names))
        .parse_str("\n\na\n\r\n\nb\n\n")?;
    assert_eq!(summary.rows, 2);
    assert_eq!(names, vec![(0, "a".to_string()), (1, "b".to_string())]);
    Ok(())
}

#[test]
fn empty_fields_are_empty_strings() -> Result<()> {
    let (mut a, mut b, mut c) = (Vec::new(), Vec::new(), Vec::new());
    Tokenizer::default()
        .column(record_text(&mut a))
        .column(record_text(&mut b))
        .column(record_text(&mut c))
        .parse_str("x,,z\n,,\n1,2,\n")?;
    assert_eq!(values(&a), vec!["x", "", "1"]);
    assert_eq!(values(&b), vec!["", "", "2"]);
    assert_eq!(values(&c), vec!["z", "", ""]);
    Ok(())
}

#[test]
fn quoted_fields_keep_separators_and_newlines() -> Result<()> {
    let (mut text, mut n) = (Vec::new(), Vec::new());
    Tokenizer::default()
        .column(record_text(&mut text))
        .column(record_int(&mut n))
        .parse_str("\"a,b\",1\n\"line1\nline2\",2\n\"7\"x,3\n")?;
    assert_eq!(values(&text), vec!["a,b", "line1\nline2", "7"]);
    assert_eq!(values(&n), vec![1, 2, 3]);
    Ok(())
}

#[test]
fn quoted_numbers_parse() -> Result<()> {
    let mut v = Vec::new();
    Tokenizer::default()
        .column(record_double(&mut v))
        .parse_str("\"1.25\"\n\"-3e2\"\n")?;
    assert_eq!(values(&v), vec![1.25, -300.0]);
    Ok(())
}

#[test]
fn quoting_can_be_disabled() -> Result<()> {
    let (mut a, mut b) = (Vec::new(), Vec::new());
    Tokenizer::default()
        .quote(None)
        .column(record_text(&mut a))
        .column(record_text(&mut b))
        .parse_str("\"a,b\"\n")?;
    assert_eq!(values(&a), vec!["\"a"]);
    assert_eq!(values(&b), vec!["b\""]);
    Ok(())
}

#[test]
fn unterminated_quote_runs_to_end_of_input() -> Result<()> {
    let mut a = Vec::new();
    let summary = Tokenizer::default()
        .column(record_text(&mut a))
        .parse_str("\"open,\nstill open")?;
    assert_eq!(summary.rows, 1);
    assert_eq!(values(&a), vec!["open,\nstill open"]);
    Ok(())
}

#[test]
fn header_row_is_captured_not_dispatched() -> Result<()> {
    let (mut names, mut qty) = (Vec::new(), Vec::new());
    let summary = Tokenizer::default()
        .has_headers(true)
        .column(record_text(&mut names))
        .column(record_int(&mut qty))
        .parse_str("name,qty\nA,1\nB,2\n")?;
    assert_eq!(summary.headers, vec!["name", "qty"]);
    assert_eq!(summary.rows, 2);
    assert_eq!(names[0], (0, "A".to_string()));
    assert_eq!(qty, vec![(0, 1), (1, 2)]);
    Ok(())
}

#[test]
fn header_only_input_has_no_rows() -> Result<()> {
    let mut qty = Vec::new();
    let summary = Tokenizer::default()
        .has_headers(true)
        .column(record_int(&mut qty))
        .parse_str("qty\n")?;
    assert_eq!(summary.headers, vec!["qty"]);
    assert_eq!(summary.rows, 0);
    assert!(qty.is_empty());
    Ok(())
}

#[test]
fn row_hook_sees_every_row_after_its_cells() -> Result<()> {
    let mut events = Vec::new();
    {
        let log = std::cell::RefCell::new(&mut events);
        Tokenizer::default()
            .column(CellConsumer::int(|row, v| log.borrow_mut().push(format!("cell {row}={v}"))))
            .on_row(|row| log.borrow_mut().push(format!("row {row}")))
            .parse_str("10\n20\n")?;
    }
    assert_eq!(events, ["cell 0=10", "row 0", "cell 1=20", "row 1"]);
    Ok(())
}

#[test]
fn other_separators() -> Result<()> {
    let (mut a, mut b) = (Vec::new(), Vec::new());
    let summary = tokenize(
        "k1\t1.5\nk2\t2.5\n".as_bytes(),
        '\t',
        [record_text(&mut a), record_double(&mut b)],
    )?;
    assert_eq!(summary.rows, 2);
    assert_eq!(values(&a), vec!["k1", "k2"]);
    assert_eq!(values(&b), vec![1.5, 2.5]);

    let mut c = Vec::new();
    Tokenizer::with_separator(';')
        .column(CellConsumer::skip())
        .column(record_long(&mut c))
        .parse_str("a;9000000000\nb;-1\n")?;
    assert_eq!(values(&c), vec![9_000_000_000, -1]);
    Ok(())
}

#[test]
fn skip_consumers_hold_a_position() -> Result<()> {
    let mut last = Vec::new();
    let summary = Tokenizer::default()
        .columns([CellConsumer::skip(), CellConsumer::skip()])
        .column(record_float(&mut last))
        .parse_str("not,numbers,0.5\n")?;
    assert_eq!(summary.cells, 1);
    assert_eq!(values(&last), vec![0.5f32]);
    Ok(())
}

#[test]
fn trades_fixture() -> Result<()> {
    let (mut sym, mut qty, mut px, mut venue) = (Vec::new(), Vec::new(), Vec::new(), Vec::new());
    Tokenizer::default()
        .column(record_text(&mut sym))
        .column(record_int(&mut qty))
        .column(record_double(&mut px))
        .column(record_text(&mut venue))
        .parse_str(TRADES_CSV)?;

    let expected = trades();
    for (i, (s, q, p, v)) in expected.into_iter().enumerate() {
        assert_eq!(sym[i], (i, s.to_string()));
        assert_eq!(qty[i], (i, q));
        assert_eq!(px[i], (i, p));
        assert_eq!(venue[i], (i, v.to_string()));
    }
    Ok(())
}

#[test]
fn io_failure_aborts_after_dispatching_earlier_rows() {
    let mut n = Vec::new();
    let err = Tokenizer::default()
        .column(record_int(&mut n))
        .parse(FailingReader::new("1\n2\n", ErrorKind::BrokenPipe))
        .unwrap_err();
    match err {
        Error::Io(e) => assert_eq!(e.kind(), ErrorKind::BrokenPipe),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(values(&n), vec![1, 2]);
}

#[test]
fn interrupted_reads_are_retried() -> Result<()> {
    let mut n = Vec::new();
    let summary = Tokenizer::default()
        .column(record_int(&mut n))
        .parse(InterruptingReader::new(ChunkedReader::new("1\n22\n333\n", 2)))?;
    assert_eq!(summary.rows, 3);
    assert_eq!(values(&n), vec![1, 22, 333]);
    Ok(())
}

#[test]
fn multibyte_text_survives() -> Result<()> {
    let (mut a, mut b) = (Vec::new(), Vec::new());
    Tokenizer::default()
        .column(record_text(&mut a))
        .column(record_text(&mut b))
        .parse_str("héllo,wörld\n日本,語\n")?;
    assert_eq!(values(&a), vec!["héllo", "日本"]);
    assert_eq!(values(&b), vec!["wörld", "語"]);
    Ok(())
}

#[test]
fn summary_counts_bytes() -> Result<()> {
    let input = generated_rows(10);
    let summary = Tokenizer::default().parse_str(&input)?;
    assert_eq!(summary.bytes, input.len() as u64);
    assert_eq!(summary.chunks, 1);
    assert_eq!(summary.rows, 10);
    Ok(())
}

#[test]
fn agrees_with_reference_csv_reader() -> Result<()> {
    let input = generated_rows(200);

    let (mut ids, mut labels, mut ratios) = (Vec::new(), Vec::new(), Vec::new());
    Tokenizer::default()
        .column(record_long(&mut ids))
        .column(record_text(&mut labels))
        .column(record_double(&mut ratios))
        .parse_str(&input)?;

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(input.as_bytes());
    for (i, rec) in rdr.records().enumerate() {
        let rec = rec?;
        assert_eq!(ids[i], (i, rec[0].parse::<i64>()?));
        assert_eq!(labels[i], (i, rec[1].to_string()));
        assert_eq!(ratios[i], (i, rec[2].parse::<f64>()?));
    }
    assert_eq!(ids.len(), 200);
    Ok(())
}
