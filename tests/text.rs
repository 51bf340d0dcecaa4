use anyhow::Result;
use cellstream::*;

#[test]
fn window_reads_stop_at_its_bounds() -> Result<()> {
    let buf = b"abcdef";
    let mut w = TextWindow::new(buf);
    w.reset_window(1, 3);

    assert_eq!(w.len(), 2);
    assert_eq!(w.byte_at(0)?, b'b');
    assert_eq!(w.byte_at(1)?, b'c');
    // The buffer holds 'd' at the next position; the window must not expose it.
    assert_eq!(w.byte_at(2), Err(WindowFault::OutOfRange { index: 2, len: 2 }));
    assert_eq!(w.to_text()?, "bc");
    Ok(())
}

#[test]
fn window_faults_convert_into_crate_errors() {
    let w = TextWindow::new(b"abc");
    let err: Error = w.byte_at(0).unwrap_err().into();
    assert!(matches!(err, Error::InvalidWindowAccess(WindowFault::Unset)));
    assert!(err.to_string().contains("before its first reset"));
}

#[test]
fn one_window_visits_many_cells() -> Result<()> {
    let line = b"alpha,beta,,gamma";
    let mut w = TextWindow::new(line);
    let mut cells = Vec::new();
    let mut start = 0;
    let separators = line.iter().enumerate().filter(|(_, b)| **b == b',').map(|(i, _)| i);
    for end in separators.chain([line.len()]) {
        w.reset_window(start, end);
        cells.push(w.to_string());
        start = end + 1;
    }
    assert_eq!(cells, ["alpha", "beta", "", "gamma"]);
    assert!(w.is_set());
    assert_eq!((w.start(), w.end()), (Some(12), Some(17)));
    Ok(())
}

#[test]
fn empty_window_is_not_unset() -> Result<()> {
    let mut w = TextWindow::new(b"xyz");
    assert!(!w.is_set());
    w.reset_window(2, 2);
    assert!(w.is_set());
    assert!(w.is_empty());
    assert_eq!(w.to_text()?, "");
    Ok(())
}

#[test]
fn sub_sequence_shares_the_buffer() -> Result<()> {
    let buf = b"0123456789";
    let mut w = TextWindow::new(buf);
    w.reset_window(2, 8);
    let sub = w.sub_sequence(1, 4)?;
    assert_eq!(sub.to_text()?, "345");
    assert_eq!(sub.as_contiguous().map(<[u8]>::as_ptr), Some(buf[3..].as_ptr()));

    assert_eq!(
        w.sub_sequence(4, 7).unwrap_err(),
        WindowFault::BadRange { from: 4, to: 7, len: 6 }
    );
    assert_eq!(w.sub_sequence(3, 2).unwrap_err(), WindowFault::BadRange { from: 3, to: 2, len: 6 });
    assert_eq!(TextWindow::new(buf).sub_sequence(0, 0).unwrap_err(), WindowFault::Unset);
    Ok(())
}

#[test]
fn repoint_moves_to_another_buffer() -> Result<()> {
    let (first, second) = (b"first".as_slice(), b"second".as_slice());
    let mut w = TextWindow::over(first);
    assert_eq!(w.to_text()?, "first");
    w.repoint(second, 0, 3);
    assert_eq!(w.to_text()?, "sec");
    Ok(())
}

#[test]
fn concat_indexes_across_the_split() -> Result<()> {
    let view = ConcatView::new(TextWindow::over(b"hel"), TextWindow::over(b"lo"));
    assert_eq!(view.len(), 5);
    let bytes: Vec<u8> = (0..view.len()).map(|i| view.byte_at(i)).collect::<Result<_, _>>()?;
    assert_eq!(bytes, b"hello");
    assert_eq!(view.byte_at(5), Err(WindowFault::OutOfRange { index: 5, len: 5 }));
    assert!(view.as_contiguous().is_none());
    assert_eq!(view.to_text()?, "hello");
    Ok(())
}

#[test]
fn concat_sub_sequence_straddles_or_clips() -> Result<()> {
    let view = ConcatView::new(TextWindow::over(b"abc"), TextWindow::over(b"def"));

    let straddle = view.sub_sequence(1, 5)?;
    assert_eq!((straddle.left().len(), straddle.right().len()), (2, 2));
    assert_eq!(straddle.to_text()?, "bcde");

    let left_only = view.sub_sequence(0, 2)?;
    assert!(left_only.right().is_empty());
    assert_eq!(left_only.as_contiguous(), Some(b"ab".as_slice()));

    let right_only = view.sub_sequence(4, 6)?;
    assert!(right_only.left().is_empty());
    assert_eq!(right_only.to_text()?, "ef");

    assert!(view.sub_sequence(2, 7).is_err());
    Ok(())
}

#[test]
fn concat_of_multibyte_halves_decodes_once_joined() -> Result<()> {
    let euro = "€".as_bytes();
    let view = ConcatView::new(TextWindow::over(&euro[..1]), TextWindow::over(&euro[1..]));
    assert_eq!(view.to_text()?, "€");
    Ok(())
}

#[test]
fn plain_slices_and_strings_are_sequences() -> Result<()> {
    let s: &str = "xyz";
    assert_eq!(s.byte_at(2)?, b'z');
    assert_eq!(s.sub_range(1, 3)?.to_text()?, "yz");
    assert!(b"ab".as_slice().sub_range(1, 3).is_err());
    Ok(())
}
