use eyre::Result;
use seqview_core_rs::cursor::{from_iter, IntoCursor, ReadCursor};
use seqview_core_rs::quality::Phred;
use seqview_core_rs::{InputCursor, SequenceExt, Span, ViewError};
use seqview_views_rs::{
    single_pass_input, take, take_exactly, take_exactly_or_throw, take_line, take_line_or_throw,
    trim, Adaptor, Take, TakeLine,
};

fn phreds(scores: &[u8]) -> Result<Vec<Phred>> {
    scores.iter().map(|x| Phred::new(*x)).collect()
}

mod bounded {
    use super::*;

    #[test]
    fn take_and_take_exactly_agree_within_bounds() -> Result<()> {
        let data: Vec<u32> = (0..16).collect();
        for n in 0..=data.len() {
            let taken: Vec<&u32> = (&data | take(n)).materialize()?;
            let exactly: Vec<&u32> = (&data | take_exactly(n)).materialize()?;
            assert_eq!(taken, exactly);
            assert_eq!(taken.len(), n);

            let streamed: Vec<u32> = (from_iter(data.iter().copied()) | take(n)).materialize()?;
            itertools::assert_equal(streamed.iter(), taken.iter().copied());
        }
        Ok(())
    }

    #[test]
    fn take_exactly_trusts_the_caller_on_single_pass_input() -> Result<()> {
        let data = [1u8, 2, 3];
        for n in 4..8 {
            let view = &data | single_pass_input() | take_exactly(n);
            assert_eq!(view.size(), Some(n));
            assert_eq!(view.materialize::<Vec<_>>()?.len(), data.len());
        }
        Ok(())
    }

    #[test]
    fn or_throw_fails_before_reading_sized_input() {
        let data = vec![1, 2, 3];
        let err = take_exactly_or_throw(4).apply(&data).unwrap_err();
        assert!(ViewError::is_invalid_argument(&err));

        let err = Take::exactly_or_throw(Span::new(&data), 10).unwrap_err();
        assert!(ViewError::is_invalid_argument(&err));
    }

    #[test]
    fn or_throw_fails_while_reading_unsized_input() -> Result<()> {
        let view = take_exactly_or_throw(4).apply("foo".bytes().single_pass())?;

        let mut iter = view.into_iter();
        for expected in b"foo" {
            assert_eq!(iter.next().transpose()?, Some(*expected));
        }
        let err = iter.next().transpose().unwrap_err();
        assert!(ViewError::is_unexpected_end(&err));
        Ok(())
    }

    #[test]
    fn or_throw_adaptors_chain() -> Result<()> {
        let data = vec![1, 2, 3];

        let view = (&data | take_exactly_or_throw(3) | take_exactly_or_throw(3))?;
        assert_eq!(view.materialize::<Vec<_>>()?.len(), 3);

        let err = (&data | take_exactly_or_throw(3) | take_exactly_or_throw(4)).unwrap_err();
        assert!(ViewError::is_invalid_argument(&err));

        // The first bound makes the stream sized, so the second one is checked up-front
        let stream = "foo".bytes().single_pass();
        let err = (stream | take_exactly_or_throw(3) | take_exactly_or_throw(4)).unwrap_err();
        assert!(ViewError::is_invalid_argument(&err));
        Ok(())
    }

    #[test]
    fn chained_takes_yield_the_smallest_bound() -> Result<()> {
        let text = "ACGTACGTAC";
        for a in 0..12 {
            for b in 0..12 {
                let expected = a.min(b).min(text.len());

                let view = text | take(a) | take(b);
                assert_eq!(view.materialize::<Vec<u8>>()?.len(), expected);

                let view = text | single_pass_input() | take(a) | take(b);
                assert_eq!(view.materialize::<Vec<u8>>()?.len(), expected);
            }
        }
        Ok(())
    }
}

mod lines {
    use super::*;

    #[test]
    fn multi_pass_input_keeps_the_terminator() -> Result<()> {
        let mut view = TakeLine::new("foo\nbar");
        let line: Vec<u8> = view.by_ref().materialize()?;
        assert_eq!(line, b"foo");
        assert_eq!(view.into_inner().get()?, Some(b'\n'));
        Ok(())
    }

    #[test]
    fn single_pass_input_consumes_the_terminator() -> Result<()> {
        let mut cursor = "foo\nbar".bytes().single_pass();
        let line: Vec<u8> = TakeLine::new(cursor.by_ref()).materialize()?;
        assert_eq!(line, b"foo");
        assert_eq!(cursor.get()?, Some(b'b'));
        Ok(())
    }

    #[test]
    fn missing_terminator() -> Result<()> {
        let line: Vec<u8> = ("foo" | take_line()).materialize()?;
        assert_eq!(line, b"foo");

        let err = ("foo" | take_line_or_throw()).materialize::<Vec<u8>>().unwrap_err();
        assert!(ViewError::is_unexpected_end(&err));
        Ok(())
    }

    #[test]
    fn empty_input() -> Result<()> {
        let line: Vec<u8> = ("" | take_line()).materialize()?;
        assert!(line.is_empty());
        let line: Vec<u8> = ("".bytes().single_pass() | take_line()).materialize()?;
        assert!(line.is_empty());

        let err = ("" | take_line_or_throw()).materialize::<Vec<u8>>().unwrap_err();
        assert!(ViewError::is_unexpected_end(&err));
        let err = ("".bytes().single_pass() | take_line_or_throw())
            .materialize::<Vec<u8>>()
            .unwrap_err();
        assert!(ViewError::is_unexpected_end(&err));
        Ok(())
    }

    #[test]
    fn single_pass_input_ending_in_carriage_return() -> Result<()> {
        let mut cursor = "foo\r".bytes().single_pass();
        let line: Vec<u8> = TakeLine::or_throw(cursor.by_ref()).materialize()?;
        assert_eq!(line, b"foo");
        assert_eq!(cursor.get()?, None);

        let mut cursor = "\r".bytes().single_pass();
        let line: Vec<u8> = TakeLine::new(cursor.by_ref()).materialize()?;
        assert!(line.is_empty());
        assert_eq!(cursor.get()?, Some(b'\r'));
        Ok(())
    }

    #[test]
    fn bounded_consumers_settle_the_terminator() -> Result<()> {
        let mut view = "foo\nbar" | take_line() | take(3);
        let line: Vec<u8> = view.by_ref().materialize()?;
        assert_eq!(line, b"foo");
        assert_eq!(view.into_inner().into_inner().get()?, Some(b'\n'));

        let mut cursor = "foo\nbar".bytes().single_pass();
        let line: Vec<u8> = take_line().then(take(3)).apply(cursor.by_ref()).materialize()?;
        assert_eq!(line, b"foo");
        assert_eq!(cursor.get()?, Some(b'b'));

        let mut cursor = "foo\r\nbar".bytes().single_pass();
        let mut view = TakeLine::new(cursor.by_ref());
        for expected in b"foo" {
            assert_eq!(view.next()?, Some(*expected));
        }
        drop(view);
        assert_eq!(cursor.get()?, Some(b'b'));
        Ok(())
    }

    #[test]
    fn reads_records_from_a_stream() -> Result<()> {
        let fastq = "@read1\nACGT\n+\nIIII\r\n@read2\nGG\n+\n##\n";
        let mut stream = ReadCursor::with_capacity(3, fastq.as_bytes());

        let mut lines = Vec::new();
        while stream.get()?.is_some() {
            let line: Vec<u8> = take_line_or_throw().apply(stream.by_ref()).materialize()?;
            lines.push(String::from_utf8(line)?);
        }
        assert_eq!(
            lines,
            vec!["@read1", "ACGT", "+", "IIII", "@read2", "GG", "+", "##"]
        );
        Ok(())
    }
}

mod quality {
    use super::*;

    #[test]
    fn trim_stops_at_the_first_low_quality_element() -> Result<()> {
        let quals = phreds(&[30, 25, 10, 28])?;
        let trimmed: Vec<&Phred> = (&quals | trim(20)).materialize()?;
        assert_eq!(trimmed.len(), 2);

        let trimmed: Vec<Phred> = (quals.iter().copied().single_pass() | trim(20)).materialize()?;
        assert_eq!(trimmed, quals[..2]);
        Ok(())
    }

    #[test]
    fn trim_of_empty_input() -> Result<()> {
        let empty: Vec<Phred> = Vec::new();
        assert!((&empty | trim(20)).materialize::<Vec<_>>()?.is_empty());

        let reads = vec![Vec::new(), phreds(&[40])?];
        let mut lengths = Vec::new();
        for read in &reads | trim(20) {
            lengths.push(read?.materialize::<Vec<_>>()?.len());
        }
        assert_eq!(lengths, vec![0, 1]);
        Ok(())
    }

    #[test]
    fn trim_applies_to_each_read() -> Result<()> {
        let reads = vec![phreds(&[30, 10])?, phreds(&[5, 40])?];

        let mut lengths = Vec::new();
        for read in &reads | trim(20) {
            lengths.push(read?.materialize::<Vec<_>>()?.len());
        }
        assert_eq!(lengths, vec![1, 0]);
        Ok(())
    }
}

#[test]
fn views_round_trip_through_containers() -> Result<()> {
    let text = "GATTACA\nTTAGGC";

    let line: Vec<u8> = (text | take_line()).try_into()?;
    let again: Vec<u8> = (&line | take(line.len())).materialize::<Vec<&u8>>()?
        .into_iter()
        .copied()
        .collect();
    assert_eq!(again, line);
    itertools::assert_equal(line.iter(), text.as_bytes()[..7].iter());
    Ok(())
}
