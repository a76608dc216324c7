#![cfg(feature = "std")]

mod support;

use std::io::{self, Cursor, Read};

use support::*;
use ttbin::avec::{
    Options,
    reader::{self, Error},
    slice,
};

#[test]
fn decode_reader_matches_slice() {
    let data = Stream::new(LENGTHS)
        .summary(7, 5000.0, 1799, 310)
        .treadmill(T, 1.0, 0, 2)
        .heart_rate(110, T)
        .treadmill(T + 2, 3.0, 1, 6)
        .lap(900, 2500.0, 155)
        .build();

    let from_reader = ttbin::avec::decode_reader(&mut Cursor::new(&data)).unwrap();
    let from_slice = ttbin::avec::decode_slice(&data).unwrap();

    assert_eq!(from_reader, from_slice);
    assert_eq!(from_reader.treadmill().len(), 3);
    assert_eq!(from_reader.treadmill()[0].heart_rate, Some(110));
}

#[test]
fn decode_reader_with_options() {
    let data = Stream::new(LENGTHS)
        .swim(T, 0.0, 0, 0, 0)
        .swim(T + 40, 50.0, 30, 2, 12)
        .build();

    let options = Options::default().with_max_samples(20);
    let err = reader::decode_with(&mut Cursor::new(&data), &options).unwrap_err();

    assert!(matches!(
        err,
        Error::Decode(slice::Error::ResourceLimitExceeded { index: 40, .. })
    ));
}

struct FailingReader;

impl Read for FailingReader {
    fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "watch disconnected"))
    }
}

#[test]
fn decode_reader_io_error() {
    let err = ttbin::avec::decode_reader(&mut FailingReader).unwrap_err();

    assert!(matches!(err, Error::Io(e) if e.kind() == io::ErrorKind::ConnectionReset));
}
