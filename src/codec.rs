//! Fixed-width little-endian codec.
//!
//! Stateless decode/encode helpers for the binary record layouts found in
//! large scientific file formats: fixed-width integers and floats plus
//! null-terminated strings, over any [`Read`] source or [`Write`] sink.
//! Typically layered on top of a reader from [`crate::io`].
//!
//! A source that ends mid-value fails with [`std::io::ErrorKind::UnexpectedEof`];
//! decoders never return a value built from a short read.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

pub fn read_u8<R: Read>(r: &mut R) -> io::Result<u8> {
    r.read_u8()
}

pub fn read_u16<R: Read>(r: &mut R) -> io::Result<u16> {
    r.read_u16::<LittleEndian>()
}

pub fn read_i16<R: Read>(r: &mut R) -> io::Result<i16> {
    r.read_i16::<LittleEndian>()
}

pub fn read_u32<R: Read>(r: &mut R) -> io::Result<u32> {
    r.read_u32::<LittleEndian>()
}

pub fn read_i32<R: Read>(r: &mut R) -> io::Result<i32> {
    r.read_i32::<LittleEndian>()
}

pub fn read_u64<R: Read>(r: &mut R) -> io::Result<u64> {
    r.read_u64::<LittleEndian>()
}

pub fn read_i64<R: Read>(r: &mut R) -> io::Result<i64> {
    r.read_i64::<LittleEndian>()
}

pub fn read_f32<R: Read>(r: &mut R) -> io::Result<f32> {
    r.read_f32::<LittleEndian>()
}

pub fn read_f64<R: Read>(r: &mut R) -> io::Result<f64> {
    r.read_f64::<LittleEndian>()
}

/// Read a null-terminated string.
///
/// Bytes are accumulated up to (and excluding) the first zero byte. A source
/// that ends before any terminator yields the bytes read so far rather than
/// an error; non-UTF-8 content is replaced lossily.
pub fn read_string<R: Read>(r: &mut R) -> io::Result<String> {
    let mut buf = Vec::new();
    loop {
        match r.read_u8() {
            Ok(0) => break,
            Ok(b) => buf.push(b),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e),
        }
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn write_u8<W: Write>(w: &mut W, v: u8) -> io::Result<()> {
    w.write_u8(v)
}

pub fn write_u16<W: Write>(w: &mut W, v: u16) -> io::Result<()> {
    w.write_u16::<LittleEndian>(v)
}

pub fn write_i16<W: Write>(w: &mut W, v: i16) -> io::Result<()> {
    w.write_i16::<LittleEndian>(v)
}

pub fn write_u32<W: Write>(w: &mut W, v: u32) -> io::Result<()> {
    w.write_u32::<LittleEndian>(v)
}

pub fn write_i32<W: Write>(w: &mut W, v: i32) -> io::Result<()> {
    w.write_i32::<LittleEndian>(v)
}

pub fn write_u64<W: Write>(w: &mut W, v: u64) -> io::Result<()> {
    w.write_u64::<LittleEndian>(v)
}

pub fn write_i64<W: Write>(w: &mut W, v: i64) -> io::Result<()> {
    w.write_i64::<LittleEndian>(v)
}

pub fn write_f32<W: Write>(w: &mut W, v: f32) -> io::Result<()> {
    w.write_f32::<LittleEndian>(v)
}

pub fn write_f64<W: Write>(w: &mut W, v: f64) -> io::Result<()> {
    w.write_f64::<LittleEndian>(v)
}

/// Write a string as its raw bytes followed by a single zero terminator.
pub fn write_string<W: Write>(w: &mut W, s: &str) -> io::Result<()> {
    w.write_all(s.as_bytes())?;
    w.write_u8(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn integer_round_trips() {
        let mut buf = Vec::new();
        write_u16(&mut buf, 0xBEEF).unwrap();
        write_i16(&mut buf, -2).unwrap();
        write_u32(&mut buf, 0xDEAD_BEEF).unwrap();
        write_i32(&mut buf, i32::MIN).unwrap();
        write_u64(&mut buf, u64::MAX).unwrap();
        write_i64(&mut buf, -6464).unwrap();

        let mut c = Cursor::new(buf);
        assert_eq!(read_u16(&mut c).unwrap(), 0xBEEF);
        assert_eq!(read_i16(&mut c).unwrap(), -2);
        assert_eq!(read_u32(&mut c).unwrap(), 0xDEAD_BEEF);
        assert_eq!(read_i32(&mut c).unwrap(), i32::MIN);
        assert_eq!(read_u64(&mut c).unwrap(), u64::MAX);
        assert_eq!(read_i64(&mut c).unwrap(), -6464);
    }

    #[test]
    fn float_round_trips() {
        let mut buf = Vec::new();
        write_f32(&mut buf, 3.25f32).unwrap();
        write_f64(&mut buf, -0.000123f64).unwrap();

        let mut c = Cursor::new(buf);
        assert_eq!(read_f32(&mut c).unwrap(), 3.25f32);
        assert_eq!(read_f64(&mut c).unwrap(), -0.000123f64);
    }

    #[test]
    fn values_are_little_endian() {
        let mut buf = Vec::new();
        write_u32(&mut buf, 1).unwrap();
        assert_eq!(buf, [1, 0, 0, 0]);
    }

    #[test]
    fn string_round_trip() {
        let mut buf = Vec::new();
        write_string(&mut buf, "hello,world!").unwrap();
        assert_eq!(buf.last(), Some(&0));

        let mut c = Cursor::new(buf);
        assert_eq!(read_string(&mut c).unwrap(), "hello,world!");
    }

    #[test]
    fn string_stops_at_terminator() {
        let mut c = Cursor::new(b"abc\x00def".to_vec());
        assert_eq!(read_string(&mut c).unwrap(), "abc");
        assert_eq!(c.position(), 4);
    }

    #[test]
    fn unterminated_string_reads_to_end() {
        let mut c = Cursor::new(b"no terminator".to_vec());
        assert_eq!(read_string(&mut c).unwrap(), "no terminator");
    }

    #[test]
    fn short_source_is_an_error() {
        let mut c = Cursor::new(vec![1u8, 2, 3]);
        let err = read_u32(&mut c).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
    }
}
