use std::fmt;
use std::io::{self, Write};

use prettysgr::opt::Options;
use prettysgr::{BasicColor, Channel, Color, Mode, ModeAction, RgbColor, State, Writer};

// ----------------------------------------------------------------------------------------------------------
// A log record renderer that styles every part of a record.

enum Value<'a> {
    Str(&'a str),
    Int(i64),
    Bool(bool),
    Object(Vec<Field<'a>>),
}

struct Field<'a> {
    key: &'a str,
    value: Value<'a>,
}

struct Record<'a> {
    ts: &'a str,
    level: i8,
    logger: Option<&'a str>,
    message: &'a str,
    fields: Vec<Field<'a>>,
}

fn level_settings(level: i8) -> (Color, &'static str) {
    match level {
        -4 => (BasicColor::Magenta.into(), "DBG"),
        0 => (BasicColor::Cyan.into(), "INF"),
        4 => (BasicColor::BrightYellow.into(), "WRN"),
        8 => (BasicColor::BrightRed.into(), "ERR"),
        _ => (Color::Unset, "???"),
    }
}

fn render<W: Write>(record: &Record<'_>, w: &mut Writer<W>) -> io::Result<()> {
    timestamp(record.ts, w)?;
    w.write_all(b" ")?;
    level_decorated(record.level, w)?;
    w.write_all(b" ")?;
    logger(record.logger, w)?;
    w.write_all(b" ")?;
    message(record.message, w)?;
    w.write_all(b" ")?;
    fields(&record.fields, w)?;
    w.write_all(b"\n")
}

fn timestamp<W: Write>(ts: &str, w: &mut Writer<W>) -> io::Result<()> {
    let mut w = w.scoped_foreground_color(BasicColor::BrightBlack);
    w.write_all(ts.as_bytes())
}

fn level_decorated<W: Write>(level: i8, w: &mut Writer<W>) -> io::Result<()> {
    let mut w = w.scoped_foreground_color(Color::Default);
    w.write_all(b"|")?;
    let (color, name) = level_settings(level);
    {
        let mut w = w.scoped_foreground_color(color);
        w.write_all(name.as_bytes())?;
    }
    w.write_all(b"|")
}

fn logger<W: Write>(logger: Option<&str>, w: &mut Writer<W>) -> io::Result<()> {
    let Some(logger) = logger else {
        return Ok(());
    };

    let mut w = w.scoped_foreground_color(BasicColor::BrightBlack);
    w.write_all(logger.as_bytes())?;
    punctuation(":", &mut *w)
}

fn message<W: Write>(message: &str, w: &mut Writer<W>) -> io::Result<()> {
    let mut w = w.scoped_foreground_color(BasicColor::BrightWhite);
    w.write_all(message.as_bytes())
}

fn fields<W: Write>(fields: &[Field<'_>], w: &mut Writer<W>) -> io::Result<()> {
    for (index, field) in fields.iter().enumerate() {
        if index != 0 {
            w.write_all(b" ")?;
        }

        let mut w = w.scoped_background_color(RgbColor::new(10, 10, 30));
        key(field.key, &mut *w)?;
        punctuation(":", &mut *w)?;
        value(&field.value, &mut *w)?;
    }

    Ok(())
}

fn key<W: Write>(key: &str, w: &mut Writer<W>) -> io::Result<()> {
    let mut w = w.scoped_foreground_color(BasicColor::BrightGreen);
    let mut w = w.scoped_modes(Mode::Underlined.into(), ModeAction::Add);
    w.write_all(key.as_bytes())
}

fn value<W: Write>(value: &Value<'_>, w: &mut Writer<W>) -> io::Result<()> {
    match value {
        Value::Object(nested) => {
            punctuation("{ ", w)?;
            fields(nested, w)?;
            punctuation(" }", w)
        }
        Value::Int(number) => value_with_color(number, BasicColor::BrightBlue, w),
        Value::Bool(boolean) => value_with_color(boolean, BasicColor::BrightRed, w),
        Value::Str(text) => value_with_color(text, BasicColor::BrightCyan, w),
    }
}

fn value_with_color<W: Write>(
    value: &dyn fmt::Display,
    color: BasicColor,
    w: &mut Writer<W>,
) -> io::Result<()> {
    let mut w = w.scoped_foreground_color(color);
    write!(w, "{}", value)
}

fn punctuation<W: Write>(text: &str, w: &mut Writer<W>) -> io::Result<()> {
    let mut w = w.scoped_foreground_color(BasicColor::BrightBlack);
    w.write_all(text.as_bytes())
}

fn sample_record() -> Record<'static> {
    Record {
        ts: "2023-06-01T12:00:00Z",
        level: 0,
        logger: Some("tst"),
        message: "hello",
        fields: vec![
            Field {
                key: "f1",
                value: Value::Str("v1"),
            },
            Field {
                key: "f2",
                value: Value::Int(10),
            },
            Field {
                key: "f3",
                value: Value::Bool(true),
            },
            Field {
                key: "f4",
                value: Value::Object(vec![
                    Field {
                        key: "f5",
                        value: Value::Str("v5"),
                    },
                    Field {
                        key: "f6",
                        value: Value::Int(20),
                    },
                    Field {
                        key: "f7",
                        value: Value::Bool(false),
                    },
                ]),
            },
        ],
    }
}

#[test]
fn test_record() -> io::Result<()> {
    let mut writer = Writer::new(Vec::new());
    render(&sample_record(), &mut writer)?;

    for channel in [
        Channel::Background,
        Channel::Foreground,
        Channel::Underline,
        Channel::Modes,
    ] {
        assert_eq!(writer.depth(channel), 0);
    }
    assert_eq!(writer.committed(), &State::DEFAULT);

    let output = String::from_utf8(writer.into_inner()).unwrap();
    assert_eq!(
        output,
        concat!(
            "\x1b[90m2023-06-01T12:00:00Z\x1b[0m |\x1b[36mINF\x1b[0m| \x1b[90mtst:\x1b[0m ",
            "\x1b[97mhello\x1b[0m ",
            "\x1b[48;2;10;10;30;92;4mf1\x1b[90;24m:\x1b[96mv1\x1b[0m ",
            "\x1b[48;2;10;10;30;92;4mf2\x1b[90;24m:\x1b[94m10\x1b[0m ",
            "\x1b[48;2;10;10;30;92;4mf3\x1b[90;24m:\x1b[91mtrue\x1b[0m ",
            "\x1b[48;2;10;10;30;92;4mf4\x1b[90;24m:{ ",
            "\x1b[92;4mf5\x1b[90;24m:\x1b[96mv5\x1b[39m ",
            "\x1b[92;4mf6\x1b[90;24m:\x1b[94m20\x1b[39m ",
            "\x1b[92;4mf7\x1b[90;24m:\x1b[91mfalse\x1b[90m }\x1b[0m\n",
        )
    );
    Ok(())
}

#[test]
fn test_record_with_unknown_level() -> io::Result<()> {
    let record = Record {
        ts: "ts",
        level: 1,
        logger: None,
        message: "m",
        fields: vec![],
    };

    let mut writer = Writer::new(Vec::new());
    render(&record, &mut writer)?;
    assert_eq!(
        writer.get_ref(),
        b"\x1b[90mts\x1b[0m |???|  \x1b[97mm\x1b[0m \n"
    );
    Ok(())
}

#[test]
fn test_reset() -> io::Result<()> {
    let mut writer = Writer::new(Vec::new());
    writer.set_foreground_color(BasicColor::Blue);
    writer.set_modes(Mode::Italic.into(), ModeAction::Add);
    writer.push_underline_color(BasicColor::Red);
    assert_eq!(writer.write(b"a")?, 1);

    writer.pop_underline_color();
    writer.reset();
    writer.flush()?;
    assert_eq!(writer.get_ref(), b"\x1b[34;58;5;1;3ma\x1b[0m");
    Ok(())
}

// ----------------------------------------------------------------------------------------------------------
// Sinks that misbehave.

/// A sink that fails while its flag is set.
#[derive(Default)]
struct Flaky {
    failing: bool,
    data: Vec<u8>,
}

impl Write for Flaky {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.failing {
            return Err(io::Error::other("test writer error"));
        }
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.failing {
            return Err(io::Error::other("test writer error"));
        }
        Ok(())
    }
}

/// A sink that accepts one byte per write.
#[derive(Default)]
struct Trickle(Vec<u8>);

impl Write for Trickle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match buf.first() {
            Some(byte) => {
                self.0.push(*byte);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_error() {
    let mut writer = Writer::with_options(
        Flaky {
            failing: true,
            data: Vec::new(),
        },
        &Options::with_log(),
    );
    writer.set_foreground_color(BasicColor::Blue);

    let err = writer.write(b"a").unwrap_err();
    assert_eq!(err.to_string(), "test writer error");
    assert_eq!(writer.committed(), &State::DEFAULT);

    let err = writer.flush().unwrap_err();
    assert_eq!(err.to_string(), "test writer error");
    let err = writer.sync().unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::Other);
    assert!(writer.get_ref().data.is_empty());
}

#[test]
fn test_retry_after_error() -> io::Result<()> {
    let mut writer = Writer::new(Flaky::default());
    writer.set_foreground_color(BasicColor::Blue);
    writer.write_all(b"a")?;

    writer.set_modes(Mode::Bold | Mode::Underlined, ModeAction::Add);
    writer.get_mut().failing = true;
    assert!(write!(writer, "b").is_err());
    assert_eq!(writer.committed().modes, prettysgr::ModeSet::EMPTY);

    writer.get_mut().failing = false;
    write!(writer, "b")?;
    assert_eq!(writer.committed().modes, Mode::Bold | Mode::Underlined);
    assert_eq!(writer.get_ref().data, b"\x1b[34ma\x1b[1;4mb");
    Ok(())
}

#[test]
fn test_trickle() -> io::Result<()> {
    let mut writer = Writer::new(Trickle::default());
    writer.set_background_color(RgbColor::new(255, 128, 0));
    writer.set_modes(Mode::Framed.into(), ModeAction::Replace);
    write!(writer, "boxed")?;
    writer.reset();
    writer.flush()?;
    assert_eq!(
        writer.into_inner().0,
        b"\x1b[48;2;255;128;0;51mboxed\x1b[0m"
    );
    Ok(())
}
