use std::fmt::{Error, Formatter};

use crate::colors::{BLUE, RED, WHITE};

pub fn fmt_simple_error(f: &mut Formatter, message: &str, filename: &str) -> Result<(), Error> {
    writeln!(
        f,
        "{}: {}\n   {}: {}",
        RED.paint("error"),
        WHITE.paint(message),
        BLUE.paint("in"),
        filename,
    )
}
