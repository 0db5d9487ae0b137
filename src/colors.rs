use ansi_term::{Colour, Style};

lazy_static! {
    pub static ref RED: Style = paint_style(Colour::Fixed(9).bold());
    pub static ref BLUE: Style = paint_style(Colour::Fixed(12).bold());
    pub static ref CYAN: Style = paint_style(Colour::Fixed(14).bold());
    pub static ref WHITE: Style = paint_style(Colour::Fixed(15).bold());
}

fn paint_style(style: Style) -> Style {
    if cfg!(feature = "color") {
        style
    } else {
        Style::new()
    }
}
