//! Style roles for CLI output, mapping logical names to `colored::Color`.
//!
//! Colouring is applied only when the `enabled` flag passed to `paint()` is
//! true, so nothing here depends on global state.
//!
//! ```
//! use vips_version::core::styles::StyleRole;
//! assert_eq!(StyleRole::Valid.paint("compatible", false), "compatible");
//! assert!(StyleRole::Valid.paint("compatible", true).starts_with("\x1b["));
//! ```

use clap::builder::styling::AnsiColor;
use colored::Color;

macro_rules! style {
    ( $( $variant:ident => $color:expr ),+ $(,)? ) => {
        #[derive(Copy, Clone, Debug)]
        pub enum StyleRole { $( $variant ),+ }

        impl StyleRole {
            pub fn color(self) -> Color {
                match self { $( StyleRole::$variant => $color ),+ }
            }

            /// SGR parameters for the role's foreground colour, e.g. "33"
            pub fn ansi_code(self) -> String {
                self.color().to_fg_str().into_owned()
            }

            pub fn paint(self, text: &str, enabled: bool) -> String {
                if !enabled {
                    return text.to_string();
                }
                format!("\x1b[{}m{}\x1b[0m", self.ansi_code(), text)
            }
        }
    };
}

style! {
    Header      => Color::Yellow,
    Literal     => Color::Cyan,
    Placeholder => Color::Green,
    Valid       => Color::Green,
    Invalid     => Color::Red,
    Error       => Color::BrightRed,
    Key         => Color::BrightGreen,
}

fn color_to_ansi(c: Color) -> Option<AnsiColor> {
    use self::AnsiColor as A;
    use Color::*;
    Some(match c {
        Red => A::Red,
        Green => A::Green,
        Yellow => A::Yellow,
        Cyan => A::Cyan,
        BrightRed => A::BrightRed,
        BrightGreen => A::BrightGreen,
        _ => return None,
    })
}

/// clap help styles built from the same roles
pub fn palette_to_clap(enabled: bool) -> clap::builder::Styles {
    use clap::builder::styling::{Color as ClapColor, Style};
    if !enabled {
        return clap::builder::Styles::plain();
    }

    let style = |role: StyleRole, bold: bool| {
        let mut s = Style::new();
        if let Some(col) = color_to_ansi(role.color()) {
            s = s.fg_color(Some(ClapColor::Ansi(col)));
        }
        if bold {
            s = s.bold();
        }
        s
    };

    clap::builder::Styles::styled()
        .header(style(StyleRole::Header, true))
        .literal(style(StyleRole::Literal, false))
        .placeholder(style(StyleRole::Placeholder, false))
        .valid(style(StyleRole::Valid, false))
        .invalid(style(StyleRole::Invalid, false))
        .error(style(StyleRole::Error, false))
}
