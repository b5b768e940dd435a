//! Drawing exporters.

mod dxf;
mod svg;

pub use dxf::{layer_color, render_dxf, DxfWriter};
pub use svg::{layer_stroke, render_svg, SvgWriter};

use crate::error::BoxError;
use crate::model::Drawing;
use std::fmt;
use std::str::FromStr;

/// Export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Dxf,
    Svg,
}

impl OutputFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Dxf => "dxf",
            OutputFormat::Svg => "svg",
        }
    }

    /// Render `drawing` in this format.
    pub fn render(&self, drawing: &Drawing) -> String {
        match self {
            OutputFormat::Dxf => render_dxf(drawing),
            OutputFormat::Svg => render_svg(drawing),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = BoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dxf" => Ok(OutputFormat::Dxf),
            "svg" => Ok(OutputFormat::Svg),
            _ => Err(BoxError::parameter(
                "format",
                format!("unknown output format '{}', expected 'dxf' or 'svg'", s),
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("DXF".parse::<OutputFormat>().unwrap(), OutputFormat::Dxf);
        assert_eq!(" svg ".parse::<OutputFormat>().unwrap(), OutputFormat::Svg);
        assert!("pdf".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default().to_string(), "dxf");
    }
}
