//! Serialization of a compiled set into a C/C++ header or a JSON manifest.

use std::fmt::{self, Write as _};

use serde::Serialize;

use crate::{NinePatchError, NinePatchSet, Result, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Header,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Header => "h",
            OutputFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// Runtime header declaring `NinePatchImage` and `NinePatchSet`.
    pub include: String,
    /// Hex values per array line. Purely cosmetic.
    pub values_per_line: usize,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self { include: "NinePatch.h".to_string(), values_per_line: 16 }
    }
}

/// Base name of a region's constants, e.g. `NP_button_TOP_LEFT`.
pub fn region_symbol(prefix: &str, role: Role) -> String {
    format!("NP_{prefix}{}", role.suffix())
}

/// Render the header: width/height constants and a pixel array per region, followed by a
/// `makeNinePatch_<prefix>()` constructor. Every region is declared, empty ones included.
pub fn emit_header(set: &NinePatchSet, options: &EmitOptions) -> String {
    let mut out = String::new();
    write_header(&mut out, set, options).expect("writing to String");
    out
}

fn write_header(out: &mut String, set: &NinePatchSet, options: &EmitOptions) -> fmt::Result {
    let per_line = options.values_per_line.max(1);

    writeln!(out, "#pragma once")?;
    writeln!(out, "#include \"{}\"", options.include)?;
    writeln!(out)?;
    writeln!(out, "// Nine-patch data generated by ninepatch")?;
    writeln!(out, "// prefix: {}", set.prefix)?;
    writeln!(out)?;

    for (role, region) in set.iter() {
        let base = region_symbol(&set.prefix, role);
        writeln!(out, "static const int {base}_W = {};", region.width)?;
        writeln!(out, "static const int {base}_H = {};", region.height)?;
        writeln!(out, "static const uint16_t {base}_PIXELS[{}] = {{", region.pixels.len())?;
        let lines: Vec<String> = region
            .pixels
            .chunks(per_line)
            .map(|chunk| {
                let values: Vec<String> = chunk.iter().map(|v| format!("0x{v:04X}")).collect();
                format!("  {}", values.join(", "))
            })
            .collect();
        writeln!(out, "{}", lines.join(",\n"))?;
        writeln!(out, "}};")?;
        writeln!(out)?;
    }

    writeln!(out, "static inline NinePatchSet makeNinePatch_{}() {{", set.prefix)?;
    writeln!(out, "  NinePatchSet s;")?;
    for role in Role::ALL {
        let base = region_symbol(&set.prefix, role);
        writeln!(
            out,
            "  s.{:<2} = NinePatchImage{{ {base}_PIXELS, {base}_W, {base}_H }};",
            role.member()
        )?;
    }
    writeln!(out, "  return s;")?;
    writeln!(out, "}}")
}

#[derive(Serialize)]
struct Manifest<'a> {
    prefix: &'a str,
    regions: &'a NinePatchSet,
}

/// JSON rendition of the same data, for tooling that does not parse C.
pub fn emit_json(set: &NinePatchSet) -> Result<String> {
    serde_json::to_string_pretty(&Manifest { prefix: &set.prefix, regions: set })
        .map_err(|e| NinePatchError::Serialize(e.to_string()))
}

pub fn emit(set: &NinePatchSet, format: OutputFormat, options: &EmitOptions) -> Result<String> {
    match format {
        OutputFormat::Header => Ok(emit_header(set, options)),
        OutputFormat::Json => emit_json(set),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EncodedRegion;

    fn region(width: u32, height: u32, fill: u16) -> EncodedRegion {
        EncodedRegion { width, height, pixels: vec![fill; (width * height) as usize] }
    }

    fn sample_set() -> NinePatchSet {
        NinePatchSet {
            prefix: "btn".to_string(),
            top_left: region(3, 3, 0x1082),
            top: region(1, 3, 0xFFDF),
            top_right: region(3, 3, 0x1082),
            left: region(3, 1, 0xF79D),
            center: region(0, 3, 0),
            right: region(3, 1, 0xF79D),
            bottom_left: region(3, 3, 0xE71C),
            bottom: region(1, 3, 0xEF7D),
            bottom_right: region(3, 3, 0x1082),
        }
    }

    #[test]
    fn header_declares_every_region() {
        let text = emit_header(&sample_set(), &EmitOptions::default());
        assert!(text.starts_with("#pragma once\n#include \"NinePatch.h\"\n"));
        for role in Role::ALL {
            let base = region_symbol("btn", role);
            assert!(text.contains(&format!("static const int {base}_W = ")), "{base}");
            assert!(text.contains(&format!("{base}_PIXELS[")), "{base}");
        }
        assert!(text.contains("static const uint16_t NP_btn_CENTER_PIXELS[0] = {\n\n};"));
        assert!(text.contains("static inline NinePatchSet makeNinePatch_btn() {"));
        assert!(text.contains(
            "  s.tl = NinePatchImage{ NP_btn_TOP_LEFT_PIXELS, NP_btn_TOP_LEFT_W, NP_btn_TOP_LEFT_H };"
        ));
        assert!(text.contains("  s.br = NinePatchImage{ NP_btn_BOTTOM_RIGHT_PIXELS,"));
    }

    #[test]
    fn array_values_are_uppercase_hex_in_order() {
        let mut set = sample_set();
        set.top = EncodedRegion { width: 1, height: 3, pixels: vec![0x1082, 0xffdf, 0xf7be] };
        let text = emit_header(&set, &EmitOptions::default());
        assert!(text.contains(
            "static const uint16_t NP_btn_TOP_PIXELS[3] = {\n  0x1082, 0xFFDF, 0xF7BE\n};"
        ));
    }

    #[test]
    fn long_arrays_wrap_at_values_per_line() {
        let mut set = sample_set();
        set.center = region(5, 1, 0xABCD);
        let options = EmitOptions { values_per_line: 2, ..EmitOptions::default() };
        let text = emit_header(&set, &options);
        assert!(text.contains(
            "NP_btn_CENTER_PIXELS[5] = {\n  0xABCD, 0xABCD,\n  0xABCD, 0xABCD,\n  0xABCD\n};"
        ));
    }

    #[test]
    fn json_manifest_lists_regions() {
        let json = emit_json(&sample_set()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["prefix"], "btn");
        assert_eq!(value["regions"]["top"]["height"], 3);
        assert_eq!(value["regions"]["center"]["pixels"].as_array().unwrap().len(), 0);
        assert_eq!(value["regions"]["top_left"]["pixels"][0], 0x1082);
    }
}
