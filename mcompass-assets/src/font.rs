use std::path::Path;

use freetype::bitmap::PixelMode;
use freetype::face::LoadFlag;

use super::Error;

/// Glyph cell of the LED matrix digits.
pub const GLYPH_WIDTH: usize = 3;
pub const GLYPH_HEIGHT: usize = 5;
/// Pixel size the font is rendered at.
pub const DEFAULT_FONT_SIZE: u32 = 5;
pub const DEFAULT_FONT_PATH: &str = "assets/3x5_tiny_mono_pixel_font.ttf";
pub const DEFAULT_CHARS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// A 1 bit per pixel bitmap with the leftmost pixel in the MSB, as produced
/// by FreeType's monochrome renderer.
pub struct MonoBitmap<'a> {
    pub buffer: &'a [u8],
    pub pitch: usize,
    pub width: usize,
    pub rows: usize,
}

impl<'a> MonoBitmap<'a> {
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        let byte = self.buffer[y * self.pitch + x / 8];
        (byte >> (7 - (x & 7))) & 1 != 0
    }
}

/// Monochrome drawing surface. At most 8 pixels wide so that every row fits
/// into a `u8`.
#[derive(Clone, PartialEq, Debug)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Canvas {
        assert!(width <= 8);
        Canvas {
            width,
            height,
            pixels: vec![false; width * height],
        }
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.pixels[y * self.width + x]
    }

    /// Sets a pixel. Coordinates outside of the canvas are ignored.
    pub fn set(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        self.pixels[y as usize * self.width + x as usize] = true;
    }

    /// Draws the set pixels of `bitmap` with its top left corner at
    /// (`left`, `top`).
    pub fn draw(&mut self, bitmap: &MonoBitmap, left: i32, top: i32) {
        for y in 0..bitmap.rows {
            for x in 0..bitmap.width {
                if bitmap.pixel(x, y) {
                    self.set(left + x as i32, top + y as i32);
                }
            }
        }
    }

    /// Packs each row into an integer, leftmost pixel in the highest bit.
    pub fn rows(&self) -> Vec<u8> {
        let mut rows = vec![0u8; self.height];
        for (y, row) in rows.iter_mut().enumerate() {
            for x in 0..self.width {
                if self.get(x, y) {
                    *row |= 1 << (self.width - 1 - x);
                }
            }
        }
        rows
    }
}

/// Lookup table from characters to packed glyph rows.
#[derive(Clone, PartialEq, Debug)]
pub struct FontMod {
    pub width: usize,
    pub height: usize,
    pub glyphs: Vec<(char, Vec<u8>)>,
}

impl FontMod {
    pub fn new(width: usize, height: usize) -> FontMod {
        FontMod {
            width,
            height,
            glyphs: Vec::new(),
        }
    }

    /// Adds a glyph. Characters which are already present keep their first
    /// bitmap.
    pub fn insert(&mut self, c: char, rows: Vec<u8>) {
        assert_eq!(rows.len(), self.height);
        if self.get(c).is_none() {
            self.glyphs.push((c, rows));
        }
    }

    pub fn get(&self, c: char) -> Option<&[u8]> {
        self.glyphs
            .iter()
            .find(|(glyph, _)| *glyph == c)
            .map(|(_, rows)| rows.as_slice())
    }

    /// One `// c` comment and one initializer line per glyph.
    pub fn to_c_source(&self) -> String {
        let mut code = "".to_string();
        for (c, rows) in self.glyphs.iter() {
            code += &format!("// {}\n{}\n", c, self.generate_entry(rows));
        }
        code
    }

    /// The complete table as a C array definition.
    pub fn to_c_array(&self, name: &str) -> String {
        let mut code = format!("const uint8_t {}[][{}] = {{\n", name, self.height);
        for (c, rows) in self.glyphs.iter() {
            code += &format!("    // {}\n    {}\n", c, self.generate_entry(rows));
        }
        code += "};\n";
        code
    }

    fn generate_entry(&self, rows: &[u8]) -> String {
        let rows = rows
            .iter()
            .map(|row| format!("0b{:0width$b}", row, width = self.width))
            .collect::<Vec<_>>();
        format!("{{{}}},", rows.join(", "))
    }
}

pub struct Font {
    face: freetype::Face,
}

impl Font {
    pub fn load(path: &Path) -> Result<Font, Error> {
        use freetype::Library;
        let lib = Library::init()?;
        let face = lib.new_face(path, 0)?;
        log::debug!("loaded font {}", path.display());
        Ok(Font { face })
    }

    /// Renders `c` onto an empty glyph cell with the pen at the top left
    /// corner, like a text call at (0, 0) would.
    pub fn render_char(&mut self, c: char, font_size: u32) -> Result<Canvas, Error> {
        self.face.set_pixel_sizes(0, font_size)?;
        self.face
            .load_char(c as usize, LoadFlag::RENDER | LoadFlag::TARGET_MONO)?;
        let ascender = self
            .face
            .size_metrics()
            .map_or(0, |size| (size.ascender + 63) >> 6) as i32;

        let glyph = self.face.glyph();
        let bitmap = glyph.bitmap();
        // Blank glyphs such as the space come without a pixel mode.
        if bitmap.rows() > 0 && bitmap.pixel_mode()? != PixelMode::Mono {
            return Err(Error::UnsupportedFormat);
        }
        let mono = MonoBitmap {
            buffer: bitmap.buffer(),
            pitch: bitmap.pitch().unsigned_abs() as usize,
            width: bitmap.width() as usize,
            rows: bitmap.rows() as usize,
        };

        let mut canvas = Canvas::new(GLYPH_WIDTH, GLYPH_HEIGHT);
        // The baseline sits `ascender` pixels below the pen.
        canvas.draw(&mono, glyph.bitmap_left(), ascender - glyph.bitmap_top());
        log::trace!(
            "{:?}: {}x{} at ({}, {})",
            c,
            mono.width,
            mono.rows,
            glyph.bitmap_left(),
            ascender - glyph.bitmap_top()
        );
        Ok(canvas)
    }

    pub fn char_to_bitmap(&mut self, c: char, font_size: u32) -> Result<Vec<u8>, Error> {
        Ok(self.render_char(c, font_size)?.rows())
    }

    pub fn generate_font_mod(&mut self, chars: &str, font_size: u32) -> Result<FontMod, Error> {
        let mut font_mod = FontMod::new(GLYPH_WIDTH, GLYPH_HEIGHT);
        for c in chars.chars() {
            let rows = self.char_to_bitmap(c, font_size)?;
            font_mod.insert(c, rows);
        }
        Ok(font_mod)
    }
}
