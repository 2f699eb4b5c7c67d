//! Test fixtures: a tiny generated TrueType font
//!
//! The font has 1024 units per em, ascender 768, descender -256, and maps
//! printable ASCII to outline-less glyphs that all advance 512 units. At a
//! power-of-two pixel size every metric is exact: at 32px each character is
//! 16px wide and a line is 32px tall.

const UNITS_PER_EM: u16 = 1024;
const ASCENDER: i16 = 768;
const DESCENDER: i16 = -256;
const ADVANCE: u16 = 512;
const FIRST_CHAR: u32 = 0x20;
const LAST_CHAR: u32 = 0x7e;

/// Bytes of the fixture font
pub fn tiny_font() -> Vec<u8> {
    // .notdef plus one glyph per mapped character
    let glyph_count = (LAST_CHAR - FIRST_CHAR + 2) as u16;

    let mut head = Vec::new();
    put_u32(&mut head, 0x0001_0000); // version
    put_u32(&mut head, 0x0001_0000); // font revision
    put_u32(&mut head, 0); // checksum adjustment
    put_u32(&mut head, 0x5f0f_3cf5); // magic
    put_u16(&mut head, 0); // flags
    put_u16(&mut head, UNITS_PER_EM);
    head.extend_from_slice(&[0; 16]); // created, modified
    for bound in [0i16, DESCENDER, ADVANCE as i16, ASCENDER] {
        put_i16(&mut head, bound);
    }
    put_u16(&mut head, 0); // mac style
    put_u16(&mut head, 8); // lowest readable size
    put_i16(&mut head, 2); // direction hint
    put_i16(&mut head, 0); // short loca offsets
    put_i16(&mut head, 0); // glyph data format

    let mut hhea = Vec::new();
    put_u32(&mut hhea, 0x0001_0000);
    put_i16(&mut hhea, ASCENDER);
    put_i16(&mut hhea, DESCENDER);
    put_i16(&mut hhea, 0); // line gap
    put_u16(&mut hhea, ADVANCE); // advance width max
    hhea.extend_from_slice(&[0; 22]); // bearings, extents, caret, reserved, metric format
    put_u16(&mut hhea, glyph_count); // number of h-metrics

    let mut maxp = Vec::new();
    put_u32(&mut maxp, 0x0000_5000);
    put_u16(&mut maxp, glyph_count);

    let mut hmtx = Vec::new();
    for _ in 0..glyph_count {
        put_u16(&mut hmtx, ADVANCE);
        put_i16(&mut hmtx, 0);
    }

    // one Unicode subtable in format 12: a single sequential group
    let mut cmap = Vec::new();
    put_u16(&mut cmap, 0); // version
    put_u16(&mut cmap, 1); // subtable count
    put_u16(&mut cmap, 0); // platform: Unicode
    put_u16(&mut cmap, 4); // encoding: full repertoire
    put_u32(&mut cmap, 12); // subtable offset
    put_u16(&mut cmap, 12); // format
    put_u16(&mut cmap, 0);
    put_u32(&mut cmap, 28); // subtable length
    put_u32(&mut cmap, 0); // language
    put_u32(&mut cmap, 1); // group count
    put_u32(&mut cmap, FIRST_CHAR);
    put_u32(&mut cmap, LAST_CHAR);
    put_u32(&mut cmap, 1); // first glyph id

    let tables: [(&[u8; 4], Vec<u8>); 5] = [
        (b"cmap", cmap),
        (b"head", head),
        (b"hhea", hhea),
        (b"hmtx", hmtx),
        (b"maxp", maxp),
    ];

    let mut font = Vec::new();
    put_u32(&mut font, 0x0001_0000); // sfnt version
    put_u16(&mut font, tables.len() as u16);
    put_u16(&mut font, 64); // search range
    put_u16(&mut font, 2); // entry selector
    put_u16(&mut font, 16); // range shift

    let mut offset = 12 + 16 * tables.len();
    for (tag, data) in &tables {
        font.extend_from_slice(*tag);
        put_u32(&mut font, 0); // checksum
        put_u32(&mut font, offset as u32);
        put_u32(&mut font, data.len() as u32);
        offset += padded(data.len());
    }
    for (_, data) in &tables {
        font.extend_from_slice(data);
        font.resize(font.len() + padded(data.len()) - data.len(), 0);
    }
    font
}

fn padded(len: usize) -> usize {
    (len + 3) & !3
}

fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn put_i16(out: &mut Vec<u8>, value: i16) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_be_bytes());
}
