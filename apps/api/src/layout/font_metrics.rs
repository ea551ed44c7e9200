//! Static font-metric tables for the built-in PDF Helvetica family.
//!
//! Widths are the Adobe core-font AFM advance widths in glyph units
//! (1/1000 em), so measurements match what a viewer draws for the
//! standard-14 fonts without embedding anything.
//! Characters are measured by their WinAnsi code, the same code the PDF
//! writer emits: 0x20..=0x7E from the ASCII tables, 0x80..=0xFF from the
//! high-half tables. Characters without a WinAnsi code print as `?` and are
//! measured as `?`.

// ────────────────────────────────────────────────────────────────────────────
// Font enum
// ────────────────────────────────────────────────────────────────────────────

/// The three standard-14 faces the proposal document uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinFont {
    /// Body text.
    Helvetica,
    /// Title and section labels.
    HelveticaBold,
    /// Timestamp line.
    HelveticaOblique,
}

impl BuiltinFont {
    pub const ALL: [BuiltinFont; 3] = [
        BuiltinFont::Helvetica,
        BuiltinFont::HelveticaBold,
        BuiltinFont::HelveticaOblique,
    ];

    /// PostScript name written as the font's `/BaseFont`.
    pub fn base_font(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::HelveticaBold => "Helvetica-Bold",
            BuiltinFont::HelveticaOblique => "Helvetica-Oblique",
        }
    }

    /// Name of the font in each page's resource dictionary.
    pub fn resource_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "F1",
            BuiltinFont::HelveticaBold => "F2",
            BuiltinFont::HelveticaOblique => "F3",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// WinAnsi encoding
// ────────────────────────────────────────────────────────────────────────────

/// Substitute for characters the core fonts cannot show.
pub const REPLACEMENT_CODE: u8 = b'?';

/// WinAnsi code of `c`, or `None` when the encoding has no slot for it.
/// Tabs print as a space.
pub fn win_ansi_code(c: char) -> Option<u8> {
    let code = match c {
        ' '..='~' => c as u8,
        '\t' => b' ',
        '\u{A0}'..='\u{FF}' => c as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => return None,
    };
    Some(code)
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for one font.
///
/// `ascii` slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
/// `high` is indexed by `code - 0x80`; the five undefined WinAnsi slots are 0.
pub struct FontMetricTable {
    ascii: [u16; 95],
    high: [u16; 128],
}

impl FontMetricTable {
    fn code_units(&self, code: u8) -> u16 {
        match code {
            0x20..=0x7E => self.ascii[(code - 0x20) as usize],
            0x80..=0xFF => self.high[(code - 0x80) as usize],
            _ => self.ascii[(REPLACEMENT_CODE - 0x20) as usize],
        }
    }

    fn char_units(&self, c: char) -> u16 {
        self.code_units(win_ansi_code(c).unwrap_or(REPLACEMENT_CODE))
    }

    /// Width of a string in glyph units (1/1000 em).
    pub fn measure_units(&self, s: &str) -> u32 {
        s.chars().map(|c| self.char_units(c) as u32).sum()
    }

    /// Rendered width of a string in points at `size_pt`.
    pub fn measure_str(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_units(s) as f32 * size_pt / 1000.0
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (ASCII printable + WinAnsi high half)
// ────────────────────────────────────────────────────────────────────────────

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0    1    2    3    4    5    6    7    8    9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :    ;    <    =    >    ?    @
    278, 278, 584, 584, 584, 556, 1015,
    // A    B    C    D    E    F    G    H    I    J    K    L    M
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [    \    ]    ^    _    `
    278, 278, 278, 469, 556, 333,
    // a    b    c    d    e    f    g    h    i    j    k    l    m
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    // n    o    p    q    r    s    t    u    v    w    x    y    z
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // {    |    }    ~
    334, 260, 334, 584,
];

// WinAnsi 0x80..=0xFF, one row per 16 codes.
#[rustfmt::skip]
const HELVETICA_HIGH_WIDTHS: [u16; 128] = [
    // €    -    ‚    ƒ    „    …    †    ‡    ˆ    ‰    Š    ‹    Œ    -    Ž    -
    556,   0, 222, 556, 333,1000, 556, 556, 333,1000, 667, 333,1000,   0, 611,   0,
    // -    ‘    ’    “    ”    •    –    —    ˜    ™    š    ›    œ    -    ž    Ÿ
      0, 222, 222, 333, 333, 350, 556,1000, 333,1000, 500, 333, 944,   0, 500, 667,
    // nbsp ¡    ¢    £    ¤    ¥    ¦    §    ¨    ©    ª    «    ¬    shy  ®    ¯
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    // °    ±    ²    ³    ´    µ    ¶    ·    ¸    ¹    º    »    ¼    ½    ¾    ¿
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    // À    Á    Â    Ã    Ä    Å    Æ    Ç    È    É    Ê    Ë    Ì    Í    Î    Ï
    667, 667, 667, 667, 667, 667,1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    // Ð    Ñ    Ò    Ó    Ô    Õ    Ö    ×    Ø    Ù    Ú    Û    Ü    Ý    Þ    ß
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    // à    á    â    ã    ä    å    æ    ç    è    é    ê    ë    ì    í    î    ï
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    // ð    ñ    ò    ó    ô    õ    ö    ÷    ø    ù    ú    û    ü    ý    þ    ÿ
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    ascii: HELVETICA_WIDTHS,
    high: HELVETICA_HIGH_WIDTHS,
};

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0    1    2    3    4    5    6    7    8    9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :    ;    <    =    >    ?    @
    333, 333, 584, 584, 584, 611, 975,
    // A    B    C    D    E    F    G    H    I    J    K    L    M
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [    \    ]    ^    _    `
    333, 278, 333, 584, 556, 333,
    // a    b    c    d    e    f    g    h    i    j    k    l    m
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    // n    o    p    q    r    s    t    u    v    w    x    y    z
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    // {    |    }    ~
    389, 280, 389, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_HIGH_WIDTHS: [u16; 128] = [
    // €    -    ‚    ƒ    „    …    †    ‡    ˆ    ‰    Š    ‹    Œ    -    Ž    -
    556,   0, 278, 556, 500,1000, 556, 556, 333,1000, 667, 333,1000,   0, 611,   0,
    // -    ‘    ’    “    ”    •    –    —    ˜    ™    š    ›    œ    -    ž    Ÿ
      0, 278, 278, 500, 500, 350, 556,1000, 333,1000, 556, 333, 944,   0, 500, 667,
    // nbsp ¡    ¢    £    ¤    ¥    ¦    §    ¨    ©    ª    «    ¬    shy  ®    ¯
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    // °    ±    ²    ³    ´    µ    ¶    ·    ¸    ¹    º    »    ¼    ½    ¾    ¿
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    // À    Á    Â    Ã    Ä    Å    Æ    Ç    È    É    Ê    Ë    Ì    Í    Î    Ï
    722, 722, 722, 722, 722, 722,1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    // Ð    Ñ    Ò    Ó    Ô    Õ    Ö    ×    Ø    Ù    Ú    Û    Ü    Ý    Þ    ß
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    // à    á    â    ã    ä    å    æ    ç    è    é    ê    ë    ì    í    î    ï
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
    // ð    ñ    ò    ó    ô    õ    ö    ÷    ø    ù    ú    û    ü    ý    þ    ÿ
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
];

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    ascii: HELVETICA_BOLD_WIDTHS,
    high: HELVETICA_BOLD_HIGH_WIDTHS,
};

/// Oblique shares Helvetica's advance widths.
static HELVETICA_OBLIQUE_TABLE: FontMetricTable = FontMetricTable {
    ascii: HELVETICA_WIDTHS,
    high: HELVETICA_HIGH_WIDTHS,
};

/// Returns the static metric table for a given font.
pub fn get_metrics(font: BuiltinFont) -> &'static FontMetricTable {
    match font {
        BuiltinFont::Helvetica => &HELVETICA_TABLE,
        BuiltinFont::HelveticaBold => &HELVETICA_BOLD_TABLE,
        BuiltinFont::HelveticaOblique => &HELVETICA_OBLIQUE_TABLE,
    }
}
