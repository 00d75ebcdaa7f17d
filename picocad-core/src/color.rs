/// One entry of the fixed 16-color PICO-8 palette picoCAD draws with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub name: &'static str,
    pub hex: &'static str,
    pub rgb: (u8, u8, u8),
}

impl Color {
    const fn new(name: &'static str, hex: &'static str, rgb: (u8, u8, u8)) -> Self {
        Self { name, hex, rgb }
    }

    /// Look up a palette index.
    pub fn from_index(index: u8) -> Option<&'static Color> {
        PALETTE.get(usize::from(index))
    }
}

pub const PALETTE: [Color; 16] = [
    Color::new("black", "#000000", (0, 0, 0)),
    Color::new("dark blue", "#1D2B53", (29, 43, 83)),
    Color::new("dark purple", "#7E2553", (126, 37, 83)),
    Color::new("dark green", "#008751", (0, 135, 81)),
    Color::new("brown", "#AB5236", (171, 82, 54)),
    Color::new("dark grey", "#5F574F", (95, 87, 79)),
    Color::new("light grey", "#C2C3C7", (194, 195, 199)),
    Color::new("white", "#FFF1E8", (255, 241, 232)),
    Color::new("red", "#FF004D", (255, 0, 77)),
    Color::new("orange", "#FFA300", (255, 163, 0)),
    Color::new("yellow", "#FFEC27", (255, 236, 39)),
    Color::new("green", "#00E436", (0, 228, 54)),
    Color::new("blue", "#29ADFF", (41, 173, 255)),
    Color::new("lavender", "#83769C", (131, 118, 156)),
    Color::new("pink", "#FF77A8", (255, 119, 168)),
    Color::new("light peach", "#FFCCAA", (255, 204, 170)),
];
