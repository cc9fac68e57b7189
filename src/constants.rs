// DOM hooks and web-only rendering constants.
//
// Scene tuning lives in `parallax_core::constants`; this module only holds
// what the browser side needs to find elements and set up the surface.

// Element lookup
pub const CANVAS_SELECTOR: &str = "canvas.webgl";
pub const SECTION_SELECTOR: &str = "section";
pub const TITLE_SELECTOR: &str = "h1, h2";

// Title letters
pub const GLYPH_TAG: &str = "span";
pub const GLYPH_CLASS: &str = "glyph";

// Debug panel
pub const PANEL_CLASS: &str = "debug-panel";
pub const PANEL_LABEL: &str = "materialColor";
pub const COLOR_INPUT_ID: &str = "material-color";
pub const PANEL_STYLE: &str = "position:fixed;top:8px;right:8px;z-index:10;\
font:12px system-ui;color:#cfe7ff;background:rgba(10,14,24,0.8);\
padding:6px 10px;border-radius:6px;display:flex;gap:8px;align-items:center";

// Surface clear colours (RGBA). Transparent when the canvas composites with
// premultiplied alpha so the page background shows through.
pub const CLEAR_TRANSPARENT: [f64; 4] = [0.0, 0.0, 0.0, 0.0];
pub const CLEAR_OPAQUE: [f64; 4] = [0.07, 0.07, 0.09, 1.0];

// Two triangles covering a unit square centred on the origin, one particle billboard.
pub const PARTICLE_QUAD: [[f32; 2]; 6] = [
    [-0.5, -0.5],
    [0.5, -0.5],
    [0.5, 0.5],
    [-0.5, -0.5],
    [0.5, 0.5],
    [-0.5, 0.5],
];
