pub const RENDER_INDENT: &str = "  ";
pub const RENDER_PRECISION: usize = 4;
pub const MARGINAL_ROW: &str = "*";
pub const ROOT_PARTITION: &str = "root";
