//! Startup banner and farewell line.

use crate::consts::{AUTHOR, HOMEPAGE, REPO};

/// Session configuration for display in the startup banner.
pub struct BannerInfo<'a> {
    pub gateway: &'a str,
    pub risk_tier: &'a str,
}

/// Print the startup banner with session info.
pub fn print_banner(info: &BannerInfo) {
    println!(
        r#"
   ╔═══════════════════════════════════════╗
   ║            CETI  CONSOLE              ║
   ║  all outputs must be authorized, no   ║
   ║        raw model responses            ║
   ╚═══════════════════════════════════════╝

   version   {}
   by        {}
   home      {}
   repo      {}
   gateway   {}
   risk      {}

   type a request and press enter, /help for commands
"#,
        env!("CARGO_PKG_VERSION"),
        AUTHOR,
        HOMEPAGE,
        REPO,
        info.gateway,
        info.risk_tier,
    );
}

/// Print the farewell line.
pub fn print_farewell(queries: usize) {
    if queries > 0 {
        println!("session: {queries} quer{} gated by CETI", if queries == 1 { "y" } else { "ies" });
    }
    println!("goodbye.");
}
