//! Version command

use anyhow::Result;

use crate::app::AppContext;

/// Run the version command.
///
/// # Errors
///
/// Infallible in practice; the signature matches the other handlers.
pub fn run(app: &AppContext) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    if app.is_json() {
        println!(r#"{{"version":"{version}"}}"#);
    } else {
        println!("vcops {version}");
    }
    Ok(())
}
