use crate::{arch::humanize_arch, os::humanize_os};
use lazy_regex::{regex, Lazy};
use log::debug;
use regex::Regex;

/// The OS and CPU architecture inferred from a release asset's filename.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssetPlatform {
    pub os: Option<String>,
    pub arch: Option<String>,
}

// Asset names look like `<name>-<version>-<os>-<arch>.<ext>`, so the first `-<os>-<arch>.` is the
// one we want.
fn os_arch_re() -> &'static Lazy<Regex> {
    regex!(r"-([a-zA-Z]+)-([a-zA-Z0-9_]+)\.")
}

/// Infers the OS and architecture from an asset filename like `tool-1.2.3-linux-amd64.tar.gz`.
///
/// Known Go-style tokens (`darwin`, `linux`, `windows`, `amd64`, `386`, `arm64`, `arm`) are turned
/// into human-readable names. Anything else is returned as-is. If the name does not follow the
/// convention at all, both fields are `None`.
#[must_use]
pub fn parse_asset_name(name: &str) -> AssetPlatform {
    let Some(caps) = os_arch_re().captures(name) else {
        debug!("asset name `{name}` does not contain an OS and architecture");
        return AssetPlatform::default();
    };

    let os_token = &caps[1];
    let arch_token = &caps[2];
    debug!("asset name `{name}` has OS `{os_token}` and architecture `{arch_token}`");

    // The arch label is chosen from the humanized OS, so a literal `MacOS` token counts too.
    let os = humanize_os(os_token);
    let arch = humanize_arch(arch_token, &os);
    AssetPlatform {
        os: Some(os),
        arch: Some(arch),
    }
}
