use crate::os::Os;
use std::str::FromStr;

/// CPU architectures we know how to name nicely, keyed by the tokens Go uses for `GOARCH`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::AsRefStr, strum::EnumString)]
pub(crate) enum Arch {
    #[strum(serialize = "amd64")]
    X86_64,
    #[strum(serialize = "386")]
    X86_32,
    #[strum(serialize = "arm64")]
    Aarch64,
    #[strum(serialize = "arm")]
    Arm,
}

impl Arch {
    pub(crate) fn from_token(token: &str) -> Option<Arch> {
        Arch::from_str(token).ok()
    }

    // Apple Silicon gets its own name since that's what Mac users know it as. `os` is the
    // humanized OS name.
    pub(crate) fn label(self, os: &str) -> &'static str {
        match self {
            Arch::X86_64 => "Intel/AMD 64-bit",
            Arch::X86_32 => "Intel/AMD 32-bit",
            Arch::Aarch64 if os == Os::MacOS.label() => "M1/M2/M3 (ARM 64-bit)",
            Arch::Aarch64 => "ARM 64-bit",
            Arch::Arm => "ARM 32-bit",
        }
    }
}

/// Returns the human-readable name for an architecture token, or the token itself if it is not one
/// we know. `os` is the humanized OS name, which matters because some architectures are named
/// differently per platform.
pub(crate) fn humanize_arch(token: &str, os: &str) -> String {
    Arch::from_token(token).map_or_else(|| token.to_string(), |arch| arch.label(os).to_string())
}
